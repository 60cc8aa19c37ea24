//! Reading and saving INI files by path.
//!
//! [`read`] checks that the path names a regular file before opening it, then
//! streams it through the [`Deserializer`](crate::Deserializer). [`save`]
//! truncates or creates the file, serializes the document, flushes, and asks
//! the OS to sync the data to disk.
//!
//! ```rust
//! use ini_doc::Document;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("app.ini");
//!
//! let mut doc = Document::new();
//! doc.put("window", "width", "800").unwrap();
//! ini_doc::save(&path, &doc).unwrap();
//!
//! let loaded = ini_doc::read(&path).unwrap();
//! assert_eq!(loaded.get_str("window", "width"), Some("800"));
//! ```

use crate::de::Deserializer;
use crate::ser::Serializer;
use crate::{Diagnostics, Document, Error, IniOptions, Result, TracingDiagnostics};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads and parses the INI file at `path` with default options.
///
/// # Errors
///
/// Returns [`Error::Io`] if the path cannot be inspected, opened or read, and
/// [`Error::NotRegularFile`] if it is a directory or some other special file.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Document> {
    read_with_options(path, IniOptions::default(), &TracingDiagnostics)
}

/// Reads and parses the INI file at `path`.
///
/// # Errors
///
/// See [`read`].
pub fn read_with_options<P: AsRef<Path>>(
    path: P,
    options: IniOptions,
    diagnostics: &dyn Diagnostics,
) -> Result<Document> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| {
        diagnostics.error(format_args!("stat({}) failed: {}", path.display(), e));
        Error::io(format!("inspecting {}", path.display()), e)
    })?;
    if !metadata.is_file() {
        diagnostics.warn(format_args!("{} is not a regular file", path.display()));
        return Err(Error::not_regular_file(path));
    }

    let file = File::open(path).map_err(|e| {
        diagnostics.error(format_args!("{} open failed: {}", path.display(), e));
        Error::io(format!("opening {}", path.display()), e)
    })?;

    Deserializer::new(file, options, diagnostics).parse()
}

/// Serializes `document` into the file at `path` with default options.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written. A failure
/// to sync after all bytes were written is only logged, since the file
/// already holds the full document.
pub fn save<P: AsRef<Path>>(path: P, document: &Document) -> Result<()> {
    save_with_options(path, document, IniOptions::default(), &TracingDiagnostics)
}

/// Serializes `document` into the file at `path`.
///
/// # Errors
///
/// See [`save`].
pub fn save_with_options<P: AsRef<Path>>(
    path: P,
    document: &Document,
    options: IniOptions,
    diagnostics: &dyn Diagnostics,
) -> Result<()> {
    let path = path.as_ref();

    let file = File::create(path).map_err(|e| {
        diagnostics.error(format_args!("{} open failed: {}", path.display(), e));
        Error::io(format!("creating {}", path.display()), e)
    })?;

    let mut serializer = Serializer::new(BufWriter::new(file), options);
    serializer.serialize_document(document)?;

    let mut writer = serializer.into_inner();
    writer
        .flush()
        .map_err(|e| Error::io(format!("writing {}", path.display()), e))?;

    match writer.into_inner() {
        Ok(file) => {
            if let Err(e) = file.sync_all() {
                diagnostics.error(format_args!("{} fsync failed: {}", path.display(), e));
            }
        }
        Err(e) => {
            diagnostics.error(format_args!("{} flush failed: {}", path.display(), e.error()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Silent;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_with_options(dir.path().join("absent.ini"), IniOptions::new(), &Silent)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_read_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = read_with_options(dir.path(), IniOptions::new(), &Silent).unwrap_err();
        assert!(matches!(err, Error::NotRegularFile(_)));
    }

    #[test]
    fn test_save_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t.ini");
        std::fs::write(&path, "[old]\r\nstale = yes\r\n; lots of old content here\r\n").unwrap();

        let mut doc = Document::new();
        doc.put("new", "k", "v").unwrap();
        save_with_options(&path, &doc, IniOptions::new(), &Silent).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[new]\r\nk = v\r\n");
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no").join("such").join("dir.ini");
        let err = save_with_options(&path, &Document::new(), IniOptions::new(), &Silent)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
