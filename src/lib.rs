//! # ini_doc
//!
//! A streaming parser and serializer for INI-style configuration files,
//! built around an order-preserving document model.
//!
//! ## Key Features
//!
//! - **Streaming**: Input is read in fixed-size chunks; lines that straddle
//!   two reads are reassembled before they are classified
//! - **Byte Transparent**: Names, keys, values and comments are kept as the
//!   exact bytes read, so non-UTF-8 files are written back unchanged
//! - **Order Preserving**: Comments, blank lines and properties keep their
//!   original order, so a document can be written back faithfully
//! - **Section Merging**: A repeated `[name]` header re-opens the existing section
//! - **Upsert API**: [`Document::put`] replaces values in place or appends new ones
//! - **Lenient**: Lines that cannot be parsed are reported through
//!   [`Diagnostics`] and skipped, never fatal
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! let text = "[A]\r\nx = 1\r\n; note\r\ny = 2\r\n\r\n[B]\r\nz = 3\r\n";
//! let mut doc = ini_doc::from_str(text).unwrap();
//!
//! assert_eq!(doc.get_str("A", "x"), Some("1"));
//! assert_eq!(doc.get("B", "z"), Some(&b"3"[..]));
//! assert_eq!(doc.get("A", "z"), None);
//!
//! doc.put("A", "x", "9").unwrap();
//! doc.put("C", "k", "v").unwrap();
//!
//! let out = ini_doc::to_string(&doc).unwrap();
//! assert!(out.starts_with("[A]\r\nx = 9\r\n; note\r\ny = 2\r\n"));
//! assert!(out.ends_with("[C]\r\nk = v\r\n"));
//! ```
//!
//! ### Files
//!
//! ```rust,no_run
//! let mut doc = ini_doc::read("settings.ini")?;
//! doc.put("ui", "theme", "dark")?;
//! ini_doc::save("settings.ini", &doc)?;
//! # Ok::<(), ini_doc::Error>(())
//! ```
//!
//! ### Building documents in code
//!
//! ```rust
//! use ini_doc::ini;
//!
//! let doc = ini! {
//!     "server" => { "host" => "localhost", "port" => "8080" },
//! };
//! assert_eq!(ini_doc::to_string(&doc).unwrap(), "[server]\r\nhost = localhost\r\nport = 8080\r\n");
//! ```
//!
//! ## Format
//!
//! See the [`format`] module for the exact line rules.
//!
//! ## Examples
//!
//! Two `[[example]]` targets are declared in `Cargo.toml`, with their sources
//! in `demos/`:
//!
//! - **`show`** (`demos/show.rs`) - Load a file and log every entry
//! - **`edit`** (`demos/edit.rs`) - Set a value and save the file
//!
//! Run with: `cargo run --example show -- path/to/file.ini`

pub mod classify;
pub mod de;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod format;
pub mod fs;
pub mod macros;
pub mod map;
pub mod options;
mod resolve;
pub mod ser;
mod text;

pub use de::{Deserializer, LineReader};
pub use diagnostics::{hexdump, show, show_with, Diagnostics, Silent, TracingDiagnostics};
pub use document::{Document, Entry, Property, Section, DEFAULT_SECTION};
pub use error::{Error, Result};
pub use fs::{read, read_with_options, save, save_with_options};
pub use map::IniMap;
pub use options::{IniOptions, LineEnding, TrailingLine, DEFAULT_BUFFER_SIZE};
pub use ser::Serializer;

use std::io;

/// Serialize a document to an INI string with CRLF line endings.
///
/// Use [`to_vec`] or [`to_writer`] for documents that may hold bytes that are
/// not UTF-8.
///
/// # Examples
///
/// ```rust
/// use ini_doc::{to_string, Document};
///
/// let mut doc = Document::new();
/// doc.put("", "k", "").unwrap();
/// assert_eq!(to_string(&doc).unwrap(), "k = \r\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] if the document holds text that is not UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(document: &Document) -> Result<String> {
    to_string_with_options(document, IniOptions::default())
}

/// Serialize a document to an INI string with custom options.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(document: &Document, options: IniOptions) -> Result<String> {
    let bytes = to_vec_with_options(document, options)?;
    String::from_utf8(bytes).map_err(|_| Error::invalid_utf8("serialized document"))
}

/// Serialize a document to a byte vector, writing every stored byte unchanged.
///
/// # Examples
///
/// ```rust
/// let input = b"[s]\r\nname = caf\xe9\r\n";
/// let doc = ini_doc::from_slice(input).unwrap();
/// assert_eq!(ini_doc::to_vec(&doc).unwrap(), input);
/// ```
///
/// # Errors
///
/// Writing to memory does not fail; the `Result` mirrors [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec(document: &Document) -> Result<Vec<u8>> {
    to_vec_with_options(document, IniOptions::default())
}

/// Serialize a document to a byte vector with custom options.
///
/// # Errors
///
/// See [`to_vec`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options(document: &Document, options: IniOptions) -> Result<Vec<u8>> {
    let mut serializer = Serializer::new(Vec::with_capacity(256), options);
    serializer.serialize_document(document)?;
    Ok(serializer.into_inner())
}

/// Serialize a document to a writer.
///
/// # Examples
///
/// ```rust
/// let doc = ini_doc::from_str("[s]\r\nk=v\r\n").unwrap();
/// let mut buffer = Vec::new();
/// ini_doc::to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"[s]\r\nk = v\r\n");
/// ```
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W: io::Write>(writer: W, document: &Document) -> Result<()> {
    to_writer_with_options(writer, document, IniOptions::default())
}

/// Serialize a document to a writer with custom options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W: io::Write>(
    writer: W,
    document: &Document,
    options: IniOptions,
) -> Result<()> {
    Serializer::new(writer, options).serialize_document(document)
}

/// Parse a document from a string.
///
/// # Examples
///
/// ```rust
/// let doc = ini_doc::from_str("name = demo\r\n").unwrap();
/// assert_eq!(doc.get_str("", "name"), Some("demo"));
/// ```
///
/// # Errors
///
/// Reading from memory does not fail; the `Result` mirrors [`from_reader`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    from_slice(s.as_bytes())
}

/// Parse a document from a string with custom options.
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: IniOptions) -> Result<Document> {
    from_reader_with(s.as_bytes(), options, &TracingDiagnostics)
}

/// Parse a document from bytes. The bytes need not be UTF-8; they are stored as read.
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    from_reader(v)
}

/// Parse a document from any byte source, reading it in chunks.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let doc = ini_doc::from_reader(Cursor::new(b"[s]\nk = v\n")).unwrap();
/// assert_eq!(doc.get_str("s", "k"), Some("v"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading from the source fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<Document> {
    from_reader_with(reader, IniOptions::default(), &TracingDiagnostics)
}

/// Parse a document from a byte source with custom options and diagnostics.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading from the source fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with<R: io::Read>(
    reader: R,
    options: IniOptions,
    diagnostics: &dyn Diagnostics,
) -> Result<Document> {
    Deserializer::new(reader, options, diagnostics).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "[A]\r\nx = 1\r\n; note\r\ny = 2\r\n\r\n[B]\r\nz = 3\r\n";

    #[test]
    fn test_sample_lookups() {
        let doc = from_str(SAMPLE).unwrap();
        assert_eq!(doc.get_str("A", "x"), Some("1"));
        assert_eq!(doc.get_str("A", "y"), Some("2"));
        assert_eq!(doc.get_str("B", "z"), Some("3"));
        assert_eq!(doc.get("A", "z"), None);
    }

    #[test]
    fn test_normalized_output_is_stable() {
        let doc = from_str(SAMPLE).unwrap();
        assert_eq!(to_string(&doc).unwrap(), SAMPLE);
    }

    #[test]
    fn test_to_writer_matches_to_string() {
        let doc = from_str(SAMPLE).unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(buffer, to_vec(&doc).unwrap());
    }

    #[test]
    fn test_lf_input_crlf_output() {
        let doc = from_str("[s]\nk=v\n").unwrap();
        assert_eq!(to_string(&doc).unwrap(), "[s]\r\nk = v\r\n");
        assert_eq!(
            to_string_with_options(&doc, IniOptions::new().with_line_ending(LineEnding::Lf))
                .unwrap(),
            "[s]\nk = v\n"
        );
    }

    #[test]
    fn test_latin1_bytes_round_trip() {
        let input = b"[caf\xe9]\r\nname = caf\xe9\r\n; r\xe9sum\xe9\r\n";
        let doc = from_slice(input).unwrap();
        assert_eq!(doc.get(&b"caf\xe9"[..], "name"), Some(&b"caf\xe9"[..]));
        assert_eq!(to_vec(&doc).unwrap(), input);
    }

    #[test]
    fn test_to_string_rejects_non_utf8() {
        let doc = from_slice(b"[s]\r\nk = a\xfeb\r\n").unwrap();
        let err = to_string(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8(_)));
        assert_eq!(to_vec(&doc).unwrap(), b"[s]\r\nk = a\xfeb\r\n");
    }
}
