//! INI serialization.
//!
//! The [`Serializer`] walks a [`Document`] in order and writes normalized text:
//!
//! - `[name]` for a named section, followed by its body; the default section
//!   writes no header, only its body
//! - `key = value` for a property (`key = ` when the value is empty)
//! - `; text` for a comment, whichever marker it was read with
//! - a bare terminator for a blank line
//!
//! Names, keys, values and comments are written as the exact bytes stored
//! in the document. Every line ends with the configured
//! [`LineEnding`](crate::LineEnding), CRLF by default.
//!
//! ## Usage
//!
//! ```rust
//! use ini_doc::{to_string, Document};
//!
//! let mut doc = Document::new();
//! doc.put("server", "port", "8080").unwrap();
//! assert_eq!(to_string(&doc).unwrap(), "[server]\r\nport = 8080\r\n");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use ini_doc::{IniOptions, LineEnding, Serializer};
//!
//! let doc = ini_doc::from_str("# hello\r\n").unwrap();
//! let mut serializer = Serializer::new(Vec::new(), IniOptions::new().with_line_ending(LineEnding::Lf));
//! serializer.serialize_document(&doc).unwrap();
//! assert_eq!(serializer.into_inner(), b"; hello\n");
//! ```

use crate::{Document, Entry, Error, IniOptions, Result};
use std::io::{self, Write};

/// Writes documents to any [`Write`] sink.
pub struct Serializer<W> {
    writer: W,
    options: IniOptions,
}

impl<W: Write> Serializer<W> {
    pub fn new(writer: W, options: IniOptions) -> Self {
        Serializer { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes every entry of `document`, recursing into section bodies.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink rejects a write.
    pub fn serialize_document(&mut self, document: &Document) -> Result<()> {
        for entry in document {
            self.serialize_entry(entry)?;
        }
        Ok(())
    }

    /// Writes a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink rejects a write.
    pub fn serialize_entry(&mut self, entry: &Entry) -> Result<()> {
        match entry {
            Entry::Section(section) => {
                if !section.is_default() {
                    self.write_line(b"[", &section.name, b"]").map_err(|e| {
                        Error::io(
                            format!("writing section [{}]", String::from_utf8_lossy(&section.name)),
                            e,
                        )
                    })?;
                }
                self.serialize_document(&section.body)
            }
            Entry::Property(property) => self
                .write_line(&property.key, b" = ", &property.value)
                .map_err(|e| {
                    Error::io(
                        format!("writing property {}", String::from_utf8_lossy(&property.key)),
                        e,
                    )
                }),
            Entry::Comment(text) => self
                .write_line(b"; ", text, b"")
                .map_err(|e| Error::io("writing comment", e)),
            Entry::Blank => self
                .write_line(b"", b"", b"")
                .map_err(|e| Error::io("writing blank line", e)),
        }
    }

    fn write_line(&mut self, head: &[u8], text: &[u8], tail: &[u8]) -> io::Result<()> {
        self.writer.write_all(head)?;
        self.writer.write_all(text)?;
        self.writer.write_all(tail)?;
        self.writer
            .write_all(self.options.line_ending.as_str().as_bytes())
    }
}
