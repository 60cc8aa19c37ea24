//! Diagnostic output for the reader, the writer and [`show`].
//!
//! Nothing in this crate logs through globals directly. Every component that
//! has something to report takes a [`Diagnostics`] implementation, with one
//! method per severity plus a hex [`dump`](Diagnostics::dump) for raw bytes.
//!
//! - [`TracingDiagnostics`] forwards to the `tracing` macros (target `ini_doc`)
//! - [`Silent`] discards everything
//!
//! ## Examples
//!
//! ```rust
//! use ini_doc::{from_reader_with, Diagnostics, IniOptions};
//! use std::cell::RefCell;
//! use std::fmt;
//!
//! #[derive(Default)]
//! struct Warnings(RefCell<Vec<String>>);
//!
//! impl Diagnostics for Warnings {
//!     fn debug(&self, _: fmt::Arguments<'_>) {}
//!     fn warn(&self, message: fmt::Arguments<'_>) {
//!         self.0.borrow_mut().push(message.to_string());
//!     }
//!     fn error(&self, _: fmt::Arguments<'_>) {}
//! }
//!
//! let warnings = Warnings::default();
//! let doc = from_reader_with(&b" = nameless\r\n"[..], IniOptions::new(), &warnings).unwrap();
//! assert!(doc.is_empty());
//! assert_eq!(warnings.0.borrow().len(), 1);
//! ```

use crate::{Document, Entry};
use std::fmt::{self, Write as _};

/// Sink for messages produced while reading, writing or dumping a document.
pub trait Diagnostics {
    fn debug(&self, message: fmt::Arguments<'_>);
    fn warn(&self, message: fmt::Arguments<'_>);
    fn error(&self, message: fmt::Arguments<'_>);

    /// Reports raw bytes as a [`hexdump`] at debug level.
    fn dump(&self, title: &str, bytes: &[u8]) {
        self.debug(format_args!("{}", hexdump(title, bytes)));
    }
}

/// Default diagnostics: forwards every message to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(target: "ini_doc", "{}", message);
    }

    fn warn(&self, message: fmt::Arguments<'_>) {
        tracing::warn!(target: "ini_doc", "{}", message);
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        tracing::error!(target: "ini_doc", "{}", message);
    }
}

/// Diagnostics that drop every message.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    fn debug(&self, _message: fmt::Arguments<'_>) {}
    fn warn(&self, _message: fmt::Arguments<'_>) {}
    fn error(&self, _message: fmt::Arguments<'_>) {}

    fn dump(&self, _title: &str, _bytes: &[u8]) {}
}

const DUMP_ROW: usize = 16;
// 16 bytes as "XX " plus one extra space after every group of four
const DUMP_HEX_WIDTH: usize = DUMP_ROW * 3 + DUMP_ROW / 4;

/// Renders bytes as a classic hex dump.
///
/// Each row holds 16 bytes: the offset, the bytes in hex grouped by four,
/// then the printable ASCII characters with `.` standing in for the rest.
///
/// ```rust
/// use ini_doc::hexdump;
///
/// let dump = hexdump("tail", b"k=v\r\n");
/// assert!(dump.starts_with("***** tail 5 bytes *****\n"));
/// assert!(dump.contains("<0x0000> 6B 3D 76 0D  0A "));
/// assert!(dump.ends_with("k=v..\n"));
/// ```
#[must_use]
pub fn hexdump(title: &str, bytes: &[u8]) -> String {
    let mut out = format!("***** {} {} bytes *****\n", title, bytes.len());

    for (row, chunk) in bytes.chunks(DUMP_ROW).enumerate() {
        let mut hex = String::with_capacity(DUMP_HEX_WIDTH);
        for (i, byte) in chunk.iter().enumerate() {
            let _ = write!(hex, "{:02X} ", byte);
            if i % 4 == 3 {
                hex.push(' ');
            }
        }

        let ascii: String = chunk
            .iter()
            .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { '.' })
            .collect();

        let _ = writeln!(
            out,
            "<0x{:04X}> {:<width$}{}",
            row * DUMP_ROW,
            hex,
            ascii,
            width = DUMP_HEX_WIDTH
        );
    }

    out
}

/// Writes every entry of `document` to the default [`TracingDiagnostics`] at debug level.
pub fn show(document: &Document) {
    show_with(document, &TracingDiagnostics);
}

/// Writes one debug line per entry, recursing into section bodies.
///
/// Text that is not UTF-8 is shown with U+FFFD in place of the bad bytes.
/// The document itself is not changed.
pub fn show_with(document: &Document, diagnostics: &dyn Diagnostics) {
    for entry in document {
        match entry {
            Entry::Section(section) => {
                diagnostics.debug(format_args!(
                    "<INI|{:>12}> {}",
                    "Section",
                    String::from_utf8_lossy(&section.name)
                ));
                show_with(&section.body, diagnostics);
            }
            Entry::Property(property) => {
                diagnostics.debug(format_args!("<INI|{:>12}> {}", "Property", property));
            }
            Entry::Comment(text) => {
                diagnostics.debug(format_args!(
                    "<INI|{:>12}> {}",
                    "Comment",
                    String::from_utf8_lossy(text)
                ));
            }
            Entry::Blank => diagnostics.debug(format_args!("<INI|{:>12}>", "Blank")),
        }
    }
}
