//! Error types for INI reading, writing and mutation.
//!
//! Parsing is lenient: a line the classifier cannot make sense of is dropped
//! and reported through [`Diagnostics`](crate::Diagnostics), never returned as
//! an error. The variants below cover the failures a caller has to handle.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: opening, inspecting, reading or writing a byte source/sink
//! - **Not a File**: [`read`](crate::read) was pointed at a directory or device
//! - **Invalid Arguments**: a property without a key, or a raw property line without `=`
//! - **Invalid UTF-8**: text was requested as a `String` but the document holds other bytes
//!
//! ## Examples
//!
//! ```rust
//! use ini_doc::{Document, Error};
//!
//! let mut doc = Document::new();
//! let err = doc.put("server", "", "8080").unwrap_err();
//! assert!(matches!(err, Error::InvalidArgument(_)));
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents all possible errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while reading or writing, with a short description of the step that failed
    #[error("IO error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The path exists but does not name a regular file
    #[error("Not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    /// A required argument was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Raw bytes could not be returned as UTF-8 text
    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(String),
}

impl Error {
    /// Creates an I/O error, recording what was being attempted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::Error;
    /// use std::io;
    ///
    /// let err = Error::io("opening settings.ini", io::Error::from(io::ErrorKind::NotFound));
    /// assert!(err.to_string().contains("opening settings.ini"));
    /// ```
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(msg: &str) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates an error for bytes that are not valid UTF-8, naming where they came from.
    pub fn invalid_utf8(context: impl Into<String>) -> Self {
        Error::InvalidUtf8(context.into())
    }

    /// Creates an error for a path that is not a regular file.
    pub fn not_regular_file(path: impl Into<PathBuf>) -> Self {
        Error::NotRegularFile(path.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
