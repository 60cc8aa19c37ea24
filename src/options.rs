//! Configuration options for reading and writing INI documents.
//!
//! - [`IniOptions`]: Main configuration struct
//! - [`LineEnding`]: Terminator emitted by the serializer
//! - [`TrailingLine`]: What to do with a final line that has no terminator
//!
//! ## Examples
//!
//! ```rust
//! use ini_doc::{from_str_with_options, IniOptions, TrailingLine};
//!
//! // Without a trailing newline the last line is discarded by default...
//! let doc = ini_doc::from_str("[a]\r\nkey = value").unwrap();
//! assert_eq!(doc.get_str("a", "key"), None);
//!
//! // ...unless the reader is told to keep it.
//! let options = IniOptions::new().with_trailing_line(TrailingLine::Keep);
//! let doc = from_str_with_options("[a]\r\nkey = value", options).unwrap();
//! assert_eq!(doc.get_str("a", "key"), Some("value"));
//! ```

/// Capacity of the reader's working buffer unless configured otherwise.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Line terminator written after every serialized line.
///
/// # Examples
///
/// ```rust
/// use ini_doc::LineEnding;
///
/// assert_eq!(LineEnding::CrLf.as_str(), "\r\n");
/// assert_eq!(LineEnding::Lf.as_str(), "\n");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    CrLf,
    Lf,
}

impl LineEnding {
    /// Returns the bytes of this terminator as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Policy for a final line that reaches end of stream without a terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrailingLine {
    /// Drop the partial line and report it through diagnostics.
    #[default]
    Discard,
    /// Classify the partial line as though it had been terminated.
    Keep,
}

/// Configuration options for the streaming reader and the serializer.
///
/// # Examples
///
/// ```rust
/// use ini_doc::{IniOptions, LineEnding};
///
/// let options = IniOptions::new()
///     .with_buffer_size(512)
///     .with_line_ending(LineEnding::Lf);
/// assert_eq!(options.buffer_size, 512);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniOptions {
    pub buffer_size: usize,
    pub line_ending: LineEnding,
    pub trailing_line: TrailingLine,
}

impl Default for IniOptions {
    fn default() -> Self {
        IniOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
            line_ending: LineEnding::default(),
            trailing_line: TrailingLine::default(),
        }
    }
}

impl IniOptions {
    /// Creates default options (4096 byte buffer, CRLF output, discard unterminated tail).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::{IniOptions, TrailingLine};
    ///
    /// let options = IniOptions::new();
    /// assert_eq!(options.buffer_size, 4096);
    /// assert_eq!(options.trailing_line, TrailingLine::Discard);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity of the reader's working buffer.
    ///
    /// The buffer still grows when a single line does not fit. A size of zero
    /// is raised to one.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    /// Sets the terminator written by the serializer.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sets the policy for an unterminated final line.
    #[must_use]
    pub fn with_trailing_line(mut self, trailing_line: TrailingLine) -> Self {
        self.trailing_line = trailing_line;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_buffer_size_is_clamped() {
        assert_eq!(IniOptions::new().with_buffer_size(0).buffer_size, 1);
    }

    #[test]
    fn test_defaults() {
        let options = IniOptions::default();
        assert_eq!(options.buffer_size, DEFAULT_BUFFER_SIZE);
        assert_eq!(options.line_ending, LineEnding::CrLf);
        assert_eq!(options.trailing_line, TrailingLine::Discard);
    }
}
