//! Streaming INI reader.
//!
//! Reading is split in two layers:
//!
//! - [`LineReader`] pulls fixed-size chunks from any [`io::Read`] and hands
//!   out complete logical lines. Bytes after the last terminator in a chunk
//!   are carried over to the front of the buffer and completed by the next
//!   read, so chunk boundaries never split a line.
//! - [`Deserializer`] classifies each line and routes it into a [`Document`],
//!   merging repeated section headers into the section that already exists.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! let doc = ini_doc::from_str("[A]\r\nx = 1\r\n").unwrap();
//! assert_eq!(doc.get_str("A", "x"), Some("1"));
//! ```
//!
//! Driving the line layer directly:
//!
//! ```rust
//! use ini_doc::de::{Line, LineReader};
//!
//! let mut lines = LineReader::with_capacity(&b"a\r\n\nb"[..], 2);
//! assert_eq!(lines.next_line().unwrap(), Some(Line::Text(b"a")));
//! assert_eq!(lines.next_line().unwrap(), Some(Line::Blank));
//! assert_eq!(lines.next_line().unwrap(), Some(Line::Unterminated(b"b")));
//! assert_eq!(lines.next_line().unwrap(), None);
//! ```

use crate::classify::{classify, comment_text, section_name, split_property, LineKind};
use crate::options::{IniOptions, TrailingLine};
use crate::{Diagnostics, Document, Entry, Error, Result};
use std::io::{self, Read};

/// One logical line produced by a [`LineReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// A terminator with nothing in front of it.
    Blank,
    /// Line content without its terminator.
    Text(&'a [u8]),
    /// Content that reached end of stream without a terminator.
    Unterminated(&'a [u8]),
}

/// Reassembles logical lines from a chunked byte source.
///
/// `\r`, `\n` and `\r\n` each end a line; a `\r\n` pair counts once even when
/// the `\r` and `\n` land in different reads.
pub struct LineReader<R> {
    source: R,
    buffer: Vec<u8>,
    /// Start of the unconsumed region.
    start: usize,
    /// End of valid data.
    filled: usize,
    eof: bool,
    /// The previous line ended in `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
}

impl<R: Read> LineReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_capacity(source, crate::options::DEFAULT_BUFFER_SIZE)
    }

    /// Creates a reader whose working buffer starts at `capacity` bytes.
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        LineReader {
            source,
            buffer: vec![0; capacity.max(1)],
            start: 0,
            filled: 0,
            eof: false,
            skip_lf: false,
        }
    }

    /// Current size of the working buffer.
    ///
    /// This only grows past the initial capacity when a single line is longer
    /// than the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the next logical line, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying reader.
    pub fn next_line(&mut self) -> io::Result<Option<Line<'_>>> {
        loop {
            if self.skip_lf {
                let next = self.buffer[self.start..self.filled].first().copied();
                match next {
                    Some(b'\n') => {
                        self.start += 1;
                        self.skip_lf = false;
                    }
                    Some(_) => self.skip_lf = false,
                    None if self.eof => self.skip_lf = false,
                    None => {
                        self.fill()?;
                        continue;
                    }
                }
            }

            let pending = &self.buffer[self.start..self.filled];
            if let Some(offset) = pending.iter().position(|&b| b == b'\r' || b == b'\n') {
                let line_start = self.start;
                let line_end = line_start + offset;
                self.skip_lf = self.buffer[line_end] == b'\r';
                self.start = line_end + 1;

                return Ok(Some(if offset == 0 {
                    Line::Blank
                } else {
                    Line::Text(&self.buffer[line_start..line_end])
                }));
            }

            if self.eof {
                if pending.is_empty() {
                    return Ok(None);
                }
                let tail_start = self.start;
                self.start = self.filled;
                return Ok(Some(Line::Unterminated(&self.buffer[tail_start..self.filled])));
            }

            self.fill()?;
        }
    }

    /// Moves the carry-over to the front of the buffer and reads more bytes after it.
    fn fill(&mut self) -> io::Result<()> {
        if self.start > 0 {
            self.buffer.copy_within(self.start..self.filled, 0);
            self.filled -= self.start;
            self.start = 0;
        }

        if self.filled == self.buffer.len() {
            let grown = self.buffer.len() * 2;
            self.buffer.resize(grown, 0);
        }

        let read = self.source.read(&mut self.buffer[self.filled..])?;
        if read == 0 {
            self.eof = true;
        }
        self.filled += read;
        Ok(())
    }
}

/// Builds a [`Document`] from a byte source.
///
/// Properties land in the current section: the one most recently selected by
/// a header, or the default section (created on first use) when no header
/// has been seen. Comments and blank lines go into the current section's body
/// too, or into the root document before any section exists.
pub struct Deserializer<'d, R> {
    lines: LineReader<R>,
    options: IniOptions,
    builder: Builder<'d>,
}

/// Routing state, kept apart from the line reader so a borrowed line can be
/// consumed without copying it.
struct Builder<'d> {
    diagnostics: &'d dyn Diagnostics,
    document: Document,
    /// Root index of the current section.
    current: Option<usize>,
    line_number: usize,
}

impl<'d, R: Read> Deserializer<'d, R> {
    pub fn new(source: R, options: IniOptions, diagnostics: &'d dyn Diagnostics) -> Self {
        Deserializer {
            lines: LineReader::with_capacity(source, options.buffer_size),
            options,
            builder: Builder {
                diagnostics,
                document: Document::new(),
                current: None,
                line_number: 0,
            },
        }
    }

    /// Reads the whole source and returns the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source fails; lines that cannot be parsed
    /// are reported through diagnostics and skipped.
    pub fn parse(mut self) -> Result<Document> {
        let mut capacity = self.lines.capacity();

        loop {
            let line = self.lines.next_line().map_err(|e| {
                Error::io(format!("reading line {}", self.builder.line_number + 1), e)
            })?;
            self.builder.line_number += 1;

            match line {
                None => break,
                Some(Line::Blank) => self.builder.push(Entry::Blank),
                Some(Line::Text(bytes)) => self.builder.consume(bytes),
                Some(Line::Unterminated(bytes)) => match self.options.trailing_line {
                    TrailingLine::Keep => self.builder.consume(bytes),
                    TrailingLine::Discard => {
                        let diagnostics = self.builder.diagnostics;
                        diagnostics.warn(format_args!(
                            "line {}: discarding unterminated final line ({} bytes)",
                            self.builder.line_number,
                            bytes.len()
                        ));
                        diagnostics.dump("unterminated line", bytes);
                    }
                },
            }

            if self.lines.capacity() != capacity {
                capacity = self.lines.capacity();
                self.builder.diagnostics.debug(format_args!(
                    "line {}: working buffer grown to {} bytes",
                    self.builder.line_number, capacity
                ));
            }
        }

        Ok(self.builder.document)
    }
}

impl Builder<'_> {
    fn consume(&mut self, text: &[u8]) {
        match classify(text) {
            LineKind::Section => {
                if let Some(name) = section_name(text) {
                    self.current = Some(self.document.search_section_index(name));
                }
            }
            LineKind::Property => self.insert_property(text),
            LineKind::Comment => match comment_text(text) {
                Some(comment) if !comment.is_empty() => self.push(Entry::comment(comment)),
                _ => self.diagnostics.warn(format_args!(
                    "line {}: dropping empty comment",
                    self.line_number
                )),
            },
            LineKind::Blank => self.push(Entry::Blank),
            LineKind::Unknown => self.diagnostics.debug(format_args!(
                "line {}: ignoring unrecognised line {:?}",
                self.line_number,
                String::from_utf8_lossy(text)
            )),
        }
    }

    fn insert_property(&mut self, text: &[u8]) {
        if self.current.is_none() {
            // a line without a usable key must not create the default section
            if !matches!(split_property(text), Some((key, _)) if !key.is_empty()) {
                self.diagnostics.warn(format_args!(
                    "line {}: property discarded: key is empty",
                    self.line_number
                ));
                return;
            }
            self.current = Some(self.document.search_section_index(b""));
        }

        let Some(section) = self
            .current
            .and_then(|index| self.document.section_at_mut(index))
        else {
            return;
        };
        let inserted = section.body.insert_property_line(text).map(|_| ());
        if let Err(err) = inserted {
            self.diagnostics.warn(format_args!(
                "line {}: property discarded: {}",
                self.line_number, err
            ));
        }
    }

    /// Appends a comment or blank to the current section, or to the root before any section.
    fn push(&mut self, entry: Entry) {
        match self.current.and_then(|index| self.document.section_at_mut(index)) {
            Some(section) => section.body.append(entry),
            None => self.document.append(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Silent, DEFAULT_SECTION};
    use std::cell::RefCell;
    use std::fmt;

    /// Hands out at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[derive(Default)]
    struct Recorder {
        warnings: RefCell<Vec<String>>,
        debug: RefCell<Vec<String>>,
    }

    impl Diagnostics for Recorder {
        fn debug(&self, message: fmt::Arguments<'_>) {
            self.debug.borrow_mut().push(message.to_string());
        }
        fn warn(&self, message: fmt::Arguments<'_>) {
            self.warnings.borrow_mut().push(message.to_string());
        }
        fn error(&self, _message: fmt::Arguments<'_>) {}
    }

    #[derive(Debug, PartialEq)]
    enum Owned {
        Blank,
        Text(Vec<u8>),
        Tail(Vec<u8>),
    }

    fn text(bytes: &[u8]) -> Owned {
        Owned::Text(bytes.to_vec())
    }

    fn collect(data: &[u8], capacity: usize, step: usize) -> Vec<Owned> {
        let mut reader = LineReader::with_capacity(Trickle { data, step }, capacity);
        let mut out = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            out.push(match line {
                Line::Blank => Owned::Blank,
                Line::Text(bytes) => Owned::Text(bytes.to_vec()),
                Line::Unterminated(bytes) => Owned::Tail(bytes.to_vec()),
            });
        }
        out
    }

    fn parse(text: &str) -> Document {
        Deserializer::new(text.as_bytes(), IniOptions::new(), &Silent)
            .parse()
            .unwrap()
    }

    #[test]
    fn test_terminator_variants() {
        let lines = collect(b"a\rb\nc\r\nd\n\re", 64, 64);
        assert_eq!(
            lines,
            vec![
                text(b"a"),
                text(b"b"),
                text(b"c"),
                text(b"d"),
                Owned::Blank,
                Owned::Tail(b"e".to_vec()),
            ]
        );
    }

    #[test]
    fn test_crlf_split_across_reads() {
        // the \r arrives at the end of one read and the \n at the start of the next
        let lines = collect(b"ab\r\ncd\r\n", 64, 3);
        assert_eq!(lines, vec![text(b"ab"), text(b"cd")]);
    }

    #[test]
    fn test_blank_count_is_exact() {
        let lines = collect(b"\r\n\r\n\n\r", 4, 1);
        assert_eq!(
            lines,
            vec![Owned::Blank, Owned::Blank, Owned::Blank, Owned::Blank]
        );
    }

    #[test]
    fn test_long_line_grows_buffer() {
        let long = "x".repeat(100);
        let data = format!("{}\r\nshort\r\n", long);
        let mut reader = LineReader::with_capacity(data.as_bytes(), 8);
        assert_eq!(
            reader.next_line().unwrap(),
            Some(Line::Text(long.as_bytes()))
        );
        assert!(reader.capacity() >= 100);
        assert_eq!(reader.next_line().unwrap(), Some(Line::Text(b"short")));
        assert_eq!(reader.next_line().unwrap(), None);
    }

    #[test]
    fn test_empty_source() {
        assert!(collect(b"", 16, 16).is_empty());
    }

    #[test]
    fn test_read_error_is_reported() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "boom"))
            }
        }

        let err = Deserializer::new(Broken, IniOptions::new(), &Silent)
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_comments_and_blanks_follow_current_section() {
        let doc = parse("; head\r\n\r\n[A]\r\nx = 1\r\n; note\r\ny = 2\r\n\r\n[B]\r\nz = 3\r\n");

        assert_eq!(doc.len(), 4);
        assert_eq!(doc.entries()[0], Entry::comment("head"));
        assert_eq!(doc.entries()[1], Entry::Blank);

        let a = doc.find_section("A").unwrap();
        assert_eq!(
            a.body.entries(),
            &[
                Entry::property("x", "1"),
                Entry::comment("note"),
                Entry::property("y", "2"),
                Entry::Blank,
            ]
        );
        assert_eq!(doc.get_str("B", "z"), Some("3"));
    }

    #[test]
    fn test_duplicate_header_merges() {
        let doc = parse("[A]\r\nx = 1\r\n[B]\r\ny = 2\r\n[A]\r\nz = 3\r\n");

        assert_eq!(doc.sections().count(), 2);
        let keys: Vec<_> = doc
            .find_section("A")
            .unwrap()
            .body
            .properties()
            .map(|p| p.key.as_slice())
            .collect();
        assert_eq!(keys, vec![&b"x"[..], &b"z"[..]]);
        assert_eq!(doc.get_str("B", "z"), None);
    }

    #[test]
    fn test_leading_properties_use_default_section() {
        let doc = parse("; top\r\na = 1\r\n; inside default\r\n[S]\r\nb = 2\r\n");

        assert_eq!(doc.entries()[0], Entry::comment("top"));
        let default = doc.find_section(DEFAULT_SECTION).unwrap();
        assert_eq!(
            default.body.entries(),
            &[Entry::property("a", "1"), Entry::comment("inside default")]
        );
        assert_eq!(doc.get_str("S", "b"), Some("2"));
    }

    #[test]
    fn test_duplicate_keys_are_kept_while_parsing() {
        let doc = parse("[s]\r\nk = 1\r\nk = 2\r\n");
        assert_eq!(doc.find_section("s").unwrap().body.len(), 2);
        assert_eq!(doc.get_str("s", "k"), Some("1"));
    }

    #[test]
    fn test_dropped_lines_are_reported() {
        let recorder = Recorder::default();
        let doc = Deserializer::new(
            &b" = v\r\n;   \r\nnonsense\r\n[s]\r\ntail = 1"[..],
            IniOptions::new(),
            &recorder,
        )
        .parse()
        .unwrap();

        assert_eq!(doc.len(), 1);
        assert!(doc.find_section("s").unwrap().body.is_empty());
        assert!(doc.find_section(DEFAULT_SECTION).is_none());

        let warnings = recorder.warnings.borrow();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("line 1"));
        assert!(warnings[1].contains("empty comment"));
        assert!(warnings[2].contains("unterminated"));
        assert!(recorder
            .debug
            .borrow()
            .iter()
            .any(|m| m.contains("nonsense")));
    }

    #[test]
    fn test_trailing_line_keep() {
        let doc = Deserializer::new(
            &b"[s]\r\ntail = 1"[..],
            IniOptions::new().with_trailing_line(TrailingLine::Keep),
            &Silent,
        )
        .parse()
        .unwrap();
        assert_eq!(doc.get_str("s", "tail"), Some("1"));
    }

    #[test]
    fn test_non_utf8_bytes_are_kept() {
        let recorder = Recorder::default();
        let doc = Deserializer::new(
            &b"[caf\xe9]\r\nk\xf6 = \xff\xfe\r\n; \x80\r\n"[..],
            IniOptions::new(),
            &recorder,
        )
        .parse()
        .unwrap();

        let section = doc.find_section(&b"caf\xe9"[..]).unwrap();
        assert_eq!(section.get(&b"k\xf6"[..]), Some(&b"\xff\xfe"[..]));
        assert_eq!(section.body.entries()[1], Entry::comment(&b"\x80"[..]));
        assert!(recorder.warnings.borrow().is_empty());
    }

    #[test]
    fn test_empty_brackets_are_ignored() {
        let recorder = Recorder::default();
        let doc = Deserializer::new(
            &b"[A]\r\nx = 1\r\n[]\r\ny = 2\r\n"[..],
            IniOptions::new(),
            &recorder,
        )
        .parse()
        .unwrap();

        assert_eq!(doc.len(), 1);
        assert!(doc.find_section(DEFAULT_SECTION).is_none());
        assert_eq!(doc.get_str("A", "y"), Some("2"));
        assert!(recorder.debug.borrow().iter().any(|m| m.contains("[]")));
    }

    #[test]
    fn test_chunk_size_does_not_change_result() {
        let text = "; c\r\n[A]\r\nkey = value\r\n\r\n\r\n[B]\r\nother = thing\r\n";
        let expected = parse(text);
        for capacity in 1..16 {
            for step in 1..8 {
                let doc = Deserializer::new(
                    Trickle {
                        data: text.as_bytes(),
                        step,
                    },
                    IniOptions::new().with_buffer_size(capacity),
                    &Silent,
                )
                .parse()
                .unwrap();
                assert_eq!(doc, expected, "capacity {} step {}", capacity, step);
            }
        }
    }
}
