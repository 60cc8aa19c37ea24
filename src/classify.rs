//! Line classification.
//!
//! Every logical line is assigned one of the [`LineKind`]s by looking at where
//! the structural delimiters sit:
//!
//! - a comment marker: the first `;` or `#`
//! - a bracket pair: the first `[` followed later on the line by a `]`
//! - an assignment marker: the first `=`
//!
//! A bracket pair wins when it starts before any comment marker, an
//! assignment wins when it comes before any comment marker, and a line with
//! only a comment marker is a comment. A bracket pair with nothing between
//! the brackets names no section. Anything else is [`LineKind::Unknown`] and
//! gets dropped by the reader.
//!
//! ```rust
//! use ini_doc::classify::{classify, LineKind};
//!
//! assert_eq!(classify(b"[server]"), LineKind::Section);
//! assert_eq!(classify(b"port = 80 ; http"), LineKind::Property);
//! assert_eq!(classify(b"; port = 80"), LineKind::Comment);
//! assert_eq!(classify(b"just words"), LineKind::Unknown);
//! ```
//!
//! Lines are scanned as raw bytes for the ASCII delimiters only, so text in
//! any ASCII-compatible encoding passes through untouched.

/// Kind of a logical line.
///
/// `Blank` is never returned by [`classify`]; the reader produces it directly
/// for a bare line terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Section,
    Property,
    Unknown,
}

#[inline]
fn is_comment_marker(b: u8) -> bool {
    b == b';' || b == b'#'
}

fn comment_marker(line: &[u8]) -> Option<usize> {
    line.iter().position(|&b| is_comment_marker(b))
}

fn find(line: &[u8], byte: u8) -> Option<usize> {
    line.iter().position(|&b| b == byte)
}

/// Byte offsets of the first `[` and the first `]` after it.
fn bracket_pair(line: &[u8]) -> Option<(usize, usize)> {
    let open = find(line, b'[')?;
    let close = find(&line[open + 1..], b']')? + open + 1;
    Some((open, close))
}

fn trim_spaces(mut bytes: &[u8]) -> &[u8] {
    while let [b' ', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b' '] = bytes {
        bytes = rest;
    }
    bytes
}

/// Classifies a line that has already been stripped of its terminator.
#[must_use]
pub fn classify(line: &[u8]) -> LineKind {
    let comment = comment_marker(line);

    if let Some((open, close)) = bracket_pair(line) {
        return match comment {
            Some(marker) if marker < open => LineKind::Comment,
            _ if close == open + 1 => LineKind::Unknown,
            _ => LineKind::Section,
        };
    }

    match (find(line, b'='), comment) {
        (Some(equals), Some(marker)) if equals < marker => LineKind::Property,
        (Some(_), None) => LineKind::Property,
        (_, Some(_)) => LineKind::Comment,
        (None, None) => LineKind::Unknown,
    }
}

/// Returns the bytes between the bracket pair, verbatim.
///
/// An empty pair `[]` has no name.
///
/// ```rust
/// use ini_doc::classify::section_name;
///
/// assert_eq!(section_name(b"[ spaced ]"), Some(&b" spaced "[..]));
/// assert_eq!(section_name(b"[]"), None);
/// assert_eq!(section_name(b"[open"), None);
/// ```
#[must_use]
pub fn section_name(line: &[u8]) -> Option<&[u8]> {
    bracket_pair(line)
        .filter(|&(open, close)| close > open + 1)
        .map(|(open, close)| &line[open + 1..close])
}

/// Splits a line at its first `=` and trims spaces from both halves.
///
/// The key may come back empty; deciding what to do with that is up to the
/// caller. Returns `None` when the line has no `=`.
///
/// ```rust
/// use ini_doc::classify::split_property;
///
/// assert_eq!(split_property(b"  name =  a=b  "), Some((&b"name"[..], &b"a=b"[..])));
/// assert_eq!(split_property(b"flag ="), Some((&b"flag"[..], &b""[..])));
/// assert_eq!(split_property(b"no assignment"), None);
/// ```
#[must_use]
pub fn split_property(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let equals = find(line, b'=')?;
    Some((trim_spaces(&line[..equals]), trim_spaces(&line[equals + 1..])))
}

/// Returns the text after the first comment marker, leading spaces removed.
///
/// ```rust
/// use ini_doc::classify::comment_text;
///
/// assert_eq!(comment_text(b";   hello ; world"), Some(&b"hello ; world"[..]));
/// assert_eq!(comment_text(b"#"), Some(&b""[..]));
/// assert_eq!(comment_text(b"plain"), None);
/// ```
#[must_use]
pub fn comment_text(line: &[u8]) -> Option<&[u8]> {
    let marker = comment_marker(line)?;
    let mut text = &line[marker + 1..];
    while let [b' ', rest @ ..] = text {
        text = rest;
    }
    Some(text)
}
