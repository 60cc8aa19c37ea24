//! The INI format as read and written by this crate.
//!
//! This module only holds documentation.
//!
//! # Lines
//!
//! A file is a sequence of lines. `\r\n`, `\n` and a lone `\r` all end a
//! line. Each line is one of:
//!
//! | Kind | Recognised by | Example |
//! |------|---------------|---------|
//! | Blank | a terminator with nothing before it | |
//! | Section | a `[` followed later by `]`, before any comment marker | `[server]` |
//! | Property | an `=` before any comment marker | `port = 8080` |
//! | Comment | a `;` or `#` not preceded by the above | `; generated` |
//! | Unknown | none of the above | `stray text` |
//!
//! Unknown lines are dropped on read and never written back. A line holding
//! only spaces is unknown, not blank.
//!
//! Lines are split on ASCII delimiters only. Every other byte, including
//! bytes that are not valid UTF-8, is kept as read and written back unchanged.
//!
//! ## Precedence
//!
//! The first `;` or `#` on a line is its comment marker. Then:
//!
//! 1. A bracket pair whose `[` comes before the marker (or with no marker) makes
//!    a section, unless the brackets are empty: `[]` is an unknown line.
//! 2. A bracket pair after the marker makes a comment.
//! 3. An `=` before the marker (or with no marker) makes a property.
//! 4. A marker on its own makes a comment.
//!
//! So `path = [x]` is a section named `x`, while `a = 1 ; note` is a property
//! whose value is `1 ; note`.
//!
//! # Sections
//!
//! ```text
//! [name]
//! ```
//!
//! The name is everything between `[` and the first `]` after it, with no
//! trimming. An empty name is not a header, so `[]` is dropped and the
//! current section carries on. A header that repeats an earlier name re-opens that section:
//! the following properties are added to it, and the file is written back
//! with a single header for it.
//!
//! Properties that appear before any header belong to the *default section*,
//! whose name is the empty string. It has no header on output, and when it is
//! created by [`Document::put`](crate::Document::put) it goes before the first
//! named section.
//!
//! # Properties
//!
//! ```text
//! key = value
//! ```
//!
//! The line is split at its first `=`, and spaces (not tabs) are trimmed from
//! both sides of each half. A property with an empty key is dropped. An empty
//! value is kept as the empty string. Values are opaque bytes, with no quoting,
//! escaping or line continuation.
//!
//! When reading, repeated keys within a section are all kept, and lookups see
//! the first. [`Document::put`](crate::Document::put) updates the first one in
//! place.
//!
//! # Comments
//!
//! The comment text is what follows the marker, with leading spaces removed.
//! A marker with no text after it is dropped. On output every comment is
//! written as `; text`, whichever marker it was read with.
//!
//! # Output
//!
//! Output is normalized:
//!
//! ```text
//! ; comment
//! [section]
//! key = value
//! empty =
//! ```
//!
//! Lines end in `\r\n` unless [`LineEnding::Lf`](crate::LineEnding::Lf) is
//! configured. Reading the output back gives the same sections, properties,
//! comments and blank lines as the original document.
//!
//! # End of input
//!
//! A final line with no terminator is discarded by default. Set
//! [`TrailingLine::Keep`](crate::TrailingLine::Keep) to read it as a normal line.
