//! In-memory model of an INI document.
//!
//! A [`Document`] is an ordered list of [`Entry`] values in original file
//! order. The root document holds [`Section`]s (plus any comments or blank
//! lines that precede the first section); each section owns a nested
//! `Document` body holding its properties, comments and blank lines.
//!
//! ```text
//! Document
//! ├── Comment("generated")
//! ├── Section("server")
//! │   └── Document
//! │       ├── Property(host = localhost)
//! │       └── Blank
//! └── Section("client")
//!     └── Document
//!         └── Property(retries = 3)
//! ```
//!
//! The type is recursive so a body could in principle hold sections of its
//! own, but the reader never builds more than two levels.
//!
//! Names, keys, values and comments are byte strings holding exactly what was
//! read. Nothing is decoded, so files in any ASCII-compatible encoding are
//! written back unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use ini_doc::{Document, Entry};
//!
//! let mut doc = Document::new();
//! doc.append(Entry::comment("generated"));
//! doc.put("server", "host", "localhost").unwrap();
//!
//! assert_eq!(doc.len(), 2);
//! assert_eq!(doc.sections().count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the implicit section that collects properties appearing before any header.
pub const DEFAULT_SECTION: &str = "";

/// One logical line of an INI document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entry {
    /// A single line terminator with no content.
    Blank,
    /// Comment text, without its marker.
    Comment(#[serde(with = "crate::text")] Vec<u8>),
    Property(Property),
    Section(Section),
}

impl Entry {
    /// Creates a comment entry.
    pub fn comment(text: impl Into<Vec<u8>>) -> Self {
        Entry::Comment(text.into())
    }

    /// Creates a property entry.
    pub fn property(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Entry::Property(Property::new(key, value))
    }

    /// Creates a section entry with an empty body.
    pub fn section(name: impl Into<Vec<u8>>) -> Self {
        Entry::Section(Section::new(name))
    }

    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Entry::Blank)
    }

    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Entry::Comment(_))
    }

    #[must_use]
    pub const fn is_property(&self) -> bool {
        matches!(self, Entry::Property(_))
    }

    #[must_use]
    pub const fn is_section(&self) -> bool {
        matches!(self, Entry::Section(_))
    }

    /// Returns the property if this entry is one.
    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Entry::Property(property) => Some(property),
            _ => None,
        }
    }

    /// Returns the section if this entry is one.
    #[must_use]
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            Entry::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Returns the comment text if this entry is a comment.
    #[must_use]
    pub fn as_comment(&self) -> Option<&[u8]> {
        match self {
            Entry::Comment(text) => Some(text),
            _ => None,
        }
    }
}

/// A `key = value` pair, holding the bytes exactly as read. An absent value
/// is stored as an empty byte string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(with = "crate::text")]
    pub key: Vec<u8>,
    #[serde(with = "crate::text")]
    pub value: Vec<u8>,
}

impl Property {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Property {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Property {
    /// Lossy rendering for logs. The serializer writes the raw bytes instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {}",
            String::from_utf8_lossy(&self.key),
            String::from_utf8_lossy(&self.value)
        )
    }
}

/// A named group of entries. The empty name is the default section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(with = "crate::text")]
    pub name: Vec<u8>,
    pub body: Document,
}

impl Section {
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Section {
            name: name.into(),
            body: Document::new(),
        }
    }

    /// Returns `true` for the implicit, unnamed section.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns the value of the first property named `key` in this section.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::Section;
    ///
    /// let mut section = Section::new("db");
    /// section.body.upsert_property("user", "admin");
    /// assert_eq!(section.get("user"), Some(&b"admin"[..]));
    /// assert_eq!(section.get("password"), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.body.find_property(key).map(|p| p.value.as_slice())
    }
}

/// An ordered sequence of entries that exclusively owns them.
///
/// Entries are only ever appended at the tail or updated in place, so
/// iteration order is always the original file order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    entries: Vec<Entry>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Document {
            entries: Vec::new(),
        }
    }

    /// Appends an entry at the tail.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Returns the last entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Iterates over the sections directly owned by this document.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter().filter_map(Entry::as_section)
    }

    /// Iterates over the properties directly owned by this document.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter().filter_map(Entry::as_property)
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }

    /// Returns the section stored at `index`, if that entry is a section.
    pub(crate) fn section_at_mut(&mut self, index: usize) -> Option<&mut Section> {
        match self.entries.get_mut(index) {
            Some(Entry::Section(section)) => Some(section),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Document {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<Entry> for Document {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Document {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<Entry> for Document {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}
