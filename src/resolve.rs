//! Section and property lookup, find-or-create, and upsert.
//!
//! These are the operations shared by the reader (which merges repeated
//! section headers into one section) and by the mutation API.
//!
//! - [`Document::find_section`] / [`Document::find_property`]: first match wins
//! - [`Document::search_section`]: find-or-create, the merge point for duplicate headers
//! - [`Document::insert_property_line`]: append a parsed line, duplicates allowed
//! - [`Document::put`] / [`Document::get`]: the upsert and lookup pair
//!
//! All lookups are linear scans in document order, comparing raw bytes.
//! Names and keys can be given as anything that is `AsRef<[u8]>`, which
//! includes `&str`.
//!
//! ## Examples
//!
//! ```rust
//! use ini_doc::Document;
//!
//! let mut doc = Document::new();
//! doc.put("A", "x", "1").unwrap();
//! doc.put("A", "y", "2").unwrap();
//!
//! // Replacing a value keeps the property where it was.
//! assert_eq!(doc.put("A", "x", "9").unwrap(), Some(b"1".to_vec()));
//! let keys: Vec<_> = doc.find_section("A").unwrap().body.properties().map(|p| p.key.as_slice()).collect();
//! assert_eq!(keys, vec![&b"x"[..], &b"y"[..]]);
//! ```

use crate::classify::split_property;
use crate::{Document, Entry, Error, Property, Result, Section};

impl Document {
    /// Returns the first section named `name`.
    ///
    /// The empty name matches the default section.
    #[must_use]
    pub fn find_section(&self, name: impl AsRef<[u8]>) -> Option<&Section> {
        let name = name.as_ref();
        self.sections().find(|section| section.name == name)
    }

    /// Mutable form of [`Document::find_section`].
    pub fn find_section_mut(&mut self, name: impl AsRef<[u8]>) -> Option<&mut Section> {
        let name = name.as_ref();
        self.entries_mut().iter_mut().find_map(|entry| match entry {
            Entry::Section(section) if section.name == name => Some(section),
            _ => None,
        })
    }

    /// Returns the section named `name`, appending an empty one if there is none.
    ///
    /// A new default section is the exception: it goes in front of the first
    /// named section, since it is written without a header and would
    /// otherwise read back as part of the section before it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.search_section("db").body.upsert_property("user", "admin");
    /// doc.search_section("db").body.upsert_property("pass", "secret");
    /// assert_eq!(doc.sections().count(), 1);
    /// ```
    pub fn search_section(&mut self, name: impl AsRef<[u8]>) -> &mut Section {
        let index = self.search_section_index(name.as_ref());
        match &mut self.entries_mut()[index] {
            Entry::Section(section) => section,
            _ => unreachable!("search_section_index always points at a section"),
        }
    }

    /// Index-returning form of [`Document::search_section`], used by the reader
    /// to remember the current section across lines.
    pub(crate) fn search_section_index(&mut self, name: &[u8]) -> usize {
        let found = self
            .iter()
            .position(|entry| matches!(entry, Entry::Section(s) if s.name == name));
        if let Some(index) = found {
            return index;
        }

        if name.is_empty() {
            if let Some(first) = self.iter().position(Entry::is_section) {
                self.entries_mut().insert(first, Entry::section(name));
                return first;
            }
        }
        self.append(Entry::section(name));
        self.len() - 1
    }

    /// Returns the first property named `key` directly in this document.
    #[must_use]
    pub fn find_property(&self, key: impl AsRef<[u8]>) -> Option<&Property> {
        let key = key.as_ref();
        self.properties().find(|property| property.key == key)
    }

    /// Mutable form of [`Document::find_property`].
    pub fn find_property_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut Property> {
        let key = key.as_ref();
        self.entries_mut().iter_mut().find_map(|entry| match entry {
            Entry::Property(property) if property.key == key => Some(property),
            _ => None,
        })
    }

    /// Parses a raw `key = value` line and appends it, even if `key` already exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the line has no `=` or the key is
    /// empty after trimming.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::Document;
    ///
    /// let mut body = Document::new();
    /// body.insert_property_line("  a = 1 ").unwrap();
    /// body.insert_property_line("a=2").unwrap();
    /// assert_eq!(body.properties().count(), 2);
    /// assert!(body.insert_property_line(" = orphan").is_err());
    /// ```
    pub fn insert_property_line(&mut self, line: impl AsRef<[u8]>) -> Result<&mut Property> {
        let (key, value) = split_property(line.as_ref())
            .ok_or_else(|| Error::invalid_argument("property line has no '='"))?;
        if key.is_empty() {
            return Err(Error::invalid_argument("property key is empty"));
        }

        self.append(Entry::property(key, value));
        match self.entries_mut().last_mut() {
            Some(Entry::Property(property)) => Ok(property),
            _ => unreachable!("a property was just appended"),
        }
    }

    /// Replaces the value of `key` in place, or appends a new property.
    ///
    /// Returns the previous value, if the key existed. No key checks are made
    /// here; [`Document::put`] is the validating entry point.
    pub fn upsert_property(
        &mut self,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Option<Vec<u8>> {
        let key = key.into();
        let value = value.into();
        match self.find_property_mut(&key) {
            Some(property) => Some(std::mem::replace(&mut property.value, value)),
            None => {
                self.append(Entry::Property(Property { key, value }));
                None
            }
        }
    }

    /// Sets `key` to `value` in `section`, creating the section and property as needed.
    ///
    /// An existing property keeps its position; a new one is appended to the
    /// end of the section body, and a new section to the end of the document.
    /// Repeated identical calls never grow the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::Document;
    ///
    /// let mut doc = Document::new();
    /// assert_eq!(doc.put("C", "k", "v").unwrap(), None);
    /// assert_eq!(doc.get("C", "k"), Some(&b"v"[..]));
    /// ```
    pub fn put(
        &mut self,
        section: impl AsRef<[u8]>,
        key: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> Result<Option<Vec<u8>>> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::invalid_argument("property key is empty"));
        }
        Ok(self
            .search_section(section)
            .body
            .upsert_property(key, value.as_ref()))
    }

    /// Returns the value of `key` in `section`, or `None` if either is missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::Document;
    ///
    /// let doc = ini_doc::from_str("x = 1\r\n[B]\r\nz = 3\r\n").unwrap();
    /// assert_eq!(doc.get("", "x"), Some(&b"1"[..]));
    /// assert_eq!(doc.get("B", "z"), Some(&b"3"[..]));
    /// assert_eq!(doc.get("B", "x"), None);
    /// ```
    #[must_use]
    pub fn get(&self, section: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> Option<&[u8]> {
        self.find_section(section)?.get(key)
    }

    /// Like [`Document::get`], for values that are valid UTF-8.
    ///
    /// Returns `None` if the value is missing or is not UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let doc = ini_doc::from_slice(b"[s]\r\nk = v\r\nraw = caf\xe9\r\n").unwrap();
    /// assert_eq!(doc.get_str("s", "k"), Some("v"));
    /// assert_eq!(doc.get_str("s", "raw"), None);
    /// assert_eq!(doc.get("s", "raw"), Some(&b"caf\xe9"[..]));
    /// ```
    #[must_use]
    pub fn get_str(&self, section: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> Option<&str> {
        self.get(section, key)
            .and_then(|value| std::str::from_utf8(value).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_SECTION;

    #[test]
    fn test_find_section_first_match() {
        let mut doc = Document::new();
        let mut first = Section::new("dup");
        first.body.upsert_property("which", "first");
        let mut second = Section::new("dup");
        second.body.upsert_property("which", "second");
        doc.append(Entry::Section(first));
        doc.append(Entry::Section(second));

        assert_eq!(doc.get_str("dup", "which"), Some("first"));
    }

    #[test]
    fn test_search_section_creates_once() {
        let mut doc = Document::new();
        assert_eq!(doc.search_section_index(b"a"), 0);
        assert_eq!(doc.search_section_index(b"b"), 1);
        assert_eq!(doc.search_section_index(b"a"), 0);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_default_section_reachable_by_empty_name() {
        let mut doc = Document::new();
        doc.put(DEFAULT_SECTION, "k", "v").unwrap();
        assert!(doc.find_section("").unwrap().is_default());
        assert_eq!(doc.get_str("", "k"), Some("v"));
    }

    #[test]
    fn test_put_is_idempotent() {
        let mut doc = Document::new();
        for _ in 0..3 {
            doc.put("s", "k", "v").unwrap();
        }
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.find_section("s").unwrap().body.len(), 1);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let mut doc = Document::new();
        doc.put("s", "a", "1").unwrap();
        doc.put("s", "b", "2").unwrap();
        doc.put("s", "c", "3").unwrap();
        assert_eq!(doc.put("s", "b", "20").unwrap(), Some(b"2".to_vec()));

        let pairs: Vec<_> = doc
            .find_section("s")
            .unwrap()
            .body
            .properties()
            .map(|p| (p.key.as_slice(), p.value.as_slice()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (&b"a"[..], &b"1"[..]),
                (&b"b"[..], &b"20"[..]),
                (&b"c"[..], &b"3"[..]),
            ]
        );
    }

    #[test]
    fn test_put_updates_first_of_duplicate_keys() {
        let mut doc = Document::new();
        let body = &mut doc.search_section("s").body;
        body.insert_property_line("k = 1").unwrap();
        body.insert_property_line("k = 2").unwrap();

        doc.put("s", "k", "3").unwrap();
        let values: Vec<_> = doc
            .find_section("s")
            .unwrap()
            .body
            .properties()
            .map(|p| p.value.as_slice())
            .collect();
        assert_eq!(values, vec![&b"3"[..], &b"2"[..]]);
    }

    #[test]
    fn test_put_rejects_empty_key() {
        let mut doc = Document::new();
        assert!(matches!(doc.put("s", "", "v"), Err(Error::InvalidArgument(_))));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_insert_property_line_without_equals() {
        let mut body = Document::new();
        assert!(body.insert_property_line("novalue").is_err());
        assert!(body.is_empty());
    }

    #[test]
    fn test_insert_property_line_empty_value() {
        let mut body = Document::new();
        let property = body.insert_property_line("key =   ").unwrap();
        assert!(property.value.is_empty());
    }

    #[test]
    fn test_new_default_section_goes_before_named_sections() {
        let mut doc = Document::new();
        doc.append(Entry::comment("header"));
        doc.put("A", "x", "1").unwrap();
        doc.put(DEFAULT_SECTION, "top", "1").unwrap();
        doc.put("B", "y", "2").unwrap();

        let names: Vec<_> = doc.sections().map(|s| s.name.as_slice()).collect();
        assert_eq!(names, vec![&b""[..], &b"A"[..], &b"B"[..]]);
        assert_eq!(doc.entries()[0], Entry::comment("header"));
    }

    #[test]
    fn test_raw_bytes_in_names_and_values() {
        let mut doc = Document::new();
        doc.put(&b"caf\xe9"[..], &b"k\xff"[..], &b"\x80"[..]).unwrap();
        assert_eq!(doc.get(&b"caf\xe9"[..], &b"k\xff"[..]), Some(&b"\x80"[..]));
        assert_eq!(doc.get_str(&b"caf\xe9"[..], &b"k\xff"[..]), None);
    }

    #[test]
    fn test_get_missing() {
        let doc = Document::new();
        assert_eq!(doc.get("nope", "k"), None);
    }
}
