//! Ordered section/key/value snapshot of a document.
//!
//! [`IniMap`] drops comments, blank lines and duplicate keys and keeps only
//! what [`Document::get`] can see: for each section, in file order, the first
//! value of each key. It wraps [`IndexMap`] so iteration follows document
//! order and serde output is deterministic.
//!
//! The map holds `String`s, so building one from a document fails with
//! [`Error::InvalidUtf8`] if any name, key or value is not UTF-8. The
//! document itself keeps raw bytes and is never decoded lossily.
//!
//! ## Examples
//!
//! ```rust
//! use ini_doc::IniMap;
//!
//! let doc = ini_doc::from_str("[b]\r\nk = 1\r\nk = 2\r\n[a]\r\nx = y\r\n").unwrap();
//! let map = IniMap::try_from(&doc).unwrap();
//!
//! let sections: Vec<_> = map.sections().collect();
//! assert_eq!(sections, vec!["b", "a"]);
//! assert_eq!(map.get("b", "k"), Some("1"));
//! ```

use crate::{Document, Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Properties of one section, in document order.
pub type Properties = IndexMap<String, String>;

/// An ordered map of section name to the section's properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IniMap(IndexMap<String, Properties>);

impl IniMap {
    /// Creates an empty `IniMap`.
    #[must_use]
    pub fn new() -> Self {
        IniMap(IndexMap::new())
    }

    /// Sets `key` in `section`, returning the previous value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ini_doc::IniMap;
    ///
    /// let mut map = IniMap::new();
    /// assert!(map.insert("s", "k", "1").is_none());
    /// assert_eq!(map.insert("s", "k", "2"), Some("1".to_string()));
    /// ```
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.0
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.0.get(section)?.get(key).map(String::as_str)
    }

    /// Returns all properties of `section`.
    #[must_use]
    pub fn section(&self, section: &str) -> Option<&Properties> {
        self.0.get(section)
    }

    /// Iterates over section names in order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Properties> {
        self.0.iter()
    }
}

impl Document {
    /// Returns an [`IniMap`] snapshot of this document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUtf8`] if a section name, key or value is not UTF-8.
    pub fn to_map(&self) -> Result<IniMap> {
        IniMap::try_from(self)
    }
}

fn utf8(bytes: &[u8], what: impl FnOnce() -> String) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|_| Error::invalid_utf8(what()))
}

impl TryFrom<&Document> for IniMap {
    type Error = Error;

    fn try_from(document: &Document) -> Result<Self> {
        let mut map = IndexMap::new();
        for section in document.sections() {
            let name = utf8(&section.name, || "section name".to_string())?;
            let properties: &mut Properties = map.entry(name).or_default();
            for property in section.body.properties() {
                let key = utf8(&property.key, || "property key".to_string())?;
                if properties.contains_key(&key) {
                    continue;
                }
                let value = utf8(&property.value, || format!("value of {}", key))?;
                properties.insert(key, value);
            }
        }
        Ok(IniMap(map))
    }
}

impl From<IniMap> for Document {
    /// Builds a document with one section per entry and no comments or blanks.
    fn from(map: IniMap) -> Self {
        let mut document = Document::new();
        for (name, properties) in map {
            let body = &mut document.search_section(&name).body;
            for (key, value) in properties {
                body.upsert_property(key, value);
            }
        }
        document
    }
}

impl IntoIterator for IniMap {
    type Item = (String, Properties);
    type IntoIter = indexmap::map::IntoIter<String, Properties>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Properties)> for IniMap {
    fn from_iter<T: IntoIterator<Item = (String, Properties)>>(iter: T) -> Self {
        IniMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_ignores_comments_and_blanks() {
        let doc = crate::from_str("; c\r\n[s]\r\n\r\n; inner\r\nk = v\r\n").unwrap();
        let map = doc.to_map().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.section("s").map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_map_to_document_keeps_order() {
        let mut map = IniMap::new();
        map.insert("z", "b", "2");
        map.insert("z", "a", "1");
        map.insert("y", "c", "3");

        let doc = Document::from(map.clone());
        let names: Vec<_> = doc.sections().map(|s| s.name.as_slice()).collect();
        assert_eq!(names, vec![&b"z"[..], &b"y"[..]]);
        assert_eq!(doc.to_map().unwrap(), map);
    }

    #[test]
    fn test_default_section_round_trips() {
        let doc = crate::from_str("top = 1\r\n[s]\r\nk = v\r\n").unwrap();
        let map = doc.to_map().unwrap();
        assert_eq!(map.get("", "top"), Some("1"));
        assert_eq!(Document::from(map).get_str("", "top"), Some("1"));
    }

    #[test]
    fn test_non_utf8_is_an_error() {
        let doc = crate::from_slice(b"[s]\r\nok = 1\r\nname = caf\xe9\r\n").unwrap();
        let err = doc.to_map().unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8(_)));
        assert!(err.to_string().contains("value of name"));
    }

    #[test]
    fn test_later_duplicate_key_is_not_decoded() {
        let doc = crate::from_slice(b"[s]\r\nk = 1\r\nk = \xff\r\n").unwrap();
        assert_eq!(doc.to_map().unwrap().get("s", "k"), Some("1"));
    }
}
