//! Raw search entries and search scopes
//!
//! `SearchEntry` is the wire-level shape returned by the search primitive: a
//! distinguished name plus a multi-valued attribute map. Attribute names are
//! stored as returned by the server, including synthetic ranged names such as
//! `member;range=0-1499`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scope of a directory search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// The base object itself only.
    Base,
    /// Direct children of the base object.
    OneLevel,
    /// The base object and its whole subtree.
    Subtree,
}

impl std::fmt::Display for SearchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SearchScope::Base => "base",
            SearchScope::OneLevel => "onelevel",
            SearchScope::Subtree => "subtree",
        };
        write!(f, "{s}")
    }
}

/// A raw entry returned by a directory search.
///
/// Attribute names are kept in a sorted map so the "first returned attribute"
/// inspection done by ranged retrieval is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Distinguished name of the entry.
    dn: String,
    /// Attribute name to values. A present name with zero values is kept.
    attributes: BTreeMap<String, Vec<String>>,
}

impl SearchEntry {
    /// Create a new entry with no attributes.
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Get the entry's distinguished name.
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Set a multi-valued attribute.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.attributes.insert(name.into(), values);
    }

    /// Set an attribute using builder pattern.
    pub fn with(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.set(name, values);
        self
    }

    /// Set a single-valued attribute using builder pattern.
    pub fn with_value(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, vec![value.into()])
    }

    /// Get the first value of an attribute.
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Get all values of an attribute.
    pub fn get_strings(&self, name: &str) -> Option<&[String]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// Check if an attribute is present.
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Iterate over attribute names in sorted order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Get the number of attributes present.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Check if the entry carries no attributes at all.
    ///
    /// For a base-scoped ranged query this is how the server signals a group
    /// with zero members.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_accessors() {
        let entry = SearchEntry::new("CN=Ops,DC=corp,DC=local")
            .with_value("samaccountname", "ops")
            .with(
                "member",
                vec![
                    "CN=A,DC=corp,DC=local".to_string(),
                    "CN=B,DC=corp,DC=local".to_string(),
                ],
            );

        assert_eq!(entry.dn(), "CN=Ops,DC=corp,DC=local");
        assert_eq!(entry.get_string("samaccountname"), Some("ops"));
        assert_eq!(entry.get_strings("member").map(<[String]>::len), Some(2));
        assert!(entry.has("member"));
        assert!(!entry.has("primarygroupid"));
        assert_eq!(entry.len(), 2);
    }

    #[test]
    fn test_empty_entry() {
        let entry = SearchEntry::new("CN=Empty,DC=corp,DC=local");
        assert!(entry.is_empty());
        assert_eq!(entry.attribute_names().count(), 0);
        assert_eq!(entry.get_string("member"), None);
    }

    #[test]
    fn test_attribute_with_no_values_is_present() {
        let entry = SearchEntry::new("CN=G,DC=corp,DC=local").with("member", vec![]);
        assert!(!entry.is_empty());
        assert!(entry.has("member"));
        assert_eq!(entry.get_string("member"), None);
        assert_eq!(entry.get_strings("member"), Some(&[][..]));
    }

    #[test]
    fn test_attribute_names_sorted() {
        let entry = SearchEntry::new("CN=G,DC=corp,DC=local")
            .with_value("samaccounttype", "268435456")
            .with_value("distinguishedname", "CN=G,DC=corp,DC=local");
        let names: Vec<&str> = entry.attribute_names().collect();
        assert_eq!(names, vec!["distinguishedname", "samaccounttype"]);
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(SearchScope::Base.to_string(), "base");
        assert_eq!(SearchScope::OneLevel.to_string(), "onelevel");
        assert_eq!(SearchScope::Subtree.to_string(), "subtree");
    }
}
