//! Core object types shared between the engine and its collaborators
//!
//! Resolved identities and the `GroupMember` output edge consumed by the
//! downstream serialization layer.

use serde::{Deserialize, Serialize};

/// Classification of a directory object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    User,
    Computer,
    Group,
    Domain,
    Unknown,
}

impl ObjectKind {
    /// Lowercase tag used in graph output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::User => "user",
            ObjectKind::Computer => "computer",
            ObjectKind::Group => "group",
            ObjectKind::Domain => "domain",
            ObjectKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classified identity of a directory entry: object kind plus the display
/// name used in graph output (e.g. `ADMINS@CORP.LOCAL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    /// Display name suitable for graph output.
    pub display_name: String,
    /// Object classification.
    pub kind: ObjectKind,
}

impl ResolvedEntry {
    /// Create a new resolved entry.
    pub fn new(display_name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            display_name: display_name.into(),
            kind,
        }
    }
}

/// The cached form of a resolved member principal.
///
/// Carries the same payload as [`ResolvedEntry`]; the two are interchangeable
/// at the data level and only differ in where they sit in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedPrincipal {
    /// Display name suitable for graph output.
    pub display_name: String,
    /// Object classification.
    pub kind: ObjectKind,
}

impl MappedPrincipal {
    /// Create a new mapped principal.
    pub fn new(display_name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            display_name: display_name.into(),
            kind,
        }
    }
}

impl From<ResolvedEntry> for MappedPrincipal {
    fn from(entry: ResolvedEntry) -> Self {
        Self {
            display_name: entry.display_name,
            kind: entry.kind,
        }
    }
}

impl From<MappedPrincipal> for ResolvedEntry {
    fn from(principal: MappedPrincipal) -> Self {
        Self {
            display_name: principal.display_name,
            kind: principal.kind,
        }
    }
}

/// One membership edge: `account_name` (of `object_kind`) is a member of
/// `group_name`. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Display name of the member principal.
    pub account_name: String,
    /// Display name of the containing group.
    pub group_name: String,
    /// Classification of the member principal.
    pub object_kind: ObjectKind,
}

impl GroupMember {
    /// Create a new membership edge.
    pub fn new(
        account_name: impl Into<String>,
        group_name: impl Into<String>,
        object_kind: ObjectKind,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            group_name: group_name.into(),
            object_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_tags() {
        assert_eq!(ObjectKind::User.as_str(), "user");
        assert_eq!(ObjectKind::Computer.to_string(), "computer");
        assert_eq!(ObjectKind::Group.to_string(), "group");
    }

    #[test]
    fn test_object_kind_serde_lowercase() {
        let json = serde_json::to_string(&ObjectKind::Computer).unwrap();
        assert_eq!(json, "\"computer\"");
        let parsed: ObjectKind = serde_json::from_str("\"group\"").unwrap();
        assert_eq!(parsed, ObjectKind::Group);
    }

    #[test]
    fn test_principal_entry_interchange() {
        let resolved = ResolvedEntry::new("ADMINS@CORP.LOCAL", ObjectKind::Group);
        let principal: MappedPrincipal = resolved.clone().into();
        assert_eq!(principal.display_name, "ADMINS@CORP.LOCAL");
        assert_eq!(principal.kind, ObjectKind::Group);

        let back: ResolvedEntry = principal.into();
        assert_eq!(back, resolved);
    }

    #[test]
    fn test_group_member_serialization() {
        let edge = GroupMember::new("JDOE@CORP.LOCAL", "ADMINS@CORP.LOCAL", ObjectKind::User);
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["account_name"], "JDOE@CORP.LOCAL");
        assert_eq!(json["group_name"], "ADMINS@CORP.LOCAL");
        assert_eq!(json["object_kind"], "user");
    }
}
