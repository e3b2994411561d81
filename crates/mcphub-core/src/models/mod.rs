//! Data models for mcphub.
//!
//! These types are shared between the store, the synchronizer, and the
//! CLI/HTTP collaborators; everything that crosses the HTTP API boundary
//! derives `Serialize`.

use serde::{Deserialize, Serialize};

/// Visibility of a registered registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    Public,
    Private,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Public => "public",
            RegistryKind::Private => "private",
        }
    }

    /// Parse a kind string, accepting any casing. Anything other than
    /// `public` or `private` is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(RegistryKind::Public),
            "private" => Some(RegistryKind::Private),
            _ => None,
        }
    }
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered remote registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub id: String,
    pub name: String,
    pub url: String,
    pub kind: RegistryKind,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for registering a new registry.
#[derive(Debug, Clone)]
pub struct NewRegistry {
    pub name: String,
    pub url: String,
    pub kind: RegistryKind,
}

/// Which catalog table an entry operation targets. Server and skill
/// entries share one shape and one replace contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Server,
    Skill,
}

impl EntryKind {
    pub(crate) fn table(&self) -> &'static str {
        match self {
            EntryKind::Server => "server_entries",
            EntryKind::Skill => "skill_entries",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Server => "server",
            EntryKind::Skill => "skill",
        }
    }
}

/// A catalog entry mirrored from a registry, as stored locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub registry_id: String,
    pub name: String,
    pub title: Option<String>,
    pub description: String,
    pub version: String,
    pub website_url: Option<String>,
    pub installed: bool,
    /// Full upstream specification document, serialized JSON. Opaque to
    /// the store; structured access belongs to presentation code.
    pub data: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A catalog entry as produced by a fetch, ready for storage.
#[derive(Debug, Clone)]
pub struct NewCatalogEntry {
    pub name: String,
    pub title: Option<String>,
    pub description: String,
    pub version: String,
    pub website_url: Option<String>,
    pub data: String,
}

/// A locally installed server or skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installation {
    pub id: i64,
    pub resource_type: String,
    pub resource_name: String,
    pub version: String,
    /// Configuration blob recorded at install time.
    pub config: String,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_kind_parse_normalizes_case() {
        assert_eq!(RegistryKind::parse("Public"), Some(RegistryKind::Public));
        assert_eq!(RegistryKind::parse("PRIVATE"), Some(RegistryKind::Private));
        assert_eq!(RegistryKind::parse("internal"), None);
        assert_eq!(RegistryKind::parse(""), None);
    }

    #[test]
    fn test_registry_kind_roundtrip() {
        for kind in [RegistryKind::Public, RegistryKind::Private] {
            assert_eq!(RegistryKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_entry_kind_tables_differ() {
        assert_ne!(EntryKind::Server.table(), EntryKind::Skill.table());
    }
}
