//! Admission of new remote registries.
//!
//! Validation happens before any storage write: a rejected registration
//! leaves the store untouched.

use crate::error::{HubError, Result};
use crate::models::{NewRegistry, Registry, RegistryKind};
use crate::store::HubStore;
use tracing::info;

/// Validate and record a new remote registry.
///
/// `kind` is normalized to lower case and must be exactly `public` or
/// `private`. A duplicate name surfaces as [`HubError::RegistryExists`].
pub fn register_registry(store: &HubStore, name: &str, url: &str, kind: &str) -> Result<Registry> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HubError::Validation {
            field: "name".to_string(),
            message: "registry name must not be empty".to_string(),
        });
    }

    let kind = RegistryKind::parse(kind).ok_or_else(|| HubError::Validation {
        field: "kind".to_string(),
        message: format!("expected 'public' or 'private', got '{}'", kind),
    })?;

    url::Url::parse(url).map_err(|e| HubError::Validation {
        field: "url".to_string(),
        message: format!("'{}' is not a valid URL: {}", url, e),
    })?;

    let registry = store.add_registry(&NewRegistry {
        name: name.to_string(),
        url: url.to_string(),
        kind,
    })?;

    info!("Added {} registry '{}' ({})", kind, registry.name, registry.url);
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (HubStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = HubStore::open_at(&temp_dir.path().join("test-hub.db")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_register_normalizes_kind_case() {
        let (store, _temp) = create_test_store();

        let registry =
            register_registry(&store, "upstream", "http://reg.example/v0/servers", "PUBLIC")
                .unwrap();
        assert_eq!(registry.kind, RegistryKind::Public);
    }

    #[test]
    fn test_register_rejects_unknown_kind_without_write() {
        let (store, _temp) = create_test_store();

        let err = register_registry(&store, "upstream", "http://reg.example", "internal")
            .unwrap_err();
        assert!(matches!(err, HubError::Validation { field, .. } if field == "kind"));
        assert!(store.list_registries().unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_bad_url_without_write() {
        let (store, _temp) = create_test_store();

        let err = register_registry(&store, "upstream", "not a url", "public").unwrap_err();
        assert!(matches!(err, HubError::Validation { field, .. } if field == "url"));
        assert!(store.list_registries().unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let (store, _temp) = create_test_store();

        let err = register_registry(&store, "  ", "http://reg.example", "public").unwrap_err();
        assert!(matches!(err, HubError::Validation { field, .. } if field == "name"));
    }

    #[test]
    fn test_register_duplicate_name_reports_exists() {
        let (store, _temp) = create_test_store();

        register_registry(&store, "upstream", "http://reg.example", "public").unwrap();
        let err =
            register_registry(&store, "upstream", "http://other.example", "private").unwrap_err();
        assert!(matches!(err, HubError::RegistryExists { .. }));
    }
}
