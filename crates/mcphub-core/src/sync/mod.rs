//! Registry synchronization: fetch-all-pages, then replace the local copy.
//!
//! Each registry is processed independently and sequentially. A fetch
//! failure flags that registry and moves on; it never aborts the run. The
//! store's transactional replace guarantees the mirror reflects exactly
//! one successful fetch.

use crate::error::Result;
use crate::models::{EntryKind, NewCatalogEntry, Registry};
use crate::registry::{RegistryClient, RemoteServer};
use crate::store::HubStore;
use tracing::{info, warn};

/// Result of synchronizing one registry.
#[derive(Debug, Clone)]
pub struct RegistrySyncOutcome {
    pub registry: String,
    /// Entries retained from the fetch (after the status filter).
    pub fetched: usize,
    /// Entries written to the store.
    pub stored: usize,
    /// Entries that failed to serialize or store and were skipped.
    pub failed_entries: usize,
    /// Fetch or replace failure, if the registry contributed nothing.
    pub error: Option<String>,
}

impl RegistrySyncOutcome {
    fn failed(registry: &Registry, error: String) -> Self {
        Self {
            registry: registry.name.clone(),
            fetched: 0,
            stored: 0,
            failed_entries: 0,
            error: Some(error),
        }
    }
}

/// Aggregated result of a sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    pub outcomes: Vec<RegistrySyncOutcome>,
}

impl SyncSummary {
    pub fn total_stored(&self) -> usize {
        self.outcomes.iter().map(|o| o.stored).sum()
    }

    pub fn total_failed_entries(&self) -> usize {
        self.outcomes.iter().map(|o| o.failed_entries).sum()
    }

    pub fn failed_registries(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }
}

/// Drives fetch and reconcile for every registered registry.
pub struct Synchronizer<'a> {
    store: &'a HubStore,
    client: &'a RegistryClient,
}

impl<'a> Synchronizer<'a> {
    pub fn new(store: &'a HubStore, client: &'a RegistryClient) -> Self {
        Self { store, client }
    }

    /// Synchronize every registered registry, one at a time.
    ///
    /// Errs only if the registry list itself cannot be read; per-registry
    /// failures are reported in the summary.
    pub async fn sync_all(&self) -> Result<SyncSummary> {
        let registries = self.store.list_registries()?;
        let mut summary = SyncSummary::default();

        for registry in &registries {
            summary.outcomes.push(self.sync_registry(registry).await);
        }

        info!(
            "Sync finished: {} registries, {} entries stored, {} failed registries",
            summary.outcomes.len(),
            summary.total_stored(),
            summary.failed_registries()
        );
        Ok(summary)
    }

    /// Synchronize one registry's server mirror against a single fetch.
    pub async fn sync_registry(&self, registry: &Registry) -> RegistrySyncOutcome {
        let servers = match self.client.fetch_all_servers(&registry.url).await {
            Ok(servers) => servers,
            Err(e) => {
                warn!("Fetch failed for registry '{}': {}", registry.name, e);
                return RegistrySyncOutcome::failed(registry, e.to_string());
            }
        };

        let fetched = servers.len();
        let mut failed_entries = 0usize;
        let mut entries = Vec::with_capacity(fetched);
        for server in &servers {
            match to_catalog_entry(server) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(
                        "Skipping entry '{}' from '{}': {}",
                        server.name, registry.name, e
                    );
                    failed_entries += 1;
                }
            }
        }

        match self
            .store
            .replace_entries(EntryKind::Server, &registry.id, &entries)
        {
            Ok(outcome) => {
                info!(
                    "Synchronized registry '{}': {} fetched, {} stored",
                    registry.name, fetched, outcome.stored
                );
                RegistrySyncOutcome {
                    registry: registry.name.clone(),
                    fetched,
                    stored: outcome.stored,
                    failed_entries: failed_entries + outcome.skipped,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Replace failed for registry '{}': {}", registry.name, e);
                RegistrySyncOutcome::failed(registry, e.to_string())
            }
        }
    }
}

/// Serialize the full upstream specification into its storage form.
fn to_catalog_entry(server: &RemoteServer) -> Result<NewCatalogEntry> {
    let data = serde_json::to_string(server)?;
    Ok(NewCatalogEntry {
        name: server.name.clone(),
        title: server.title.clone(),
        description: server.description.clone(),
        version: server.version.clone(),
        website_url: server.website_url.clone(),
        data,
    })
}
