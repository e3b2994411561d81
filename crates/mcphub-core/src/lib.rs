//! mcphub core - headless library for mirroring MCP server and skill
//! registries into a local SQLite store.
//!
//! The flow is: register a registry ([`registration::register_registry`]),
//! then let the [`sync::Synchronizer`] drive the paginated
//! [`registry::RegistryClient`] and reconcile the results through
//! [`store::HubStore`]. The CLI and the HTTP API are thin readers over the
//! same store handle.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcphub_core::{register_registry, HubStore, RegistryClient, Synchronizer};
//!
//! #[tokio::main]
//! async fn main() -> mcphub_core::Result<()> {
//!     let store = HubStore::open()?;
//!     register_registry(&store, "official", "https://registry.example/v0/servers", "public")?;
//!
//!     let client = RegistryClient::new()?;
//!     let summary = Synchronizer::new(&store, &client).sync_all().await?;
//!     println!("stored {} entries", summary.total_stored());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod platform;
pub mod registration;
pub mod registry;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use error::{HubError, Result};
pub use models::{
    CatalogEntry, EntryKind, Installation, NewCatalogEntry, NewRegistry, Registry, RegistryKind,
};
pub use registration::register_registry;
pub use registry::{RegistryClient, RemoteServer};
pub use store::{HubStore, ReplaceOutcome};
pub use sync::{RegistrySyncOutcome, Synchronizer, SyncSummary};
