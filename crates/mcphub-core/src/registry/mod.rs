//! Remote registry integration: wire types and the paginated fetch client.

mod client;
mod types;

pub use client::RegistryClient;
pub use types::{ListMetadata, RemoteServer, ServerEnvelope, ServerListResponse};
