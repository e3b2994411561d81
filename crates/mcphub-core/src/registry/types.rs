//! Wire types for the registry listing endpoint.
//!
//! The endpoint returns `{ "servers": [...], "metadata": { "count",
//! "nextCursor" } }`. Every field tolerates absence: registries in the wild
//! omit `status`, `metadata`, and `_meta` freely.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of the server listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerListResponse {
    #[serde(default)]
    pub servers: Vec<ServerEnvelope>,
    #[serde(default)]
    pub metadata: ListMetadata,
}

/// Pagination metadata attached to a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMetadata {
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "nextCursor", default)]
    pub next_cursor: Option<String>,
}

impl ListMetadata {
    /// The cursor for the next page, if the listing continues.
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// One listed item: the server specification plus free-form metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerEnvelope {
    pub server: RemoteServer,
    #[serde(rename = "_meta", default)]
    pub meta: Map<String, Value>,
}

/// An upstream server specification.
///
/// Known fields are typed for filtering and display; everything else
/// (packages, remotes, repository, ...) is preserved in `extra` so the
/// document round-trips intact into the store's `data` column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteServer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "websiteUrl", default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RemoteServer {
    /// Whether this entry should be mirrored locally. An unset status is
    /// treated as active for producers that predate the status field.
    pub fn is_active(&self) -> bool {
        self.status.is_empty() || self.status == "active"
    }
}
