//! Centralized configuration constants for mcphub.

use std::time::Duration;

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    /// Timeout applied to each individual HTTP call.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    /// Page size requested from registry endpoints.
    pub const REGISTRY_PAGE_LIMIT: u32 = 100;
    /// Attempts per page fetch (including the first one).
    pub const MAX_RETRIES: u32 = 3;
    /// Initial backoff delay between page-fetch retries.
    pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(2);
    pub const USER_AGENT: &'static str = concat!("mcphub/", env!("CARGO_PKG_VERSION"));
}

/// Local store configuration.
pub struct StoreConfig;

impl StoreConfig {
    /// Directory under the platform config dir holding mcphub state.
    pub const APP_DIR_NAME: &'static str = "mcphub";
    pub const DB_FILENAME: &'static str = "hub.db";
    /// SQLite busy timeout for cross-process politeness.
    pub const BUSY_TIMEOUT_MS: u32 = 5_000;
}
