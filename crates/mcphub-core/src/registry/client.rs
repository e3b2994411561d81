//! Cursor-paginated fetch client for registry listing endpoints.

use super::types::{RemoteServer, ServerListResponse};
use crate::config::NetworkConfig;
use crate::error::{HubError, Result};
use crate::network::{retry_async, RetryConfig};
use reqwest::Client;
use tracing::{debug, info};

/// Client that drains a registry's complete server listing.
///
/// Pages are requested with a fixed `limit`; the opaque `nextCursor` from
/// each response drives the next request until the upstream stops handing
/// one out. A fetch is all-or-nothing: any page failure discards the pages
/// already received, so the synchronizer never reconciles a truncated
/// listing.
pub struct RegistryClient {
    client: Client,
    retry: RetryConfig,
}

impl RegistryClient {
    /// Create a new client with the default timeout and retry policy.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(NetworkConfig::REQUEST_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| HubError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: Some(e.to_string()),
            })?;

        Ok(Self {
            client,
            retry: RetryConfig::new()
                .with_max_attempts(NetworkConfig::MAX_RETRIES)
                .with_base_delay(NetworkConfig::RETRY_BASE_DELAY),
        })
    }

    /// Override the per-page retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch the complete, current server listing from `base_url`.
    ///
    /// Entries whose status is neither `"active"` nor unset are dropped.
    /// Output preserves page order and in-page order.
    pub async fn fetch_all_servers(&self, base_url: &str) -> Result<Vec<RemoteServer>> {
        let mut entries = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page: u32 = 1;
        let mut dropped = 0usize;

        loop {
            let url = page_url(base_url, NetworkConfig::REGISTRY_PAGE_LIMIT, cursor.as_deref());

            let (result, stats) = retry_async(
                &self.retry,
                || self.fetch_page(&url, page),
                |e| e.is_retryable(),
            )
            .await;
            if stats.attempts > 1 {
                debug!(
                    "Registry page {} fetched after {} attempts",
                    page, stats.attempts
                );
            }

            let response = result.map_err(|e| match e {
                HubError::RegistryApi { .. } => e,
                other => HubError::RegistryApi {
                    message: other.to_string(),
                    page,
                    status_code: None,
                },
            })?;

            for envelope in response.servers {
                if envelope.server.is_active() {
                    entries.push(envelope.server);
                } else {
                    dropped += 1;
                }
            }

            match response.metadata.continuation() {
                Some(next) => {
                    cursor = Some(next.to_string());
                    page += 1;
                }
                None => break,
            }
        }

        if dropped > 0 {
            debug!("Dropped {} non-active entries from {}", dropped, base_url);
        }
        info!(
            "Fetched {} server entries from {} ({} pages)",
            entries.len(),
            base_url,
            page
        );

        Ok(entries)
    }

    async fn fetch_page(&self, url: &str, page: u32) -> Result<ServerListResponse> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                HubError::Timeout(NetworkConfig::REQUEST_TIMEOUT)
            } else {
                HubError::Network {
                    message: format!("GET {} failed: {}", url, e),
                    cause: Some(e.to_string()),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::RegistryApi {
                message: format!("registry returned {}", status),
                page,
                status_code: Some(status.as_u16()),
            });
        }

        response
            .json::<ServerListResponse>()
            .await
            .map_err(|e| HubError::RegistryApi {
                message: format!("failed to decode server listing: {}", e),
                page,
                status_code: None,
            })
    }
}

/// Build the listing URL for one page.
fn page_url(base_url: &str, limit: u32, cursor: Option<&str>) -> String {
    let mut url = format!("{}?limit={}", base_url.trim_end_matches('/'), limit);
    if let Some(cursor) = cursor {
        url.push_str("&cursor=");
        url.push_str(&urlencoding::encode(cursor));
    }
    url
}
