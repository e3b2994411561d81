//! Error types for the mcphub library.
//!
//! A single error enum covers storage, network, and validation failures so
//! that callers (CLI, HTTP API) can branch on the cases they care about.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for mcphub operations.
#[derive(Debug, Error)]
pub enum HubError {
    // Network errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        /// Optional cause description
        cause: Option<String>,
    },

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Failure while talking to a remote registry endpoint. Tagged with the
    /// page at which the paginated fetch broke off.
    #[error("Registry API error on page {page}: {message}")]
    RegistryApi {
        message: String,
        page: u32,
        status_code: Option<u16>,
    },

    // Database errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// A registry with the given name is already registered. Kept separate
    /// from [`HubError::Database`] so callers can give an actionable message.
    #[error("Registry already exists: {name}")]
    RegistryExists { name: String },

    #[error("Registry not found: {name}")]
    RegistryNotFound { name: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    // Validation errors
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Generic errors
    #[error("{0}")]
    Other(String),
}

/// Result type alias for mcphub operations.
pub type Result<T> = std::result::Result<T, HubError>;

// Conversion implementations for common error types

impl From<std::io::Error> for HubError {
    fn from(err: std::io::Error) -> Self {
        HubError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        HubError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for HubError {
    fn from(err: rusqlite::Error) -> Self {
        HubError::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<reqwest::Error> for HubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HubError::Timeout(crate::config::NetworkConfig::REQUEST_TIMEOUT)
        } else {
            HubError::Network {
                message: err.to_string(),
                cause: Some(err.to_string()),
            }
        }
    }
}

impl HubError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        HubError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Check if this error should trigger a retry.
    ///
    /// Transport-level failures and the usual transient HTTP statuses are
    /// retryable; validation, storage, and decode failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            HubError::Network { .. } | HubError::Timeout(_) => true,
            HubError::RegistryApi {
                status_code: Some(code),
                ..
            } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HubError::RegistryExists {
            name: "upstream".into(),
        };
        assert_eq!(err.to_string(), "Registry already exists: upstream");

        let err = HubError::RegistryApi {
            message: "registry returned 500 Internal Server Error".into(),
            page: 3,
            status_code: Some(500),
        };
        assert!(err.to_string().contains("page 3"));
    }

    #[test]
    fn test_retryable_errors() {
        assert!(HubError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(HubError::Network {
            message: "connection refused".into(),
            cause: None,
        }
        .is_retryable());
        assert!(HubError::RegistryApi {
            message: "503".into(),
            page: 1,
            status_code: Some(503),
        }
        .is_retryable());
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!HubError::RegistryExists {
            name: "upstream".into()
        }
        .is_retryable());
        // A decode failure on a 200 response carries no status code.
        assert!(!HubError::RegistryApi {
            message: "invalid JSON".into(),
            page: 2,
            status_code: None,
        }
        .is_retryable());
        assert!(!HubError::RegistryApi {
            message: "not found".into(),
            page: 1,
            status_code: Some(404),
        }
        .is_retryable());
    }
}
