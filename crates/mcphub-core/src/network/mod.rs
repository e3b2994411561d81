//! Network utilities shared by remote-registry clients.

mod retry;

pub use retry::{retry_async, RetryConfig, RetryStats};
