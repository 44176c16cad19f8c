//! Error types for the sporez-search crate.
//!
//! All errors use stable string messages suitable for display to callers
//! and programmatic handling. No API keys or sensitive data appear in
//! error messages.

/// Errors that can occur during search aggregation.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// An HTTP request to a provider or probed page failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response or fetched markup.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid aggregator configuration or missing provider credential.
    #[error("config error: {0}")]
    Config(String),

    /// An operation timed out before the provider responded.
    #[error("timed out: {0}")]
    Timeout(String),
}

/// Convenience type alias for sporez-search results.
pub type Result<T> = std::result::Result<T, AggregateError>;
