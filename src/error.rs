//! Error types for the caching layer
//!
//! Every fallible operation in this crate returns [`CacheError`]. The policy
//! wrappers recover from most of these locally (a failed read is a miss, a
//! failed write is logged and dropped), so callers rarely see anything other
//! than [`CacheError::InvalidTtl`].

use std::time::Duration;
use thiserror::Error;

/// Main error type for cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    /// A zero-length TTL was requested. Rejected at the call site, never
    /// clamped or silently replaced with a default.
    #[error("invalid TTL {requested:?}: must be greater than zero")]
    InvalidTtl { requested: Duration },

    /// The backend cannot be reached. Produced by backend construction and
    /// the startup probe; steady-state operations degrade instead.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid or inconsistent configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Error bubbled up from the Redis driver
    #[error("redis driver error: {0}")]
    Driver(#[from] redis::RedisError),

    /// Generic error with context
    #[error("cache error: {0}")]
    Other(String),
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

impl From<String> for CacheError {
    fn from(message: String) -> Self {
        CacheError::Other(message)
    }
}

impl From<&str> for CacheError {
    fn from(message: &str) -> Self {
        CacheError::Other(message.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(error: serde_json::Error) -> Self {
        CacheError::Serialization(error.to_string())
    }
}
