//! The uniform contract every storage engine satisfies

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which storage engine a backend instance is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    Memory,
    Redis,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Redis => write!(f, "redis"),
        }
    }
}

/// Key-value storage with per-key expiry.
///
/// Both engines behave identically from the caller's side: values are opaque
/// strings, every write carries a TTL, and an expired entry is
/// indistinguishable from one that never existed. Callers hold the backend as
/// `Arc<dyn CacheBackend>` and never branch on the concrete engine.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch a value. Missing keys, expired entries and transport failures
    /// all come back as `None`; a read never errors.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store a value with a TTL, overwriting any previous value and expiry
    /// unconditionally. A zero TTL is rejected as invalid.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Remove a key, reporting whether a live entry existed.
    async fn delete(&self, key: &str) -> bool;

    /// Time left before the key expires. `None` when the key is missing,
    /// already expired, or has no expiry set.
    async fn remaining_ttl(&self, key: &str) -> Option<Duration>;

    /// Reset the expiry clock to `new_ttl` from now without touching the
    /// value. `Ok(false)` when there is no live entry to extend.
    async fn extend_ttl(&self, key: &str, new_ttl: Duration) -> Result<bool>;

    /// Bounded liveness probe. Reports health as a plain boolean and never
    /// errors, so it can run on a timer.
    async fn healthcheck(&self) -> bool;

    /// Release held resources. Safe to call more than once.
    async fn shutdown(&self);

    /// Which engine this backend is
    fn kind(&self) -> BackendKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(BackendKind::Memory.to_string(), "memory");
        assert_eq!(BackendKind::Redis.to_string(), "redis");
    }
}
