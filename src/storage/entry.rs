//! Expiry bookkeeping for in-memory cache entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A stored value with its expiry metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry that expires `ttl` from now
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at =
            now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(3600));
        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    /// Check whether the entry has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Time left before expiry, `None` once expired
    pub fn remaining(&self) -> Option<Duration> {
        (self.expires_at - Utc::now()).to_std().ok()
    }

    /// Reset the expiry clock to `ttl` from now, keeping the value
    pub fn reset_expiry(&mut self, ttl: Duration) {
        self.expires_at =
            Utc::now() + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(3600));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_entry_is_live() {
        let entry = CacheEntry::new("value".to_string(), Duration::from_secs(60));
        assert!(!entry.is_expired());
        let remaining = entry.remaining().unwrap();
        assert!(remaining <= Duration::from_secs(60));
        assert!(remaining > Duration::from_secs(58));
    }

    #[test]
    fn test_entry_expires() {
        let entry = CacheEntry::new("value".to_string(), Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(50));
        assert!(entry.is_expired());
        assert!(entry.remaining().is_none());
    }

    #[test]
    fn test_reset_expiry_revives_clock() {
        let mut entry = CacheEntry::new("value".to_string(), Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(50));
        assert!(entry.is_expired());

        entry.reset_expiry(Duration::from_secs(60));
        assert!(!entry.is_expired());
        assert_eq!(entry.value, "value");
    }
}
