//! Day-scoped sentiment verdict cache with a view-count ceiling
//!
//! A verdict is an expensive aggregation, so it is cached per token,
//! timeframe and calendar day. Freshness is two conditions at once: the TTL
//! must not have elapsed AND the verdict must have been served fewer than
//! `max_views` times. The counter rides inside the stored envelope, so the
//! ceiling works the same on every backend.

use crate::error::{CacheError, Result};
use crate::keys;
use crate::model::SentimentVerdict;
use crate::storage::CacheBackend;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Stored envelope: the verdict plus its serve counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedVerdict {
    pub verdict: SentimentVerdict,
    /// Set to 1 on write, incremented on every hit
    pub view_count: u32,
}

impl CachedVerdict {
    /// Serialize into a backend value
    pub fn to_cache_value(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CacheError::Serialization(e.to_string()))
    }

    /// Deserialize from a backend value
    pub fn from_cache_value(value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(|e| CacheError::Serialization(e.to_string()))
    }
}

/// Cache for computed sentiment verdicts
pub struct VerdictCache {
    backend: Arc<dyn CacheBackend>,
    max_views: u32,
}

impl VerdictCache {
    pub fn new(backend: Arc<dyn CacheBackend>, max_views: u32) -> Self {
        Self { backend, max_views }
    }

    /// Look up a verdict that is inside both its TTL and its view budget.
    ///
    /// A hit increments the stored counter in place, re-writing the envelope
    /// with whatever TTL the entry had left so the expiry clock never
    /// resets. Backend trouble and undecodable payloads are plain misses;
    /// the caller recomputes and the cache repairs itself on the next `put`.
    pub async fn get_if_fresh(
        &self,
        token: &str,
        timeframe: &str,
        date: NaiveDate,
    ) -> Option<SentimentVerdict> {
        let key = keys::verdict(token, timeframe, date);

        let raw = match self.backend.get(&key).await {
            Some(raw) => raw,
            None => {
                debug!("Verdict cache miss: {}", key);
                return None;
            }
        };

        let mut cached = match CachedVerdict::from_cache_value(&raw) {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Discarding undecodable verdict for {}: {}", key, e);
                return None;
            }
        };

        if cached.view_count > self.max_views {
            info!(
                "Verdict for {} reached its view ceiling ({}); treating as stale",
                key, self.max_views
            );
            return None;
        }

        let remaining = match self.backend.remaining_ttl(&key).await {
            Some(remaining) => remaining,
            None => {
                debug!("Verdict for {} expired during lookup", key);
                return None;
            }
        };

        let view = cached.view_count;
        cached.view_count += 1;
        match cached.to_cache_value() {
            Ok(value) => {
                if let Err(e) = self.backend.set(&key, value, remaining).await {
                    warn!("Failed to persist view count for {}: {}", key, e);
                }
            }
            Err(e) => warn!("Failed to persist view count for {}: {}", key, e),
        }

        debug!(
            "Verdict cache hit: {} (view {} of {})",
            key, view, self.max_views
        );
        Some(cached.verdict)
    }

    /// Store a freshly computed verdict, resetting the view budget.
    ///
    /// Only an invalid TTL surfaces as an error. A backend write failure is
    /// logged and swallowed: the caller already has the verdict in hand, and
    /// a cache problem must not fail the computation that produced it.
    pub async fn put(
        &self,
        token: &str,
        timeframe: &str,
        date: NaiveDate,
        verdict: SentimentVerdict,
        ttl: Duration,
    ) -> Result<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl { requested: ttl });
        }
        let key = keys::verdict(token, timeframe, date);
        let cached = CachedVerdict {
            verdict,
            view_count: 1,
        };
        match cached.to_cache_value() {
            Ok(value) => {
                if let Err(e) = self.backend.set(&key, value, ttl).await {
                    warn!("Failed to cache verdict for {}: {}", key, e);
                } else {
                    debug!("Cached verdict: {} (ttl {:?})", key, ttl);
                }
            }
            Err(e) => warn!("Failed to cache verdict for {}: {}", key, e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentiment;

    #[test]
    fn test_envelope_roundtrip() {
        let cached = CachedVerdict {
            verdict: SentimentVerdict {
                sentiment: Sentiment::Bearish,
                confidence: 0.4,
                summary: "Cooling off".to_string(),
                cited_sources: Vec::new(),
            },
            view_count: 7,
        };
        let value = cached.to_cache_value().unwrap();
        let parsed = CachedVerdict::from_cache_value(&value).unwrap();
        assert_eq!(parsed.view_count, 7);
        assert_eq!(parsed.verdict.sentiment, Sentiment::Bearish);
    }

    #[test]
    fn test_envelope_rejects_garbage() {
        let result = CachedVerdict::from_cache_value("{\"nope\": true}");
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
