//! Process-local cache backend
//!
//! Entries live in a single map behind one async mutex. Expiry is enforced
//! twice over: reads check the deadline and drop dead entries on the spot,
//! and a background task sweeps the whole map on a fixed interval so idle
//! entries cannot pile up between reads.

use crate::error::{CacheError, Result};
use crate::storage::backend::{BackendKind, CacheBackend};
use crate::storage::entry::CacheEntry;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Counters describing cache effectiveness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Misses caused by lazy expiry at read time
    pub expired_reads: u64,
    /// Entries removed by the background sweep
    pub swept: u64,
    pub insertions: u64,
}

impl CacheStats {
    /// Hit rate as a percentage of all reads
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Map plus counters, guarded together by one lock
#[derive(Default)]
struct MemoryStore {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

/// In-memory backend, used standalone in development and as the fallback
/// target when Redis is unreachable at startup.
pub struct MemoryBackend {
    store: Arc<Mutex<MemoryStore>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl MemoryBackend {
    /// Create a backend and start its sweep task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(sweep_interval: Duration) -> Self {
        let store = Arc::new(Mutex::new(MemoryStore::default()));
        let sweeper = tokio::spawn(sweep_loop(Arc::clone(&store), sweep_interval));
        info!(
            "In-memory cache backend started (sweep every {:?})",
            sweep_interval
        );
        Self {
            store,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Number of stored entries, including expired ones the sweep has not
    /// visited yet
    pub async fn len(&self) -> usize {
        self.store.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop all entries
    pub async fn clear(&self) {
        let mut store = self.store.lock().await;
        let count = store.entries.len();
        store.entries.clear();
        info!("Cleared {} entries from the in-memory cache", count);
    }

    /// Snapshot of the counters
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats.clone()
    }
}

/// Background task that periodically removes expired entries
async fn sweep_loop(store: Arc<Mutex<MemoryStore>>, interval: Duration) {
    loop {
        tokio::time::sleep(interval).await;
        let mut store = store.lock().await;
        let now = Utc::now();
        let before = store.entries.len();
        store.entries.retain(|_, entry| entry.expires_at >= now);
        let removed = (before - store.entries.len()) as u64;
        if removed > 0 {
            store.stats.swept += removed;
            debug!("Sweep removed {} expired entries", removed);
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let mut store = self.store.lock().await;
        let lookup = store.entries.get(key).map(|entry| {
            if entry.is_expired() {
                None
            } else {
                Some(entry.value.clone())
            }
        });
        match lookup {
            None => {
                store.stats.misses += 1;
                debug!("Cache miss: {}", key);
                None
            }
            Some(None) => {
                store.entries.remove(key);
                store.stats.misses += 1;
                store.stats.expired_reads += 1;
                debug!("Cache entry expired: {}", key);
                None
            }
            Some(Some(value)) => {
                store.stats.hits += 1;
                debug!("Cache hit: {}", key);
                Some(value)
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl { requested: ttl });
        }
        let mut store = self.store.lock().await;
        store
            .entries
            .insert(key.to_string(), CacheEntry::new(value, ttl));
        store.stats.insertions += 1;
        debug!("Stored cache entry: {} (ttl {:?})", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> bool {
        let mut store = self.store.lock().await;
        // an expired entry counts as already gone, matching what a read
        // would have reported
        let existed = match store.entries.remove(key) {
            Some(entry) => !entry.is_expired(),
            None => false,
        };
        if existed {
            debug!("Removed cache entry: {}", key);
        }
        existed
    }

    async fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let mut store = self.store.lock().await;
        let remaining = store.entries.get(key).and_then(|entry| entry.remaining());
        if remaining.is_none() {
            store.entries.remove(key);
        }
        remaining
    }

    async fn extend_ttl(&self, key: &str, new_ttl: Duration) -> Result<bool> {
        if new_ttl.is_zero() {
            return Err(CacheError::InvalidTtl { requested: new_ttl });
        }
        let mut store = self.store.lock().await;
        let live = store.entries.get(key).map(|entry| !entry.is_expired());
        match live {
            Some(true) => {
                if let Some(entry) = store.entries.get_mut(key) {
                    entry.reset_expiry(new_ttl);
                }
                debug!("Extended TTL for {}: {:?}", key, new_ttl);
                Ok(true)
            }
            Some(false) => {
                store.entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn healthcheck(&self) -> bool {
        true
    }

    async fn shutdown(&self) {
        let handle = self.sweeper.lock().await.take();
        if let Some(handle) = handle {
            handle.abort();
            // wait until the task has actually stopped so no sweep runs
            // after shutdown returns
            let _ = handle.await;
            info!("In-memory cache backend shut down");
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }
}

impl Drop for MemoryBackend {
    fn drop(&mut self) {
        // covers backends dropped without an explicit shutdown
        if let Ok(mut sweeper) = self.sweeper.try_lock() {
            if let Some(handle) = sweeper.take() {
                handle.abort();
            }
        }
    }
}
