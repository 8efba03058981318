//! Backend selection at process start

use crate::config::CacheConfig;
use crate::storage::backend::{BackendKind, CacheBackend};
use crate::storage::memory::MemoryBackend;
use crate::storage::redis::RedisBackend;
use std::sync::Arc;
use tracing::{info, warn};

/// Resolve the backend for this process run.
///
/// Redis is probed exactly once, and only when `prefer_redis` is set. A
/// failed probe falls back to the in-memory backend for the remainder of the
/// process lifetime; there is no later re-probe or mid-run switch, so every
/// caller sharing the returned handle sees one coherent key space.
pub async fn resolve_backend(config: &CacheConfig) -> Arc<dyn CacheBackend> {
    if config.prefer_redis {
        match RedisBackend::new(&config.redis_url, config.healthcheck_timeout) {
            Ok(backend) => {
                if backend.healthcheck().await {
                    info!("Cache backend resolved: {}", BackendKind::Redis);
                    return Arc::new(backend);
                }
                warn!("Redis probe failed; falling back to the in-memory backend");
            }
            Err(e) => {
                warn!("Redis backend rejected: {}; falling back to the in-memory backend", e);
            }
        }
    }
    let backend = MemoryBackend::new(config.sweep_interval);
    info!("Cache backend resolved: {}", BackendKind::Memory);
    Arc::new(backend)
}
