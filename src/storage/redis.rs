//! Redis cache backend
//!
//! Values are written with `PSETEX` so Redis enforces expiry natively; there
//! is no sweep task on this side. The multiplexed connection is established
//! lazily on first use and shared by cloning it per operation. When Redis
//! misbehaves mid-run, each operation degrades to the contract's safe answer
//! (`None`, `false`) and logs a warning; only `healthcheck` reports the
//! outage as such.

use crate::error::{CacheError, Result};
use crate::storage::backend::{BackendKind, CacheBackend};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct RedisBackend {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
    healthcheck_timeout: Duration,
}

impl RedisBackend {
    /// Create a backend for the given URL.
    ///
    /// Fails only when the URL itself is malformed; no connection is
    /// attempted until the first operation needs one.
    pub fn new(url: &str, healthcheck_timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CacheError::Unavailable(format!("invalid Redis URL: {}", e)))?;
        Ok(Self {
            client,
            conn: Mutex::new(None),
            healthcheck_timeout,
        })
    }

    /// Hand out the shared connection, establishing it on first use
    async fn connection(&self) -> redis::RedisResult<MultiplexedConnection> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self.client.get_multiplexed_async_connection().await?;
        debug!("Established Redis connection");
        *guard = Some(conn.clone());
        Ok(conn)
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Option<String> {
        let attempt: redis::RedisResult<Option<String>> = async {
            let mut conn = self.connection().await?;
            conn.get(key).await
        }
        .await;
        match attempt {
            Ok(value) => {
                if value.is_some() {
                    debug!("Redis hit: {}", key);
                }
                value
            }
            Err(e) => {
                warn!("Redis get failed for {}: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl { requested: ttl });
        }
        let attempt: redis::RedisResult<()> = async {
            let mut conn = self.connection().await?;
            conn.pset_ex(key, value, ttl.as_millis() as u64).await
        }
        .await;
        match attempt {
            Ok(()) => {
                debug!("Stored {} in Redis (ttl {:?})", key, ttl);
                Ok(())
            }
            Err(e) => {
                warn!("Redis set failed for {}: {}", key, e);
                Err(CacheError::Driver(e))
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        let attempt: redis::RedisResult<i64> = async {
            let mut conn = self.connection().await?;
            conn.del(key).await
        }
        .await;
        match attempt {
            Ok(removed) => removed > 0,
            Err(e) => {
                warn!("Redis delete failed for {}: {}", key, e);
                false
            }
        }
    }

    async fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let attempt: redis::RedisResult<i64> = async {
            let mut conn = self.connection().await?;
            conn.pttl(key).await
        }
        .await;
        match attempt {
            // -2 is a missing key, -1 an entry without expiry; both are
            // absent under this contract
            Ok(ms) if ms > 0 => Some(Duration::from_millis(ms as u64)),
            Ok(_) => None,
            Err(e) => {
                warn!("Redis TTL lookup failed for {}: {}", key, e);
                None
            }
        }
    }

    async fn extend_ttl(&self, key: &str, new_ttl: Duration) -> Result<bool> {
        if new_ttl.is_zero() {
            return Err(CacheError::InvalidTtl { requested: new_ttl });
        }
        let attempt: redis::RedisResult<bool> = async {
            let mut conn = self.connection().await?;
            conn.pexpire(key, new_ttl.as_millis() as i64).await
        }
        .await;
        match attempt {
            Ok(updated) => Ok(updated),
            Err(e) => {
                warn!("Redis TTL extend failed for {}: {}", key, e);
                Ok(false)
            }
        }
    }

    async fn healthcheck(&self) -> bool {
        let ping = async {
            let mut conn = self.connection().await?;
            let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>(pong)
        };
        match tokio::time::timeout(self.healthcheck_timeout, ping).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!("Redis health check failed: {}", e);
                false
            }
            Err(_) => {
                warn!(
                    "Redis health check timed out after {:?}",
                    self.healthcheck_timeout
                );
                false
            }
        }
    }

    async fn shutdown(&self) {
        let mut guard = self.conn.lock().await;
        if guard.take().is_some() {
            debug!("Released Redis connection");
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Redis
    }
}
