//! # insight-cache
//!
//! Caching and session-state layer shared by the market-insight services:
//! conversation sessions for the chat service, and sentiment verdicts plus
//! fetched articles for the analysis pipeline. Everything lives behind one
//! TTL key-value contract so the services never care which engine is
//! underneath.
//!
//! ## Features
//!
//! - **Uniform backend contract**: get, set-with-TTL, delete, TTL
//!   inspection and extension, health checks and ordered shutdown
//! - **Two engines**: a process-local map with a background expiry sweep,
//!   and Redis using its native per-key expiry
//! - **Probe-once selection**: Redis is probed at startup and the process
//!   falls back to memory for its whole lifetime if the probe fails
//! - **View-counted verdicts**: expensive sentiment verdicts go stale after
//!   a fixed number of serves, not just after a fixed time
//! - **Reusable articles**: fetched articles are deduplicated by URL and
//!   filtered by fetch recency
//! - **Rolling sessions**: every save renews the session's full TTL
//!
//! ## Quick start
//!
//! ```no_run
//! use insight_cache::{resolve_backend, CacheConfig, SessionCache, SessionData};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CacheConfig::from_env();
//!     config.validate()?;
//!     let backend = resolve_backend(&config).await;
//!
//!     let sessions = SessionCache::new(backend.clone(), config.default_ttl);
//!     let mut session = SessionData::new();
//!     session.push_turn("user", "How is BTC looking this week?");
//!     sessions.save(&session).await;
//!
//!     backend.shutdown().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Caching verdicts
//!
//! ```no_run
//! use chrono::Utc;
//! use insight_cache::{
//!     resolve_backend, CacheConfig, Sentiment, SentimentVerdict, VerdictCache,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = CacheConfig::from_env();
//! let backend = resolve_backend(&config).await;
//! let verdicts = VerdictCache::new(backend.clone(), config.max_views);
//!
//! let today = Utc::now().date_naive();
//! if verdicts.get_if_fresh("BTC", "7d", today).await.is_none() {
//!     let computed = SentimentVerdict {
//!         sentiment: Sentiment::Bullish,
//!         confidence: 0.8,
//!         summary: "Steady accumulation".to_string(),
//!         cited_sources: Vec::new(),
//!     };
//!     verdicts
//!         .put("BTC", "7d", today, computed, config.default_ttl)
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod articles;
pub mod config;
pub mod error;
pub mod keys;
pub mod model;
pub mod sessions;
pub mod storage;
pub mod verdicts;

// Core contract and backends
pub use storage::{
    resolve_backend, BackendKind, CacheBackend, CacheEntry, CacheStats, MemoryBackend,
    RedisBackend,
};

// Configuration and errors
pub use config::{CacheConfig, CacheConfigBuilder};
pub use error::{CacheError, Result};

// Payload types
pub use model::{
    Article, ConversationTurn, Sentiment, SentimentVerdict, SessionData, SourceCitation,
};

// Policy wrappers
pub use articles::{ArticleBundle, ArticleCache, StoredArticle};
pub use sessions::SessionCache;
pub use verdicts::{CachedVerdict, VerdictCache};
