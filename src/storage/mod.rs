//! Storage backends behind the uniform cache contract
//!
//! Two engines implement [`CacheBackend`]: [`MemoryBackend`], a process-local
//! map with a background expiry sweep, and [`RedisBackend`], which delegates
//! expiry to Redis itself. [`resolve_backend`] picks one of them at process
//! start; after that the choice never changes for the life of the process.
//!
//! ## Example
//!
//! ```rust
//! use insight_cache::storage::{CacheBackend, MemoryBackend};
//! use std::time::Duration;
//!
//! # async fn example() -> insight_cache::Result<()> {
//! let backend = MemoryBackend::new(Duration::from_secs(60));
//! backend
//!     .set("greeting", "hello".to_string(), Duration::from_secs(30))
//!     .await?;
//! assert_eq!(backend.get("greeting").await.as_deref(), Some("hello"));
//! backend.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod entry;
pub mod memory;
pub mod redis;
pub mod select;

pub use backend::{BackendKind, CacheBackend};
pub use entry::CacheEntry;
pub use memory::{CacheStats, MemoryBackend};
// `self::` keeps this from colliding with the redis crate name
pub use self::redis::RedisBackend;
pub use select::resolve_backend;
