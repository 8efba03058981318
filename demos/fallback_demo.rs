//! Backend selection walkthrough: probe Redis, fall back, shut down cleanly
//!
//! Usage:
//!   cargo run --example fallback_demo
//!
//! Point REDIS_URL at a live server to see the Redis path; leave the
//! default dead port to watch the in-memory fallback take over.

use insight_cache::{resolve_backend, CacheConfig, SessionCache, SessionData};
use std::time::Duration;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let redis_url = std::env::var("REDIS_URL")
        .unwrap_or_else(|_| "redis://127.0.0.1:9999/0".to_string());
    let config = CacheConfig::builder()
        .prefer_redis(true)
        .redis_url(redis_url)
        .healthcheck_timeout(Duration::from_millis(500))
        .build();
    config.validate()?;

    let backend = resolve_backend(&config).await;
    info!("Resolved backend: {}", backend.kind());
    info!("Healthy: {}", backend.healthcheck().await);

    let sessions = SessionCache::new(backend.clone(), Duration::from_secs(3600));
    let mut session = SessionData::new();
    session.push_turn("user", "hello");
    session.push_turn("assistant", "hi, which token should we look at?");
    sessions.save(&session).await;

    info!(
        "Session {} stored with {:?} remaining",
        session.session_id,
        sessions.remaining(&session.session_id).await
    );

    backend.shutdown().await;
    info!("Shut down cleanly");
    Ok(())
}
