//! Integration tests for the Redis backend
//!
//! Most of these need a running Redis (REDIS_URL, defaulting to
//! localhost:6379) and are marked #[ignore]; the container test needs
//! Docker. Run with: cargo test -- --ignored

use insight_cache::storage::{BackendKind, CacheBackend, RedisBackend};
use std::time::Duration;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379/0".to_string())
}

fn backend() -> RedisBackend {
    RedisBackend::new(&redis_url(), Duration::from_secs(1)).expect("valid Redis URL")
}

#[tokio::test]
#[ignore] // Run with: cargo test --ignored
async fn test_redis_roundtrip() {
    let backend = backend();
    backend
        .set(
            "insight-test:roundtrip",
            "value".to_string(),
            Duration::from_secs(30),
        )
        .await
        .unwrap();
    assert_eq!(
        backend.get("insight-test:roundtrip").await.as_deref(),
        Some("value")
    );
    assert!(backend.delete("insight-test:roundtrip").await);
    assert_eq!(backend.get("insight-test:roundtrip").await, None);
    backend.shutdown().await;
}

#[tokio::test]
#[ignore]
async fn test_redis_native_expiry() {
    let backend = backend();
    backend
        .set(
            "insight-test:expiry",
            "value".to_string(),
            Duration::from_millis(400),
        )
        .await
        .unwrap();
    assert!(backend.get("insight-test:expiry").await.is_some());

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(backend.get("insight-test:expiry").await, None);
    backend.shutdown().await;
}

#[tokio::test]
#[ignore]
async fn test_redis_remaining_and_extend() {
    let backend = backend();
    backend
        .set(
            "insight-test:ttl",
            "value".to_string(),
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    let remaining = backend.remaining_ttl("insight-test:ttl").await.unwrap();
    assert!(remaining <= Duration::from_secs(5));
    assert!(remaining > Duration::from_secs(3));

    assert!(backend
        .extend_ttl("insight-test:ttl", Duration::from_secs(30))
        .await
        .unwrap());
    let extended = backend.remaining_ttl("insight-test:ttl").await.unwrap();
    assert!(extended > Duration::from_secs(10));

    assert!(!backend
        .extend_ttl("insight-test:never-set", Duration::from_secs(30))
        .await
        .unwrap());

    backend.delete("insight-test:ttl").await;
    backend.shutdown().await;
}

#[tokio::test]
#[ignore]
async fn test_redis_healthcheck() {
    let backend = backend();
    assert!(backend.healthcheck().await);
    assert_eq!(backend.kind(), BackendKind::Redis);
    backend.shutdown().await;
}

#[tokio::test]
#[ignore] // Needs Docker
async fn test_against_redis_container() {
    use testcontainers::clients::Cli;
    use testcontainers_modules::redis::Redis;

    let docker = Cli::default();
    let node = docker.run(Redis::default());
    let url = format!("redis://127.0.0.1:{}/0", node.get_host_port_ipv4(6379));

    let backend = RedisBackend::new(&url, Duration::from_secs(1)).unwrap();
    assert!(backend.healthcheck().await);

    backend
        .set("k", "v".to_string(), Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(backend.get("k").await.as_deref(), Some("v"));
    assert!(backend.remaining_ttl("k").await.is_some());
    backend.shutdown().await;
}
