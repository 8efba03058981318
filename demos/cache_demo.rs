//! Walkthrough of the verdict and article caches
//!
//! Usage:
//!   cargo run --example cache_demo
//!
//! Environment variables:
//!   USE_REDIS - prefer the Redis backend (default: true)
//!   REDIS_URL - Redis connection URL (default: redis://localhost:6379/0)
//!
//! The demo uses a view ceiling of 3 so the burn-down fits in five calls.

use chrono::Utc;
use insight_cache::{
    resolve_backend, Article, ArticleCache, CacheConfig, Sentiment, SentimentVerdict,
    SourceCitation, VerdictCache,
};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let config = CacheConfig::from_env();
    config.validate()?;
    let backend = resolve_backend(&config).await;
    info!("Resolved backend: {}", backend.kind());

    // cache a verdict, then watch the view counter burn down
    let verdicts = VerdictCache::new(backend.clone(), 3);
    let today = Utc::now().date_naive();
    let verdict = SentimentVerdict {
        sentiment: Sentiment::Bullish,
        confidence: 0.74,
        summary: "Accumulation continues across the week".to_string(),
        cited_sources: vec![SourceCitation {
            title: "BTC eyes new highs".to_string(),
            url: "https://example.com/btc-eyes-new-highs".to_string(),
        }],
    };
    verdicts
        .put("BTC", "7d", today, verdict, config.default_ttl)
        .await?;

    for call in 1..=5 {
        match verdicts.get_if_fresh("BTC", "7d", today).await {
            Some(v) => info!(
                "Call {}: HIT ({} at {:.2} confidence)",
                call, v.sentiment, v.confidence
            ),
            None => info!("Call {}: MISS, the pipeline would recompute now", call),
        }
    }

    // article reuse: stored once, served from cache afterwards
    let articles = ArticleCache::new(backend.clone(), config.article_retention_days);
    articles
        .store(
            "BTC",
            "7d",
            &[Article {
                url: "https://example.com/btc-eyes-new-highs".to_string(),
                title: "BTC eyes new highs".to_string(),
                content: "Exchange balances keep falling while...".to_string(),
                published_date: Some("2024-03-20".to_string()),
            }],
        )
        .await;
    let recent = articles.get_recent("BTC", "7d", 30).await;
    info!("Articles reusable for BTC/7d: {}", recent.len());

    backend.shutdown().await;
    Ok(())
}
