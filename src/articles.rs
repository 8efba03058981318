//! Fetched-article cache
//!
//! Articles are reusable evidence: fetching them is slow and rate-limited,
//! so the sentiment pipeline asks this cache first and only crawls for what
//! is missing. Per token and timeframe the backend holds one bundle, a map
//! keyed by article URL. Re-storing a URL replaces the entry outright, which
//! keeps one copy per source no matter how often it is re-fetched.

use crate::keys;
use crate::model::Article;
use crate::storage::CacheBackend;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// One article plus the bookkeeping the recency filter needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredArticle {
    #[serde(flatten)]
    pub article: Article,
    /// When this article was last fetched, refreshed on every upsert
    pub fetched_at: DateTime<Utc>,
}

/// All cached articles for one token and timeframe, keyed by URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleBundle {
    pub articles: BTreeMap<String, StoredArticle>,
}

/// Article cache: no view counting, pure recency
pub struct ArticleCache {
    backend: Arc<dyn CacheBackend>,
    retention_days: u32,
}

impl ArticleCache {
    pub fn new(backend: Arc<dyn CacheBackend>, retention_days: u32) -> Self {
        Self {
            backend,
            retention_days,
        }
    }

    fn retention(&self) -> Duration {
        Duration::from_secs(u64::from(self.retention_days) * 86_400)
    }

    /// Cached articles for the scope fetched within the last `max_age_days`,
    /// newest first. Backend trouble and undecodable bundles come back as an
    /// empty list, which the caller reads as "nothing cached, go fetch".
    pub async fn get_recent(&self, token: &str, timeframe: &str, max_age_days: u32) -> Vec<Article> {
        let key = keys::articles(token, timeframe);
        let raw = match self.backend.get(&key).await {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        let bundle: ArticleBundle = match serde_json::from_str(&raw) {
            Ok(bundle) => bundle,
            Err(e) => {
                warn!("Discarding undecodable article bundle for {}: {}", key, e);
                return Vec::new();
            }
        };

        let cutoff = Utc::now() - chrono::Duration::days(i64::from(max_age_days));
        let mut fresh: Vec<StoredArticle> = bundle
            .articles
            .into_values()
            .filter(|stored| stored.fetched_at > cutoff)
            .collect();
        fresh.sort_by(|a, b| b.fetched_at.cmp(&a.fetched_at));

        debug!("Article cache for {}: {} fresh entries", key, fresh.len());
        fresh.into_iter().map(|stored| stored.article).collect()
    }

    /// Upsert articles into the scope's bundle by URL.
    ///
    /// Re-fetching a known source replaces its content and refreshes its
    /// fetch time; entries older than the retention window are pruned on the
    /// way out. Write failures are logged and swallowed.
    pub async fn store(&self, token: &str, timeframe: &str, articles: &[Article]) {
        if articles.is_empty() {
            return;
        }
        let key = keys::articles(token, timeframe);

        let mut bundle: ArticleBundle = match self.backend.get(&key).await {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Resetting undecodable article bundle for {}: {}", key, e);
                ArticleBundle::default()
            }),
            None => ArticleBundle::default(),
        };

        let now = Utc::now();
        for article in articles {
            bundle.articles.insert(
                article.url.clone(),
                StoredArticle {
                    article: article.clone(),
                    fetched_at: now,
                },
            );
        }

        let cutoff = now - chrono::Duration::days(i64::from(self.retention_days));
        bundle.articles.retain(|_, stored| stored.fetched_at > cutoff);

        let count = bundle.articles.len();
        match serde_json::to_string(&bundle) {
            Ok(value) => {
                if let Err(e) = self.backend.set(&key, value, self.retention()).await {
                    warn!("Failed to cache articles for {}: {}", key, e);
                } else {
                    debug!("Cached {} articles for {}", count, key);
                }
            }
            Err(e) => warn!("Failed to cache articles for {}: {}", key, e),
        }
    }
}
