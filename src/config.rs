//! Configuration for cache backends and policy wrappers

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Configuration for the caching layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Prefer the Redis backend when it answers the startup probe
    pub prefer_redis: bool,
    /// Redis connection URL
    pub redis_url: String,
    /// Default time-to-live for cached values; sessions use this directly
    pub default_ttl: Duration,
    /// How many times a cached verdict may be served before it goes stale
    pub max_views: u32,
    /// Retention window for fetched articles, in days
    pub article_retention_days: u32,
    /// Interval between background sweeps of the in-memory backend
    pub sweep_interval: Duration,
    /// Upper bound on a single health check round-trip
    pub healthcheck_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            prefer_redis: true,
            redis_url: "redis://localhost:6379/0".to_string(),
            default_ttl: Duration::from_secs(3600), // 1 hour session lifetime
            max_views: 10,
            article_retention_days: 30,
            sweep_interval: Duration::from_secs(60),
            healthcheck_timeout: Duration::from_millis(1000),
        }
    }
}

impl CacheConfig {
    /// Create a builder for custom configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Preset for local development: memory-only with short lifetimes
    pub fn development() -> Self {
        Self {
            prefer_redis: false,
            default_ttl: Duration::from_secs(300),
            sweep_interval: Duration::from_secs(5),
            ..Default::default()
        }
    }

    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads a `.env` file if one is present. Unparseable values are logged
    /// and replaced with their defaults rather than failing startup.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let defaults = Self::default();
        Self {
            prefer_redis: env_bool("USE_REDIS", defaults.prefer_redis),
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            default_ttl: Duration::from_secs(env_u64(
                "SESSION_TTL_SECONDS",
                defaults.default_ttl.as_secs(),
            )),
            max_views: env_u64("CACHE_MAX_VIEWS", u64::from(defaults.max_views)) as u32,
            article_retention_days: env_u64(
                "ARTICLE_RETENTION_DAYS",
                u64::from(defaults.article_retention_days),
            ) as u32,
            sweep_interval: Duration::from_secs(env_u64(
                "CACHE_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval.as_secs(),
            )),
            healthcheck_timeout: Duration::from_millis(env_u64(
                "HEALTHCHECK_TIMEOUT_MS",
                defaults.healthcheck_timeout.as_millis() as u64,
            )),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.prefer_redis && self.redis_url.is_empty() {
            return Err(CacheError::Config(
                "redis_url must be set when prefer_redis is enabled".to_string(),
            ));
        }
        if self.default_ttl.is_zero() {
            return Err(CacheError::Config(
                "default_ttl must be greater than zero".to_string(),
            ));
        }
        if self.max_views == 0 {
            return Err(CacheError::Config(
                "max_views must be at least 1".to_string(),
            ));
        }
        if self.article_retention_days == 0 {
            return Err(CacheError::Config(
                "article_retention_days must be at least 1".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(CacheError::Config(
                "sweep_interval must be greater than zero".to_string(),
            ));
        }
        if self.healthcheck_timeout.is_zero() {
            return Err(CacheError::Config(
                "healthcheck_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`CacheConfig`]
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    prefer_redis: Option<bool>,
    redis_url: Option<String>,
    default_ttl: Option<Duration>,
    max_views: Option<u32>,
    article_retention_days: Option<u32>,
    sweep_interval: Option<Duration>,
    healthcheck_timeout: Option<Duration>,
}

impl CacheConfigBuilder {
    pub fn prefer_redis(mut self, prefer: bool) -> Self {
        self.prefer_redis = Some(prefer);
        self
    }

    pub fn redis_url(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    pub fn max_views(mut self, views: u32) -> Self {
        self.max_views = Some(views);
        self
    }

    pub fn article_retention_days(mut self, days: u32) -> Self {
        self.article_retention_days = Some(days);
        self
    }

    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = Some(interval);
        self
    }

    pub fn healthcheck_timeout(mut self, timeout: Duration) -> Self {
        self.healthcheck_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();
        CacheConfig {
            prefer_redis: self.prefer_redis.unwrap_or(defaults.prefer_redis),
            redis_url: self.redis_url.unwrap_or(defaults.redis_url),
            default_ttl: self.default_ttl.unwrap_or(defaults.default_ttl),
            max_views: self.max_views.unwrap_or(defaults.max_views),
            article_retention_days: self
                .article_retention_days
                .unwrap_or(defaults.article_retention_days),
            sweep_interval: self.sweep_interval.unwrap_or(defaults.sweep_interval),
            healthcheck_timeout: self
                .healthcheck_timeout
                .unwrap_or(defaults.healthcheck_timeout),
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparseable {}={:?}, using {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => match parse_bool(&raw) {
            Some(value) => value,
            None => {
                warn!("Ignoring unparseable {}={:?}, using {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert!(config.prefer_redis);
        assert_eq!(config.default_ttl, Duration::from_secs(3600));
        assert_eq!(config.max_views, 10);
        assert_eq!(config.article_retention_days, 30);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = CacheConfig::builder()
            .prefer_redis(false)
            .max_views(3)
            .default_ttl(Duration::from_secs(60))
            .build();
        assert!(!config.prefer_redis);
        assert_eq!(config.max_views, 3);
        assert_eq!(config.default_ttl, Duration::from_secs(60));
        // untouched fields keep their defaults
        assert_eq!(config.article_retention_days, 30);
    }

    #[test]
    fn test_validation_rejects_zero_ttl() {
        let config = CacheConfig::builder().default_ttl(Duration::ZERO).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_views() {
        let config = CacheConfig::builder().max_views(0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_url_when_preferred() {
        let config = CacheConfig::builder()
            .prefer_redis(true)
            .redis_url("")
            .build();
        assert!(config.validate().is_err());

        let config = CacheConfig::builder()
            .prefer_redis(false)
            .redis_url("")
            .build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_development_preset() {
        let config = CacheConfig::development();
        assert!(!config.prefer_redis);
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool(" YES "), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
