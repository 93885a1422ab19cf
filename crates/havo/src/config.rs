use std::{env, str::FromStr, time::Duration};

use crate::{engine::EngineConfig, provider::DEFAULT_BASE_URL};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// weatherapi.com key (default: empty)
    pub weatherapi_key: String,
    /// Provider base URL (default: "http://api.weatherapi.com/v1")
    pub weatherapi_base_url: String,
    /// Cache TTL in seconds (default: 1800)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    /// Note: Only used when the `memory` feature is enabled.
    #[allow(dead_code)]
    pub cache_max_entries: usize,
    /// Bound on every cache call in milliseconds (default: 2000)
    pub cache_timeout_ms: u64,
    /// Bound on every provider call in milliseconds (default: 10,000)
    pub provider_timeout_ms: u64,
    /// Bound on a whole HTTP request in seconds (default: 60)
    pub request_timeout_seconds: u64,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Seconds between full cache refreshes (default: 1800)
    pub refresh_interval_seconds: u64,
    /// Delay between roster lookups during a refresh (default: 500)
    pub refresh_throttle_ms: u64,
    /// Whether the refresh job runs at all (default: true)
    pub refresh_enabled: bool,
    /// Concurrent lookups per bulk request (default: 4)
    pub bulk_concurrency: usize,
    /// Share in-flight provider fetches between callers (default: true)
    pub coalesce_fetches: bool,
    /// Consecutive cache write failures before health degrades (default: 3)
    pub cache_write_failure_threshold: u64,
    /// API keys accepted by the in-memory account store (default: none)
    pub api_keys: Vec<String>,
    /// Path to SQLite account database (default: "havo.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            weatherapi_key: lookup("API_KEY_FOR_WEATHERAPI").unwrap_or_default(),
            weatherapi_base_url: lookup("WEATHERAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            cache_ttl_seconds: parsed(&lookup, "CACHE_TTL_SECONDS").unwrap_or(1_800),
            cache_max_entries: parsed(&lookup, "CACHE_MAX_ENTRIES").unwrap_or(10_000),
            cache_timeout_ms: parsed(&lookup, "CACHE_TIMEOUT_MS").unwrap_or(2_000),
            provider_timeout_ms: parsed(&lookup, "PROVIDER_TIMEOUT_MS").unwrap_or(10_000),
            request_timeout_seconds: parsed(&lookup, "REQUEST_TIMEOUT_SECONDS").unwrap_or(60),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            refresh_interval_seconds: parsed(&lookup, "REFRESH_INTERVAL_SECONDS")
                .unwrap_or(1_800),
            refresh_throttle_ms: parsed(&lookup, "REFRESH_THROTTLE_MS").unwrap_or(500),
            refresh_enabled: lookup("REFRESH_ENABLED")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            bulk_concurrency: parsed(&lookup, "BULK_CONCURRENCY").unwrap_or(4),
            coalesce_fetches: lookup("COALESCE_FETCHES")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            cache_write_failure_threshold: parsed(&lookup, "CACHE_WRITE_FAILURE_THRESHOLD")
                .unwrap_or(3),
            api_keys: lookup("HAVO_API_KEYS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "havo.db".to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Never zero; a zero period would stop the refresh job at startup.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds.max(1))
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            ttl: self.cache_ttl(),
            cache_timeout: Duration::from_millis(self.cache_timeout_ms),
            provider_timeout: self.provider_timeout(),
            refresh_throttle: Duration::from_millis(self.refresh_throttle_ms),
            bulk_concurrency: self.bulk_concurrency.max(1),
            coalesce_fetches: self.coalesce_fetches,
            write_failure_threshold: self.cache_write_failure_threshold.max(1),
            ..EngineConfig::default()
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    lookup(name).and_then(|v| parse_value(&v))
}

fn parse_value<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
