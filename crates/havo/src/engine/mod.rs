//! Cache-aside weather retrieval.
//!
//! [`WeatherEngine`] is the only component that decides when to read or
//! write the cache and when to call the provider. It is cheap to clone; all
//! clones share the same cache, provider, in-flight fetches and health
//! counters.

mod bulk;
mod gate;
mod inflight;
mod refresh;
mod write_health;

use std::{sync::Arc, time::Duration};

use havo_core::{
    cache::{deserialize_record, location_key, serialize_record, Cache, CacheError},
    weather::{
        format_reading, parse_reading, FormattedWeatherRecord, Result, WeatherError,
        WeatherProvider, REFRESH_ROSTER,
    },
};
use tokio::{sync::Mutex, time::timeout};

pub use gate::ApiKeyGate;
pub use write_health::{CacheWriteHealth, CacheWriteStatus};

use inflight::InFlightFetches;

/// Tunables for [`WeatherEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Expiry of every cached record.
    pub ttl: Duration,
    /// Bound on each cache call.
    pub cache_timeout: Duration,
    /// Bound on each provider call.
    pub provider_timeout: Duration,
    /// Pause between roster lookups during a refresh.
    pub refresh_throttle: Duration,
    /// Lookups running at once within one bulk request.
    pub bulk_concurrency: usize,
    /// Whether concurrent misses for one key share a provider fetch.
    pub coalesce_fetches: bool,
    /// Consecutive cache write failures before health degrades.
    pub write_failure_threshold: u64,
    /// Locations re-fetched by a full refresh.
    pub roster: &'static [&'static str],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30 * 60),
            cache_timeout: Duration::from_secs(2),
            provider_timeout: Duration::from_secs(10),
            refresh_throttle: Duration::from_millis(500),
            bulk_concurrency: 4,
            coalesce_fetches: true,
            write_failure_threshold: 3,
            roster: REFRESH_ROSTER,
        }
    }
}

#[derive(Clone)]
pub struct WeatherEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    cache: Arc<dyn Cache>,
    provider: Arc<dyn WeatherProvider>,
    config: EngineConfig,
    inflight: InFlightFetches,
    write_health: CacheWriteHealth,
    refresh_lock: Mutex<()>,
}

impl WeatherEngine {
    pub fn new(
        cache: Arc<dyn Cache>,
        provider: Arc<dyn WeatherProvider>,
        config: EngineConfig,
    ) -> Self {
        let write_health = CacheWriteHealth::new(config.write_failure_threshold);
        Self {
            inner: Arc::new(EngineInner {
                cache,
                provider,
                config,
                inflight: InFlightFetches::default(),
                write_health,
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    /// Returns the current weather for one location.
    ///
    /// Served from the cache when a fresh record exists; otherwise fetched
    /// from the provider, formatted, and written back with the configured TTL.
    /// A failed write is logged and tracked but does not fail the lookup.
    pub async fn fetch_weather(&self, query: &str) -> Result<FormattedWeatherRecord> {
        let key = location_key(query);

        match self.inner.read_cached(&key).await {
            Ok(record) => {
                tracing::trace!(location = %key, "Cache hit");
                return Ok(record);
            }
            Err(WeatherError::NoCachedData) => {
                tracing::trace!(location = %key, "Cache miss");
            }
            Err(err) => return Err(err),
        }

        let query = query.trim().to_string();
        if !self.inner.config.coalesce_fetches {
            return self.inner.fetch_and_store(&key, &query).await;
        }

        let inner = Arc::clone(&self.inner);
        let fetch_key = key.clone();
        self.inner
            .inflight
            .run(&key, async move { inner.fetch_and_store(&fetch_key, &query).await })
            .await
    }

    pub fn write_status(&self) -> CacheWriteStatus {
        self.inner.write_health.status()
    }
}

impl EngineInner {
    async fn read_cached(&self, key: &str) -> Result<FormattedWeatherRecord> {
        let bytes = timeout(self.config.cache_timeout, self.cache.get(key))
            .await
            .map_err(|_| CacheError::Timeout(self.config.cache_timeout))??
            .ok_or(WeatherError::NoCachedData)?;

        deserialize_record(&bytes).map_err(|err| {
            tracing::warn!(location = %key, error = %err, "Discarding unreadable cache entry");
            WeatherError::NoCachedData
        })
    }

    async fn fetch_and_store(&self, key: &str, query: &str) -> Result<FormattedWeatherRecord> {
        tracing::debug!(location = %key, "Fetching weather from provider");

        let body = timeout(self.config.provider_timeout, self.provider.current(query))
            .await
            .map_err(|_| {
                WeatherError::UpstreamUnavailable(format!(
                    "provider did not answer within {:?}",
                    self.config.provider_timeout
                ))
            })??;

        let record = format_reading(parse_reading(&body)?);
        self.store(key, &record).await;

        Ok(record)
    }

    async fn store(&self, key: &str, record: &FormattedWeatherRecord) {
        let written = match serialize_record(record) {
            Ok(bytes) => timeout(
                self.config.cache_timeout,
                self.cache.set(key, &bytes, Some(self.config.ttl)),
            )
            .await
            .unwrap_or(Err(CacheError::Timeout(self.config.cache_timeout)))
            .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        };

        match written {
            Ok(()) => self.write_health.record_success(),
            Err(error) => {
                if self.write_health.record_failure(&error) {
                    tracing::error!(location = %key, error = %error, "Cache writes keep failing");
                } else {
                    tracing::warn!(location = %key, error = %error, "Failed to cache weather record");
                }
            }
        }
    }
}
