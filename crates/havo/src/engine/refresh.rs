use havo_core::{
    cache::CacheError,
    weather::{Result, WeatherError},
};
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

use super::WeatherEngine;

/// Counts from one full cache refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub refreshed: usize,
    pub failed: usize,
}

impl WeatherEngine {
    /// Flushes the whole cache and re-fetches every roster location.
    ///
    /// Lookups are spaced by the refresh throttle. A failing location is
    /// logged and skipped. Only one refresh runs at a time; a call made while
    /// another is running returns [`WeatherError::RefreshInProgress`].
    pub async fn refresh_cache(&self, cancel: &CancellationToken) -> Result<RefreshSummary> {
        let Ok(_running) = self.inner.refresh_lock.try_lock() else {
            tracing::warn!("Cache refresh already running, skipping");
            return Err(WeatherError::RefreshInProgress);
        };

        let config = &self.inner.config;
        timeout(config.cache_timeout, self.inner.cache.flush_all())
            .await
            .map_err(|_| CacheError::Timeout(config.cache_timeout))??;
        tracing::info!(locations = config.roster.len(), "Cache flushed, refreshing roster");

        let mut summary = RefreshSummary::default();
        for (index, location) in config.roster.iter().enumerate() {
            if index > 0 && !config.refresh_throttle.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(WeatherError::Cancelled),
                    _ = sleep(config.refresh_throttle) => {}
                }
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(WeatherError::Cancelled),
                outcome = self.fetch_weather(location) => outcome,
            };

            match outcome {
                Ok(_) => summary.refreshed += 1,
                Err(err) => {
                    tracing::warn!(location = %location, error = %err, "Failed to refresh location");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
