//! Periodic full cache refresh.

use std::time::Duration;

use havo_core::weather::WeatherError;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::engine::WeatherEngine;

/// Spawns a task refreshing the cache every `every`, first one interval
/// after startup. The task ends when `shutdown` is cancelled.
pub fn spawn_refresh_job(
    engine: WeatherEngine,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(every = ?every, "Cache refresh job scheduled");

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match engine.refresh_cache(&shutdown).await {
                Ok(summary) => tracing::info!(
                    refreshed = summary.refreshed,
                    failed = summary.failed,
                    "Cache refresh finished"
                ),
                Err(WeatherError::Cancelled) => break,
                Err(err) => tracing::error!(error = %err, "Cache refresh failed"),
            }
        }

        tracing::info!("Cache refresh job stopped");
    })
}
