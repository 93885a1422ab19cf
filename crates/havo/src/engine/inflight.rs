use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use havo_core::weather::{FormattedWeatherRecord, Result, WeatherError};

type SharedFetch = Shared<BoxFuture<'static, Result<FormattedWeatherRecord>>>;

/// Provider fetches currently running, keyed by cache key.
#[derive(Default)]
pub(crate) struct InFlightFetches {
    pending: Arc<Mutex<HashMap<String, SharedFetch>>>,
}

impl InFlightFetches {
    /// Runs `fetch` for `key`, or joins the fetch already running for it.
    ///
    /// Every caller gets a clone of the same result. The fetch runs on its own
    /// task, so it finishes and releases its slot even when every caller has
    /// gone away.
    pub(crate) async fn run<F>(&self, key: &str, fetch: F) -> Result<FormattedWeatherRecord>
    where
        F: Future<Output = Result<FormattedWeatherRecord>> + Send + 'static,
    {
        let shared = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = pending.get(key).cloned() {
                tracing::trace!(location = %key, "Joining in-flight fetch");
                existing
            } else {
                let slots = Arc::clone(&self.pending);
                let slot = key.to_string();
                // The task cannot remove the slot before it is inserted: it
                // needs this lock first.
                let task = tokio::spawn(async move {
                    let result = fetch.await;
                    slots
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .remove(&slot);
                    result
                });
                let shared = async move {
                    task.await.unwrap_or_else(|err| {
                        Err(WeatherError::UpstreamUnavailable(format!(
                            "fetch task failed: {err}"
                        )))
                    })
                }
                .boxed()
                .shared();
                pending.insert(key.to_string(), shared.clone());
                shared
            }
        };

        shared.await
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
