use futures_util::{stream, StreamExt};
use havo_core::weather::{BulkResult, Result};

use super::WeatherEngine;

impl WeatherEngine {
    /// Looks up many locations at once.
    ///
    /// Unknown locations are reported as not-found markers and do not stop
    /// the batch; any other failure aborts it and drops the lookups still in
    /// flight. Both output lists keep the input order.
    pub async fn fetch_bulk_weather(&self, queries: &[String]) -> Result<BulkResult> {
        let concurrency = self.inner.config.bulk_concurrency.max(1);
        let mut outcomes = stream::iter(queries.to_vec())
            .map(|query| {
                let engine = self.clone();
                async move {
                    let outcome = engine.fetch_weather(&query).await;
                    (query, outcome)
                }
            })
            .buffered(concurrency)
            .boxed();

        let mut result = BulkResult::default();
        while let Some((query, outcome)) = outcomes.next().await {
            if let Err(err) = result.record(&query, outcome) {
                tracing::warn!(location = %query, error = %err, "Aborting bulk lookup");
                return Err(err);
            }
        }

        tracing::debug!(
            found = result.found.len(),
            not_found = result.not_found.as_ref().map_or(0, Vec::len),
            "Bulk lookup finished"
        );
        Ok(result)
    }
}
