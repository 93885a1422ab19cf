use async_trait::async_trait;

use super::Result;

/// Upstream source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches the raw response body for a location query.
    ///
    /// An unknown location is [`WeatherError::NotFound`](super::WeatherError::NotFound);
    /// transport failures and other unexpected statuses are
    /// [`WeatherError::UpstreamUnavailable`](super::WeatherError::UpstreamUnavailable).
    async fn current(&self, query: &str) -> Result<Vec<u8>>;
}
