use serde_json::error::Category;

use super::{RawWeatherReading, Result, WeatherError};

/// Parses a provider response body.
///
/// Truncated or syntactically broken JSON becomes
/// [`WeatherError::IncompletePayload`]; well-formed JSON that does not have
/// the expected shape becomes [`WeatherError::InvalidResponsePayload`].
pub fn parse_reading(body: &[u8]) -> Result<RawWeatherReading> {
    serde_json::from_slice(body).map_err(|err| match err.classify() {
        Category::Eof | Category::Syntax => WeatherError::IncompletePayload(err.to_string()),
        Category::Data | Category::Io => WeatherError::InvalidResponsePayload(err.to_string()),
    })
}
