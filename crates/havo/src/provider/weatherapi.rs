//! Client for weatherapi.com's current-conditions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use havo_core::weather::{Result, WeatherError, WeatherProvider};

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn current_url(&self, query: &str) -> String {
        format!(
            "{}/current.json?key={}&q={}&aqi=no",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn current(&self, query: &str) -> Result<Vec<u8>> {
        // Errors drop the URL, it carries the provider key.
        let response = self
            .client
            .get(self.current_url(query))
            .send()
            .await
            .map_err(|err| WeatherError::UpstreamUnavailable(err.without_url().to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::BAD_REQUEST => return Err(WeatherError::NotFound),
            status => {
                return Err(WeatherError::UpstreamUnavailable(format!(
                    "provider responded with {status}"
                )))
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| WeatherError::UpstreamUnavailable(err.without_url().to_string()))?;

        Ok(body.to_vec())
    }
}
