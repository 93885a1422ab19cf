//! Upstream weather provider clients.

mod weatherapi;

pub use weatherapi::{WeatherApiClient, DEFAULT_BASE_URL};
