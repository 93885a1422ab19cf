use serde::{Deserialize, Serialize};

/// Current conditions exactly as the upstream provider reports them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWeatherReading {
    pub location: ReadingLocation,
    pub current: ReadingCurrent,
}

/// Geographic part of a provider reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadingLocation {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Measurement part of a provider reading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadingCurrent {
    pub temp_c: f64,
    pub wind_kph: f64,
    /// Cloud cover percentage.
    pub cloud: i32,
}

/// A location's current weather, enriched with display colors.
///
/// This is both the cached value and the API response body, so the field
/// names are part of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedWeatherRecord {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub temp_c: f64,
    pub temp_color: String,
    pub wind_kph: f64,
    pub wind_color: String,
    pub cloud: i32,
    pub cloud_color: String,
}
