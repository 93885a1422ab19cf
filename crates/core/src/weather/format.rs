//! Pure functions turning provider readings into display-ready records.
//!
//! Each metric maps onto a palette through fixed bands that include their
//! lower bound and exclude their upper bound. Values outside every band get
//! [`FALLBACK_COLOR`].

use super::{FormattedWeatherRecord, RawWeatherReading};

/// Color used when a value falls outside every band.
pub const FALLBACK_COLOR: &str = "#FFFFFF";

/// Temperature colors from coldest to hottest.
pub const TEMPERATURE_PALETTE: [&str; 9] = [
    "#003366", "#4A90E2", "#B3DFFD", "#E6F7FF", "#D1F2D3", "#FFFACD", "#FFCC80", "#FF7043",
    "#D32F2F",
];

/// Wind colors from calm to strongest.
pub const WIND_PALETTE: [&str; 5] = ["#E0F7FA", "#B2EBF2", "#4DD0E1", "#0288D1", "#01579B"];

/// Cloud cover colors from clear to overcast.
pub const CLOUD_PALETTE: [&str; 5] = ["#FFF9C4", "#FFF176", "#E0E0E0", "#9E9E9E", "#616161"];

/// Maps a temperature in °C to its color.
///
/// # Examples
///
/// ```
/// use havo_core::weather::temperature_color;
///
/// assert_eq!(temperature_color(-25.0), "#003366");
/// assert_eq!(temperature_color(22.0), "#FFFACD");
/// assert_eq!(temperature_color(f64::NAN), "#FFFFFF");
/// ```
pub fn temperature_color(temp_c: f64) -> &'static str {
    let band = match temp_c {
        t if t < -20.0 => 0,
        t if (-20.0..-10.0).contains(&t) => 1,
        t if (-10.0..0.0).contains(&t) => 2,
        t if (0.0..10.0).contains(&t) => 3,
        t if (10.0..20.0).contains(&t) => 4,
        t if (20.0..30.0).contains(&t) => 5,
        t if (30.0..40.0).contains(&t) => 6,
        t if (40.0..50.0).contains(&t) => 7,
        t if t >= 50.0 => 8,
        _ => return FALLBACK_COLOR,
    };
    TEMPERATURE_PALETTE[band]
}

/// Maps a wind speed in km/h to its color. Negative speeds have no band.
pub fn wind_color(wind_kph: f64) -> &'static str {
    let band = match wind_kph {
        w if (0.0..10.0).contains(&w) => 0,
        w if (10.0..20.0).contains(&w) => 1,
        w if (20.0..40.0).contains(&w) => 2,
        w if (40.0..60.0).contains(&w) => 3,
        w if w >= 60.0 => 4,
        _ => return FALLBACK_COLOR,
    };
    WIND_PALETTE[band]
}

/// Maps a cloud cover percentage to its color.
pub fn cloud_color(cloud: i32) -> &'static str {
    let band = match cloud {
        0..=9 => 0,
        10..=29 => 1,
        30..=59 => 2,
        60..=89 => 3,
        90..=100 => 4,
        _ => return FALLBACK_COLOR,
    };
    CLOUD_PALETTE[band]
}

/// Builds the display record for a provider reading.
pub fn format_reading(reading: RawWeatherReading) -> FormattedWeatherRecord {
    let RawWeatherReading { location, current } = reading;

    FormattedWeatherRecord {
        name: location.name,
        country: location.country,
        lat: location.lat,
        lon: location.lon,
        temp_c: current.temp_c,
        temp_color: temperature_color(current.temp_c).to_string(),
        wind_kph: current.wind_kph,
        wind_color: wind_color(current.wind_kph).to_string(),
        cloud: current.cloud,
        cloud_color: cloud_color(current.cloud).to_string(),
    }
}
