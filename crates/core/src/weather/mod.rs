mod bulk;
mod error;
mod format;
mod http_mapping;
mod parse;
mod roster;
mod traits;
mod types;

pub use bulk::{not_found_marker, BulkResult};
pub use error::{Result, WeatherError};
pub use format::{
    cloud_color, format_reading, temperature_color, wind_color, CLOUD_PALETTE, FALLBACK_COLOR,
    TEMPERATURE_PALETTE, WIND_PALETTE,
};
pub use http_mapping::{
    weather_error_client_message, weather_error_to_status_code, API_KEY_DISABLED,
    GENERIC_SERVER_ERROR,
};
pub use parse::parse_reading;
pub use roster::REFRESH_ROSTER;
pub use traits::WeatherProvider;
pub use types::{FormattedWeatherRecord, RawWeatherReading, ReadingCurrent, ReadingLocation};
