//! Pure functions for mapping weather errors onto HTTP responses.

use super::WeatherError;

/// Message returned to clients for every error that is not their fault.
pub const GENERIC_SERVER_ERROR: &str =
    "An unexpected server error occurred. Please try again later.";

/// Message returned to clients presenting an unknown API key.
pub const API_KEY_DISABLED: &str = "API key has been disabled.";

/// Maps a [`WeatherError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `AuthorizationDenied` -> 401 (Unauthorized)
/// - `RefreshInProgress` -> 503 (Service Unavailable)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use havo_core::weather::{weather_error_to_status_code, WeatherError};
///
/// assert_eq!(weather_error_to_status_code(&WeatherError::NotFound), 404);
/// ```
pub fn weather_error_to_status_code(error: &WeatherError) -> u16 {
    match error {
        WeatherError::NotFound => 404,
        WeatherError::AuthorizationDenied => 401,
        WeatherError::RefreshInProgress => 503,
        WeatherError::NoCachedData
        | WeatherError::IncompletePayload(_)
        | WeatherError::InvalidResponsePayload(_)
        | WeatherError::UpstreamUnavailable(_)
        | WeatherError::StoreFailure(_)
        | WeatherError::Cancelled => 500,
    }
}

/// Returns the message a client sees for a [`WeatherError`].
///
/// Server-side failures never leak their details.
pub fn weather_error_client_message(error: &WeatherError) -> String {
    match error {
        WeatherError::NotFound => error.to_string(),
        WeatherError::AuthorizationDenied => API_KEY_DISABLED.to_string(),
        _ => GENERIC_SERVER_ERROR.to_string(),
    }
}
