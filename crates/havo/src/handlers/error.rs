use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use havo_core::weather::{
    weather_error_client_message, weather_error_to_status_code, WeatherError,
    GENERIC_SERVER_ERROR,
};

/// A request rejected at the boundary. The message is shown to the client.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct BadRequest(pub String);

impl BadRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) =
            if let Some(weather_error) = self.0.downcast_ref::<WeatherError>() {
                let code = weather_error_to_status_code(weather_error);
                let status_code =
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status_code.is_server_error() {
                    tracing::error!(error = %weather_error, "Weather request failed");
                }
                (status_code, weather_error_client_message(weather_error))
            } else if let Some(bad_request) = self.0.downcast_ref::<BadRequest>() {
                (StatusCode::BAD_REQUEST, bad_request.0.clone())
            } else {
                tracing::error!(error = %self.0, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_SERVER_ERROR.to_string(),
                )
            };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
