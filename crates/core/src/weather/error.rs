use thiserror::Error;

use crate::account::AccountError;
use crate::cache::CacheError;

/// Errors produced while resolving weather for a location.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// The cache holds no record for the key. Only ever seen by the engine.
    #[error("no data in cache for location")]
    NoCachedData,
    #[error("no matching location found")]
    NotFound,
    #[error("unexpected end of JSON input: {0}")]
    IncompletePayload(String),
    #[error("invalid provider payload: {0}")]
    InvalidResponsePayload(String),
    #[error("weather provider unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("API key not found")]
    AuthorizationDenied,
    #[error("store failure: {0}")]
    StoreFailure(String),
    #[error("cache refresh already in progress")]
    RefreshInProgress,
    #[error("operation cancelled")]
    Cancelled,
}

impl From<CacheError> for WeatherError {
    fn from(err: CacheError) -> Self {
        WeatherError::StoreFailure(err.to_string())
    }
}

impl From<AccountError> for WeatherError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::ApiKeyNotFound => WeatherError::AuthorizationDenied,
            AccountError::Store(message) => WeatherError::StoreFailure(message),
        }
    }
}

/// Result type for weather operations.
pub type Result<T> = std::result::Result<T, WeatherError>;
