use std::sync::Arc;

use havo_core::{
    account::{AccountError, ApiKeyStore},
    weather::{Result, WeatherError},
};

/// Validates API keys before any weather work happens.
#[derive(Clone)]
pub struct ApiKeyGate {
    store: Arc<dyn ApiKeyStore>,
}

impl ApiKeyGate {
    pub fn new(store: Arc<dyn ApiKeyStore>) -> Self {
        Self { store }
    }

    /// Returns `Ok(true)` for a key owned by an account.
    ///
    /// Unknown keys, and keys the store reports as not valid, are
    /// [`WeatherError::AuthorizationDenied`].
    pub async fn authorize(&self, api_key: &str) -> Result<bool> {
        match self.store.check_api_key(api_key).await {
            Ok(true) => Ok(true),
            Ok(false) | Err(AccountError::ApiKeyNotFound) => Err(WeatherError::AuthorizationDenied),
            Err(err) => {
                tracing::error!(error = %err, "Failed to check API key");
                Err(err.into())
            }
        }
    }
}
