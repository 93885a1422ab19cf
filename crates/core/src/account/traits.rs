use async_trait::async_trait;

use super::Result;

/// Read-only view of the account system used to validate API keys.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// Checks whether `api_key` belongs to an account.
    ///
    /// Unknown keys are reported as [`AccountError::ApiKeyNotFound`](super::AccountError::ApiKeyNotFound).
    async fn check_api_key(&self, api_key: &str) -> Result<bool>;
}
