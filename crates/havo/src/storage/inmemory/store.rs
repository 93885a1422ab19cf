use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use havo_core::account::{AccountError, ApiKeyStore, Result};

/// In-memory account store for development and single-tenant deployments.
///
/// Uses a `HashSet` wrapped in `Arc<RwLock<_>>` for thread-safe access.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApiKeyStore {
    keys: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryApiKeyStore {
    /// Creates a store accepting exactly `keys`.
    pub fn with_keys(keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            keys: Arc::new(RwLock::new(keys.into_iter().collect())),
        }
    }
}

#[async_trait]
impl ApiKeyStore for InMemoryApiKeyStore {
    async fn check_api_key(&self, api_key: &str) -> Result<bool> {
        if self.keys.read().await.contains(api_key) {
            Ok(true)
        } else {
            Err(AccountError::ApiKeyNotFound)
        }
    }
}
