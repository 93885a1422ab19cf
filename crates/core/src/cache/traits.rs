use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value store for serialized weather records.
///
/// Implementations only deal in byte blobs keyed by string; deciding when to
/// read, write or flush belongs to the caller.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Removes every entry from the cache.
    async fn flush_all(&self) -> Result<()>;
}
