//! Cache backend implementations.
//!
//! This module provides concrete implementations of the `Cache` trait
//! defined in `havo_core::cache`. The implementation is selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-process LRU cache with per-entry expiry
//! - `redis`: Redis cache shared by every instance
//!
//! These features are mutually exclusive - only one cache backend can be
//! enabled at a time.

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p havo --no-default-features --features inmemory,redis"
);

use std::sync::Arc;

use anyhow::Result;
use havo_core::cache::Cache;

use crate::config::Config;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(feature = "memory")]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;

/// Builds the cache backend selected at compile time.
#[cfg(feature = "memory")]
pub async fn connect(config: &Config) -> Result<Arc<dyn Cache>> {
    use std::num::NonZeroUsize;

    use anyhow::Context;

    let capacity =
        NonZeroUsize::new(config.cache_max_entries).context("CACHE_MAX_ENTRIES must be > 0")?;
    tracing::info!(max_entries = capacity.get(), "Using in-memory cache");
    Ok(Arc::new(MemoryCache::new(capacity)))
}

/// Builds the cache backend selected at compile time.
#[cfg(feature = "redis")]
pub async fn connect(config: &Config) -> Result<Arc<dyn Cache>> {
    let cache = RedisCache::new(&config.redis_url).await?;
    tracing::info!("Connected to Redis cache");
    Ok(Arc::new(cache))
}
