//! Account store backend implementations.
//!
//! This module provides concrete implementations of the `ApiKeyStore` trait
//! defined in `havo_core::account`. The implementation is selected at
//! compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): keys listed in `HAVO_API_KEYS`
//! - `sqlite`: the account database's `api_keys` table, via `rusqlite` and
//!   `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one account store can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p havo
//! ```
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p havo --no-default-features --features sqlite,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "sqlite"))]
compile_error!(
    "Features 'inmemory' and 'sqlite' are mutually exclusive. \
    Enable only one account store at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!(
    "No account store selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p havo --features inmemory"
);

use std::sync::Arc;

use anyhow::Result;
use havo_core::account::ApiKeyStore;

use crate::config::Config;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryApiKeyStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteApiKeyStore;

/// Opens the account store selected at compile time.
#[cfg(feature = "inmemory")]
pub async fn open(config: &Config) -> Result<Arc<dyn ApiKeyStore>> {
    if config.api_keys.is_empty() {
        tracing::warn!("HAVO_API_KEYS is empty, every request will be rejected");
    }
    let store = InMemoryApiKeyStore::with_keys(config.api_keys.iter().cloned());
    Ok(Arc::new(store))
}

/// Opens the account store selected at compile time.
#[cfg(feature = "sqlite")]
pub async fn open(config: &Config) -> Result<Arc<dyn ApiKeyStore>> {
    let store = SqliteApiKeyStore::new(&config.sqlite_path).await?;
    for key in &config.api_keys {
        store.insert_api_key(0, key).await?;
    }
    tracing::info!(path = %config.sqlite_path, "Opened SQLite account store");
    Ok(Arc::new(store))
}
