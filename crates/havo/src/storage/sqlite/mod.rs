//! SQLite account store implementation.
//!
//! Uses `rusqlite` for synchronous operations and `tokio-rusqlite` for async
//! wrapping.

mod error;
mod schema;
mod store;

pub use store::SqliteApiKeyStore;
