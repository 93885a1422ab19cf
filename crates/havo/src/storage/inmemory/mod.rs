//! In-memory account store implementation.

mod store;

pub use store::InMemoryApiKeyStore;
