//! Redis cache backend implementation.
//!
//! Provides a cache shared by every instance, with connection pooling and
//! server-side expiry.

mod cache;
mod error;

pub use cache::RedisCache;
