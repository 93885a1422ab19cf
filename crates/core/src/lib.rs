//! Functional core for havo.
//!
//! Pure types and functions shared by the server: cache contracts and key
//! normalization, the weather domain (provider payload parsing, formatting,
//! bulk partitioning, error taxonomy) and the account-store contract.
//! Nothing in this crate performs I/O.

pub mod account;
pub mod cache;
pub mod weather;
