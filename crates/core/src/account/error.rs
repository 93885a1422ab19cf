use thiserror::Error;

/// Errors that can occur while consulting the account store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// No account owns the presented key.
    #[error("API key not found")]
    ApiKeyNotFound,
    #[error("Account store failure: {0}")]
    Store(String),
}

/// Result type for account store operations.
pub type Result<T> = std::result::Result<T, AccountError>;
