//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `AccountError` from
//! `havo_core::account`.

use havo_core::account::AccountError;

/// Maps a tokio_rusqlite error to an AccountError.
///
/// Every database failure is a store failure; an unknown key is never an
/// error at this level because `COUNT(*)` always returns a row.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> AccountError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, _))
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            AccountError::Store(format!("Cannot open database: {err}"))
        }
        tokio_rusqlite::Error::Close(_) => {
            AccountError::Store("Connection closed unexpectedly".to_string())
        }
        _ => AccountError::Store(err.to_string()),
    }
}
