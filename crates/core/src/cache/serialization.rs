//! Pure functions for serializing weather records to and from cache bytes.
//!
//! Records are stored as JSON so cached values stay readable from
//! `redis-cli`.

use thiserror::Error;

use crate::weather::FormattedWeatherRecord;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a weather record to JSON bytes.
pub fn serialize_record(record: &FormattedWeatherRecord) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a weather record.
pub fn deserialize_record(bytes: &[u8]) -> Result<FormattedWeatherRecord> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
