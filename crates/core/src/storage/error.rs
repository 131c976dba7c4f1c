use thiserror::Error;

/// Errors that can occur when constructing a time range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    #[error("Invalid time range: start must be before or equal to end")]
    InvalidRange,
}

/// A stored item could not be turned back into a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Missing or invalid field: {0}")]
    MissingField(&'static str),
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Unknown record type for sort key: {0}")]
    UnknownRecordType(String),
}

/// A record could not be turned into a stored item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Timestamp out of range for {field}: {value}")]
    TimestampOutOfRange { field: &'static str, value: String },
}

/// Failures reported by the underlying key-value store.
///
/// These are passed through untouched; retrying is up to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Throttled: {0}")]
    Throttled(String),
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Conditional check failed: {0}")]
    ConditionalCheckFailed(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
