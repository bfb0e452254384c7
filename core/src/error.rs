//! Error types for the NGB API client.
//!
//! # Design
//! The remote service wraps every answer in a status envelope, so "the server
//! answered but said no" (`Protocol`) is kept apart from "the server could not
//! be reached" (`Transport`). Table rendering has its own variant because a
//! missing column is a caller mistake, not a server fault.

/// Errors returned by `ApiClient`, the transports and the table formatter.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure: refused connection, DNS, TLS, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response arrived but was unparsable or not successful.
    #[error("{0}")]
    Protocol(String),

    /// A table column is absent from one of the records.
    #[error("field '{column}' is missing from record {record}")]
    FieldMissing { column: String, record: usize },

    /// The call was rejected before anything was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Process exit status the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ApiError::Transport(_) => 3,
            ApiError::Protocol(_) => 4,
            ApiError::FieldMissing { .. } => 5,
            ApiError::InvalidRequest(_) | ApiError::Serialization(_) => 1,
        }
    }
}
