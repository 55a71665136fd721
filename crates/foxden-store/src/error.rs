//! Error types for the storage backend boundary.

use thiserror::Error;

/// Result type alias for backend operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a storage backend. Callers propagate these verbatim;
/// the core never retries or transforms them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database: {0}")]
    Open(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("read error: {0}")]
    Read(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("deserialization error: {0}")]
    Deserialize(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Connectivity or provider-side failure of a remote backend.
    #[error("backend error: {0}")]
    Backend(String),
}
