//! Error taxonomy for ledger operations.
//!
//! Absence of a fox is a normal negative result (`Ok(None)`), never an
//! error. Backend failures propagate verbatim; the ledger performs no
//! retry and no backoff.

use thiserror::Error;

use foxden_core::MetadataError;
use foxden_store::StoreError;

/// Result type alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input to the ledger; reported immediately, never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stored record's metadata failed the strict marshal parse.
    #[error("record metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// The storage backend call failed.
    #[error(transparent)]
    Backend(#[from] StoreError),
}
