//! Error types for ledger access.

use thiserror::Error;

/// Errors raised by a ledger backend.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An empty key or partition name was supplied.
    #[error("invalid {what}: must not be empty")]
    EmptyName { what: &'static str },

    /// A stored value or snapshot could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend is unavailable or refused the operation.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// I/O error while loading or saving a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
