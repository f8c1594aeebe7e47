use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unrecognized {kind} '{value}'")]
    UnknownCode { kind: &'static str, value: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{field} exceeds the representable amount")]
    Overflow { field: &'static str },
}

/// Result alias for type operations.
pub type TypeResult<T> = Result<T, TypeError>;
