//! Errors returned by contract operations.
//!
//! Every failed operation yields exactly one of these, and none of them is
//! produced after a write has happened.

use thiserror::Error;
use tollx_ledger::LedgerError;
use tollx_rules::{RuleError, TransitionError};
use tollx_types::TypeError;

#[derive(Debug, Error)]
pub enum ContractError {
    /// The payload or an argument could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("validation failed on {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("{key} already exists")]
    Duplicate { key: String },

    #[error("{key} does not exist")]
    NotFound { key: String },

    #[error("cannot transition {entity} from {from} to {to}")]
    InvalidTransition {
        entity: String,
        from: String,
        to: String,
    },

    #[error("unknown current {entity} status '{status}'")]
    UnknownStatus { entity: String, status: String },

    #[error("invalid {field}: unrecognized code '{value}'")]
    InvalidEnum { field: String, value: String },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// Wrong number of invocation arguments.
    #[error("{function} expects {expected} argument(s), got {got}")]
    Arguments {
        function: String,
        expected: usize,
        got: usize,
    },

    /// A stored record could not be read back.
    #[error("stored record {key} is unreadable: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl ContractError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse(_) => "ParseError",
            Self::Validation { .. } => "ValidationError",
            Self::Duplicate { .. } => "DuplicateError",
            Self::NotFound { .. } => "NotFoundError",
            Self::InvalidTransition { .. } | Self::UnknownStatus { .. } => {
                "InvalidTransitionError"
            }
            Self::InvalidEnum { .. } => "InvalidEnumError",
            Self::UnknownFunction(_) => "UnknownFunctionError",
            Self::Arguments { .. } => "ArgumentError",
            Self::Corrupt { .. } => "CorruptRecordError",
            Self::Config(_) => "ConfigError",
            Self::Ledger(_) => "LedgerError",
        }
    }
}

impl From<RuleError> for ContractError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Validation { field, reason } => Self::Validation { field, reason },
            RuleError::InvalidEnum { field, value } => Self::InvalidEnum { field, value },
        }
    }
}

impl From<TransitionError> for ContractError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::UnknownStatus { entity, status } => {
                Self::UnknownStatus { entity, status }
            }
            TransitionError::NotAllowed { entity, from, to } => {
                Self::InvalidTransition { entity, from, to }
            }
        }
    }
}

impl From<TypeError> for ContractError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::Overflow { field } => Self::validation(field, "exceeds the representable amount"),
            TypeError::UnknownCode { kind, value } => Self::InvalidEnum {
                field: kind.to_string(),
                value,
            },
            TypeError::Serialization(reason) => Self::Parse(reason),
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_errors_keep_field() {
        let err: ContractError = RuleError::invalid_enum("postingDisposition", "Q").into();
        assert_eq!(err.kind(), "InvalidEnumError");
        assert_eq!(
            err.to_string(),
            "invalid postingDisposition: unrecognized code 'Q'"
        );
    }

    #[test]
    fn transition_errors_name_both_statuses() {
        let err: ContractError = TransitionError::NotAllowed {
            entity: "charge".into(),
            from: "pending".into(),
            to: "settled".into(),
        }
        .into();
        assert_eq!(err.kind(), "InvalidTransitionError");
        assert_eq!(err.to_string(), "cannot transition charge from pending to settled");
    }
}
