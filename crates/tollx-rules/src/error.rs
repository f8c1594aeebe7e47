use thiserror::Error;

/// A violated field-level rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    /// A required, range, format, cross-field or conditional rule failed.
    #[error("validation failed on {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A closed-set code field holds a value outside its set.
    #[error("invalid {field}: unrecognized code '{value}'")]
    InvalidEnum { field: String, value: String },
}

impl RuleError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnum {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } | Self::InvalidEnum { field, .. } => field,
        }
    }
}

/// A rejected status change.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("unknown current {entity} status '{status}'")]
    UnknownStatus { entity: String, status: String },

    #[error("cannot transition {entity} from {from} to {to}")]
    NotAllowed {
        entity: String,
        from: String,
        to: String,
    },
}

pub type RuleResult<T> = Result<T, RuleError>;
