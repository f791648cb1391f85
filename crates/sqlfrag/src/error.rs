//! Error types for sqlfrag

use thiserror::Error;

/// Result type alias for sqlfrag operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while building or rendering SQL fragments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// A value could not be escaped as an inline SQL literal
    #[error("Invalid type: cannot inline a {value_type} value as a SQL literal")]
    InvalidType { value_type: &'static str },

    /// An undefined marker reached the renderer instead of being pruned
    #[error("Undefined value cannot be bound as a parameter")]
    UndefinedValue,

    /// Unknown parameter style name
    #[error("Unknown parameter style: {0}")]
    InvalidParamStyle(String),

    /// Unknown dialect name
    #[error("Unknown dialect: {0}")]
    InvalidDialect(String),

    /// Invalid builder input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl SqlError {
    /// Create an invalid type error for a value type name
    pub fn invalid_type(value_type: &'static str) -> Self {
        Self::InvalidType { value_type }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an invalid type error
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, Self::InvalidType { .. })
    }

    /// Check if this is an undefined value error
    pub fn is_undefined_value(&self) -> bool {
        matches!(self, Self::UndefinedValue)
    }
}
