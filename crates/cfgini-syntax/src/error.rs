//! Error types for the line grammar.

use thiserror::Error;

/// Errors raised when a name does not follow the identifier grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A section name or key is not a valid identifier.
    #[error("invalid identifier {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// A value cannot be written as a single `key = value` line.
    #[error("invalid value {value:?}: {reason}")]
    InvalidValue { value: String, reason: String },
}

/// Convenience type alias for grammar operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;
