//! Error types for the result-slot protocol.

use thiserror::Error;

use crate::capability::BindingType;

/// Errors raised while completing a bound result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    /// The source reported NULL for a slot that cannot represent it.
    #[error("unexpected NULL for non-nullable {binding} result")]
    UnexpectedNull { binding: BindingType },
}

/// Convenience type alias for binding operations.
pub type BindResult<T> = std::result::Result<T, BindError>;
