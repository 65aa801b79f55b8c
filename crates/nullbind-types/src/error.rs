use thiserror::Error;

/// Error returned when the payload of an invalid [`Nullable`] is requested.
///
/// This is a programmer error, not a data error: the caller asked for a
/// value without checking [`Nullable::is_valid`] first. It is never retried.
///
/// [`Nullable`]: crate::Nullable
/// [`Nullable::is_valid`]: crate::Nullable::is_valid
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
#[error("Attempt to access value of a invalid nullable object!")]
pub struct BadNullableAccess;

/// Result alias for checked nullable accessors.
pub type NullableResult<T> = Result<T, BadNullableAccess>;
