//! Foundation types for nullbind.
//!
//! This crate provides [`Nullable`], a value container with three states
//! instead of the two an [`Option`] offers:
//!
//! 1. **Disengaged**: no value is stored at all.
//! 2. **Engaged but null**: a value is stored (so a writer can fill it in
//!    place), but it must be treated as SQL NULL.
//! 3. **Valid**: a value is stored and usable.
//!
//! The second state lets a binding layer hand out a stable reference to the
//! payload before it knows whether the fetched column is NULL, then flip the
//! null marker afterwards without rebuilding the storage.
//!
//! # Key Types
//!
//! - [`Nullable`] — The tri-state container
//! - [`Disengaged`] — Zero-size sentinel compared and assigned against containers
//! - [`BadNullableAccess`] — Error returned by the checked accessors
//!
//! # Ordering
//!
//! Every comparison treats an invalid container (disengaged or null-marked)
//! as strictly less than any present value, and two invalid containers as
//! equal. See the [`compare`] module.

pub mod compare;
pub mod error;
pub mod nullable;

pub use error::{BadNullableAccess, NullableResult};
pub use nullable::{make_nullable, Disengaged, Nullable, DISENGAGED, NULL};
