//! Binding-port adapters for nullbind.
//!
//! This crate is the seam between [`Nullable`] and a statement binding
//! layer. It does not prepare or execute statements; it only answers the
//! questions such a layer asks of a value type.
//!
//! # Modules
//!
//! - [`capability`] — [`Bindable`], [`CanBindAsParam`], [`CanBindAsResult`]
//!   markers and the [`BindingType`] they report
//! - [`initialize`] — The [`InitializeResultItem`] hook run before a fetch
//! - [`slot`] — The [`ResultSlot`] / [`ParamSlot`] protocol and [`fetch_into`]
//! - [`config`] — [`FetchConfig`] policy knobs
//! - [`error`] — [`BindError`]
//!
//! # Result fetch protocol
//!
//! 1. The binding layer calls [`default_initialize`] on the slot. For a
//!    [`Nullable`] this leaves it engaged, holding `T::default()`, and
//!    marked null.
//! 2. A column writer fills the payload through [`ResultSlot::payload_mut`].
//!    The reference is stable: nothing is reallocated until the next step.
//! 3. [`ResultSlot::complete`] applies the source's [`NullIndicator`],
//!    clearing the null marker only for a real value.
//!
//! [`Nullable`]: nullbind_types::Nullable

pub mod capability;
pub mod config;
pub mod error;
pub mod initialize;
pub mod slot;

pub use capability::{Bindable, BindingType, CanBindAsParam, CanBindAsResult};
pub use config::{FetchConfig, NullPolicy};
pub use error::{BindError, BindResult};
pub use initialize::{default_initialize, InitializeResultItem};
pub use slot::{fetch_into, NullIndicator, ParamSlot, ResultSlot};
