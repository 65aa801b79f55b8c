//! The result-slot and parameter-slot protocol.

use nullbind_types::Nullable;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::capability::{Bindable, CanBindAsParam, CanBindAsResult};
use crate::config::{FetchConfig, NullPolicy};
use crate::error::{BindError, BindResult};
use crate::initialize::InitializeResultItem;

/// The null indicator a data source reports alongside a fetched column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullIndicator {
    /// The payload holds the fetched value.
    Value,
    /// The column was SQL NULL; the payload contents are meaningless.
    Null,
}

impl NullIndicator {
    /// Build from the boolean flag most column readers produce.
    pub fn from_is_null(is_null: bool) -> Self {
        if is_null {
            Self::Null
        } else {
            Self::Value
        }
    }

    /// Returns `true` for [`NullIndicator::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// A value the binding layer can fetch a column into.
pub trait ResultSlot: InitializeResultItem {
    /// The type the column writer fills.
    type Payload;

    /// Returns `true` if payload storage exists and may be handed to a writer.
    fn is_prepared(&self) -> bool {
        true
    }

    /// Storage the column writer fills in place.
    ///
    /// Only valid while [`is_prepared`](Self::is_prepared) holds, which
    /// [`InitializeResultItem::initialize_result_item`] guarantees.
    fn payload_mut(&mut self) -> &mut Self::Payload;

    /// Apply the source's null indicator once the writer has finished.
    fn complete(&mut self, indicator: NullIndicator, config: &FetchConfig) -> BindResult<()>;
}

/// A value the binding layer can send as a statement parameter.
pub trait ParamSlot: CanBindAsParam {
    /// The type handed to the parameter writer.
    type Payload: ?Sized;

    /// The value to send, or `None` to send NULL.
    fn param(&self) -> Option<&Self::Payload>;
}

impl<T> ResultSlot for Nullable<T>
where
    T: CanBindAsResult + Default,
{
    type Payload = T;

    fn is_prepared(&self) -> bool {
        self.is_engaged()
    }

    fn payload_mut(&mut self) -> &mut T {
        self.raw_payload_mut()
    }

    fn complete(&mut self, indicator: NullIndicator, _config: &FetchConfig) -> BindResult<()> {
        *self.raw_null_mut() = indicator.is_null();
        Ok(())
    }
}

impl<T: ParamSlot> ParamSlot for Nullable<T> {
    type Payload = T::Payload;

    fn param(&self) -> Option<&T::Payload> {
        self.as_option().and_then(|value| value.param())
    }
}

macro_rules! impl_scalar_slots {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ResultSlot for $ty {
                type Payload = $ty;

                fn payload_mut(&mut self) -> &mut $ty {
                    self
                }

                fn complete(
                    &mut self,
                    indicator: NullIndicator,
                    config: &FetchConfig,
                ) -> BindResult<()> {
                    complete_plain(self, indicator, config)
                }
            }

            impl ParamSlot for $ty {
                type Payload = $ty;

                fn param(&self) -> Option<&$ty> {
                    Some(self)
                }
            }
        )*
    };
}

impl_scalar_slots!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, Vec<u8>,
);

impl ParamSlot for &str {
    type Payload = str;

    fn param(&self) -> Option<&str> {
        Some(*self)
    }
}

impl ParamSlot for &[u8] {
    type Payload = [u8];

    fn param(&self) -> Option<&[u8]> {
        Some(*self)
    }
}

fn complete_plain<T>(slot: &mut T, indicator: NullIndicator, config: &FetchConfig) -> BindResult<()>
where
    T: Bindable + Default,
{
    if !indicator.is_null() {
        return Ok(());
    }
    match config.null_into_plain {
        NullPolicy::Reject => Err(BindError::UnexpectedNull {
            binding: T::BINDING_TYPE,
        }),
        NullPolicy::KeepDefault => {
            let binding = T::BINDING_TYPE;
            warn!(%binding, "NULL fetched into non-nullable slot; keeping default");
            *slot = T::default();
            Ok(())
        }
    }
}

/// Fetch one column into `slot`.
///
/// Runs the default-initialization hook (unless disabled in `config` and
/// the slot is already prepared), hands the stable payload reference to
/// `write`, then completes the slot with the indicator `write` returns.
pub fn fetch_into<S, F>(slot: &mut S, config: &FetchConfig, write: F) -> BindResult<()>
where
    S: ResultSlot,
    F: FnOnce(&mut S::Payload) -> NullIndicator,
{
    let binding = S::BINDING_TYPE;
    if config.initialize_before_fetch {
        slot.initialize_result_item();
    } else if !slot.is_prepared() {
        debug!(%binding, "slot has no storage; initializing before fetch");
        slot.initialize_result_item();
    }
    let indicator = write(slot.payload_mut());
    debug!(%binding, ?indicator, "column fetched");
    slot.complete(indicator, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_from_flag() {
        assert_eq!(NullIndicator::from_is_null(true), NullIndicator::Null);
        assert_eq!(NullIndicator::from_is_null(false), NullIndicator::Value);
        assert!(NullIndicator::Null.is_null());
        assert!(!NullIndicator::Value.is_null());
    }

    #[test]
    fn fetch_value_into_nullable() {
        let mut n: Nullable<i64> = Nullable::new();
        fetch_into(&mut n, &FetchConfig::default(), |payload| {
            *payload = 42;
            NullIndicator::Value
        })
        .unwrap();
        assert!(n.is_valid());
        assert_eq!(n.value(), Ok(&42));
    }

    #[test]
    fn fetch_null_into_nullable_keeps_storage() {
        let mut n = Nullable::from("stale".to_string());
        fetch_into(&mut n, &FetchConfig::strict(), |payload| {
            assert!(payload.is_empty());
            NullIndicator::Null
        })
        .unwrap();
        assert!(n.is_engaged());
        assert!(n.is_null());
        assert!(!n.is_valid());
        assert_eq!(n, nullbind_types::DISENGAGED);
    }

    #[test]
    fn payload_address_is_stable_across_completion() {
        let mut n: Nullable<u32> = Nullable::new();
        n.initialize_result_item();
        let before: *const u32 = n.payload_mut();
        *n.payload_mut() = 7;
        n.complete(NullIndicator::Value, &FetchConfig::default())
            .unwrap();
        let after: *const u32 = n.payload_mut();
        assert_eq!(before, after);
        assert_eq!(n.value(), Ok(&7));
    }

    #[test]
    fn fetch_into_plain_slot() {
        let mut x = 0i32;
        fetch_into(&mut x, &FetchConfig::default(), |payload| {
            *payload = -5;
            NullIndicator::Value
        })
        .unwrap();
        assert_eq!(x, -5);
    }

    #[test]
    fn null_into_plain_slot_is_rejected_when_strict() {
        let mut s = String::new();
        let err = fetch_into(&mut s, &FetchConfig::strict(), |_| NullIndicator::Null).unwrap_err();
        assert_eq!(
            err,
            BindError::UnexpectedNull {
                binding: crate::BindingType::Text
            }
        );
        assert_eq!(err.to_string(), "unexpected NULL for non-nullable Text result");
    }

    #[test]
    fn null_into_plain_slot_keeps_default_when_lenient() {
        let mut x = 0u8;
        fetch_into(&mut x, &FetchConfig::lenient(), |payload| {
            *payload = 9;
            NullIndicator::Null
        })
        .unwrap();
        assert_eq!(x, 0);
    }

    #[test]
    fn skipping_initialization_writes_over_existing_payload() {
        let config = FetchConfig {
            initialize_before_fetch: false,
            ..FetchConfig::default()
        };
        let mut n: Nullable<Vec<u8>> = Nullable::new();
        n.initialize_result_item();
        fetch_into(&mut n, &config, |payload| {
            payload.extend_from_slice(b"ab");
            NullIndicator::Value
        })
        .unwrap();
        fetch_into(&mut n, &config, |payload| {
            payload.push(b'c');
            NullIndicator::Value
        })
        .unwrap();
        assert_eq!(n.value().unwrap(), b"abc");
    }

    #[test]
    fn skipping_initialization_still_prepares_empty_slot() {
        let config = FetchConfig {
            initialize_before_fetch: false,
            ..FetchConfig::default()
        };
        let mut n: Nullable<i32> = Nullable::new();
        assert!(!n.is_prepared());
        fetch_into(&mut n, &config, |payload| {
            assert_eq!(*payload, 0);
            *payload = 1;
            NullIndicator::Value
        })
        .unwrap();
        assert_eq!(n.value(), Ok(&1));

        n.disengage();
        fetch_into(&mut n, &config, |_| NullIndicator::Null).unwrap();
        assert!(n.is_engaged());
        assert!(!n.is_valid());
    }

    #[test]
    fn nested_nullable_result() {
        let mut n: Nullable<Nullable<i32>> = Nullable::new();
        fetch_into(&mut n, &FetchConfig::default(), |inner| {
            assert!(!inner.is_engaged());
            inner.emplace(3);
            NullIndicator::Value
        })
        .unwrap();
        assert_eq!(n.value().and_then(|inner| inner.value()), Ok(&3));
    }

    #[test]
    fn param_values() {
        assert_eq!(Nullable::from(5i32).param(), Some(&5));
        assert_eq!(Nullable::<i32>::new().param(), None);

        let mut marked = Nullable::from(1u64);
        marked.set_null();
        assert_eq!(marked.param(), None);

        let text: Nullable<&str> = Nullable::from("abc");
        assert_eq!(text.param(), Some("abc"));

        let blob: &[u8] = b"xy";
        assert_eq!(blob.param(), Some(&b"xy"[..]));
    }
}
