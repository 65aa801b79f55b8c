//! Comparison lattice for [`Nullable`].
//!
//! Three families of comparisons are provided, all with the same rule:
//! an invalid container (disengaged or null-marked) sorts strictly before
//! every present value, and equality requires matching presence.
//!
//! - **Nullable × Nullable**: [`PartialEq`], [`PartialOrd`], plus [`Eq`] and
//!   [`Ord`] when `T` has them.
//! - **Nullable × [`Disengaged`]**, both directions: equal iff the container
//!   is invalid; the sentinel is the unique minimum.
//! - **Nullable × `T`**, both directions: equal iff the container is valid
//!   and the payloads match; an invalid container is less than any value.
//!   Operators are implemented for the scalar column types; any other `T`
//!   goes through [`Nullable::eq_value`] and [`Nullable::partial_cmp_value`].

use std::cmp::Ordering;

use crate::nullable::{Disengaged, Nullable};

impl<T> Nullable<T> {
    /// Compare against a raw value: `true` iff valid and equal to `other`.
    pub fn eq_value(&self, other: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_option().is_some_and(|value| value == other)
    }

    /// Order against a raw value. An invalid container is always `Less`.
    pub fn partial_cmp_value(&self, other: &T) -> Option<Ordering>
    where
        T: PartialOrd,
    {
        match self.as_option() {
            Some(value) => value.partial_cmp(other),
            None => Some(Ordering::Less),
        }
    }

    /// Total order against a raw value. An invalid container is always `Less`.
    pub fn cmp_value(&self, other: &T) -> Ordering
    where
        T: Ord,
    {
        match self.as_option() {
            Some(value) => value.cmp(other),
            None => Ordering::Less,
        }
    }
}

// ---------------------------------------------------------------------------
// Nullable × Nullable
// ---------------------------------------------------------------------------

impl<T: PartialEq> PartialEq for Nullable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Nullable<T> {}

impl<T: PartialOrd> PartialOrd for Nullable<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_option().partial_cmp(&other.as_option())
    }
}

impl<T: Ord> Ord for Nullable<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_option().cmp(&other.as_option())
    }
}

// ---------------------------------------------------------------------------
// Nullable × Disengaged
// ---------------------------------------------------------------------------

impl<T> PartialEq<Disengaged> for Nullable<T> {
    fn eq(&self, _: &Disengaged) -> bool {
        !self.is_valid()
    }
}

impl<T> PartialEq<Nullable<T>> for Disengaged {
    fn eq(&self, other: &Nullable<T>) -> bool {
        !other.is_valid()
    }
}

impl<T> PartialOrd<Disengaged> for Nullable<T> {
    fn partial_cmp(&self, _: &Disengaged) -> Option<Ordering> {
        Some(if self.is_valid() {
            Ordering::Greater
        } else {
            Ordering::Equal
        })
    }
}

impl<T> PartialOrd<Nullable<T>> for Disengaged {
    fn partial_cmp(&self, other: &Nullable<T>) -> Option<Ordering> {
        Some(if other.is_valid() {
            Ordering::Less
        } else {
            Ordering::Equal
        })
    }
}

// ---------------------------------------------------------------------------
// Nullable × T
// ---------------------------------------------------------------------------

macro_rules! impl_value_comparisons {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PartialEq<$ty> for Nullable<$ty> {
                fn eq(&self, other: &$ty) -> bool {
                    self.eq_value(other)
                }
            }

            impl PartialEq<Nullable<$ty>> for $ty {
                fn eq(&self, other: &Nullable<$ty>) -> bool {
                    other.eq_value(self)
                }
            }

            impl PartialOrd<$ty> for Nullable<$ty> {
                fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                    self.partial_cmp_value(other)
                }
            }

            impl PartialOrd<Nullable<$ty>> for $ty {
                fn partial_cmp(&self, other: &Nullable<$ty>) -> Option<Ordering> {
                    other.partial_cmp_value(self).map(Ordering::reverse)
                }
            }
        )*
    };
}

impl_value_comparisons!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, Vec<u8>,
);
