//! Capability markers deciding which types may be bound.
//!
//! A statement binding layer bounds its generic parameters on
//! [`CanBindAsParam`] or [`CanBindAsResult`]. Both are markers over
//! [`Bindable`], which reports how the value is represented.
//!
//! [`Nullable<T>`] is bindable wherever `T` is: the wrapper never widens what
//! the inner type supports, it only adds the ability to carry NULL.

use std::fmt;

use nullbind_types::Nullable;
use serde::{Deserialize, Serialize};

/// How a bound value is represented towards the data source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingType {
    Boolean,
    Integer,
    UnsignedInteger,
    Float,
    Text,
    Blob,
    /// A [`Nullable`] wrapper around another binding type.
    Nullable,
}

impl BindingType {
    /// Returns `true` if values of this binding can carry NULL.
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable)
    }
}

impl fmt::Display for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Boolean"),
            Self::Integer => write!(f, "Integer"),
            Self::UnsignedInteger => write!(f, "UnsignedInteger"),
            Self::Float => write!(f, "Float"),
            Self::Text => write!(f, "Text"),
            Self::Blob => write!(f, "Blob"),
            Self::Nullable => write!(f, "Nullable"),
        }
    }
}

/// A type with a known binding representation.
pub trait Bindable {
    /// Representation of this type itself.
    const BINDING_TYPE: BindingType;

    /// Representation of the innermost non-nullable type.
    const INNER_TYPE: BindingType = Self::BINDING_TYPE;
}

/// Marker: the type may be bound as a statement parameter.
pub trait CanBindAsParam: Bindable {}

/// Marker: the type may be bound as a result slot.
pub trait CanBindAsResult: Bindable {}

impl<T: Bindable> Bindable for Nullable<T> {
    const BINDING_TYPE: BindingType = BindingType::Nullable;
    const INNER_TYPE: BindingType = T::INNER_TYPE;
}

impl<T: CanBindAsParam> CanBindAsParam for Nullable<T> {}

impl<T: CanBindAsResult> CanBindAsResult for Nullable<T> {}

macro_rules! impl_scalar_bindings {
    ($binding:ident => $($ty:ty),* $(,)?) => {
        $(
            impl Bindable for $ty {
                const BINDING_TYPE: BindingType = BindingType::$binding;
            }

            impl CanBindAsParam for $ty {}

            impl CanBindAsResult for $ty {}
        )*
    };
}

impl_scalar_bindings!(Boolean => bool);
impl_scalar_bindings!(Integer => i8, i16, i32, i64, isize);
impl_scalar_bindings!(UnsignedInteger => u8, u16, u32, u64, usize);
impl_scalar_bindings!(Float => f32, f64);
impl_scalar_bindings!(Text => String);
impl_scalar_bindings!(Blob => Vec<u8>);

// Borrowed text and bytes can be sent, but there is nowhere to fetch into.
impl Bindable for &str {
    const BINDING_TYPE: BindingType = BindingType::Text;
}

impl CanBindAsParam for &str {}

impl Bindable for &[u8] {
    const BINDING_TYPE: BindingType = BindingType::Blob;
}

impl CanBindAsParam for &[u8] {}

/// Binding representation of a parameter type.
pub fn param_binding<T: CanBindAsParam>() -> BindingType {
    T::BINDING_TYPE
}

/// Binding representation of a result type.
pub fn result_binding<T: CanBindAsResult>() -> BindingType {
    T::BINDING_TYPE
}
