use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BadNullableAccess, NullableResult};

/// Zero-size sentinel standing for "no value", independent of the wrapped type.
///
/// Use it to reset a container ([`Nullable::assign_disengaged`]), to build an
/// empty one ([`Nullable::from_disengaged`]), or as a comparison operand:
/// an invalid container compares equal to the sentinel, and the sentinel
/// sorts before every valid container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Disengaged;

/// The disengaged sentinel.
pub const DISENGAGED: Disengaged = Disengaged;

/// Alias of [`DISENGAGED`] that reads naturally in SQL-flavoured code.
pub const NULL: Disengaged = Disengaged;

/// Tri-state value container for fields read from or written to a row source.
///
/// A `Nullable<T>` is in exactly one of three states:
///
/// | state            | engaged | null  | `is_valid()` |
/// |------------------|---------|-------|--------------|
/// | disengaged       | false   | *     | false        |
/// | engaged, null    | true    | true  | false        |
/// | valid            | true    | false | true         |
///
/// The engaged-but-null state exists for result binding: storage is created
/// up front (see `nullbind-binding`), a column reader writes into it, and the
/// null marker is cleared only when the source reports a non-NULL value.
///
/// A default container is disengaged with the null marker set. Note that
/// [`disengage`](Self::disengage) clears the marker instead, and that
/// [`set_null`](Self::set_null) is a no-op while disengaged. Both behaviours
/// are relied upon by existing callers and are kept as they are.
pub struct Nullable<T> {
    payload: Option<T>,
    null: bool,
}

impl<T> Nullable<T> {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Create a disengaged container with the null marker set.
    pub const fn new() -> Self {
        Self {
            payload: None,
            null: true,
        }
    }

    /// Create a disengaged container from the sentinel. Same as [`new`](Self::new).
    pub const fn from_disengaged(_: Disengaged) -> Self {
        Self::new()
    }

    /// Create a valid container holding `value`.
    pub const fn valid(value: T) -> Self {
        Self {
            payload: Some(value),
            null: false,
        }
    }

    /// Create a valid container holding `T::default()`.
    pub fn in_place() -> Self
    where
        T: Default,
    {
        Self::valid(T::default())
    }

    /// Create a valid container whose payload is built from `args`.
    pub fn in_place_with<A>(args: A) -> Self
    where
        T: From<A>,
    {
        Self::valid(T::from(args))
    }

    /// Create a valid container whose payload is collected from `items`.
    pub fn in_place_from_iter<I>(items: I) -> Self
    where
        I: IntoIterator,
        T: FromIterator<I::Item>,
    {
        Self::valid(items.into_iter().collect())
    }

    /// Convert an [`Option`]: `Some` becomes valid, `None` disengaged.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::valid(value),
            None => Self::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Assignment
    // -----------------------------------------------------------------------

    /// Drop any stored payload and set the null marker.
    pub fn assign_disengaged(&mut self) {
        self.payload = None;
        self.null = true;
    }

    /// Move-assign from another container.
    ///
    /// An engaged source hands its payload and null marker over. A
    /// disengaged source behaves like [`assign_disengaged`](Self::assign_disengaged).
    pub fn assign(&mut self, other: Nullable<T>) {
        match other.payload {
            Some(value) => {
                match &mut self.payload {
                    Some(current) => *current = value,
                    slot => *slot = Some(value),
                }
                self.null = other.null;
            }
            None => self.assign_disengaged(),
        }
    }

    /// Copy-assign from another container. Same as [`Clone::clone_from`].
    pub fn assign_from(&mut self, other: &Nullable<T>)
    where
        T: Clone,
    {
        self.clone_from(other);
    }

    /// Assign a raw value, constructing the payload if disengaged.
    ///
    /// The container is always valid afterwards.
    pub fn set_value<U>(&mut self, value: U)
    where
        T: From<U>,
    {
        let value = T::from(value);
        match &mut self.payload {
            Some(current) => *current = value,
            slot => *slot = Some(value),
        }
        self.null = false;
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Returns `true` if a payload is stored and not marked null.
    pub const fn is_valid(&self) -> bool {
        self.payload.is_some() && !self.null
    }

    /// Returns `true` if a payload is stored, regardless of the null marker.
    pub const fn is_engaged(&self) -> bool {
        self.payload.is_some()
    }

    /// The raw null marker.
    ///
    /// This is *not* the negation of [`is_valid`](Self::is_valid): a
    /// disengaged container may report `false` here after
    /// [`disengage`](Self::disengage) or [`unset_null`](Self::unset_null).
    pub const fn is_null(&self) -> bool {
        self.null
    }

    /// The payload, if the container is valid.
    pub fn value(&self) -> NullableResult<&T> {
        self.as_option().ok_or(BadNullableAccess)
    }

    /// Mutable access to the payload, if the container is valid.
    pub fn value_mut(&mut self) -> NullableResult<&mut T> {
        self.as_option_mut().ok_or(BadNullableAccess)
    }

    /// Consume the container and return the payload, if valid.
    pub fn into_value(self) -> NullableResult<T> {
        self.into_option().ok_or(BadNullableAccess)
    }

    /// A copy of the payload if valid, otherwise `default` converted into `T`.
    pub fn value_or<U>(&self, default: U) -> T
    where
        T: Clone,
        U: Into<T>,
    {
        match self.as_option() {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// The payload if valid, otherwise `default` converted into `T`.
    pub fn into_value_or<U>(self, default: U) -> T
    where
        U: Into<T>,
    {
        match self.into_option() {
            Some(value) => value,
            None => default.into(),
        }
    }

    /// The payload as an [`Option`], `None` unless valid.
    pub fn as_option(&self) -> Option<&T> {
        if self.null {
            return None;
        }
        self.payload.as_ref()
    }

    /// Mutable view of the payload, `None` unless valid.
    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        if self.null {
            return None;
        }
        self.payload.as_mut()
    }

    /// Consume the container into an [`Option`], `None` unless valid.
    pub fn into_option(self) -> Option<T> {
        if self.null {
            return None;
        }
        self.payload
    }

    /// Unchecked access to the stored payload, ignoring the null marker.
    ///
    /// # Safety
    ///
    /// The container must be engaged.
    pub unsafe fn get_unchecked(&self) -> &T {
        // SAFETY: the caller guarantees the payload is present.
        unsafe { self.payload.as_ref().unwrap_unchecked() }
    }

    /// Unchecked mutable access to the stored payload, ignoring the null marker.
    ///
    /// # Safety
    ///
    /// The container must be engaged.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        // SAFETY: the caller guarantees the payload is present.
        unsafe { self.payload.as_mut().unwrap_unchecked() }
    }

    // -----------------------------------------------------------------------
    // Modifiers
    // -----------------------------------------------------------------------

    /// Drop any stored payload and clear the null marker.
    ///
    /// Unlike [`assign_disengaged`](Self::assign_disengaged) this leaves
    /// `is_null() == false`. The container is still invalid.
    pub fn disengage(&mut self) {
        self.payload = None;
        self.null = false;
    }

    /// Clear the null marker. Does not create a payload.
    pub fn unset_null(&mut self) {
        self.null = false;
    }

    /// Set the null marker, keeping the payload. No-op while disengaged.
    pub fn set_null(&mut self) {
        if self.payload.is_some() {
            self.null = true;
        }
    }

    /// Replace the payload with `value` and make the container valid.
    pub fn emplace(&mut self, value: T) -> &mut T {
        self.payload = None;
        self.null = false;
        self.payload.insert(value)
    }

    /// Replace the payload with one built from `args`.
    pub fn emplace_with<A>(&mut self, args: A) -> &mut T
    where
        T: From<A>,
    {
        self.payload = None;
        self.null = false;
        self.payload.insert(T::from(args))
    }

    /// Replace the payload with one collected from `items`.
    pub fn emplace_from_iter<I>(&mut self, items: I) -> &mut T
    where
        I: IntoIterator,
        T: FromIterator<I::Item>,
    {
        self.payload = None;
        self.null = false;
        self.payload.insert(items.into_iter().collect())
    }

    /// Exchange the full state with `other`.
    ///
    /// When only one side is engaged, its payload and null marker move to
    /// the other side, and the side left empty ends up with the marker
    /// cleared.
    ///
    /// When both sides are engaged the null markers are exchanged along with
    /// the payloads, so a null-marked container stays null-marked wherever
    /// its payload ends up.
    pub fn swap(&mut self, other: &mut Nullable<T>) {
        match (self.payload.is_some(), other.payload.is_some()) {
            (true, true) | (false, false) => {
                mem::swap(&mut self.payload, &mut other.payload);
                mem::swap(&mut self.null, &mut other.null);
            }
            (true, false) => {
                other.payload = self.payload.take();
                other.null = self.null;
                self.null = false;
            }
            (false, true) => {
                self.payload = other.payload.take();
                self.null = other.null;
                other.null = false;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Binding-layer access
    // -----------------------------------------------------------------------

    /// Mutable reference to the stored payload for a column writer.
    ///
    /// Only the binding layer should call this, after it has engaged the
    /// container. Panics if the container is disengaged.
    #[doc(hidden)]
    #[track_caller]
    pub fn raw_payload_mut(&mut self) -> &mut T {
        match &mut self.payload {
            Some(value) => value,
            None => panic!("raw payload requested from a disengaged nullable"),
        }
    }

    /// Mutable reference to the null marker for a column writer.
    ///
    /// Only the binding layer should call this.
    #[doc(hidden)]
    pub fn raw_null_mut(&mut self) -> &mut bool {
        &mut self.null
    }
}

/// Build a valid [`Nullable`] from a value.
pub fn make_nullable<T>(value: T) -> Nullable<T> {
    Nullable::valid(value)
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Nullable<T> {
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            null: self.null,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match &source.payload {
            Some(value) => {
                match &mut self.payload {
                    Some(current) => current.clone_from(value),
                    slot => *slot = Some(value.clone()),
                }
                self.null = source.null;
            }
            None => self.assign_disengaged(),
        }
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::valid(value)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        Self::from_option(value)
    }
}

impl<T> From<Nullable<T>> for Option<T> {
    fn from(value: Nullable<T>) -> Self {
        value.into_option()
    }
}

/// Unchecked dereference: yields the stored payload even when it is marked
/// null. Panics if the container is disengaged.
impl<T> Deref for Nullable<T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match &self.payload {
            Some(value) => value,
            None => panic!("dereferenced a disengaged nullable"),
        }
    }
}

impl<T> DerefMut for Nullable<T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.payload {
            Some(value) => value,
            None => panic!("dereferenced a disengaged nullable"),
        }
    }
}

impl<T: Hash> Hash for Nullable<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_option().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.payload, self.null) {
            (None, _) => write!(f, "Nullable(<disengaged>)"),
            (Some(value), true) => write!(f, "Nullable(NULL: {value:?})"),
            (Some(value), false) => f.debug_tuple("Nullable").field(value).finish(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Nullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => value.fmt(f),
            None => write!(f, "NULL"),
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from_option)
    }
}
