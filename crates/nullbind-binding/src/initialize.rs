//! The default-initialization hook run by the binding layer before a fetch.

use nullbind_types::Nullable;

use crate::capability::CanBindAsResult;

/// Prepare a result slot so a column writer has storage to fill.
pub trait InitializeResultItem: CanBindAsResult {
    /// Reset the slot to its pre-fetch state.
    fn initialize_result_item(&mut self);
}

/// Leaves the container engaged with `T::default()` and marked null: the
/// payload has a stable address, but reads as NULL until the fetch says
/// otherwise.
impl<T> InitializeResultItem for Nullable<T>
where
    T: CanBindAsResult + Default,
{
    fn initialize_result_item(&mut self) {
        self.assign(Nullable::in_place());
        *self.raw_null_mut() = true;
    }
}

macro_rules! impl_scalar_initialize {
    ($($ty:ty),* $(,)?) => {
        $(
            impl InitializeResultItem for $ty {
                fn initialize_result_item(&mut self) {
                    *self = <$ty>::default();
                }
            }
        )*
    };
}

impl_scalar_initialize!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, Vec<u8>,
);

/// Run the default-initialization hook on `item`.
pub fn default_initialize<T: InitializeResultItem>(item: &mut T) {
    item.initialize_result_item();
}
