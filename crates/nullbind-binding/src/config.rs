use serde::{Deserialize, Serialize};

/// What to do when the source reports NULL for a plain (non-`Nullable`) slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullPolicy {
    /// Fail the fetch with [`BindError::UnexpectedNull`](crate::BindError::UnexpectedNull).
    Reject,
    /// Reset the slot to its default value and log a warning.
    KeepDefault,
}

/// Configuration for the result-slot protocol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Handling of NULL indicators for slots that are not `Nullable`.
    pub null_into_plain: NullPolicy,
    /// Whether [`fetch_into`](crate::fetch_into) runs the default-initialization
    /// hook before handing the payload to the writer. When disabled, slots
    /// without storage are still initialized; prepared slots are written
    /// over as they are.
    pub initialize_before_fetch: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl FetchConfig {
    /// Reject NULLs that reach plain slots.
    pub fn strict() -> Self {
        Self {
            null_into_plain: NullPolicy::Reject,
            initialize_before_fetch: true,
        }
    }

    /// Accept NULLs into plain slots, leaving the default value behind.
    pub fn lenient() -> Self {
        Self {
            null_into_plain: NullPolicy::KeepDefault,
            ..Self::strict()
        }
    }
}
