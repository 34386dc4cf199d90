//! Tri-state field marker for partial updates
//!
//! A JSON field on an update payload carries one of three intents: it was
//! never mentioned, it was explicitly set to null, or it carries a value.
//! `Option<T>` collapses the first two, so updates use `Patch<T>` instead
//! and build their statements by iterating only supplied fields.

use serde::{Deserialize, Deserializer};

/// A field on a partial-update payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was not present in the payload; keep the stored value.
    Absent,
    /// Field was explicitly null; clear the stored value.
    Null,
    /// Field carries a replacement value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// True when the field was not mentioned in the payload.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Map the carried value, preserving `Absent`/`Null`.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Self::Absent => Patch::Absent,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }
}

// Deserializes from the *presence* of the field: pair this with
// `#[serde(default)]` so an omitted field stays `Absent` while an explicit
// null becomes `Null`.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}
