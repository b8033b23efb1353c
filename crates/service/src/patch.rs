//! Tri-state field for partial updates.
//!
//! A JSON body distinguishes a key that is missing from a key set to `null`;
//! `Option<T>` cannot, so PATCH inputs use [`Patch`] with `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present: keep the stored value.
    #[default]
    Absent,
    /// Key present with `null`: clear the stored value.
    Null,
    /// Key present with a value: overwrite.
    Value(T),
}

impl<T> Patch<T> {
    /// Resolve against the stored value of a nullable field.
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(o: Option<T>) -> Self {
        o.map_or(Patch::Null, Patch::Value)
    }
}

// Only called when the key is present; `#[serde(default)]` covers the missing case.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
