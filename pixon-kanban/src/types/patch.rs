//! Serde support for clearable fields in update commands.
//!
//! A clearable field is `Option<Option<T>>`: absent means "leave alone",
//! `null` means "clear" and a value means "set". Plain `Option` deserialization
//! folds `null` into absent, so these fields go through [`double_option`].

use serde::{Deserialize, Deserializer};

/// Deserialize a present field, `null` included, as `Some(..)`.
///
/// Use with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
