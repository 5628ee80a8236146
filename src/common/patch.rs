// src/common/patch.rs

use serde::{Deserialize, Deserializer};

/// Campo anulável de um PATCH, em três estados:
/// - ausente no JSON        -> `None` (via `#[serde(default)]`), mantém o valor;
/// - `"campo": null`        -> `Some(None)`, apaga o valor;
/// - `"campo": valor`       -> `Some(Some(valor))`.
///
/// Uso: `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
