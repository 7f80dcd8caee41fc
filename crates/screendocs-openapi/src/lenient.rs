//! Forgiving field deserializers for the document model.
//!
//! A value of the wrong shape reads as absent instead of failing the whole
//! file, so an odd field on one operation never hides the rest of the spec.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// Deserialize `T`, or its default if the value does not fit.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a map with scalar keys (`200:` and `'200':` alike).
///
/// Values that do not fit become `T::default()`, so an OpenAPI 3.1 boolean
/// schema (`meta: true`) reads as an empty schema. Anything but a mapping
/// yields an empty map.
pub(crate) fn lenient_map<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Mapping(entries) = Value::deserialize(deserializer)? else {
        return Ok(IndexMap::new());
    };
    Ok(entries
        .into_iter()
        .map(|(key, value)| (scalar_key(key), T::deserialize(value).unwrap_or_default()))
        .collect())
}

/// Deserialize a list, skipping items that do not fit.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Sequence(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

/// Deserialize a list of strings, ignoring anything that is not a scalar.
///
/// Swagger-style `required: true` on a property schema becomes an empty list.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Sequence(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items.into_iter().filter_map(scalar_text).collect())
}

/// Deserialize free text; numbers and booleans are kept as written.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Like [`text`], empty when absent.
pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Deserialize a `true` flag; every other value is `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_key(key: Value) -> String {
    match key {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            scalar_text(key).unwrap_or_default()
        }
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_owned())
            .unwrap_or_default(),
    }
}
