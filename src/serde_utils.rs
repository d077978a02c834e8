//! Lenient deserializers for the YesDev backend.
//!
//! The backend is PHP and frequently returns numbers as strings (`"600"`),
//! booleans as `0`/`1`, and empty strings where a value is missing. Fields
//! that are only ever rendered go through these helpers so that one odd
//! payload does not fail a whole tool call.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

/// Deserialize an `i64` from a JSON number or numeric string.
pub fn lenient_i64<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    value_to_i64(&value).ok_or_else(|| D::Error::custom(format!("expected integer, got {value}")))
}

/// Deserialize an optional `i64`; anything unparseable becomes `None`.
///
/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn opt_i64<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.as_ref().and_then(value_to_i64))
}

/// Deserialize an optional display string from a string or number.
///
/// Empty strings become `None`.
pub fn opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`opt_string`], with `null` and missing values as `""`.
pub fn string_or_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(de)?.unwrap_or_default())
}

/// Deserialize a flag from `true`/`false`, `0`/`1` or `"0"`/`"1"`.
pub fn lenient_bool<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(ref v) => value_to_i64(v).is_some_and(|n| n != 0),
        None => false,
    })
}
