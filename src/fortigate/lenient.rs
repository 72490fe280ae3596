//! Permissive field decoders for FortiGate JSON.
//!
//! Firmware releases drift: a field may disappear, turn into `null`, switch
//! between a number and a numeric string, or an empty map may be sent as `[]`.
//! None of that should fail a scrape. Every helper here maps an absent or
//! oddly-shaped value to the field's default instead of returning an error.
//!
//! Use together with `#[serde(default)]` so that missing fields also default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

fn value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

/// Number, numeric string, or boolean; anything else is `0.0`.
pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match value(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        Value::Bool(b) => f64::from(u8::from(b)),
        _ => 0.0,
    })
}

/// Integer, float (truncated), or numeric string; anything else is `0`.
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match value(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

/// String as-is, numbers and booleans stringified, anything else empty.
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match value(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// JSON booleans, non-zero numbers, and the appliance's `"enable"`/`"yes"`
/// style strings are true; anything else is false.
pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match value(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "enable" | "enabled" | "yes" | "up" | "1"
        ),
        _ => false,
    })
}

/// Any `results` payload. A shape that does not fit `R` (for example `[]`
/// where an object map is expected) decodes to `R::default()`.
pub fn results<'de, D, R>(deserializer: D) -> Result<R, D::Error>
where
    D: Deserializer<'de>,
    R: DeserializeOwned + Default,
{
    let raw = value(deserializer)?;
    if raw.is_null() {
        return Ok(R::default());
    }
    Ok(serde_json::from_value(raw).unwrap_or_else(|e| {
        debug!("Unexpected results shape, using empty default: {}", e);
        R::default()
    }))
}
