//! Keyed-object decoding for web-layer payloads
//!
//! serde's derived struct deserializers also accept the sequence form
//! (`[true]` for `{ audio: true }`). Payloads from the web layer are keyed
//! objects only, so they go through `serde_json::Value` and are rejected
//! unless the expected positions hold objects.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a payload whose top level must be a JSON object
pub fn decode_object<T: DeserializeOwned>(payload: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(payload).context("Payload is not valid JSON")?;
    require_object(&value, "payload")?;
    Ok(serde_json::from_value(value)?)
}

/// Fail unless `value` is a JSON object
pub fn require_object(value: &Value, what: &str) -> Result<()> {
    if !value.is_object() {
        bail!("Expected {} to be an object, got {}", what, type_name(value));
    }
    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
