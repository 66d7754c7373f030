//! Serde helpers for common patterns.
//!
//! Light nodes are not consistent about how they report "nothing": a missing
//! field, `null`, `false`, `0` and `""` all show up in the wild. These helpers
//! fold every one of them into `None`.

use serde_json::Value;

/// Returns `false` for the JSON values that mean "no value": `null`, `false`,
/// zero and the empty string. Arrays and objects are always truthy, even when
/// empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Optional JSON values where falsy values collapse to `None`.
///
/// Use with `#[serde(default, deserialize_with = "submitter_types::serde_helpers::truthy::deserialize")]`
/// for `Option<serde_json::Value>` fields.
pub mod truthy {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Deserialize a JSON value, dropping it if it is falsy.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.filter(super::is_truthy))
    }
}
