//! "Zero value" for a JSON-reduced field, in the Go-API-client sense the
//! spec borrows: `false`, `0`, `""`, `null`, and empty arrays/objects.

use serde_json::Value;

/// Whether `value` is the zero value for its JSON kind.
#[must_use]
pub fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.values().all(is_zero),
    }
}
