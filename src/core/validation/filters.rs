//! Reusable field filters
//!
//! These filters normalize submitted values before validation

use anyhow::Result;
use serde_json::Value;

/// Filter: treat a missing or null value as an empty input
///
/// Form fields that were never touched arrive as empty strings, so the
/// JSON API behaves the same way when a key is left out.
pub fn text() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if value.is_null() {
            Ok(Value::String(String::new()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: replace an empty or missing value with `default`
pub fn default_to(
    default: &'static str,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| match value.as_str() {
        Some("") => Ok(Value::String(default.to_string())),
        None if value.is_null() => Ok(Value::String(default.to_string())),
        _ => Ok(value),
    }
}
