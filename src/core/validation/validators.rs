//! Reusable field validators
//!
//! Each validator receives the field name and the (already filtered) value and
//! returns a human-readable message when the rule fails. Validators only judge
//! strings; other value kinds are left to [`string`].

use regex::Regex;
use serde_json::Value;

/// Validator: value must be a string
pub fn string(
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| {
        if value.is_string() {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: at least `min` characters
pub fn min_chars(
    min: usize,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if s.chars().count() < min => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: at most `max` characters
pub fn max_chars(
    max: usize,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if s.chars().count() > max => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: exactly `len` characters
pub fn exact_chars(
    len: usize,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if s.chars().count() != len => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: whole string must match `pattern`
///
/// An empty string never matches a `+` pattern, so this also fails on "".
pub fn matches(
    pattern: &'static Regex,
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !pattern.is_match(s) => Err(message.to_string()),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.contains(&s) => Err(message.to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::LazyLock;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

    // === string() ===

    #[test]
    fn test_string_accepts_string() {
        let v = string("texto");
        assert!(v("name", &json!("hola")).is_ok());
    }

    #[test]
    fn test_string_rejects_number_and_null() {
        let v = string("texto");
        assert_eq!(v("name", &json!(42)).unwrap_err(), "texto");
        assert!(v("name", &json!(null)).is_err());
    }

    // === min_chars() / max_chars() ===

    #[test]
    fn test_min_chars_empty_fails() {
        let v = min_chars(1, "requerido");
        assert_eq!(v("header", &json!("")).unwrap_err(), "requerido");
    }

    #[test]
    fn test_min_chars_counts_characters_not_bytes() {
        let v = max_chars(2, "largo");
        // two characters, four bytes
        assert!(v("name", &json!("ññ")).is_ok());
    }

    #[test]
    fn test_max_chars_boundary() {
        let v = max_chars(5, "largo");
        assert!(v("name", &json!("abcde")).is_ok());
        assert!(v("name", &json!("abcdef")).is_err());
    }

    #[test]
    fn test_length_validators_ignore_non_strings() {
        assert!(min_chars(3, "x")("n", &json!(null)).is_ok());
        assert!(max_chars(3, "x")("n", &json!(12345)).is_ok());
    }

    // === exact_chars() ===

    #[test]
    fn test_exact_chars() {
        let v = exact_chars(3, "tres");
        assert!(v("code", &json!("123")).is_ok());
        assert!(v("code", &json!("12")).is_err());
        assert!(v("code", &json!("1234")).is_err());
    }

    // === matches() ===

    #[test]
    fn test_matches_digits() {
        let v = matches(&DIGITS, "numeros");
        assert!(v("code", &json!("0123")).is_ok());
        assert!(v("code", &json!("01a3")).is_err());
    }

    #[test]
    fn test_matches_rejects_empty_string() {
        let v = matches(&DIGITS, "numeros");
        assert!(v("code", &json!("")).is_err());
    }

    // === in_list() ===

    #[test]
    fn test_in_list() {
        static ALLOWED: [&str; 2] = ["neutral", "garage"];
        let v = in_list(&ALLOWED, "estilo");
        assert!(v("estilo", &json!("garage")).is_ok());
        assert!(v("estilo", &json!("retro")).is_err());
    }
}
