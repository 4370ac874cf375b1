//! Light coercions applied while checking a payload against its schema.
//!
//! Generated JSON routinely carries numbers as strings (`"1,234"`, `"$12"`,
//! `"45%"`) and booleans as `"true"`. These helpers turn such values into the
//! declared JSON type and leave anything else untouched so the caller can
//! report a field error.

use regex::Regex;
use serde_json::{Number, Value};
use std::sync::OnceLock;

fn numeric_regex() -> &'static Regex {
    static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMERIC_REGEX.get_or_init(|| {
        Regex::new(r"^[-+]?[$€£]?(?:\d{1,3}(?:,\d{3})+|\d+)?(?:\.\d+)?%?$")
            .expect("numeric regex is valid")
    })
}

/// Parse a numeric-looking string.
///
/// Accepts an optional sign, a leading currency symbol, thousands separators
/// and a trailing percent sign. The percent sign is dropped, not divided out.
pub fn parse_numeric(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !numeric_regex().is_match(trimmed) {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | '%'))
        .collect();

    if let Ok(int) = cleaned.parse::<i64>() {
        return Some(Number::from(int));
    }
    cleaned.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Coerce a value to a JSON number when it is a number or a numeric string.
pub fn to_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => parse_numeric(s).map(Value::Number),
        _ => None,
    }
}

/// Coerce a value to a JSON boolean (`"true"`/`"false"`, any case).
pub fn to_bool(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce scalars to a JSON string. Objects, arrays and null are rejected.
pub fn to_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

/// Match a string against an enum's literals case-insensitively and return the
/// canonical literal.
pub fn to_enum(value: &Value, allowed: &[&'static str]) -> Option<Value> {
    let raw = value.as_str()?.trim();
    allowed
        .iter()
        .find(|literal| literal.eq_ignore_ascii_case(raw))
        .map(|literal| Value::String((*literal).to_string()))
}

/// Hex (`#rgb`, `#rrggbb`) or a small set of named colors.
pub fn is_color(raw: &str) -> bool {
    static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let hex = HEX_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("color regex is valid")
    });

    const NAMED_COLORS: &[&str] = &[
        "red", "blue", "green", "white", "black", "transparent", "yellow", "orange", "purple",
        "pink", "gray", "grey", "teal", "indigo", "cyan",
    ];

    hex.is_match(raw) || NAMED_COLORS.contains(&raw.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_become_numbers() {
        assert_eq!(to_number(&json!("42")), Some(json!(42)));
        assert_eq!(to_number(&json!("1,234")), Some(json!(1234)));
        assert_eq!(to_number(&json!("1,234.5")), Some(json!(1234.5)));
        assert_eq!(to_number(&json!("$12")), Some(json!(12)));
        assert_eq!(to_number(&json!("-$1,200")), Some(json!(-1200)));
        assert_eq!(to_number(&json!("45%")), Some(json!(45)));
        assert_eq!(to_number(&json!(" .5 ")), Some(json!(0.5)));
    }

    #[test]
    fn non_numeric_strings_are_rejected() {
        assert_eq!(to_number(&json!("twelve")), None);
        assert_eq!(to_number(&json!("12,34")), None);
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("$")), None);
        assert_eq!(to_number(&json!(true)), None);
    }

    #[test]
    fn numbers_are_left_alone() {
        assert_eq!(to_number(&json!(3.0)), Some(json!(3.0)));
        assert_eq!(to_number(&json!(7)), Some(json!(7)));
    }

    #[test]
    fn bool_coercion() {
        assert_eq!(to_bool(&json!("TRUE")), Some(json!(true)));
        assert_eq!(to_bool(&json!("false")), Some(json!(false)));
        assert_eq!(to_bool(&json!("yes")), None);
    }

    #[test]
    fn enum_matching_is_case_insensitive() {
        let allowed = &["bar", "line"];
        assert_eq!(to_enum(&json!("Bar"), allowed), Some(json!("bar")));
        assert_eq!(to_enum(&json!("pie"), allowed), None);
    }

    #[test]
    fn colors() {
        assert!(is_color("#fff"));
        assert!(is_color("#3b82f6"));
        assert!(is_color("Teal"));
        assert!(!is_color("#12345"));
        assert!(!is_color("blurple"));
    }
}
