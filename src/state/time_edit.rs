//! Manual time edit input
//!
//! Edits arrive as loosely typed JSON fields. Anything that is not a
//! non-negative number becomes 0 instead of being rejected.

use serde::Deserialize;
use serde_json::Value;

/// A requested remaining time, either as total seconds or as clock fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEdit {
    #[serde(default)]
    pub hours: Option<Value>,
    #[serde(default)]
    pub minutes: Option<Value>,
    #[serde(default)]
    pub seconds: Option<Value>,
}

impl TimeEdit {
    /// Total seconds requested by this edit.
    ///
    /// With only `seconds` present it is taken as a total. Once `hours` or
    /// `minutes` appear, minutes and seconds are limited to `0..=59`.
    pub fn total_seconds(&self) -> i64 {
        if self.hours.is_none() && self.minutes.is_none() {
            return self.seconds.as_ref().map(coerce_field).unwrap_or(0);
        }

        let hours = self.hours.as_ref().map(coerce_field).unwrap_or(0);
        let minutes = self.minutes.as_ref().map(coerce_field).unwrap_or(0).min(59);
        let seconds = self.seconds.as_ref().map(coerce_field).unwrap_or(0).min(59);

        hours
            .saturating_mul(3600)
            .saturating_add(minutes * 60)
            .saturating_add(seconds)
    }
}

/// Coerce a JSON field to a non-negative integer.
///
/// Numbers are truncated, strings use their leading integer digits
/// (`"12abc"` is 12), everything else is 0.
pub fn coerce_field(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_leading_int(s),
        _ => 0,
    };
    parsed.max(0)
}

fn parse_leading_int(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().unwrap_or(if end > 0 { i64::MAX } else { 0 });

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edit(value: Value) -> TimeEdit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn coerces_invalid_input_to_zero() {
        assert_eq!(coerce_field(&json!("abc")), 0);
        assert_eq!(coerce_field(&json!(-15)), 0);
        assert_eq!(coerce_field(&json!("-15")), 0);
        assert_eq!(coerce_field(&json!(null)), 0);
        assert_eq!(coerce_field(&json!([1, 2])), 0);
    }

    #[test]
    fn parses_leading_digits_like_a_form_field() {
        assert_eq!(coerce_field(&json!("12abc")), 12);
        assert_eq!(coerce_field(&json!("  7")), 7);
        assert_eq!(coerce_field(&json!(4.9)), 4);
        assert_eq!(coerce_field(&json!("99999999999999999999")), i64::MAX);
    }

    #[test]
    fn total_seconds_from_plain_seconds() {
        assert_eq!(edit(json!({ "seconds": 900 })).total_seconds(), 900);
        assert_eq!(edit(json!({ "seconds": "bogus" })).total_seconds(), 0);
        assert_eq!(edit(json!({})).total_seconds(), 0);
    }

    #[test]
    fn clock_fields_limit_minutes_and_seconds() {
        let total = edit(json!({ "hours": 1, "minutes": 30, "seconds": 5 })).total_seconds();
        assert_eq!(total, 5405);

        let total = edit(json!({ "hours": "2", "minutes": 75, "seconds": -3 })).total_seconds();
        assert_eq!(total, 2 * 3600 + 59 * 60);
    }
}
