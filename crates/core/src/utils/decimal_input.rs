//! Lenient decimal parsing for user-typed amounts and rates.
//!
//! Form fields arrive as text in French or English notation (`"1234,56"` or
//! `"1234.56"`), sometimes with a trailing unit (`"1200 €"`). Anything that
//! does not start with a number counts as zero: the calculator never rejects
//! an input.

use std::str::FromStr;

use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::errors::{Result, ValidationError};

/// Parses a decimal, accepting `,` or `.` as the decimal separator.
///
/// The whole (trimmed) text must be a number; see [`coerce_decimal`] for the
/// forgiving variant.
pub fn parse_decimal(value: &str) -> Result<Decimal> {
    let normalized = normalize_separator(value.trim());
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .map_err(|e| ValidationError::DecimalParse(e).into())
}

/// Parses user text into a decimal, falling back to the longest numeric
/// prefix and finally to zero.
pub fn coerce_decimal(value: &str) -> Decimal {
    if let Ok(parsed) = parse_decimal(value) {
        return parsed;
    }
    let normalized = normalize_separator(value.trim());
    if let Some(clamped) = clamp_out_of_range(&normalized) {
        debug!("Input '{}' is outside the decimal range, clamped to {}", value, clamped);
        return clamped;
    }
    match numeric_prefix(&normalized).and_then(|prefix| Decimal::from_str(&prefix).ok()) {
        Some(parsed) => parsed,
        None => {
            if !value.trim().is_empty() {
                debug!("Non-numeric input '{}' treated as 0", value);
            }
            Decimal::ZERO
        }
    }
}

/// A finite number too large or too small for [`Decimal`] saturates to the
/// nearest bound, or to zero when it underflows.
fn clamp_out_of_range(normalized: &str) -> Option<Decimal> {
    let value = normalized.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let limit = Decimal::MAX.to_f64().unwrap_or(f64::MAX);
    if value.abs() >= limit {
        Some(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    } else if value != 0.0 && value.abs() < 1e-28 {
        Some(Decimal::ZERO)
    } else {
        None
    }
}

fn normalize_separator(value: &str) -> String {
    value.replacen(',', ".", 1)
}

/// Returns the leading `[+-]digits[.digits]` part of `value`, if any.
fn numeric_prefix(value: &str) -> Option<String> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in value.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    let prefix = &value[..end];
    let (sign, digits) = match prefix.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", prefix.strip_prefix('+').unwrap_or(prefix)),
    };
    if digits.starts_with('.') {
        Some(format!("{}0{}", sign, digits))
    } else {
        Some(format!("{}{}", sign, digits))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl DecimalInput {
    fn coerce(self) -> Option<Decimal> {
        match self {
            DecimalInput::Null => None,
            DecimalInput::String(s) => Some(coerce_decimal(&s)),
            DecimalInput::Number(n) => Some(coerce_decimal(&n.to_string())),
            DecimalInput::Bool(_) => Some(Decimal::ZERO),
        }
    }
}

/// Deserializes an optional rate. `null` or a missing key means "not
/// supplied"; any other value is coerced, unparseable text becoming zero.
pub fn deserialize_option_rate<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<DecimalInput>::deserialize(deserializer)?;
    Ok(raw.and_then(DecimalInput::coerce))
}

/// Deserializes a revenue amount given as a number or as text. Missing,
/// `null` and non-numeric values all become zero.
pub fn deserialize_amount<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<DecimalInput>::deserialize(deserializer)?;
    Ok(raw.and_then(DecimalInput::coerce).unwrap_or(Decimal::ZERO))
}
