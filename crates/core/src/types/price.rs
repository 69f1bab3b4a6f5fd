//! Price values typed into a free-text field.
//!
//! Prices travel as JSON numbers. The form holds text, so the console parses
//! the longest numeric prefix of the field, and a field with no numeric prefix
//! becomes NaN. The service, not the console, is responsible for rejecting it.

use serde_json::{Number, Value};

/// Parse a price from free text.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.50 USD"` parses as `12.5`. Text without a numeric prefix yields NaN.
///
/// ```
/// use wishlist_console_core::parse_price_text;
///
/// assert_eq!(parse_price_text("  19.99"), 19.99);
/// assert_eq!(parse_price_text("3e2 each"), 300.0);
/// assert!(parse_price_text("free").is_nan());
/// ```
#[must_use]
pub fn parse_price_text(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let prefix = numeric_prefix(trimmed);
    prefix.parse().unwrap_or(f64::NAN)
}

/// Convert a price to JSON. Non-finite values become `null`.
#[must_use]
pub fn price_to_json(price: f64) -> Value {
    Number::from_f64(price).map_or(Value::Null, Value::Number)
}

/// Longest prefix of `s` that forms a decimal literal or a signed `Infinity`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        return s.get(..end + "Infinity".len()).unwrap_or_default();
    }

    let digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let int_digits = digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s.get(..end).unwrap_or_default()
}
