//! Lenient numeric coercion of raw vital-sign values.
//!
//! Upstream records carry vitals as numbers, numeric strings, strings with
//! trailing units ("98.6F", "45 years") or garbage. Coercion takes the longest
//! numeric prefix and reports `None` when there is none.

use serde_json::Value;

/// Coerces a raw value to a float. `None` means unparseable.
pub fn to_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        // out-of-range literals such as 1e400 only survive as text
        Value::Number(n) => n.as_f64().or_else(|| parse_float_prefix(&n.to_string())),
        Value::String(s) => parse_float_prefix(s),
        // arrays coerce through their first element
        Value::Array(items) => to_float(items.first()),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

/// Coerces a raw value to an integer, truncating toward zero.
pub fn to_integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            number_to_integer(n.as_f64()?)
        }
        Value::String(s) => parse_int_prefix(s),
        Value::Array(items) => to_integer(items.first()),
        Value::Null | Value::Bool(_) | Value::Object(_) => None,
    }
}

fn number_to_integer(n: f64) -> Option<i64> {
    if !n.is_finite() {
        return None;
    }
    let magnitude = n.abs();
    // These magnitudes render in exponent notation, so only the leading
    // mantissa digit survives.
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        return parse_int_prefix(&format!("{:e}", n));
    }
    Some(n.trunc() as i64)
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let positive = !s.starts_with('-');
        return Some(if positive { f64::INFINITY } else { f64::NEG_INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}
