//! Numeric lexical forms
//!
//! Parsing follows the XSD lexical spaces (surrounding whitespace is
//! collapsed, a leading `+` is allowed). Formatting produces the canonical
//! forms used when a computed number is turned back into a literal:
//!
//! | type    | examples                     |
//! |---------|------------------------------|
//! | integer | `0`, `-12`                   |
//! | decimal | `1.0`, `0.5`, `-12.25`       |
//! | double  | `1.0E0`, `1.5E2`, `INF`, `NaN` |

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Signed;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("static regex"));
static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("static regex"));
static DOUBLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("static regex")
});

/// Parse an xsd:integer lexical form
pub fn parse_integer(lexical: &str) -> Option<BigInt> {
    let s = lexical.trim();
    if !INTEGER_RE.is_match(s) {
        return None;
    }
    BigInt::from_str(s.strip_prefix('+').unwrap_or(s)).ok()
}

/// Parse an xsd:decimal lexical form (`1.`, `.5` and `+1.0` are all valid)
pub fn parse_decimal(lexical: &str) -> Option<BigDecimal> {
    let s = lexical.trim();
    if !DECIMAL_RE.is_match(s) {
        return None;
    }
    let (sign, body) = match s.as_bytes()[0] {
        b'-' => ("-", &s[1..]),
        b'+' => ("", &s[1..]),
        _ => ("", s),
    };
    let mut normalized = String::with_capacity(body.len() + 3);
    normalized.push_str(sign);
    if body.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(body);
    if body.ends_with('.') {
        normalized.push('0');
    }
    BigDecimal::from_str(&normalized).ok()
}

/// Parse an xsd:double lexical form
pub fn parse_double(lexical: &str) -> Option<f64> {
    match lexical.trim() {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        s if DOUBLE_RE.is_match(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// Parse an xsd:float lexical form
pub fn parse_float(lexical: &str) -> Option<f32> {
    match lexical.trim() {
        "INF" | "+INF" => Some(f32::INFINITY),
        "-INF" => Some(f32::NEG_INFINITY),
        "NaN" => Some(f32::NAN),
        s if DOUBLE_RE.is_match(s) => s.parse::<f32>().ok(),
        _ => None,
    }
}

/// Canonical xsd:decimal form: always a fractional part, no trailing zeros
pub fn format_decimal(value: &BigDecimal) -> String {
    let (digits, scale) = value.normalized().as_bigint_and_exponent();
    if scale <= 0 {
        let factor = BigInt::from(10u32).pow(scale.unsigned_abs() as u32);
        return format!("{}.0", digits * factor);
    }
    let scale = scale as usize;
    let mut magnitude = digits.abs().to_string();
    if magnitude.len() <= scale {
        magnitude = format!("{}{}", "0".repeat(scale + 1 - magnitude.len()), magnitude);
    }
    let (int_part, frac_part) = magnitude.split_at(magnitude.len() - scale);
    let sign = if digits.is_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, int_part, frac_part)
}

/// Canonical xsd:double form
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    with_mantissa_point(format!("{:E}", value))
}

/// Canonical xsd:float form
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    with_mantissa_point(format!("{:E}", value))
}

/// `1E0` -> `1.0E0`
fn with_mantissa_point(sci: String) -> String {
    match sci.find('E') {
        Some(pos) if !sci[..pos].contains('.') => format!("{}.0{}", &sci[..pos], &sci[pos..]),
        _ => sci,
    }
}
