use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Parse a number as written in a rate sheet or a JSON string field.
///
/// Handles formats like:
/// - "22.50" -> 22.50
/// - "  720 " -> 720
/// - "+5" -> 5
/// - "1.5e3" -> 1500
///
/// Returns None for anything else, including empty strings.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Convert f64 to Decimal without binary floating-point artifacts.
///
/// Goes through the shortest round-trip string (e.g. 0.1 stays 0.1, not
/// 0.1000000000000000055...). Non-finite or out-of-range values give None.
pub fn decimal_from_f64(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    let s = format!("{f}");
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

/// Read a JSON value as a number, accepting numeric strings.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(Decimal::from(u))
            } else {
                n.as_f64().and_then(decimal_from_f64)
            }
        }
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Like [`decimal_from_value`] but anything unusable becomes zero.
pub fn coerce_decimal(value: Option<&Value>) -> Decimal {
    value.and_then(decimal_from_value).unwrap_or(Decimal::ZERO)
}
