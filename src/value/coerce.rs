//! Coercion rules between query literals and record values.
//!
//! Conversions happen only at comparison time and never alter the values
//! stored in a record.

use crate::value::Value;
use std::cmp::Ordering;

/// Convert a raw operand taken from a query into a typed value.
///
/// The text is trimmed and one layer of matching single or double quotes is
/// removed. Then, in order: `true`/`false` (any case) become booleans,
/// integer text becomes an integer, float text becomes a float, and anything
/// else stays a string. Quoting does not prevent the conversion, so `'30'`
/// still parses as `Integer(30)`.
pub fn parse_literal(raw: &str) -> Value {
    let text = strip_quotes(raw.trim());

    if let Some(b) = parse_bool(text) {
        return Value::Boolean(b);
    }
    if let Some(n) = parse_integer(text) {
        return Value::Integer(n);
    }
    if let Some(x) = parse_float(text) {
        return Value::Float(x);
    }
    Value::String(text.to_string())
}

fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Case-insensitive `true`/`false`
pub fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub fn parse_integer(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

pub fn parse_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Truth value of a scalar used as a standalone condition.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Boolean(b) => *b,
        Value::Integer(n) => *n != 0,
        Value::Float(x) => *x != 0.0,
        Value::String(s) => !s.is_empty(),
    }
}

/// Canonical string form used by the loose equality fallback.
pub fn stringify(value: &Value) -> String {
    value.to_string()
}

/// Equality between a record value and a query operand.
///
/// Same-kind pairs compare exactly. A string operand is read as the record
/// value's kind when the record holds a number or a boolean. Every other
/// pairing, and any operand that fails to convert, falls back to a
/// case-insensitive comparison of the canonical strings.
pub fn loose_eq(actual: &Value, target: &Value) -> bool {
    match (actual, target) {
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Integer(a), Value::String(s)) => match parse_integer(s) {
            Some(b) => *a == b,
            None => text_eq(actual, target),
        },
        (Value::Float(a), Value::String(s)) => match parse_float(s) {
            Some(b) => *a == b,
            None => text_eq(actual, target),
        },
        (Value::Boolean(a), Value::String(s)) => match parse_bool(s) {
            Some(b) => *a == b,
            None => text_eq(actual, target),
        },
        (Value::String(_), Value::Boolean(_) | Value::Integer(_) | Value::Float(_))
        | (Value::Integer(_), Value::Boolean(_) | Value::Float(_))
        | (Value::Float(_), Value::Boolean(_) | Value::Integer(_))
        | (Value::Boolean(_), Value::Integer(_) | Value::Float(_)) => text_eq(actual, target),
    }
}

fn text_eq(actual: &Value, target: &Value) -> bool {
    stringify(actual).to_lowercase() == stringify(target).to_lowercase()
}

/// Ordering between a numeric record value and a query operand.
///
/// Returns `None` when the record value is not numeric, when a string operand
/// does not parse as the record value's kind, or when either side is NaN.
/// Mixed integer/float pairs are compared as floats.
pub fn numeric_cmp(actual: &Value, target: &Value) -> Option<Ordering> {
    match (actual, target) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Integer(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
        (Value::Integer(a), Value::String(s)) => parse_integer(s).map(|b| a.cmp(&b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Float(a), Value::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Value::Float(a), Value::String(s)) => parse_float(s).and_then(|b| a.partial_cmp(&b)),
        (Value::Integer(_) | Value::Float(_), Value::Boolean(_))
        | (Value::Boolean(_) | Value::String(_), _) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_order() {
        assert_eq!(parse_literal("true"), Value::Boolean(true));
        assert_eq!(parse_literal("FALSE"), Value::Boolean(false));
        assert_eq!(parse_literal("  42 "), Value::Integer(42));
        assert_eq!(parse_literal("-7"), Value::Integer(-7));
        assert_eq!(parse_literal("3.5"), Value::Float(3.5));
        assert_eq!(parse_literal("1e3"), Value::Float(1000.0));
        assert_eq!(
            parse_literal("Engineering"),
            Value::String("Engineering".to_string())
        );
    }

    #[test]
    fn test_parse_literal_quotes() {
        assert_eq!(parse_literal("\"New York\""), Value::from("New York"));
        assert_eq!(parse_literal("'Sales'"), Value::from("Sales"));
        // Quoting does not keep a value textual
        assert_eq!(parse_literal("'true'"), Value::Boolean(true));
        assert_eq!(parse_literal("\"30\""), Value::Integer(30));
        // Only one matching layer is stripped
        assert_eq!(parse_literal("\"'x'\""), Value::from("'x'"));
        // Mismatched quotes are kept
        assert_eq!(parse_literal("'abc\""), Value::from("'abc\""));
        assert_eq!(parse_literal("\""), Value::from("\""));
        assert_eq!(parse_literal("\"\""), Value::from(""));
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&Value::Boolean(true)));
        assert!(!is_truthy(&Value::Boolean(false)));
        assert!(is_truthy(&Value::Integer(-1)));
        assert!(!is_truthy(&Value::Integer(0)));
        assert!(is_truthy(&Value::Float(0.5)));
        assert!(!is_truthy(&Value::Float(0.0)));
        assert!(is_truthy(&Value::from("x")));
        assert!(!is_truthy(&Value::from("")));
    }

    #[test]
    fn test_loose_eq_same_kind() {
        assert!(loose_eq(&Value::from("John"), &Value::from("John")));
        assert!(!loose_eq(&Value::from("John"), &Value::from("john")));
        assert!(loose_eq(&Value::Integer(30), &Value::Integer(30)));
        assert!(!loose_eq(&Value::Integer(30), &Value::Integer(31)));
        assert!(loose_eq(&Value::Float(2.5), &Value::Float(2.5)));
        assert!(loose_eq(&Value::Boolean(true), &Value::Boolean(true)));
    }

    #[test]
    fn test_loose_eq_string_operand() {
        assert!(loose_eq(&Value::Integer(30), &Value::from("30")));
        assert!(!loose_eq(&Value::Integer(31), &Value::from("30")));
        assert!(loose_eq(&Value::Float(2.5), &Value::from("2.5")));
        assert!(loose_eq(&Value::Boolean(true), &Value::from("TRUE")));
        assert!(!loose_eq(&Value::Boolean(false), &Value::from("true")));
        assert!(!loose_eq(&Value::Integer(30), &Value::from("thirty")));
    }

    #[test]
    fn test_loose_eq_fallback() {
        // Canonical strings compare case-insensitively
        assert!(loose_eq(&Value::Integer(34), &Value::Float(34.0)));
        assert!(!loose_eq(&Value::Integer(34), &Value::Float(34.5)));
        assert!(loose_eq(&Value::from("TRUE"), &Value::Boolean(true)));
        assert!(loose_eq(&Value::from("42"), &Value::Integer(42)));
        assert!(!loose_eq(&Value::Boolean(true), &Value::Integer(1)));
    }

    #[test]
    fn test_numeric_cmp() {
        assert_eq!(
            numeric_cmp(&Value::Integer(34), &Value::Integer(30)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            numeric_cmp(&Value::Integer(30), &Value::from("35")),
            Some(Ordering::Less)
        );
        assert_eq!(
            numeric_cmp(&Value::Float(2.5), &Value::Integer(2)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            numeric_cmp(&Value::Integer(2), &Value::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            numeric_cmp(&Value::Float(2.5), &Value::from("2.5")),
            Some(Ordering::Equal)
        );
        // String operands must parse as the record value's kind
        assert_eq!(numeric_cmp(&Value::Integer(30), &Value::from("29.5")), None);
        assert_eq!(numeric_cmp(&Value::Integer(30), &Value::Boolean(true)), None);
        assert_eq!(numeric_cmp(&Value::from("30"), &Value::Integer(1)), None);
        assert_eq!(numeric_cmp(&Value::Boolean(true), &Value::Integer(0)), None);
        assert_eq!(numeric_cmp(&Value::Float(f64::NAN), &Value::Float(1.0)), None);
    }
}
