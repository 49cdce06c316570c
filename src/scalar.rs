//! Scalar literal classification.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! 1. empty text → `Null`
//! 2. `"..."` → `String` (quotes removed, no escape processing)
//! 3. `true` / `false`, any case → `Bool`
//! 4. `null`, any case → `Null`
//! 5. `-?digits` → `Int`, `-?digits.digits` → `Float`
//! 6. `YYYY-MM-DD` → `Date`
//! 7. `YYYY-MM-DD HH:MM:SS` → `DateTime`
//! 8. `digits(.digits)+` → `Version`
//!
//! Ordering matters: `1.0` is a float because rule 5 runs before rule 8, and
//! `"2024-10-09"` is a string because rule 2 runs before rule 6. Structural
//! segments (`{...}`, `[...]`) are handled by the parser.

use crate::value::{DATETIME_FORMAT, DATE_FORMAT};
use crate::{Error, Result, Value, Version};
use chrono::{NaiveDate, NaiveDateTime};

/// Classifies trimmed scalar text. `Ok(None)` means no rule matched.
///
/// `line` and `column` locate the text for range errors.
pub(crate) fn classify_scalar(text: &str, line: usize, column: usize) -> Result<Option<Value>> {
    if text.is_empty() {
        return Ok(Some(Value::Null));
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return Ok(Some(Value::String(text[1..text.len() - 1].to_string())));
    }
    if text.eq_ignore_ascii_case("true") {
        return Ok(Some(Value::Bool(true)));
    }
    if text.eq_ignore_ascii_case("false") {
        return Ok(Some(Value::Bool(false)));
    }
    if text.eq_ignore_ascii_case("null") {
        return Ok(Some(Value::Null));
    }

    let out_of_range = |what: &str| Error::out_of_range(line, column, &format!("{} '{}'", what, text));

    if is_numeral(text) {
        let value = if text.contains('.') {
            let float: f64 = text.parse().map_err(|_| out_of_range("float"))?;
            if !float.is_finite() {
                return Err(out_of_range("float"));
            }
            Value::Float(float)
        } else {
            Value::Int(text.parse().map_err(|_| out_of_range("integer"))?)
        };
        return Ok(Some(value));
    }
    if matches_shape(text, "dddd-dd-dd") {
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| out_of_range("date"))?;
        return Ok(Some(Value::Date(date)));
    }
    if matches_shape(text, "dddd-dd-dd dd:dd:dd") {
        let stamp = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
            .map_err(|_| out_of_range("datetime"))?;
        return Ok(Some(Value::DateTime(stamp)));
    }
    if text.contains('.') && text.split('.').all(is_digits) {
        let version: Version = text.parse().map_err(|_| out_of_range("version"))?;
        return Ok(Some(Value::Version(version)));
    }

    Ok(None)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// `-?digits(.digits)?`
fn is_numeral(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let mut parts = unsigned.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    is_digits(whole) && parts.next().map_or(true, is_digits)
}

/// Matches `text` against a pattern where `d` is any ASCII digit and every other
/// byte must appear literally.
fn matches_shape(text: &str, pattern: &str) -> bool {
    text.len() == pattern.len()
        && text
            .bytes()
            .zip(pattern.bytes())
            .all(|(t, p)| if p == b'd' { t.is_ascii_digit() } else { t == p })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Option<Value> {
        classify_scalar(text, 1, 1).unwrap()
    }

    #[test]
    fn test_basic_rules() {
        assert_eq!(classify(""), Some(Value::Null));
        assert_eq!(classify("\"hi\""), Some(Value::from("hi")));
        assert_eq!(classify("TRUE"), Some(Value::Bool(true)));
        assert_eq!(classify("False"), Some(Value::Bool(false)));
        assert_eq!(classify("null"), Some(Value::Null));
        assert_eq!(classify("-42"), Some(Value::Int(-42)));
        assert_eq!(classify("3.25"), Some(Value::Float(3.25)));
    }

    #[test]
    fn test_strings_are_verbatim() {
        assert_eq!(classify(r#""a\nb""#), Some(Value::from(r"a\nb")));
        assert_eq!(classify(r#""say "hi"""#), Some(Value::from(r#"say "hi""#)));
        assert_eq!(classify("\"\""), Some(Value::from("")));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(classify("1.0"), Some(Value::Float(1.0)));
        assert_eq!(
            classify("1.0.0"),
            Some(Value::Version("1.0.0".parse().unwrap()))
        );
        assert_eq!(
            classify("2024-10-09"),
            Some(Value::Date(NaiveDate::from_ymd_opt(2024, 10, 9).unwrap()))
        );
        assert_eq!(classify("\"2024-10-09\""), Some(Value::from("2024-10-09")));
        assert_eq!(classify("\"true\""), Some(Value::from("true")));
    }

    #[test]
    fn test_datetime() {
        let expected = NaiveDate::from_ymd_opt(2024, 10, 9)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap();
        assert_eq!(
            classify("2024-10-09 12:30:05"),
            Some(Value::DateTime(expected))
        );
        assert_eq!(classify("2024-10-09  12:30:05"), None);
        assert_eq!(classify("2024-10-09T12:30:05"), None);
    }

    #[test]
    fn test_unmatched() {
        assert_eq!(classify("hello"), None);
        assert_eq!(classify("1.2.x"), None);
        assert_eq!(classify("--1"), None);
        assert_eq!(classify(".5"), None);
        assert_eq!(classify("5."), None);
        assert_eq!(classify("\""), None);
    }

    #[test]
    fn test_out_of_range() {
        let err = classify_scalar("99999999999999999999", 3, 9).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { line: 3, col: 9, .. }));
        assert!(classify_scalar("2024-13-40", 1, 1).is_err());
        assert!(classify_scalar("2024-02-30 10:00:00", 1, 1).is_err());
        assert!(classify_scalar("1.0.99999999999999999999", 1, 1).is_err());
    }

    #[test]
    fn test_shape_matching() {
        assert!(matches_shape("2024-10-09", "dddd-dd-dd"));
        assert!(!matches_shape("2024/10/09", "dddd-dd-dd"));
        assert!(!matches_shape("24-10-09", "dddd-dd-dd"));
    }
}
