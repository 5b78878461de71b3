//! Record representation and parse-time scalar typing.
//!
//! A record is an unordered mapping from field name to a JSON value, produced
//! by parsing one input row. Field types are inferred at parse time only:
//! numeric-looking strings become numbers, everything else stays a string.

use serde_json::{Map, Number, Value};

/// One parsed input row: field name to scalar (or JSON-serializable) value.
pub type Record = Map<String, Value>;

/// Characters allowed in a numeric lexical form.
///
/// Restricting the alphabet before parsing keeps `f64` spellings such as
/// `inf`, `NaN`, and hexadecimal forms out of the numeric cast.
const NUMERIC_CHARS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '-', '.', 'e', 'E',
];

/// Casts a raw text field to its typed value.
///
/// Strings matching a numeric lexical form become numbers (integer where the
/// value fits, float otherwise). Boolean-looking strings (`"true"`/`"false"`)
/// deliberately stay strings: auto-casting them would be ambiguous with
/// legitimate string data. Everything else stays a string unchanged.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tabsync::models::infer_scalar;
///
/// assert_eq!(infer_scalar("42"), json!(42));
/// assert_eq!(infer_scalar("-1.5"), json!(-1.5));
/// assert_eq!(infer_scalar("true"), json!("true"));
/// assert_eq!(infer_scalar("hello"), json!("hello"));
/// ```
#[must_use]
pub fn infer_scalar(raw: &str) -> Value {
    if looks_numeric(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Number(Number::from(n));
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                if let Some(n) = Number::from_f64(f) {
                    return Value::Number(n);
                }
            }
        }
    }
    Value::String(raw.to_string())
}

/// Returns whether `raw` is a candidate numeric lexical form.
fn looks_numeric(raw: &str) -> bool {
    !raw.is_empty()
        && raw.chars().any(|c| c.is_ascii_digit())
        && raw.chars().all(|c| NUMERIC_CHARS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("0", json!(0); "zero")]
    #[test_case("42", json!(42); "integer")]
    #[test_case("-7", json!(-7); "negative integer")]
    #[test_case("007", json!(7); "leading zeros")]
    #[test_case("3.25", json!(3.25); "float")]
    #[test_case("-0.5", json!(-0.5); "negative float")]
    #[test_case("1e3", json!(1000.0); "exponent form")]
    fn test_numeric_forms_become_numbers(raw: &str, expected: Value) {
        assert_eq!(infer_scalar(raw), expected);
    }

    #[test_case("true"; "boolean true")]
    #[test_case("false"; "boolean false")]
    #[test_case("TRUE"; "uppercase boolean")]
    #[test_case(""; "empty string")]
    #[test_case("hello"; "plain text")]
    #[test_case("1.2.3"; "version string")]
    #[test_case("NaN"; "nan spelling")]
    #[test_case("inf"; "infinity spelling")]
    #[test_case("0x10"; "hex literal")]
    #[test_case("--"; "dashes only")]
    #[test_case("e"; "bare exponent")]
    fn test_non_numeric_forms_stay_strings(raw: &str) {
        assert_eq!(infer_scalar(raw), Value::String(raw.to_string()));
    }

    #[test]
    fn test_large_integer_falls_back_to_float() {
        // Past i64::MAX the value is still numeric, just not an integer.
        let value = infer_scalar("92233720368547758080");
        assert!(value.is_f64());
    }
}
