//! # TryConvert — The Conversion Capability
//!
//! Every coercion in typesys goes through [`TryConvert`]. Each supported
//! target has exactly one impl:
//!
//! | Rust type | `ValueType` |
//! |-----------|-------------|
//! | `()`      | `none`      |
//! | `bool`    | `bool`      |
//! | `i64`     | `int`       |
//! | `f64`     | `float`     |
//! | `String`  | `str`       |
//!
//! A `TypeSpec` holds runtime tags, not Rust types, so [`ValueType::convert`]
//! maps a tag back to its impl. [`ValueType::admits`] is the matching
//! check-only operation used by validation.
//!
//! ## Conversion Rules
//!
//! The rules are the constructor semantics of the dynamic language the
//! decorators were designed for: `int("12")` parses, `int(4.9)` truncates,
//! `str(4.0)` is `"4.0"`, `bool("False")` is true because the string is
//! non-empty.

use crate::error::ConversionFailure;
use crate::policy::{CoercionPolicy, FloatToInt};
use crate::value::{Value, ValueType};

/// Construct `Self` from a dynamic [`Value`].
pub trait TryConvert: Sized {
    /// The runtime tag of values this impl produces.
    const TYPE: ValueType;

    /// Convert `value`, or explain why it cannot be converted.
    fn try_convert(value: &Value, policy: &CoercionPolicy) -> Result<Self, ConversionFailure>;

    /// Wrap a converted value back into a [`Value`].
    fn into_value(self) -> Value;
}

impl TryConvert for i64 {
    const TYPE: ValueType = ValueType::Int;

    fn try_convert(value: &Value, policy: &CoercionPolicy) -> Result<Self, ConversionFailure> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(x) => float_to_int(*x, policy.float_to_int),
            Value::Str(s) => parse_int_literal(s),
            Value::None => Err(ConversionFailure::Unsupported {
                from: ValueType::None,
                to: ValueType::Int,
            }),
        }
    }

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl TryConvert for f64 {
    const TYPE: ValueType = ValueType::Float;

    fn try_convert(value: &Value, _policy: &CoercionPolicy) -> Result<Self, ConversionFailure> {
        match value {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as f64),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => parse_float_literal(s),
            Value::None => Err(ConversionFailure::Unsupported {
                from: ValueType::None,
                to: ValueType::Float,
            }),
        }
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl TryConvert for String {
    const TYPE: ValueType = ValueType::Str;

    fn try_convert(value: &Value, _policy: &CoercionPolicy) -> Result<Self, ConversionFailure> {
        Ok(match value {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => float_text(*x),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::None => "None".to_string(),
        })
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl TryConvert for bool {
    const TYPE: ValueType = ValueType::Bool;

    fn try_convert(value: &Value, _policy: &CoercionPolicy) -> Result<Self, ConversionFailure> {
        Ok(value.truthy())
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl TryConvert for () {
    const TYPE: ValueType = ValueType::None;

    fn try_convert(value: &Value, _policy: &CoercionPolicy) -> Result<Self, ConversionFailure> {
        match value {
            Value::None => Ok(()),
            other => Err(ConversionFailure::Unsupported {
                from: other.value_type(),
                to: ValueType::None,
            }),
        }
    }

    fn into_value(self) -> Value {
        Value::None
    }
}

impl ValueType {
    /// The tag of the Rust type `T`.
    pub fn of<T: TryConvert>() -> Self {
        T::TYPE
    }

    /// Convert `value` to this type via the matching [`TryConvert`] impl.
    pub fn convert(self, value: &Value, policy: &CoercionPolicy) -> Result<Value, ConversionFailure> {
        match self {
            Self::None => <()>::try_convert(value, policy).map(TryConvert::into_value),
            Self::Bool => bool::try_convert(value, policy).map(TryConvert::into_value),
            Self::Int => i64::try_convert(value, policy).map(TryConvert::into_value),
            Self::Float => f64::try_convert(value, policy).map(TryConvert::into_value),
            Self::Str => String::try_convert(value, policy).map(TryConvert::into_value),
        }
    }

    /// Whether `value` already is of this type. A `bool` also counts as an
    /// `int` when the policy says so; no other equivalences exist.
    pub fn admits(self, value: &Value, policy: &CoercionPolicy) -> bool {
        let actual = value.value_type();
        actual == self || (self == Self::Int && actual == Self::Bool && policy.bool_as_int)
    }
}

impl Value {
    /// Convert to the Rust type `T`.
    pub fn convert_to<T: TryConvert>(&self, policy: &CoercionPolicy) -> Result<T, ConversionFailure> {
        T::try_convert(self, policy)
    }
}

// ─── Literal Parsing ─────────────────────────────────────────────────

// i64 bounds as f64: MIN is exact, MAX rounds up to 2^63.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

fn float_to_int(x: f64, mode: FloatToInt) -> Result<i64, ConversionFailure> {
    if !x.is_finite() {
        return Err(ConversionFailure::NonFinite { value: x });
    }
    if mode == FloatToInt::Exact && x.fract() != 0.0 {
        return Err(ConversionFailure::Fractional { value: x });
    }
    let truncated = x.trunc();
    if !(I64_LOWER..I64_UPPER).contains(&truncated) {
        return Err(ConversionFailure::OutOfRange {
            target: ValueType::Int,
            value: float_text(x),
        });
    }
    Ok(truncated as i64)
}

/// Decimal integer literal: surrounding whitespace, an optional sign, and
/// digit groups separated by single underscores.
fn parse_int_literal(text: &str) -> Result<i64, ConversionFailure> {
    let invalid = || ConversionFailure::InvalidLiteral {
        target: ValueType::Int,
        literal: text.to_string(),
    };
    let trimmed = text.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let well_formed = !digits.is_empty()
        && digits
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(invalid());
    }
    let normalized: String = std::iter::once(sign)
        .chain(digits.split('_'))
        .collect();
    normalized
        .parse::<i64>()
        .map_err(|_| ConversionFailure::OutOfRange {
            target: ValueType::Int,
            value: trimmed.to_string(),
        })
}

fn parse_float_literal(text: &str) -> Result<f64, ConversionFailure> {
    let invalid = || ConversionFailure::InvalidLiteral {
        target: ValueType::Float,
        literal: text.to_string(),
    };
    let digits = strip_digit_separators(text.trim()).ok_or_else(invalid)?;
    digits.parse::<f64>().map_err(|_| invalid())
}

/// Remove `_` separators, each of which must sit between two digits.
fn strip_digit_separators(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(out)
}

/// Textual form of a float: shortest round-trip digits, `.0` on integral
/// values, exponent form (`1e+16`, `1.5e-05`) outside `[1e-4, 1e16)`.
pub fn float_text(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let raw = format!("{x:e}");
        return match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let exp: i32 = exponent.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exp.abs())
            }
            None => raw,
        };
    }
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CoercionPolicy {
        CoercionPolicy::default()
    }

    fn exact() -> CoercionPolicy {
        CoercionPolicy {
            float_to_int: FloatToInt::Exact,
            ..CoercionPolicy::default()
        }
    }

    // ── int ──────────────────────────────────────────────────────────

    #[test]
    fn int_from_string_literals() {
        assert_eq!(Value::from("1").convert_to::<i64>(&policy()), Ok(1));
        assert_eq!(Value::from("  -42\n").convert_to::<i64>(&policy()), Ok(-42));
        assert_eq!(Value::from("+7").convert_to::<i64>(&policy()), Ok(7));
        assert_eq!(Value::from("1_000").convert_to::<i64>(&policy()), Ok(1000));
        assert_eq!(Value::from("007").convert_to::<i64>(&policy()), Ok(7));
    }

    #[test]
    fn int_rejects_malformed_literals() {
        for bad in ["", " ", "abc", "4.5", "1__0", "_1", "1_", "+-1", "0x10", "- 1"] {
            let err = Value::from(bad).convert_to::<i64>(&policy()).unwrap_err();
            assert!(
                matches!(err, ConversionFailure::InvalidLiteral { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn int_literal_out_of_range() {
        let err = Value::from("99999999999999999999")
            .convert_to::<i64>(&policy())
            .unwrap_err();
        assert!(matches!(err, ConversionFailure::OutOfRange { .. }));
        assert_eq!(
            Value::from("-9223372036854775808").convert_to::<i64>(&policy()),
            Ok(i64::MIN)
        );
    }

    #[test]
    fn int_from_float_truncates_by_default() {
        assert_eq!(Value::Float(4.0).convert_to::<i64>(&policy()), Ok(4));
        assert_eq!(Value::Float(4.9).convert_to::<i64>(&policy()), Ok(4));
        assert_eq!(Value::Float(-4.9).convert_to::<i64>(&policy()), Ok(-4));
    }

    #[test]
    fn int_from_float_exact_rejects_fraction() {
        assert_eq!(Value::Float(4.0).convert_to::<i64>(&exact()), Ok(4));
        let err = Value::Float(4.5).convert_to::<i64>(&exact()).unwrap_err();
        assert!(matches!(err, ConversionFailure::Fractional { .. }));
    }

    #[test]
    fn int_from_non_finite_or_huge_float_fails() {
        assert!(matches!(
            Value::Float(f64::NAN).convert_to::<i64>(&policy()),
            Err(ConversionFailure::NonFinite { .. })
        ));
        assert!(matches!(
            Value::Float(f64::INFINITY).convert_to::<i64>(&policy()),
            Err(ConversionFailure::NonFinite { .. })
        ));
        assert!(matches!(
            Value::Float(1e19).convert_to::<i64>(&policy()),
            Err(ConversionFailure::OutOfRange { .. })
        ));
    }

    #[test]
    fn int_from_bool_and_none() {
        assert_eq!(Value::Bool(true).convert_to::<i64>(&policy()), Ok(1));
        assert_eq!(Value::Bool(false).convert_to::<i64>(&policy()), Ok(0));
        assert!(matches!(
            Value::None.convert_to::<i64>(&policy()),
            Err(ConversionFailure::Unsupported { .. })
        ));
    }

    // ── float ────────────────────────────────────────────────────────

    #[test]
    fn float_conversions() {
        assert_eq!(Value::Int(3).convert_to::<f64>(&policy()), Ok(3.0));
        assert_eq!(Value::from(" 2.5 ").convert_to::<f64>(&policy()), Ok(2.5));
        assert_eq!(Value::from("1e3").convert_to::<f64>(&policy()), Ok(1000.0));
        assert_eq!(Value::from("4").convert_to::<f64>(&policy()), Ok(4.0));
        assert_eq!(Value::Bool(true).convert_to::<f64>(&policy()), Ok(1.0));
        assert!(Value::from("inf")
            .convert_to::<f64>(&policy())
            .unwrap()
            .is_infinite());
        assert!(Value::from("abc").convert_to::<f64>(&policy()).is_err());
        assert!(Value::None.convert_to::<f64>(&policy()).is_err());
    }

    #[test]
    fn float_accepts_digit_separators() {
        assert_eq!(Value::from("1_000.5").convert_to::<f64>(&policy()), Ok(1000.5));
        assert_eq!(Value::from("1_0e1_0").convert_to::<f64>(&policy()), Ok(1e11));
        for bad in ["_1.5", "1_.5", "1._5", "1__0.0", "1.5_", "1_e3"] {
            assert!(
                matches!(
                    Value::from(bad).convert_to::<f64>(&policy()),
                    Err(ConversionFailure::InvalidLiteral { .. })
                ),
                "{bad}"
            );
        }
    }

    // ── str ──────────────────────────────────────────────────────────

    #[test]
    fn str_conversions() {
        assert_eq!(Value::Int(3).convert_to::<String>(&policy()).unwrap(), "3");
        assert_eq!(Value::Float(4.0).convert_to::<String>(&policy()).unwrap(), "4.0");
        assert_eq!(Value::Bool(true).convert_to::<String>(&policy()).unwrap(), "True");
        assert_eq!(Value::None.convert_to::<String>(&policy()).unwrap(), "None");
        assert_eq!(Value::from("x").convert_to::<String>(&policy()).unwrap(), "x");
    }

    #[test]
    fn float_text_forms() {
        assert_eq!(float_text(0.1), "0.1");
        assert_eq!(float_text(2.5), "2.5");
        assert_eq!(float_text(-3.0), "-3.0");
        assert_eq!(float_text(0.0), "0.0");
        assert_eq!(float_text(1e16), "1e+16");
        assert_eq!(float_text(1.5e-5), "1.5e-05");
        assert_eq!(float_text(123456789012345.0), "123456789012345.0");
        assert_eq!(float_text(f64::NAN), "nan");
        assert_eq!(float_text(f64::NEG_INFINITY), "-inf");
    }

    // ── bool / none ──────────────────────────────────────────────────

    #[test]
    fn bool_is_truthiness() {
        assert_eq!(Value::from("False").convert_to::<bool>(&policy()), Ok(true));
        assert_eq!(Value::from("").convert_to::<bool>(&policy()), Ok(false));
        assert_eq!(Value::Int(0).convert_to::<bool>(&policy()), Ok(false));
        assert_eq!(Value::None.convert_to::<bool>(&policy()), Ok(false));
    }

    #[test]
    fn none_only_from_none() {
        assert_eq!(Value::None.convert_to::<()>(&policy()), Ok(()));
        assert!(Value::Int(0).convert_to::<()>(&policy()).is_err());
    }

    // ── dispatch ─────────────────────────────────────────────────────

    #[test]
    fn value_type_dispatch_matches_impls() {
        let p = policy();
        assert_eq!(ValueType::Int.convert(&Value::from("2"), &p), Ok(Value::Int(2)));
        assert_eq!(ValueType::Float.convert(&Value::Int(2), &p), Ok(Value::Float(2.0)));
        assert_eq!(ValueType::Str.convert(&Value::Int(3), &p), Ok(Value::from("3")));
        assert_eq!(ValueType::Bool.convert(&Value::Int(3), &p), Ok(Value::Bool(true)));
        assert_eq!(ValueType::None.convert(&Value::None, &p), Ok(Value::None));
        assert_eq!(ValueType::of::<i64>(), ValueType::Int);
        assert_eq!(ValueType::of::<String>(), ValueType::Str);
    }

    #[test]
    fn admits_is_exact_except_bool_as_int() {
        let p = policy();
        assert!(ValueType::Int.admits(&Value::Int(1), &p));
        assert!(!ValueType::Float.admits(&Value::Int(1), &p));
        assert!(!ValueType::Int.admits(&Value::Bool(true), &p));

        let lenient = CoercionPolicy {
            bool_as_int: true,
            ..p
        };
        assert!(ValueType::Int.admits(&Value::Bool(true), &lenient));
        assert!(!ValueType::Bool.admits(&Value::Int(1), &lenient));
    }
}
