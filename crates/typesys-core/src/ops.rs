//! Arithmetic on dynamic values, for function bodies.
//!
//! `bool` takes part as `0`/`1`. Mixing `int` and `float` yields `float`.
//! `str + str` concatenates and `str * int` repeats. Any other pairing is a
//! [`CallError::UnsupportedOperand`].

use crate::error::CallError;
use crate::value::Value;

enum Num {
    Int(i64),
    Float(f64),
}

fn numeric(value: &Value) -> Option<Num> {
    match value {
        Value::Bool(b) => Some(Num::Int(i64::from(*b))),
        Value::Int(i) => Some(Num::Int(*i)),
        Value::Float(x) => Some(Num::Float(*x)),
        Value::None | Value::Str(_) => None,
    }
}

fn unsupported(op: &'static str, lhs: &Value, rhs: &Value) -> CallError {
    CallError::UnsupportedOperand {
        op,
        lhs: lhs.value_type(),
        rhs: rhs.value_type(),
    }
}

/// Longest string `str * int` may build, in bytes.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

fn repeat(text: &str, count: i64) -> Result<Value, CallError> {
    let count = usize::try_from(count).unwrap_or(0);
    match text.len().checked_mul(count) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::Str(text.repeat(count))),
        requested => Err(CallError::TooLarge {
            op: "*",
            len: requested,
            max: MAX_REPEAT_LEN,
        }),
    }
}

impl Value {
    /// `self + rhs`.
    pub fn try_add(&self, rhs: &Value) -> Result<Value, CallError> {
        if let (Value::Str(a), Value::Str(b)) = (self, rhs) {
            return Ok(Value::Str(format!("{a}{b}")));
        }
        match (numeric(self), numeric(rhs)) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => a
                .checked_add(b)
                .map(Value::Int)
                .ok_or(CallError::Overflow { op: "+" }),
            (Some(a), Some(b)) => Ok(Value::Float(a.as_f64() + b.as_f64())),
            _ => Err(unsupported("+", self, rhs)),
        }
    }

    /// `self * rhs`.
    pub fn try_mul(&self, rhs: &Value) -> Result<Value, CallError> {
        match (self, rhs) {
            (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
                return repeat(s, *n)
            }
            _ => {}
        }
        match (numeric(self), numeric(rhs)) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => a
                .checked_mul(b)
                .map(Value::Int)
                .ok_or(CallError::Overflow { op: "*" }),
            (Some(a), Some(b)) => Ok(Value::Float(a.as_f64() * b.as_f64())),
            _ => Err(unsupported("*", self, rhs)),
        }
    }

    /// Sum of `values`, starting from `0`.
    pub fn sum<'a>(values: impl IntoIterator<Item = &'a Value>) -> Result<Value, CallError> {
        values
            .into_iter()
            .try_fold(Value::Int(0), |acc, v| acc.try_add(v))
    }

    /// Product of `values`, starting from `1`.
    pub fn product<'a>(values: impl IntoIterator<Item = &'a Value>) -> Result<Value, CallError> {
        values
            .into_iter()
            .try_fold(Value::Int(1), |acc, v| acc.try_mul(v))
    }
}

impl Num {
    fn as_f64(&self) -> f64 {
        match self {
            Num::Int(i) => *i as f64,
            Num::Float(x) => *x,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
