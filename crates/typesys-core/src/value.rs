//! # Dynamic Values
//!
//! `Value` is the runtime representation of every argument and return value
//! that crosses a decorated function boundary. `ValueType` is its type tag,
//! and is what a `TypeSpec` stores.
//!
//! ## Serialization
//!
//! `Value` serializes untagged, so JSON `null`, booleans, integers, floats
//! and strings map one-to-one onto its variants. Arrays and objects do not
//! deserialize: nested values are outside the model.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::convert::float_text;

// ─── Value Type ──────────────────────────────────────────────────────

/// Runtime type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// The absent value.
    None,
    /// Boolean.
    Bool,
    /// Signed 64-bit integer.
    Int,
    /// Double-precision float.
    Float,
    /// UTF-8 string.
    Str,
}

impl ValueType {
    /// Returns all value types in declaration order.
    pub fn all() -> &'static [ValueType] {
        &[Self::None, Self::Bool, Self::Int, Self::Float, Self::Str]
    }

    /// Returns the lowercase name used in messages and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "null" | "nonetype" => Ok(Self::None),
            "bool" | "boolean" => Ok(Self::Bool),
            "int" | "integer" | "i64" => Ok(Self::Int),
            "float" | "f64" | "double" => Ok(Self::Float),
            "str" | "string" => Ok(Self::Str),
            other => Err(format!(
                "unknown type `{other}` (expected one of none, bool, int, float, str)"
            )),
        }
    }
}

// ─── Value ───────────────────────────────────────────────────────────

/// A dynamically-typed scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent value.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// UTF-8 string.
    Str(String),
}

impl Value {
    /// The runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::None => ValueType::None,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
            Self::Str(_) => ValueType::Str,
        }
    }

    /// Truthiness: `None`, `false`, zero and the empty string are false.
    pub fn truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this is the `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Renders the value in literal form: strings are quoted, everything else
/// prints as its textual conversion.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&float_text(*x)),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::None, Into::into)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
