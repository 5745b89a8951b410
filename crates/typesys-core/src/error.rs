//! # Error Types — Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Conversion errors name the subject (argument or return value), the
//!   offending value, its runtime type and every target type attempted.
//! - Type mismatch errors name the function, the parameter, the actual type
//!   and the accepted type(s).
//! - Spec errors are raised at decoration time, never at call time.
//! - Call errors are raised by function bodies themselves.

use thiserror::Error;

use crate::args::ParamRef;
use crate::value::{Value, ValueType};

/// Top-level error type returned by every decorated call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypesysError {
    /// A coercing decorator could not build the target type.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// A validating decorator found an argument of the wrong type.
    #[error("type mismatch: {0}")]
    TypeMismatch(#[from] TypeMismatchError),

    /// A decorator was configured inconsistently with its target.
    #[error("invalid type spec: {0}")]
    Spec(#[from] SpecError),

    /// The wrapped function body failed.
    #[error("call failed: {0}")]
    Call(#[from] CallError),
}

// ─── Conversion ──────────────────────────────────────────────────────

/// What a conversion was applied to.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// An argument of the call.
    Argument(ParamRef),
    /// The value returned by the wrapped function.
    ReturnValue,
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argument(param) => write!(f, "{param}"),
            Self::ReturnValue => f.write_str("return value"),
        }
    }
}

/// A single failed `TryConvert` attempt.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionFailure {
    /// The string is not a literal of the target type.
    #[error("invalid literal for {target}: {literal:?}")]
    InvalidLiteral {
        /// Attempted target type.
        target: ValueType,
        /// The rejected text.
        literal: String,
    },

    /// The value does not fit the target's range.
    #[error("{value} is out of range for {target}")]
    OutOfRange {
        /// Attempted target type.
        target: ValueType,
        /// Textual form of the rejected value.
        value: String,
    },

    /// NaN or infinity cannot become an integer.
    #[error("cannot convert non-finite float {value} to int")]
    NonFinite {
        /// The rejected float.
        value: f64,
    },

    /// The float has a fractional part and the policy forbids truncation.
    #[error("float {value} is not integral and truncation is disabled")]
    Fractional {
        /// The rejected float.
        value: f64,
    },

    /// No conversion is defined between the two types.
    #[error("no conversion from {from} to {to}")]
    Unsupported {
        /// Source type.
        from: ValueType,
        /// Target type.
        to: ValueType,
    },
}

/// A coercing decorator could not construct any declared target type.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "`{function}`: cannot convert {subject} {value} ({actual}) to {wanted}: {reasons}",
    wanted = join_types(.targets, ", "),
    reasons = join_causes(.causes)
)]
pub struct ConversionError {
    /// Name of the decorated function.
    pub function: String,
    /// The argument or return value being converted.
    pub subject: Subject,
    /// The offending value, unchanged.
    pub value: Value,
    /// Runtime type of `value`.
    pub actual: ValueType,
    /// Every target type attempted, in order.
    pub targets: Vec<ValueType>,
    /// One failure per entry of `targets`.
    pub causes: Vec<ConversionFailure>,
}

impl ConversionError {
    /// Error for one argument that failed its single declared conversion.
    pub fn argument(
        function: impl Into<String>,
        param: ParamRef,
        value: Value,
        target: ValueType,
        cause: ConversionFailure,
    ) -> Self {
        Self {
            function: function.into(),
            subject: Subject::Argument(param),
            actual: value.value_type(),
            value,
            targets: vec![target],
            causes: vec![cause],
        }
    }

    /// Error for a return value that failed every candidate conversion.
    pub fn return_value(
        function: impl Into<String>,
        value: Value,
        targets: Vec<ValueType>,
        causes: Vec<ConversionFailure>,
    ) -> Self {
        Self {
            function: function.into(),
            subject: Subject::ReturnValue,
            actual: value.value_type(),
            value,
            targets,
            causes,
        }
    }
}

// ─── Validation ──────────────────────────────────────────────────────

/// A validating decorator found an argument whose runtime type is not
/// among the declared ones.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "`{function}`: {parameter} expected {accepted}, got {actual}",
    accepted = join_types(.expected, " or ")
)]
pub struct TypeMismatchError {
    /// Name of the decorated function.
    pub function: String,
    /// The offending parameter.
    pub parameter: ParamRef,
    /// Runtime type of the supplied argument.
    pub actual: ValueType,
    /// Types the parameter accepts.
    pub expected: Vec<ValueType>,
}

// ─── Decoration ──────────────────────────────────────────────────────

/// A decorator's type spec cannot be applied to its target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// The decorator needs at least one type.
    #[error("{decorator} on `{function}` requires at least one type")]
    Empty {
        /// Decorator kind.
        decorator: &'static str,
        /// Target function name.
        function: String,
    },

    /// A broadcasting shape was given more than one type.
    #[error("{decorator} on `{function}` broadcasts one type over {shape} arguments, got {count}")]
    Broadcast {
        /// Decorator kind.
        decorator: &'static str,
        /// Target function name.
        function: String,
        /// Call shape name.
        shape: &'static str,
        /// Number of declared types.
        count: usize,
    },

    /// More types than positional parameters.
    #[error("{decorator} declares {count} types but `{function}` has {params} positional parameters")]
    TooManyTypes {
        /// Decorator kind.
        decorator: &'static str,
        /// Target function name.
        function: String,
        /// Number of declared types.
        count: usize,
        /// Number of declared parameters.
        params: usize,
    },
}

// ─── Function Bodies ─────────────────────────────────────────────────

/// Errors raised by a function body after the wrapper delegated to it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// A required parameter was not supplied.
    #[error("`{function}` missing required argument `{name}`")]
    MissingArgument {
        /// Function name.
        function: String,
        /// Parameter name.
        name: String,
    },

    /// A parameter was supplied both positionally and by keyword.
    #[error("`{function}` got multiple values for argument `{name}`")]
    DuplicateArgument {
        /// Function name.
        function: String,
        /// Parameter name.
        name: String,
    },

    /// More positional arguments than parameters.
    #[error("`{function}` takes {max} positional arguments but {given} were given")]
    TooManyPositional {
        /// Function name.
        function: String,
        /// Declared positional parameters.
        max: usize,
        /// Supplied positional arguments.
        given: usize,
    },

    /// A keyword that names no parameter.
    #[error("`{function}` got an unexpected keyword argument `{name}`")]
    UnexpectedKeyword {
        /// Function name.
        function: String,
        /// The unknown keyword.
        name: String,
    },

    /// An operator is not defined for the operand types.
    #[error("unsupported operand types for {op}: {lhs} and {rhs}")]
    UnsupportedOperand {
        /// Operator symbol.
        op: &'static str,
        /// Left operand type.
        lhs: ValueType,
        /// Right operand type.
        rhs: ValueType,
    },

    /// Integer arithmetic overflowed.
    #[error("integer overflow in {op}")]
    Overflow {
        /// Operator symbol.
        op: &'static str,
    },

    /// An operation would build a value larger than allowed.
    #[error("result of {op} is too large ({}, limit {max} bytes)", describe_len(.len))]
    TooLarge {
        /// Operator symbol.
        op: &'static str,
        /// Requested length in bytes, `None` if it does not fit in `usize`.
        len: Option<usize>,
        /// Largest permitted length in bytes.
        max: usize,
    },

    /// Any other body failure.
    #[error("{0}")]
    Failed(String),
}

fn describe_len(len: &Option<usize>) -> String {
    match len {
        Some(len) => format!("{len} bytes"),
        None => "beyond addressable memory".to_string(),
    }
}

fn join_types(types: &[ValueType], sep: &str) -> String {
    types
        .iter()
        .map(ValueType::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}

fn join_causes(causes: &[ConversionFailure]) -> String {
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// ─── Tests ───────────────────────────────────────────────────────────
