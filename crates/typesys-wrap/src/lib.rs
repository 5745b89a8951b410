#![deny(missing_docs)]

//! # typesys-wrap — Runtime Type Enforcement for Dynamic Functions
//!
//! Wraps a [`Function`] so that every call is coerced or checked against a
//! declared [`TypeSpec`] before and/or after the body runs.
//!
//! ## Decorators
//!
//! | Decorator | Side | Behaviour on a value of the wrong type |
//! |-----------|------|-----------------------------------------|
//! | [`ArgumentCoercer`] | arguments | converted; `ConversionError` if impossible |
//! | [`ArgumentValidator`] | arguments | `TypeMismatchError`, nothing converted |
//! | [`ReturnCoercer`] | return | first candidate that converts wins |
//! | [`ReturnValidator`] | return | converted to the one declared type |
//!
//! Each decorator validates its spec against the target's [`CallShape`] in
//! [`Decorator::decorate`] and returns a new `Function` that owns the
//! wrapped one. Decorated functions can be decorated again; the outermost
//! layer runs first.
//!
//! ```
//! use typesys_wrap::{
//!     ArgumentCoercer, CallArguments, CallShape, Function, Value, ValueType,
//! };
//!
//! let add = Function::new("add", CallShape::positional(["a", "b"]), |args| {
//!     let a = args.require("add", 0, "a")?;
//!     let b = args.bind("add", 1, "b")?.cloned().unwrap_or(Value::Int(0));
//!     a.try_add(&b)
//! })
//! .decorated(&ArgumentCoercer::new([ValueType::Int, ValueType::Int]))
//! .unwrap();
//!
//! let sum = add.call(CallArguments::from_positional(["1", "2"])).unwrap();
//! assert_eq!(sum, Value::Int(3));
//! ```
//!
//! ## Crate Policy
//!
//! - Wrappers hold no mutable state; a `Function` is `Send + Sync`.
//! - Argument-side failures happen before the body runs. Return-side
//!   failures happen after it ran and do not undo its effects.
//! - No `.unwrap()` outside tests and doc examples.

pub mod coerce;
pub mod decorator;
pub mod function;
pub mod returns;
pub mod validate;

pub use coerce::ArgumentCoercer;
pub use decorator::Decorator;
pub use function::{Callable, Function};
pub use returns::{ReturnCoercer, ReturnValidator};
pub use validate::ArgumentValidator;

// Re-export the core vocabulary so callers need one dependency.
pub use typesys_core::{
    CallArguments, CallError, CallShape, CoercionPolicy, ConversionError, ConversionFailure,
    FloatToInt, ParamRef, SpecError, Subject, TryConvert, TypeMismatchError, TypeSpec,
    TypesysError, Value, ValueType,
};
