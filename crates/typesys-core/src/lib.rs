#![deny(missing_docs)]

//! # typesys-core — Foundational Types for typesys
//!
//! This crate defines the vocabulary shared by every typesys decorator:
//! the dynamically-typed [`Value`], its runtime type tag [`ValueType`],
//! the [`TryConvert`] capability that turns one into another, and the
//! error hierarchy every failure flows through.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value model.** `Value` has exactly five variants (`None`,
//!    `Bool`, `Int`, `Float`, `Str`). Every `match` on it is exhaustive, so a
//!    new scalar forces every conversion and operator to handle it.
//!
//! 2. **`TryConvert` is the only conversion path.** Decorators never convert
//!    by hand; they hold a `ValueType` and call [`ValueType::convert`], which
//!    dispatches to the `TryConvert` impl of the matching Rust type.
//!
//! 3. **Explicit call shapes.** A function's parameter layout is declared as
//!    a [`CallShape`] when it is decorated. Nothing is inferred at call time.
//!
//! 4. **Structured errors.** `ConversionError` and `TypeMismatchError` carry
//!    the parameter, the offending value's type and the expected type(s) as
//!    fields, not as preformatted strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `typesys-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod args;
pub mod convert;
pub mod error;
pub mod ops;
pub mod policy;
pub mod spec;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use args::{CallArguments, ParamRef};
pub use convert::{float_text, TryConvert};
pub use error::{
    CallError, ConversionError, ConversionFailure, SpecError, Subject, TypeMismatchError,
    TypesysError,
};
pub use policy::{CoercionPolicy, FloatToInt, BOOL_AS_INT_ENV, FLOAT_TO_INT_ENV};
pub use spec::{CallShape, TypeSpec};
pub use value::{Value, ValueType};
