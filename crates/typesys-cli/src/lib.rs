//! # typesys-cli — Command-Line Harness
//!
//! Exposes the `typesys` binary: a thin layer over a built-in catalog of
//! decorated demonstration functions, for trying coercion and validation
//! rules from a shell.
//!
//! ## Subcommands
//!
//! - `typesys list` — Catalog functions with their call shape and decorators.
//! - `typesys call <NAME> [ARGS]... [--kw NAME=VALUE]...` — Invoke one.
//! - `typesys convert <VALUE> --to <TYPE>` — Apply a single conversion.
//!
//! ```bash
//! typesys call add '"1"' 2
//! typesys call hint_mult 2 3 4.5 --json
//! typesys convert 4.9 --to int --float-to-int exact
//! ```
//!
//! Values are JSON literals. A token that is not valid JSON is taken as a
//! string, so `typesys call add 1 x` passes the string `"x"`.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers return an
//!   exit code and never call `std::process::exit`.
//! - Decorator failures are command output (exit code 1). Bad invocations
//!   (unknown function, unreadable config) are `anyhow` errors.

pub mod call;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod list;
pub mod output;
