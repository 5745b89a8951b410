//! # Output Rendering
//!
//! Text output is meant for people: `3 (int)`, `"3" (str)`. JSON output is
//! one object per result.

use anyhow::Result;
use serde::Serialize;

use typesys_wrap::{TypesysError, Value, ValueType};

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `3 (int)`, one result per line.
    #[default]
    Text,
    /// One JSON object per result.
    Json,
}

impl Format {
    /// `Json` when `--json` was given, `Text` otherwise.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Serialize)]
struct Success<'a> {
    value: &'a Value,
    #[serde(rename = "type")]
    ty: ValueType,
}

#[derive(Serialize)]
struct Failure<'a> {
    error: &'a str,
    message: String,
}

/// Render a successful result.
pub fn render_value(value: &Value, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => format!("{value} ({})", value.value_type()),
        Format::Json => serde_json::to_string(&Success {
            value,
            ty: value.value_type(),
        })?,
    })
}

/// Render a failure of the given kind.
pub fn render_failure(kind: &str, message: &str, format: Format) -> Result<String> {
    Ok(match format {
        Format::Text => format!("error: {message}"),
        Format::Json => serde_json::to_string(&Failure {
            error: kind,
            message: message.to_string(),
        })?,
    })
}

/// Render a decorator or body failure.
pub fn render_error(err: &TypesysError, format: Format) -> Result<String> {
    render_failure(error_kind(err), &err.to_string(), format)
}

/// Stable machine-readable name of an error's category.
pub fn error_kind(err: &TypesysError) -> &'static str {
    match err {
        TypesysError::Conversion(_) => "conversion",
        TypesysError::TypeMismatch(_) => "type_mismatch",
        TypesysError::Spec(_) => "spec",
        TypesysError::Call(_) => "call",
    }
}

/// Print a rendered failure: JSON goes to stdout with the other results,
/// text goes to stderr.
pub fn emit_failure(rendered: &str, format: Format) {
    match format {
        Format::Json => println!("{rendered}"),
        Format::Text => eprintln!("{rendered}"),
    }
}
