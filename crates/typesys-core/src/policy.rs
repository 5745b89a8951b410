//! # Coercion Policy
//!
//! The two knobs that govern lossy or permissive conversions. Everything
//! else about conversion is fixed by the `TryConvert` impls.
//!
//! A policy is resolved in layers: [`CoercionPolicy::default`], then an
//! optional config file (deserialized by the caller), then the environment
//! via [`CoercionPolicy::with_environment`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable selecting [`FloatToInt`] (`truncate` or `exact`).
pub const FLOAT_TO_INT_ENV: &str = "TYPESYS_FLOAT_TO_INT";

/// Environment variable enabling [`CoercionPolicy::bool_as_int`].
pub const BOOL_AS_INT_ENV: &str = "TYPESYS_BOOL_AS_INT";

/// How a float becomes an int.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatToInt {
    /// Drop the fractional part, rounding toward zero.
    #[default]
    Truncate,
    /// Only integral floats convert; `4.5` fails.
    Exact,
}

impl FloatToInt {
    /// The configuration spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Exact => "exact",
        }
    }
}

impl std::fmt::Display for FloatToInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FloatToInt {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truncate" | "trunc" => Ok(Self::Truncate),
            "exact" | "strict" => Ok(Self::Exact),
            other => Err(format!(
                "unknown float-to-int mode `{other}` (expected truncate or exact)"
            )),
        }
    }
}

/// Conversion and validation policy shared by all decorators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionPolicy {
    /// Float to int conversion mode.
    pub float_to_int: FloatToInt,
    /// Whether a `bool` satisfies a declared `int` during validation.
    pub bool_as_int: bool,
}

impl CoercionPolicy {
    /// The default policy with environment overrides applied.
    pub fn from_environment() -> Self {
        Self::default().with_environment()
    }

    /// Apply `TYPESYS_FLOAT_TO_INT` and `TYPESYS_BOOL_AS_INT` on top of `self`.
    ///
    /// Unrecognized values are logged and ignored.
    pub fn with_environment(self) -> Self {
        self.with_overrides(
            std::env::var(FLOAT_TO_INT_ENV).ok().as_deref(),
            std::env::var(BOOL_AS_INT_ENV).ok().as_deref(),
        )
    }

    /// Apply textual overrides on top of `self`. `None` leaves a knob as is.
    pub fn with_overrides(mut self, float_to_int: Option<&str>, bool_as_int: Option<&str>) -> Self {
        if let Some(raw) = float_to_int {
            match raw.parse() {
                Ok(mode) => self.float_to_int = mode,
                Err(reason) => tracing::warn!(var = FLOAT_TO_INT_ENV, %reason, "ignoring override"),
            }
        }
        if let Some(raw) = bool_as_int {
            match parse_flag(raw) {
                Some(flag) => self.bool_as_int = flag,
                None => tracing::warn!(var = BOOL_AS_INT_ENV, value = raw, "ignoring override"),
            }
        }
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
