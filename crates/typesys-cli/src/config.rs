//! # Policy Configuration
//!
//! Resolves the [`CoercionPolicy`] the catalog is built with. Layers, later
//! wins:
//!
//! 1. `CoercionPolicy::default()`
//! 2. `--config <file.yaml>`
//! 3. `TYPESYS_FLOAT_TO_INT` / `TYPESYS_BOOL_AS_INT`
//! 4. `--float-to-int` / `--bool-as-int[=BOOL]`
//!
//! ```yaml
//! float_to_int: exact
//! bool_as_int: true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use typesys_wrap::{CoercionPolicy, FloatToInt};

/// Policy flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// YAML file with `float_to_int` and `bool_as_int` keys.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Float to int mode: `truncate` or `exact`.
    #[arg(long, global = true, value_name = "MODE")]
    pub float_to_int: Option<FloatToInt>,

    /// Let a bool satisfy a declared int during validation. A bare flag
    /// means `true`; `--bool-as-int=false` turns it off over a config file.
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub bool_as_int: Option<bool>,
}

impl PolicyArgs {
    /// Resolve the effective policy.
    pub fn resolve(&self) -> Result<CoercionPolicy> {
        let base = match &self.config {
            Some(path) => load_policy(path)?,
            None => CoercionPolicy::default(),
        };
        let mut policy = base.with_environment();
        if let Some(mode) = self.float_to_int {
            policy.float_to_int = mode;
        }
        if let Some(flag) = self.bool_as_int {
            policy.bool_as_int = flag;
        }
        tracing::debug!(
            float_to_int = %policy.float_to_int,
            bool_as_int = policy.bool_as_int,
            "resolved coercion policy"
        );
        Ok(policy)
    }
}

/// Read a policy from a YAML file. Missing keys keep their defaults.
pub fn load_policy(path: &Path) -> Result<CoercionPolicy> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    if text.trim().is_empty() {
        return Ok(CoercionPolicy::default());
    }
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))
}
