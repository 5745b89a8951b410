//! # Call Subcommand
//!
//! Invokes a catalog function with arguments parsed from the command line.
//!
//! ```bash
//! typesys call add '"1"' --kw b=2        # 3 (int)
//! typesys call hint_add 1 '"2"'          # error: type mismatch ...
//! ```

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;

use typesys_wrap::{CallArguments, Value};

use crate::catalog::Catalog;
use crate::output::{self, Format};

/// Arguments for `typesys call`.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Catalog function name (see `typesys list`).
    pub name: String,

    /// Positional arguments as JSON literals; other tokens are strings.
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Keyword argument, `NAME=VALUE`. Repeatable.
    #[arg(long = "kw", value_name = "NAME=VALUE")]
    pub keywords: Vec<String>,
}

impl CallArgs {
    /// Build the call arguments.
    pub fn to_call_arguments(&self) -> Result<CallArguments> {
        let mut call = CallArguments::new();
        for token in &self.args {
            call = call.arg(parse_value(token)?);
        }
        for pair in &self.keywords {
            let (name, raw) = parse_keyword(pair)?;
            if call.keyword(name).is_some() {
                bail!("keyword `{name}` given more than once");
            }
            let value = parse_value(raw).with_context(|| format!("in keyword `{name}`"))?;
            call = call.kwarg(name, value);
        }
        Ok(call)
    }
}

/// Parse one command-line token as a scalar.
///
/// JSON `null`, booleans, numbers and strings map to the matching
/// [`Value`]. Anything that is not JSON is taken verbatim as a string.
/// JSON arrays and objects are rejected.
pub fn parse_value(token: &str) -> Result<Value> {
    let parsed = match serde_json::from_str::<serde_json::Value>(token) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(Value::Str(token.to_string())),
    };
    Ok(match parsed {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if n.is_u64() {
                bail!("integer `{token}` does not fit in 64 bits");
            } else {
                let x = n
                    .as_f64()
                    .ok_or_else(|| anyhow!("number `{token}` is not representable"))?;
                Value::Float(x)
            }
        }
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            bail!("`{token}`: only scalar values are supported")
        }
    })
}

fn parse_keyword(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, raw)) if !name.is_empty() => Ok((name, raw)),
        _ => bail!("keyword argument `{pair}` must look like NAME=VALUE"),
    }
}

/// Execute `typesys call`. Returns 1 when the function call fails.
pub fn run_call(args: &CallArgs, catalog: &Catalog, format: Format) -> Result<u8> {
    let entry = catalog
        .get(&args.name)
        .ok_or_else(|| anyhow!("unknown function `{}` (see `typesys list`)", args.name))?;
    let call = args.to_call_arguments()?;
    tracing::debug!(function = %args.name, arguments = call.len(), "calling");

    match entry.function.call(call) {
        Ok(value) => {
            println!("{}", output::render_value(&value, format)?);
            Ok(0)
        }
        Err(err) => {
            tracing::debug!(function = %args.name, kind = output::error_kind(&err), "call failed");
            output::emit_failure(&output::render_error(&err, format)?, format);
            Ok(1)
        }
    }
}
