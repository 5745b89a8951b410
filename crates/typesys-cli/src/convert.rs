//! # Convert Subcommand
//!
//! Applies one conversion outside any decorator, under the resolved policy.

use anyhow::Result;
use clap::Args;

use typesys_wrap::{CoercionPolicy, ValueType};

use crate::call::parse_value;
use crate::output::{self, Format};

/// Arguments for `typesys convert`.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The value, as a JSON literal or bare string.
    #[arg(allow_negative_numbers = true)]
    pub value: String,

    /// Target type: none, bool, int, float or str.
    #[arg(long, value_name = "TYPE")]
    pub to: ValueType,
}

/// Execute `typesys convert`. Returns 1 when the conversion fails.
pub fn run_convert(args: &ConvertArgs, policy: &CoercionPolicy, format: Format) -> Result<u8> {
    let value = parse_value(&args.value)?;
    match args.to.convert(&value, policy) {
        Ok(converted) => {
            println!("{}", output::render_value(&converted, format)?);
            Ok(0)
        }
        Err(cause) => {
            let message = format!(
                "cannot convert {value} ({}) to {}: {cause}",
                value.value_type(),
                args.to
            );
            output::emit_failure(&output::render_failure("conversion", &message, format)?, format);
            Ok(1)
        }
    }
}
