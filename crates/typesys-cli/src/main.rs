//! # typesys CLI Entry Point
//!
//! Parses arguments, resolves the coercion policy, builds the catalog and
//! dispatches to a subcommand handler.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use typesys_cli::call::{run_call, CallArgs};
use typesys_cli::catalog::Catalog;
use typesys_cli::config::PolicyArgs;
use typesys_cli::convert::{run_convert, ConvertArgs};
use typesys_cli::list::{run_list, ListArgs};
use typesys_cli::output::Format;

/// Runtime type coercion and validation for dynamically-typed calls.
///
/// Calls decorated demonstration functions with JSON-literal arguments and
/// shows what the decorators make of them.
#[derive(Parser, Debug)]
#[command(name = "typesys", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    policy: PolicyArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog functions with their signatures and decorators.
    List(ListArgs),

    /// Call a catalog function.
    Call(CallArgs),

    /// Convert a single value to a type.
    Convert(ConvertArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let format = Format::from_json_flag(cli.json);
    let policy = cli.policy.resolve()?;

    match cli.command {
        Commands::List(args) => run_list(&args, &Catalog::standard(policy)?, format),
        Commands::Call(args) => run_call(&args, &Catalog::standard(policy)?, format),
        Commands::Convert(args) => run_convert(&args, &policy, format),
    }
}
