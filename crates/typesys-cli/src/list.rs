//! # List Subcommand

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::catalog::{Catalog, Entry};
use crate::output::Format;

/// Arguments for `typesys list`.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Include a one-line description of each function.
    #[arg(long)]
    pub describe: bool,
}

#[derive(Serialize)]
struct Listing<'a> {
    name: &'a str,
    signature: String,
    decorators: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a str>,
}

impl<'a> Listing<'a> {
    fn new(entry: &'a Entry, describe: bool) -> Self {
        Self {
            name: entry.name(),
            signature: format!("{}{}", entry.name(), entry.function.shape()),
            decorators: entry.function.layers(),
            summary: describe.then_some(entry.summary),
        }
    }
}

/// Render the catalog, one function per line (text) or as a JSON array.
pub fn render_list(args: &ListArgs, catalog: &Catalog, format: Format) -> Result<String> {
    let listings: Vec<Listing<'_>> = catalog
        .iter()
        .map(|entry| Listing::new(entry, args.describe))
        .collect();
    if format == Format::Json {
        return Ok(serde_json::to_string_pretty(&listings)?);
    }

    let width = listings.iter().map(|l| l.signature.len()).max().unwrap_or(0);
    let lines: Vec<String> = listings
        .iter()
        .map(|l| {
            let mut line = format!("{:<width$}  {}", l.signature, l.decorators.join(" > "));
            if let Some(summary) = l.summary {
                line.push_str("  # ");
                line.push_str(summary);
            }
            line
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Execute `typesys list`.
pub fn run_list(args: &ListArgs, catalog: &Catalog, format: Format) -> Result<u8> {
    println!("{}", render_list(args, catalog, format)?);
    Ok(0)
}
