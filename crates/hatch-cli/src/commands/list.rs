//! Implementation of the `hatch list` command.

use std::fmt::Write as _;

use hatch_core::error::Context as _;
use hatch_core::prelude::*;

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    session::Session,
};

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let session = Session::open(&global, &config)?;
    let invocation = session.invocation(Vec::new(), GeneratorOptions::default());
    let entries = if args.all {
        session.aggregator.discover(&invocation)?
    } else {
        session.aggregator.visible(&invocation)?
    };

    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            let listing = GeneratorListing::from_entries(&entries);
            output.emit(&render_groups(&listing, &output))?;
        }
        ListFormat::List => {
            for entry in &entries {
                output.emit(&format!("{}\n", entry.namespace))?;
            }
        }
        ListFormat::Json => {
            // Written straight to stdout so it stays parseable in pipes.
            let json = serde_json::to_string_pretty(&entries)
                .context("failed to serialise generator list")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Groups under capitalised headings, namespaces indented beneath.
pub fn render_groups(listing: &GeneratorListing, output: &OutputManager) -> String {
    if listing.is_empty() {
        return "No generators found.\n".into();
    }

    let mut out = String::new();
    for (i, group) in listing.groups.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", output.heading(&format!("{}:", group.heading())));
        for namespace in &group.namespaces {
            let _ = writeln!(out, "  {namespace}");
        }
    }
    out
}
