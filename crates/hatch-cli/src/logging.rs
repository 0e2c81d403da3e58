//! Tracing setup for the `hatch` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! gets installed. `-v` raises the level one step per occurrence starting
//! from `warn`, `--quiet` pins it to `error`, and `RUST_LOG` replaces the
//! computed filter entirely. With `--output-format json` events are written
//! as JSON lines so they can be piped next to JSON command output.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

const LEVELS: [&str; 4] = ["warn", "info", "debug", "trace"];

/// Installs the global subscriber. Fails if one is already registered.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level_for(args))));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if args.output_format == OutputFormat::Json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    installed.context("tracing subscriber already installed")
}

fn filter_directives(level: &str) -> String {
    ["hatch", "hatch_core", "hatch_adapters"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn level_for(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        "error"
    } else {
        LEVELS[usize::from(args.verbose).min(LEVELS.len() - 1)]
    }
}
