//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more: once for info, twice for debug, three times for trace.
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        long_help = "Log more detail to stderr.\n\
                     -v    dispatch start and finish, files written\n\
                     -vv   which root and convention matched\n\
                     -vvv  every candidate path tried"
    )]
    pub verbose: u8,

    /// Only print errors. Generators receive this as their `quiet` option.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Never emit ANSI colour (also set by any non-empty NO_COLOR).
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read settings from FILE instead of the user and local config files.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Built-in generator library, searched after the project.
    #[arg(long, global = true, env = "HATCH_BUILTIN_ROOT", value_name = "DIR")]
    pub builtin_root: Option<PathBuf>,

    /// How command output is rendered.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    Human,
    Plain,
    Json,
}
