//! Argument surface of the `hatch` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name    = "hatch",
    bin_name = "hatch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Namespace-resolved project generators",
    long_about = "Hatch finds generators by namespace in the current project \
                  and in a built-in library, then runs them.",
    after_help = "EXAMPLES:\n\
        \x20 hatch generate model User\n\
        \x20 hatch generate scaffold:view Post --pretend\n\
        \x20 hatch list --all\n\
        \x20 hatch completions bash > /usr/share/bash-completion/completions/hatch",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a generator by namespace.
    #[command(
        visible_alias = "g",
        disable_help_flag = true,
        after_help = "EXAMPLES:\n\
            \x20 hatch generate                 # list generators\n\
            \x20 hatch generate model --help    # generator usage\n\
            \x20 hatch generate model User -p   # pretend run"
    )]
    Generate(GenerateArgs),

    /// List available generators.
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n\
            \x20 hatch list\n\
            \x20 hatch list --all\n\
            \x20 hatch list --format json"
    )]
    List(ListArgs),

    /// Write a default configuration file.
    #[command(
        after_help = "EXAMPLES:\n\
            \x20 hatch init           # user config directory\n\
            \x20 hatch init --local   # .hatch.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        after_help = "EXAMPLES:\n\
            \x20 hatch completions bash > ~/.local/share/bash-completion/completions/hatch\n\
            \x20 hatch completions zsh  > ~/.zfunc/_hatch\n\
            \x20 hatch completions fish > ~/.config/fish/completions/hatch.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 hatch config get lookup.project_marker\n\
            \x20 hatch config list\n\
            \x20 hatch config path"
    )]
    Config(ConfigCommands),
}

/// Arguments for `hatch generate`.
///
/// `-h/--help` belongs to the generator here, not to clap: it asks the
/// resolved generator for its own usage text.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Generator namespace, e.g. `model` or `scaffold:view`.
    #[arg(value_name = "GENERATOR")]
    pub namespace: Option<String>,

    /// Positional arguments handed to the generator.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Print the generator's options and usage.
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Run but do not make any changes.
    #[arg(short = 'p', long = "pretend")]
    pub pretend: bool,

    /// Overwrite files that already exist.
    #[arg(short = 'f', long = "force", conflicts_with = "skip")]
    pub force: bool,

    /// Skip files that already exist.
    #[arg(short = 's', long = "skip")]
    pub skip: bool,

    /// Extra generator option, repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include hidden namespaces such as `hatch:app`.
    #[arg(long)]
    pub all: bool,

    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Grouped under capitalised headings.
    Table,
    /// One fully-qualified namespace per line.
    List,
    /// JSON array of discovered generators.
    Json,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write `.hatch.toml` in the current directory instead.
    #[arg(long)]
    pub local: bool,

    /// Replace a config file that already exists.
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `lookup.project_marker`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}
