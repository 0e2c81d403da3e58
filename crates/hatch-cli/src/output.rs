//! Terminal output for command results.
//!
//! Status lines (`success`, `warning`, `info`) respect `--quiet`;
//! `emit` is for output the user asked for, such as help or a listing, and is
//! always written.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format` from config. `auto` becomes
    /// human on a terminal and plain otherwise; only human output is coloured.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match (args.output_format, config.output.format) {
            (OutputFormat::Auto, OutputFormat::Auto) if io::stdout().is_terminal() => {
                OutputFormat::Human
            }
            (OutputFormat::Auto, OutputFormat::Auto) => OutputFormat::Plain,
            (OutputFormat::Auto, configured) => configured,
            (flag, _) => flag,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    pub fn emit(&self, text: &str) -> io::Result<()> {
        self.term.write_str(text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2713}', Style::new().green(), msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status('\u{26a0}', Style::new().yellow(), msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status('\u{2139}', Style::new().blue(), msg)
    }

    /// Group headings in generator listings.
    pub fn heading(&self, text: &str) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.style(Style::new().cyan().bold()).to_string()
        }
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn status(&self, symbol: char, style: Style, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", symbol.style(style.bold()), msg.style(style))
        };
        self.term.write_line(&line)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
