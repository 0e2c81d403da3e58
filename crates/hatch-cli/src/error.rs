//! Errors surfaced by the `hatch` binary.
//!
//! Every failure ends up as a [`CliError`], which knows its exit code, a few
//! lines of advice for the user, and how to print itself to stderr.

use std::error::Error;
use std::fmt::Write as _;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use hatch_core::error::HatchError;

pub use hatch_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// No generator matched under any root or convention.
    #[error("Could not find generator '{namespace}'")]
    GeneratorNotFound {
        namespace: String,
        attempted: Vec<PathBuf>,
    },

    /// A config file failed to read, parse or serialise.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// Raised by `hatch-core`, a loader, or the generator itself.
    #[error("Generation failed: {0}")]
    Core(#[from] HatchError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Lines printed under `help:`.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["See `hatch help` for accepted arguments".into()],

            Self::GeneratorNotFound { attempted, .. } => {
                let mut suggestions = vec!["Looked for it at:".to_string()];
                suggestions.extend(attempted.iter().map(|p| format!("  {}", p.display())));
                suggestions.push("List available generators: hatch list".into());
                suggestions.push("Point at another library with --builtin-root".into());
                suggestions
            }

            Self::ConfigError { .. } => vec![
                "Show the config file location: hatch config path".into(),
                "Create a default config: hatch init".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
                vec!["The current user cannot write there".into()]
            }
            Self::IoError { .. } => Vec::new(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::GeneratorNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Load => ErrorCategory::UserError,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// 2 for bad input or a broken generator, 3 when nothing matched,
    /// 4 for config problems, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render for stderr: the message, its causes when `verbose`, then
    /// suggestions.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = Paint(color);
        let mut out = String::new();

        let _ = writeln!(out, "\n{} {self}", paint.error("error:"));
        if verbose {
            for cause in self.causes() {
                let _ = writeln!(out, "  {} {cause}", paint.dim("caused by:"));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(out, "\n{}", paint.heading("help:"));
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(out, "\n{}", paint.dim("Run with -v for more detail."));
        }
        out
    }

    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(err) = source {
            causes.push(err.to_string());
            source = err.source();
        }
        causes
    }

    /// Emit one event at a level matching the category.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "command failed");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "command failed");
            }
        }
        for cause in self.causes() {
            tracing::debug!(%cause, "caused by");
        }
    }
}

struct Paint(bool);

impl Paint {
    fn error(&self, text: &str) -> String {
        if self.0 { text.red().bold().to_string() } else { text.to_string() }
    }

    fn heading(&self, text: &str) -> String {
        if self.0 { text.yellow().bold().to_string() } else { text.to_string() }
    }

    fn dim(&self, text: &str) -> String {
        if self.0 { text.dimmed().to_string() } else { text.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments, malformed namespaces, generators that fail to load.
    UserError,
    NotFound,
    Configuration,
    Internal,
}

/// `.with_cli_context(|| "...")` for results whose error is not a
/// [`CliError`] yet.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, HatchError> {
    /// Core errors already carry their own context; the message is dropped.
    fn with_cli_context<F, S>(self, _f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(CliError::Core)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use hatch_core::application::ApplicationError;
    use hatch_core::domain::DomainError;

    use super::*;

    fn not_found() -> CliError {
        CliError::GeneratorNotFound {
            namespace: "nonexistent".into(),
            attempted: vec![
                PathBuf::from("/p/lib/hatch/generators/hatch/nonexistent"),
                PathBuf::from("/b/lib/generators/nonexistent"),
            ],
        }
    }

    #[test]
    fn not_found_suggestions_list_every_attempted_path() {
        let suggestions = not_found().suggestions();
        assert!(suggestions.iter().any(|s| s.contains("/p/lib/hatch/generators/hatch/nonexistent")));
        assert!(suggestions.iter().any(|s| s.contains("/b/lib/generators/nonexistent")));
        assert!(suggestions.iter().any(|s| s.contains("hatch list")));
    }

    #[test]
    fn core_suggestions_pass_through() {
        let core = HatchError::from(ApplicationError::NotAGenerator {
            path: PathBuf::from("/b/lib/generators/shared"),
            kind: "palette".into(),
        });
        let err = CliError::Core(core.clone());
        assert_eq!(err.suggestions(), core.suggestions());
    }

    #[test]
    fn invalid_input_exits_two() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn not_found_exits_three() {
        assert_eq!(not_found().exit_code(), 3);
    }

    #[test]
    fn config_error_exits_four() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn io_error_exits_one() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn malformed_namespace_is_a_user_error() {
        let err = CliError::Core(HatchError::from(DomainError::InvalidNamespace {
            namespace: "a::b".into(),
            reason: "empty segment".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn broken_generator_is_a_user_error() {
        let err = CliError::Core(HatchError::from(ApplicationError::LoadFailed {
            path: PathBuf::from("/b/lib/generators/broken"),
            reason: "failed to parse".into(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn plain_render_has_message_and_suggestions() {
        let s = not_found().render(false, false);
        assert!(s.contains("error: Could not find generator 'nonexistent'"));
        assert!(s.contains("help:"));
        assert!(s.contains("-v"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_shows_causes() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.render(true, false);
        assert!(s.contains("caused by: disk full"));
        assert!(!s.contains("Run with -v"));
    }

    #[test]
    fn coloured_render_uses_ansi() {
        assert!(not_found().render(false, true).contains('\u{1b}'));
    }

    #[test]
    fn into_cli_io_error() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let cli = Err::<(), _>(denied).with_cli_context(|| "writing .hatch.toml");
        match cli {
            Err(err @ CliError::IoError { .. }) => {
                assert_eq!(err.to_string(), "I/O error: writing .hatch.toml");
                assert_eq!(err.suggestions().len(), 1);
            }
            other => panic!("expected IoError, got {other:?}"),
        }
    }

    #[test]
    fn into_cli_core_error() {
        let result: Result<(), HatchError> = Err(HatchError::Internal {
            message: "x".into(),
        });
        assert!(matches!(
            result.with_cli_context(|| "ignored"),
            Err(CliError::Core(_))
        ));
    }
}
