//! The crate-wide [`HatchError`].
//!
//! Domain and application errors convert into it with `?`; callers only need
//! [`HatchError::category`] to pick an exit code and
//! [`HatchError::suggestions`] for the advice they print.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum HatchError {
    /// Malformed namespaces and generator declarations.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Loading, conformance checks and filesystem access during lookup.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A foreign error wrapped through [`Context`], or a broken invariant.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HatchError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => {
                vec![format!("Fix the setting and retry ({message})")]
            }
            Self::Internal { .. } => vec!["Re-run with -vv and include the log when reporting".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Coarse grouping used by front ends to choose exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Load,
    Configuration,
    Internal,
}

pub type HatchResult<T> = Result<T, HatchError>;

/// `.context("reading manifest")` on any std error, yielding
/// [`HatchError::Internal`].
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> HatchResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> HatchResult<T> {
        self.map_err(|e| HatchError::Internal {
            message: format!("{}: {e}", msg.into()),
        })
    }
}
