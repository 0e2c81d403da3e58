//! Application layer errors.
//!
//! These errors represent failures in orchestration: loading generator
//! modules, walking lookup roots, touching the filesystem. Malformed
//! namespaces are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while resolving, listing or running generators.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A module exists at the tried path but could not be loaded.
    /// Fatal: resolution stops here instead of trying the next candidate.
    #[error("Failed to load generator at {path}: {reason}")]
    LoadFailed { path: PathBuf, reason: String },

    /// A module loaded fine but does not define a generator.
    #[error("Module at {path} is not a generator ({kind})")]
    NotAGenerator { path: PathBuf, kind: String },

    /// A manifest parsed as TOML but its `[generator]` table is unusable.
    #[error("Invalid generator manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    /// A generator's own work failed.
    #[error("Generator '{namespace}' failed: {reason}")]
    GeneratorFailed { namespace: String, reason: String },

    /// A generator's hooks led back to a generator that is still running.
    #[error("Hook cycle: {}", chain.join(" -> "))]
    HookCycle { chain: Vec<String> },

    /// Enumerating a lookup root failed.
    #[error("Failed to scan {path}: {reason}")]
    DiscoveryFailed { path: PathBuf, reason: String },

    /// Writing generator output failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory adapter state was poisoned by a panic.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LoadFailed { path, .. } => vec![
                format!("Fix or remove the generator at {}", path.display()),
                "Check the manifest syntax in index.toml or the flat .toml file".into(),
            ],
            Self::NotAGenerator { path, .. } => vec![
                format!("{} has no [generator] table", path.display()),
                "Add a [generator] table or move the file out of lib/generators".into(),
            ],
            Self::InvalidManifest { path, .. } => vec![
                format!("Check the [generator] table in {}", path.display()),
                "Each [[generator.arguments]] entry needs a name".into(),
            ],
            Self::GeneratorFailed { namespace, .. } => vec![
                format!("Run `hatch generate {namespace} --help` for usage"),
                "Re-run with -v for more detail".into(),
            ],
            Self::HookCycle { chain } => vec![format!(
                "Remove one of the hooks between {}",
                chain.join(", ")
            )],
            Self::DiscoveryFailed { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the directory is readable".into(),
            ],
            Self::FilesystemError { path, .. } => vec![format!(
                "Make sure {} is writable, or run with --pretend to preview",
                path.display()
            )],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LoadFailed { .. }
            | Self::NotAGenerator { .. }
            | Self::InvalidManifest { .. }
            | Self::HookCycle { .. } => {
                ErrorCategory::Load
            }
            Self::GeneratorFailed { .. } => ErrorCategory::Internal,
            Self::DiscoveryFailed { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
