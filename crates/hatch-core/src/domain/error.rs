use thiserror::Error;

use crate::error::ErrorCategory;

/// Rejections raised while parsing namespaces or checking a generator's
/// declaration. A declaration that fails conformance counts as a load
/// failure, not bad input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Namespace Errors
    // ========================================================================
    #[error("Namespace cannot be empty")]
    EmptyNamespace,

    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("Path '{path}' cannot be expressed as a namespace: {reason}")]
    InvalidNamespacePath { path: String, reason: String },

    // ========================================================================
    // Generator Declaration Errors
    // ========================================================================
    #[error("Generator does not conform to the generator interface: {reason}")]
    NonConformingGenerator { reason: String },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyNamespace => vec![
                "Pass a generator name, e.g. `hatch generate model`".into(),
                "Run `hatch generate` without a name to list generators".into(),
            ],
            Self::InvalidNamespace { namespace, reason } => vec![
                format!("'{}' is not a valid generator namespace: {}", namespace, reason),
                "Namespaces are colon-separated names, e.g. `widgets:card`".into(),
                "Segments cannot be empty or contain '/' or '\\'".into(),
            ],
            Self::InvalidNamespacePath { path, .. } => vec![
                format!("Rename the generator directory '{}'", path),
                "Every directory below lib/generators must be a plain name".into(),
            ],
            Self::NonConformingGenerator { .. } => vec![
                "The generator must render help text and name every argument".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyNamespace
            | Self::InvalidNamespace { .. }
            | Self::InvalidNamespacePath { .. } => ErrorCategory::Validation,
            Self::NonConformingGenerator { .. } => ErrorCategory::Load,
        }
    }
}
