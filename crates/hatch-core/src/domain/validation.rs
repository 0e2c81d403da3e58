use std::collections::HashSet;

use crate::domain::{error::DomainError, generator::ArgumentSpec};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    /// Structural conformance of a generator instance: it renders help and
    /// every declared argument has a unique, non-empty name.
    pub fn validate_conformance(help: &str, arguments: &[ArgumentSpec]) -> Result<(), DomainError> {
        if help.trim().is_empty() {
            return Err(DomainError::NonConformingGenerator {
                reason: "help text is empty".into(),
            });
        }

        let mut seen = HashSet::new();
        for argument in arguments {
            if argument.name.trim().is_empty() {
                return Err(DomainError::NonConformingGenerator {
                    reason: "argument declared without a name".into(),
                });
            }
            if !seen.insert(argument.name.as_str()) {
                return Err(DomainError::NonConformingGenerator {
                    reason: format!("argument '{}' declared twice", argument.name),
                });
            }
        }
        Ok(())
    }
}
