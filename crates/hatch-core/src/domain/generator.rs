//! Values exchanged with generators: argument declarations, option flags,
//! the per-dispatch invocation bundle and the identity a generator is
//! constructed with.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::namespace::Namespace;

// ── ArgumentSpec ─────────────────────────────────────────────────────────────

/// One positional argument a generator declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ArgumentSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            required: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// ── GeneratorOptions ─────────────────────────────────────────────────────────

/// Option flags forwarded to a generator.
///
/// Only `help` is interpreted by the dispatcher; the rest pass through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub help: bool,
    pub pretend: bool,
    pub force: bool,
    pub skip: bool,
    pub quiet: bool,
    /// Free-form `KEY=VALUE` options.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

// ── Invocation ───────────────────────────────────────────────────────────────

/// Positional arguments, option flags and ambient configuration for one
/// dispatch. Handed unchanged to the generator's `run`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub options: GeneratorOptions,
    /// Host project configuration (`Null` when there is none).
    pub config: serde_json::Value,
}

impl Invocation {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            ..Self::default()
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }
}

// ── Identity / Context ───────────────────────────────────────────────────────

/// Canonical namespace and short name of a resolved generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorIdentity {
    pub namespace: Namespace,
    pub name: String,
}

impl GeneratorIdentity {
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }
}

/// Everything a factory receives to build one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorContext {
    pub identity: GeneratorIdentity,
    pub invocation: Invocation,
}
