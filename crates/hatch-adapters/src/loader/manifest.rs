//! Generator manifest format.
//!
//! A generator module is a TOML file, either `<module>/index.toml` or the
//! flat `<module>.toml`. Only a `[generator]` table makes it a generator;
//! any other manifest is an inert module (shared data, partials).
//!
//! # Format
//!
//! ```toml
//! [generator]
//! description = "Create a model and its migration"
//! usage       = "hatch generate model NAME [FIELD:TYPE]..."   # optional
//! source_root = "skeleton"                                     # optional, relative
//! hooks       = ["hatch:migration"]                            # optional
//!
//! [[generator.arguments]]
//! name        = "name"
//! description = "Model name"
//! required    = true
//! ```
//!
//! Without `source_root` the dispatcher defaults it to `<module>/templates`.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use hatch_core::domain::ArgumentSpec;

/// Name of the table that marks a manifest as a generator.
pub const GENERATOR_TABLE: &str = "generator";

/// Why a manifest file could not be turned into a module.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid [generator] table in '{}': {source}", path.display())]
    Generator {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `[generator]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorSection {
    #[serde(default)]
    pub description: String,
    /// Replaces the generated usage line in help output.
    pub usage: Option<String>,
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    /// Template directory, relative to the module path.
    pub source_root: Option<PathBuf>,
    /// Namespaces invoked, in order, after the generator's own files are
    /// written.
    #[serde(default)]
    pub hooks: Vec<String>,
}

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Manifest {
    Generator(GeneratorSection),
    Inert { kind: String },
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    /// Parse manifest text; `path` is only used in error messages.
    pub fn parse(path: &Path, raw: &str) -> Result<Self, ManifestError> {
        let mut table: toml::Table = toml::from_str(raw).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match table.remove(GENERATOR_TABLE) {
            Some(value) => {
                let section: GeneratorSection =
                    value.try_into().map_err(|source| ManifestError::Generator {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Ok(Self::Generator(section))
            }
            None => Ok(Self::Inert {
                kind: describe_inert(&table),
            }),
        }
    }
}

fn describe_inert(table: &toml::Table) -> String {
    if table.is_empty() {
        return "empty manifest".into();
    }
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    format!("manifest with keys: {}", keys.join(", "))
}
