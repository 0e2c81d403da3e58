//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `HATCH__`-prefixed environment variables, `__` between keys
//!    (`HATCH__LOOKUP__PROJECT_MARKER=Build.toml`)
//! 3. `.hatch.toml` in the current directory
//! 4. The user config file, or the file given with `--config`
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use hatch_core::domain::LIBRARY_DIR;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Name of the per-directory config file written by `hatch init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".hatch.toml";

/// Default project marker searched upward from the working directory.
pub const DEFAULT_PROJECT_MARKER: &str = "Hatchfile.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where generators are looked up.
    pub lookup: LookupConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Built-in generator library; `--builtin-root` wins over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_root: Option<PathBuf>,
    /// File name marking the host project root.
    pub project_marker: String,
    /// Extra namespaces hidden from listings.
    pub hidden: Vec<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            builtin_root: None,
            project_marker: DEFAULT_PROJECT_MARKER.into(),
            hidden: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let builder = match config_file {
            Some(path) => Config::builder().add_source(File::from(path.as_path()).required(true)),
            None => Config::builder()
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(
                    File::new(LOCAL_CONFIG_FILE, FileFormat::Toml).required(false),
                ),
        };

        let config = builder
            .add_source(
                Environment::with_prefix("HATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("lookup.hidden")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration sources")?;

        config
            .try_deserialize()
            .context("configuration has an invalid shape")
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hatch.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "hatch", "hatch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Built-in generator root used when neither the flag nor the config
    /// names one: the first of [`Self::builtin_root_candidates`] holding a
    /// `lib` directory, else the user data directory.
    pub fn default_builtin_root() -> PathBuf {
        Self::builtin_root_candidates()
            .into_iter()
            .find(|root| root.join(LIBRARY_DIR).is_dir())
            .unwrap_or_else(Self::user_builtin_root)
    }

    /// Next to the executable, then a `share/` layout beside its `bin/`,
    /// then the user data directory, then the library this binary was
    /// built from.
    pub fn builtin_root_candidates() -> Vec<PathBuf> {
        let mut roots = Vec::new();
        if let Some(bin_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            roots.push(bin_dir.join("builtin"));
            roots.push(bin_dir.join("../share/hatch/builtin"));
        }
        roots.push(Self::user_builtin_root());
        roots.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("builtin"));
        roots
    }

    fn user_builtin_root() -> PathBuf {
        directories::ProjectDirs::from("com", "hatch", "hatch")
            .map(|d| d.data_dir().join("builtin"))
            .unwrap_or_else(|| PathBuf::from("builtin"))
    }

    /// The built-in root after applying the CLI override.
    pub fn builtin_root(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.lookup.builtin_root.clone())
            .unwrap_or_else(Self::default_builtin_root)
    }
}
