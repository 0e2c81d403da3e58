//! Host project discovery.
//!
//! The nearest ancestor directory holding the project marker is the host
//! project. Its marker file is TOML and becomes the ambient configuration
//! handed to every generator.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument};

/// The project a generator run writes into.
#[derive(Debug, Clone, PartialEq)]
pub struct HostProject {
    /// Caller lookup root and generator destination.
    pub root: PathBuf,
    /// Marker file, when one was found.
    pub marker: Option<PathBuf>,
    /// Parsed marker contents; `Null` without a marker, empty on failure.
    pub config: serde_json::Value,
}

impl HostProject {
    /// Search upward from `cwd` for `marker_name`.
    ///
    /// A marker that cannot be read or parsed is logged and treated as an
    /// empty configuration; its directory is still the project root.
    #[instrument(skip_all, fields(cwd = %cwd.display(), marker = marker_name))]
    pub fn discover(cwd: &Path, marker_name: &str) -> Self {
        let Some(marker) = find_marker(cwd, marker_name) else {
            debug!("no project marker found, using working directory");
            return Self {
                root: cwd.to_path_buf(),
                marker: None,
                config: serde_json::Value::Null,
            };
        };

        let root = marker
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        let config = match read_marker(&marker) {
            Ok(config) => config,
            Err(reason) => {
                error!(path = %marker.display(), %reason, "could not load project file");
                serde_json::Value::Object(serde_json::Map::new())
            }
        };

        info!(root = %root.display(), "host project found");
        Self {
            root,
            marker: Some(marker),
            config,
        }
    }

    /// Make the project root the working directory. On failure the current
    /// directory is kept and becomes the root.
    pub fn enter(mut self, cwd: &Path) -> Self {
        if self.marker.is_none() || self.root == cwd {
            return self;
        }
        if let Err(e) = std::env::set_current_dir(&self.root) {
            error!(root = %self.root.display(), error = %e, "could not enter project root");
            self.root = cwd.to_path_buf();
        }
        self
    }
}

/// Nearest `marker_name` file in `start` or any of its ancestors.
pub fn find_marker(start: &Path, marker_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(marker_name))
        .find(|candidate| candidate.is_file())
}

fn read_marker(path: &Path) -> Result<serde_json::Value, String> {
    let source = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let table: toml::Table = toml::from_str(&source).map_err(|e| e.to_string())?;
    serde_json::to_value(table).map_err(|e| e.to_string())
}
