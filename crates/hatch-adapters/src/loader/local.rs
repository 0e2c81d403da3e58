//! Filesystem-backed generator loader.
//!
//! A module path `<dir>/<name>` maps to the first file that exists of:
//!
//! ```text
//! <dir>/<name>/index.toml   ← directory generator (templates/ beside it)
//! <dir>/<name>.toml         ← flat generator
//! ```
//!
//! Neither existing is the only case reported as absent. A file that exists
//! but cannot be read or parsed is a load failure.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{instrument, trace, warn};
use walkdir::WalkDir;

use hatch_core::{
    application::{
        ApplicationError,
        ports::{GeneratorLoader, LoadOutcome, LoadedModule},
    },
    domain::{INDEX_FILE, MODULE_EXTENSION},
    error::HatchResult,
};

use crate::generators::{GeneratorEnv, ManifestFactory};
use crate::loader::manifest::Manifest;

/// Loads TOML generator manifests from disk.
#[derive(Debug, Clone)]
pub struct LocalLoader {
    env: GeneratorEnv,
}

impl LocalLoader {
    /// Generators built by this loader write through `env`.
    pub fn new(env: GeneratorEnv) -> Self {
        Self { env }
    }

    /// The manifest file backing `module_path`, if any.
    pub fn module_file(module_path: &Path) -> Option<PathBuf> {
        let index = module_path.join(INDEX_FILE);
        if index.is_file() {
            return Some(index);
        }

        let mut flat = OsString::from(module_path.as_os_str());
        flat.push(".");
        flat.push(MODULE_EXTENSION);
        let flat = PathBuf::from(flat);
        flat.is_file().then_some(flat)
    }

    fn load_file(&self, module_path: &Path, file: &Path) -> Result<LoadedModule, String> {
        match Manifest::read(file).map_err(|e| e.to_string())? {
            Manifest::Generator(section) => {
                let factory = ManifestFactory::new(module_path, section, self.env.clone())
                    .map_err(|e| e.to_string())?;
                Ok(LoadedModule::Factory(Arc::new(factory)))
            }
            Manifest::Inert { kind } => Ok(LoadedModule::Inert { kind }),
        }
    }
}

impl GeneratorLoader for LocalLoader {
    fn load(&self, module_path: &Path) -> LoadOutcome {
        let Some(file) = Self::module_file(module_path) else {
            return LoadOutcome::NotFoundAtPath;
        };
        trace!(file = %file.display(), "loading manifest");

        match self.load_file(module_path, &file) {
            Ok(module) => LoadOutcome::Found(module),
            Err(reason) => LoadOutcome::LoadFailed(reason),
        }
    }

    #[instrument(skip(self), fields(dir = %dir.display()))]
    fn find_index_files(&self, dir: &Path) -> HatchResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(ApplicationError::DiscoveryFailed {
                        path: dir.to_path_buf(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry during discovery");
                    continue;
                }
            };

            if entry.file_type().is_file() && entry.file_name() == INDEX_FILE {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
