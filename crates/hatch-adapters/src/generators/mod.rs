//! Generator implementations backed by manifests.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use hatch_core::application::ports::Filesystem;

mod manifest;

pub use manifest::{ManifestFactory, ManifestGenerator};

/// Where generators write and through which filesystem.
#[derive(Clone)]
pub struct GeneratorEnv {
    pub filesystem: Arc<dyn Filesystem>,
    /// Destination root; usually the host project directory.
    pub destination: PathBuf,
}

impl GeneratorEnv {
    pub fn new(filesystem: Arc<dyn Filesystem>, destination: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            destination: destination.into(),
        }
    }
}

impl fmt::Debug for GeneratorEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorEnv")
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}
