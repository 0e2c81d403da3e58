//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hatch-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::input::Invoker;
use crate::domain::{ArgumentSpec, GeneratorContext, Invocation};
use crate::error::HatchResult;

// ── Loading ──────────────────────────────────────────────────────────────────

/// A successfully loaded module.
#[derive(Clone)]
pub enum LoadedModule {
    /// The module defines a generator.
    Factory(Arc<dyn GeneratorFactory>),
    /// The module loaded but defines something else (shared data, partials).
    Inert { kind: String },
}

impl fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Inert { kind } => f.debug_struct("Inert").field("kind", kind).finish(),
        }
    }
}

/// Result of probing one module path.
///
/// The loader itself tells "nothing here" apart from "something here is
/// broken"; callers never inspect error text to decide.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Found(LoadedModule),
    NotFoundAtPath,
    LoadFailed(String),
}

/// Port for locating and loading generator modules.
///
/// Implemented by:
/// - `hatch_adapters::loader::LocalLoader` (TOML manifests on disk)
/// - `hatch_adapters::loader::MemoryLoader` (testing, embedding)
///
/// A module path has no extension: the loader maps `<path>` to
/// `<path>/index.toml` first, then `<path>.toml`.
#[cfg_attr(test, mockall::automock)]
pub trait GeneratorLoader: Send + Sync {
    /// Load the module at exactly `module_path`.
    fn load(&self, module_path: &Path) -> LoadOutcome;

    /// Every index file below `dir`, recursively. A missing `dir` yields
    /// an empty list.
    fn find_index_files(&self, dir: &Path) -> HatchResult<Vec<PathBuf>>;

    /// Resolved form of `path`, used to recognise one file reached through
    /// two conventions.
    fn canonicalize(&self, path: &Path) -> PathBuf;
}

// ── Generators ───────────────────────────────────────────────────────────────

/// Builds generator instances. One factory per loaded module.
pub trait GeneratorFactory: Send + Sync {
    fn create(&self, context: GeneratorContext) -> HatchResult<Box<dyn Generator>>;
}

impl<F> GeneratorFactory for F
where
    F: Fn(GeneratorContext) -> HatchResult<Box<dyn Generator>> + Send + Sync,
{
    fn create(&self, context: GeneratorContext) -> HatchResult<Box<dyn Generator>> {
        self(context)
    }
}

/// The base generator capability every generator exposes.
pub trait Generator {
    /// Positional arguments, in order.
    fn arguments(&self) -> &[ArgumentSpec];

    /// Directory templates are read from, once set.
    fn source_root(&self) -> Option<&Path>;

    fn set_source_root(&mut self, root: PathBuf);

    /// Usage text shown for `--help` or a missing required argument.
    fn help(&self) -> String;

    /// Do the work. `namespace` is the namespace as originally requested.
    fn run(
        &mut self,
        namespace: &str,
        invocation: &Invocation,
        invoker: &dyn Invoker,
    ) -> HatchResult<()>;
}

// ── Filesystem ───────────────────────────────────────────────────────────────

/// Port for filesystem operations performed by generators.
///
/// Implemented by:
/// - `hatch_adapters::filesystem::LocalFilesystem` (production)
/// - `hatch_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HatchResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &[u8]) -> HatchResult<()>;

    /// Read a file's bytes.
    fn read_file(&self, path: &Path) -> HatchResult<Vec<u8>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Regular files below `dir`, relative to it, sorted. A missing `dir`
    /// yields an empty list.
    fn list_files(&self, dir: &Path) -> HatchResult<Vec<PathBuf>>;
}
