//! In-memory generator loader.
//!
//! Modules are registered against module paths directly; nothing touches
//! disk. Useful for embedding generators in a binary and for tests.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use hatch_core::{
    application::{
        ApplicationError,
        ports::{GeneratorFactory, GeneratorLoader, LoadOutcome, LoadedModule},
    },
    domain::INDEX_FILE,
    error::HatchResult,
};

use crate::generators::{GeneratorEnv, ManifestFactory};
use crate::loader::manifest::Manifest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    /// Listed by `find_index_files`.
    Directory,
    Flat,
}

#[derive(Clone)]
struct Entry {
    outcome: LoadOutcome,
    form: Form,
}

#[derive(Default)]
struct Inner {
    modules: BTreeMap<PathBuf, Entry>,
    aliases: BTreeMap<PathBuf, PathBuf>,
}

/// Thread-safe in-memory loader.
#[derive(Clone, Default)]
pub struct MemoryLoader {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryLoader {
    /// Create a new empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory-form generator at `module_path`.
    pub fn register(
        &self,
        module_path: impl Into<PathBuf>,
        factory: Arc<dyn GeneratorFactory>,
    ) -> HatchResult<()> {
        self.insert(
            module_path.into(),
            LoadOutcome::Found(LoadedModule::Factory(factory)),
            Form::Directory,
        )
    }

    /// Register a flat-form generator; flat modules are never listed.
    pub fn register_flat(
        &self,
        module_path: impl Into<PathBuf>,
        factory: Arc<dyn GeneratorFactory>,
    ) -> HatchResult<()> {
        self.insert(
            module_path.into(),
            LoadOutcome::Found(LoadedModule::Factory(factory)),
            Form::Flat,
        )
    }

    /// Parse `source` as a manifest and register the result.
    ///
    /// A manifest that fails to parse is registered as broken, mirroring a
    /// malformed file on disk.
    pub fn register_manifest(
        &self,
        module_path: impl Into<PathBuf>,
        source: &str,
        env: GeneratorEnv,
    ) -> HatchResult<()> {
        let module_path = module_path.into();
        let manifest_path = module_path.join(INDEX_FILE);
        let outcome = match Manifest::parse(&manifest_path, source) {
            Ok(Manifest::Generator(section)) => {
                match ManifestFactory::new(module_path.clone(), section, env) {
                    Ok(factory) => LoadOutcome::Found(LoadedModule::Factory(Arc::new(factory))),
                    Err(e) => LoadOutcome::LoadFailed(e.to_string()),
                }
            }
            Ok(Manifest::Inert { kind }) => LoadOutcome::Found(LoadedModule::Inert { kind }),
            Err(e) => LoadOutcome::LoadFailed(e.to_string()),
        };
        self.insert(module_path, outcome, Form::Directory)
    }

    /// Register a module that exists but fails to load.
    pub fn register_broken(&self, module_path: impl Into<PathBuf>, reason: &str) -> HatchResult<()> {
        self.insert(
            module_path.into(),
            LoadOutcome::LoadFailed(reason.to_string()),
            Form::Directory,
        )
    }

    /// Make `path` canonicalize to `target`, as a symlink would on disk.
    pub fn alias(&self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> HatchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.aliases.insert(path.into(), target.into());
        Ok(())
    }

    /// Get the number of registered modules.
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.modules.len()).unwrap_or(0)
    }

    /// Check if loader is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, module_path: PathBuf, outcome: LoadOutcome, form: Form) -> HatchResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        inner.modules.insert(module_path, Entry { outcome, form });
        Ok(())
    }
}

impl GeneratorLoader for MemoryLoader {
    fn load(&self, module_path: &Path) -> LoadOutcome {
        let Ok(inner) = self.inner.read() else {
            return LoadOutcome::LoadFailed("loader state lock poisoned".into());
        };
        inner
            .modules
            .get(module_path)
            .map(|entry| entry.outcome.clone())
            .unwrap_or(LoadOutcome::NotFoundAtPath)
    }

    fn find_index_files(&self, dir: &Path) -> HatchResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        Ok(inner
            .modules
            .iter()
            .filter(|(path, entry)| entry.form == Form::Directory && path.starts_with(dir))
            .map(|(path, _)| path.join(INDEX_FILE))
            .collect())
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.aliases.get(path).cloned())
            .unwrap_or_else(|| path.to_path_buf())
    }
}
