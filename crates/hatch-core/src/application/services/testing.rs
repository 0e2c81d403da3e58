//! In-crate test doubles shared by the service tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::ports::{
    Generator, GeneratorFactory, GeneratorLoader, Invoker, LoadOutcome, LoadedModule,
};
use crate::domain::{ArgumentSpec, GeneratorContext, INDEX_FILE, Invocation};
use crate::error::HatchResult;

/// Path-keyed loader. Anything not registered is absent.
#[derive(Default)]
pub(crate) struct FakeLoader {
    modules: HashMap<PathBuf, LoadOutcome>,
    index_files: Vec<PathBuf>,
    aliases: HashMap<PathBuf, PathBuf>,
}

impl FakeLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn generator(
        mut self,
        module_path: impl Into<PathBuf>,
        factory: Arc<dyn GeneratorFactory>,
    ) -> Self {
        self.modules.insert(
            module_path.into(),
            LoadOutcome::Found(LoadedModule::Factory(factory)),
        );
        self
    }

    /// Register a generator and the index file discovery will find for it.
    pub(crate) fn indexed(self, module_path: impl Into<PathBuf>, factory: Arc<dyn GeneratorFactory>) -> Self {
        let module_path = module_path.into();
        self.index(module_path.join(INDEX_FILE))
            .generator(module_path, factory)
    }

    pub(crate) fn index(mut self, index_file: impl Into<PathBuf>) -> Self {
        self.index_files.push(index_file.into());
        self
    }

    pub(crate) fn broken(mut self, module_path: impl Into<PathBuf>, reason: &str) -> Self {
        self.modules
            .insert(module_path.into(), LoadOutcome::LoadFailed(reason.to_string()));
        self
    }

    pub(crate) fn inert(mut self, module_path: impl Into<PathBuf>) -> Self {
        self.modules.insert(
            module_path.into(),
            LoadOutcome::Found(LoadedModule::Inert {
                kind: "data".into(),
            }),
        );
        self
    }

    /// Make `path` canonicalize to `target`, as a symlink would.
    pub(crate) fn alias(mut self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.aliases.insert(path.into(), target.into());
        self
    }
}

impl GeneratorLoader for FakeLoader {
    fn load(&self, module_path: &Path) -> LoadOutcome {
        self.modules
            .get(module_path)
            .cloned()
            .unwrap_or(LoadOutcome::NotFoundAtPath)
    }

    fn find_index_files(&self, dir: &Path) -> HatchResult<Vec<PathBuf>> {
        Ok(self
            .index_files
            .iter()
            .filter(|file| file.starts_with(dir))
            .cloned()
            .collect())
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        self.aliases
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_path_buf())
    }
}

// ── Generators ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub(crate) struct RunRecord {
    pub(crate) requested: String,
    pub(crate) args: Vec<String>,
    pub(crate) source_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RunLog(Arc<Mutex<Vec<RunRecord>>>);

impl RunLog {
    pub(crate) fn runs(&self) -> Vec<RunRecord> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, record: RunRecord) {
        self.0.lock().unwrap().push(record);
    }
}

/// Records each run and forwards to its hooks.
pub(crate) struct StubGenerator {
    name: String,
    arguments: Vec<ArgumentSpec>,
    source_root: Option<PathBuf>,
    hooks: Vec<String>,
    log: RunLog,
}

impl StubGenerator {
    pub(crate) fn factory(arguments: Vec<ArgumentSpec>) -> (Arc<dyn GeneratorFactory>, RunLog) {
        Self::build(arguments, Vec::new(), None)
    }

    pub(crate) fn with_hooks(hooks: Vec<String>) -> (Arc<dyn GeneratorFactory>, RunLog) {
        Self::build(Vec::new(), hooks, None)
    }

    pub(crate) fn with_source_root(root: &str) -> (Arc<dyn GeneratorFactory>, RunLog) {
        Self::build(Vec::new(), Vec::new(), Some(PathBuf::from(root)))
    }

    fn build(
        arguments: Vec<ArgumentSpec>,
        hooks: Vec<String>,
        source_root: Option<PathBuf>,
    ) -> (Arc<dyn GeneratorFactory>, RunLog) {
        let log = RunLog::default();
        let shared = log.clone();
        let factory: Arc<dyn GeneratorFactory> = Arc::new(move |context: GeneratorContext| -> HatchResult<Box<dyn Generator>> {
            Ok(Box::new(StubGenerator {
                name: context.identity.name,
                arguments: arguments.clone(),
                source_root: source_root.clone(),
                hooks: hooks.clone(),
                log: shared.clone(),
            }))
        });
        (factory, log)
    }
}

impl Generator for StubGenerator {
    fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    fn source_root(&self) -> Option<&Path> {
        self.source_root.as_deref()
    }

    fn set_source_root(&mut self, root: PathBuf) {
        self.source_root = Some(root);
    }

    fn help(&self) -> String {
        let names: Vec<_> = self.arguments.iter().map(|a| a.name.as_str()).collect();
        format!("Usage: hatch generate {} {}", self.name, names.join(" "))
    }

    fn run(&mut self, namespace: &str, invocation: &Invocation, invoker: &dyn Invoker) -> HatchResult<()> {
        self.log.push(RunRecord {
            requested: namespace.to_string(),
            args: invocation.args.clone(),
            source_root: self.source_root.clone(),
        });
        for hook in &self.hooks {
            invoker.invoke(hook, invocation.clone())?;
        }
        Ok(())
    }
}

/// Factory whose instances take no arguments.
pub(crate) fn stub_factory() -> Arc<dyn GeneratorFactory> {
    StubGenerator::factory(Vec::new()).0
}

/// Factory whose instances fail conformance (empty help text).
pub(crate) fn silent_factory() -> Arc<dyn GeneratorFactory> {
    struct Silent;
    impl Generator for Silent {
        fn arguments(&self) -> &[ArgumentSpec] {
            &[]
        }
        fn source_root(&self) -> Option<&Path> {
            None
        }
        fn set_source_root(&mut self, _: PathBuf) {}
        fn help(&self) -> String {
            String::new()
        }
        fn run(&mut self, _: &str, _: &Invocation, _: &dyn Invoker) -> HatchResult<()> {
            Ok(())
        }
    }
    Arc::new(|_: GeneratorContext| -> HatchResult<Box<dyn Generator>> { Ok(Box::new(Silent)) })
}
