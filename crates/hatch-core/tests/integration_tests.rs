//! Integration tests for hatch-core, through the public API only.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hatch_core::prelude::*;

/// Loader over a fixed set of module paths.
#[derive(Default)]
struct TableLoader {
    modules: HashMap<PathBuf, Arc<dyn GeneratorFactory>>,
}

impl TableLoader {
    fn with(mut self, module_path: &str, factory: Arc<dyn GeneratorFactory>) -> Self {
        self.modules.insert(PathBuf::from(module_path), factory);
        self
    }
}

impl GeneratorLoader for TableLoader {
    fn load(&self, module_path: &Path) -> LoadOutcome {
        match self.modules.get(module_path) {
            Some(factory) => LoadOutcome::Found(LoadedModule::Factory(Arc::clone(factory))),
            None => LoadOutcome::NotFoundAtPath,
        }
    }

    fn find_index_files(&self, dir: &Path) -> HatchResult<Vec<PathBuf>> {
        Ok(self
            .modules
            .keys()
            .filter(|path| path.starts_with(dir))
            .map(|path| path.join("index.toml"))
            .collect())
    }

    fn canonicalize(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Writes its first argument into a shared journal, then runs `then`.
struct Journal {
    name: String,
    then: Option<&'static str>,
    journal: Arc<Mutex<Vec<String>>>,
    arguments: Vec<ArgumentSpec>,
    source_root: Option<PathBuf>,
}

impl Generator for Journal {
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
        format!("Usage: hatch generate {} NAME", self.name)
    }

    fn run(&mut self, _: &str, invocation: &Invocation, invoker: &dyn Invoker) -> HatchResult<()> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("{} {}", self.name, invocation.args.join(" ")));
        if let Some(next) = self.then {
            invoker.invoke(next, invocation.clone())?;
        }
        Ok(())
    }
}

fn journal_factory(
    journal: &Arc<Mutex<Vec<String>>>,
    then: Option<&'static str>,
) -> Arc<dyn GeneratorFactory> {
    let journal = Arc::clone(journal);
    Arc::new(move |context: GeneratorContext| -> HatchResult<Box<dyn Generator>> {
        Ok(Box::new(Journal {
            name: context.identity.name,
            then,
            journal: Arc::clone(&journal),
            arguments: vec![ArgumentSpec::required("name")],
            source_root: None,
        }))
    })
}

#[test]
fn test_full_dispatch_workflow() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let loader = TableLoader::default()
        .with(
            "/proj/lib/generators/hatch/resource",
            journal_factory(&journal, Some("model")),
        )
        .with("/builtin/lib/generators/hatch/model", journal_factory(&journal, None));

    let registry = Registry::new(Arc::new(loader), LookupRoots::new("/proj", "/builtin"));
    let dispatcher = Dispatcher::new(registry);

    let outcome = dispatcher
        .dispatch("resource", Invocation::new(vec!["Post".into()]))
        .unwrap();

    assert_eq!(
        outcome,
        DispatchOutcome::Ran {
            namespace: Namespace::parse("hatch:resource").unwrap()
        }
    );
    assert_eq!(
        *journal.lock().unwrap(),
        vec!["resource Post".to_string(), "model Post".to_string()]
    );
}

#[test]
fn test_listing_matches_dispatchable_generators() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let loader = TableLoader::default()
        .with("/builtin/lib/hatch/generators/hatch/app", journal_factory(&journal, None))
        .with("/builtin/lib/hatch/generators/hatch/model", journal_factory(&journal, None))
        .with("/proj/lib/hatch/generators/blog/post", journal_factory(&journal, None));

    let registry = Registry::new(Arc::new(loader), LookupRoots::new("/proj", "/builtin"));
    let listing = HelpAggregator::for_registry(&registry)
        .listing(&Invocation::default(), false)
        .unwrap();

    assert_eq!(
        listing.groups,
        vec![
            GeneratorGroup {
                name: "hatch".into(),
                namespaces: vec!["model".into()],
            },
            GeneratorGroup {
                name: "blog".into(),
                namespaces: vec!["blog:post".into()],
            },
        ]
    );

    let dispatcher = Dispatcher::new(registry);
    for namespace in ["model", "blog:post"] {
        let outcome = dispatcher
            .dispatch(namespace, Invocation::new(vec!["X".into()]))
            .unwrap();
        assert!(matches!(outcome, DispatchOutcome::Ran { .. }), "{namespace}");
    }
}

#[test]
fn test_malformed_request_is_a_validation_error() {
    let registry = Registry::new(
        Arc::new(TableLoader::default()),
        LookupRoots::new("/proj", "/builtin"),
    );
    let err = Dispatcher::new(registry)
        .dispatch("blog::post", Invocation::default())
        .unwrap_err();
    assert!(matches!(err, HatchError::Domain(_)));
}
