//! Registry - ordered, first-match-wins generator lookup.
//!
//! Walks roots × candidates × conventions:
//!
//! ```text
//! for root in [caller, builtin]
//!   for candidate in query.candidates()
//!     for convention in SubfolderConvention::ALL
//!       load(root/lib/<convention>/<candidate as path>)
//! ```
//!
//! The first module that loads as a generator ends the walk. A module that
//! is absent is recorded and skipped; any other load failure aborts the
//! whole resolution.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{GeneratorFactory, GeneratorLoader, LoadOutcome, LoadedModule},
    },
    domain::{LookupQuery, LookupRoot, LookupRoots, Namespace, RootKind, SubfolderConvention},
    error::HatchResult,
};

/// A resolved generator.
#[derive(Clone)]
pub struct GeneratorDescriptor {
    pub factory: Arc<dyn GeneratorFactory>,
    /// Module path it was found at (no extension).
    pub path: PathBuf,
    /// Derived from `path` below the convention prefix; may differ from the
    /// namespace that was requested.
    pub namespace: Namespace,
    pub root: RootKind,
    pub convention: SubfolderConvention,
}

impl fmt::Debug for GeneratorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorDescriptor")
            .field("path", &self.path)
            .field("namespace", &self.namespace)
            .field("root", &self.root)
            .field("convention", &self.convention)
            .finish_non_exhaustive()
    }
}

/// Outcome of one top-level resolution plus every path it tried.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub descriptor: Option<GeneratorDescriptor>,
    pub attempted: Vec<PathBuf>,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        self.descriptor.is_some()
    }
}

/// Generator lookup over the caller and built-in roots.
#[derive(Clone)]
pub struct Registry {
    loader: Arc<dyn GeneratorLoader>,
    roots: LookupRoots,
}

impl Registry {
    pub fn new(loader: Arc<dyn GeneratorLoader>, roots: LookupRoots) -> Self {
        Self { loader, roots }
    }

    pub fn roots(&self) -> &LookupRoots {
        &self.roots
    }

    pub fn loader(&self) -> Arc<dyn GeneratorLoader> {
        Arc::clone(&self.loader)
    }

    /// Resolve a query against the caller root, then the built-in root.
    #[instrument(skip_all, fields(name = %query.name()))]
    pub fn find(&self, query: &LookupQuery) -> HatchResult<Resolution> {
        let candidates = query.candidates();
        let mut attempted = Vec::new();

        for root in self.roots.iter() {
            if let Some(descriptor) = self.lookup(&candidates, root, &mut attempted)? {
                return Ok(Resolution {
                    descriptor: Some(descriptor),
                    attempted,
                });
            }
        }

        debug!(attempted = attempted.len(), "no generator matched");
        Ok(Resolution {
            descriptor: None,
            attempted,
        })
    }

    /// Try `candidates` under one root, recording every path tried.
    pub fn lookup(
        &self,
        candidates: &[Namespace],
        root: &LookupRoot,
        attempted: &mut Vec<PathBuf>,
    ) -> HatchResult<Option<GeneratorDescriptor>> {
        for candidate in candidates {
            let relative = candidate.to_path();

            for convention in SubfolderConvention::ALL {
                let path = convention.dir(&root.path).join(&relative);
                trace!(path = %path.display(), "probing");
                attempted.push(path.clone());

                match self.loader.load(&path) {
                    LoadOutcome::NotFoundAtPath => continue,
                    LoadOutcome::LoadFailed(reason) => {
                        return Err(ApplicationError::LoadFailed { path, reason }.into());
                    }
                    LoadOutcome::Found(LoadedModule::Inert { kind }) => {
                        return Err(ApplicationError::NotAGenerator { path, kind }.into());
                    }
                    LoadOutcome::Found(LoadedModule::Factory(factory)) => {
                        let namespace = Namespace::from_relative_path(&relative)?;
                        debug!(
                            namespace = %namespace,
                            root = %root.kind,
                            convention = %convention,
                            path = %path.display(),
                            "generator resolved"
                        );
                        return Ok(Some(GeneratorDescriptor {
                            factory,
                            path,
                            namespace,
                            root: root.kind,
                            convention,
                        }));
                    }
                }
            }
        }
        Ok(None)
    }
}
