//! HelpAggregator - discover every available generator and group them for
//! display.
//!
//! Discovery is best-effort: a module that fails to load or instantiate is
//! logged and left out, never fatal. Resolution through the [`Registry`]
//! stays strict.
//!
//! [`Registry`]: crate::application::Registry

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ports::{GeneratorLoader, LoadOutcome, LoadedModule},
        services::registry::Registry,
    },
    domain::{
        DEFAULT_NAMESPACE, DomainValidator, GeneratorContext, GeneratorIdentity, Invocation,
        LookupRoot, LookupRoots, Namespace, RootKind, SubfolderConvention,
    },
    error::HatchResult,
};

/// Namespaces left out of listings unless asked for. The default namespace's
/// `app` generator is what a bare `hatch` runs, so listing it adds nothing.
pub const HIDDEN_NAMESPACES: &[&str] = &["hatch:app"];

// ── Listing model ────────────────────────────────────────────────────────────

/// One discovered generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorEntry {
    pub namespace: Namespace,
    /// Module path (the index file's directory).
    pub module_path: PathBuf,
    pub index_file: PathBuf,
    /// Canonical form of `index_file`; the deduplication key.
    #[serde(skip)]
    pub canonical_path: PathBuf,
    pub root: RootKind,
    pub convention: SubfolderConvention,
}

/// Generators sharing a first namespace segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorGroup {
    pub name: String,
    /// Display names. The default group's entries have the prefix removed.
    pub namespaces: Vec<String>,
}

impl GeneratorGroup {
    /// Heading with the first letter capitalised: `hatch` becomes `Hatch`.
    pub fn heading(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Grouped listing, default group first, the rest alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratorListing {
    pub groups: Vec<GeneratorGroup>,
}

impl GeneratorListing {
    /// Group entries by first segment. Entries keep their incoming order
    /// inside each group.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a GeneratorEntry>) -> Self {
        let mut default = Vec::new();
        let mut others: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for entry in entries {
            let group = entry.namespace.first();
            if group == DEFAULT_NAMESPACE {
                default.push(entry.namespace.strip_group(DEFAULT_NAMESPACE));
            } else {
                others
                    .entry(group.to_string())
                    .or_default()
                    .push(entry.namespace.to_string());
            }
        }

        let mut groups = Vec::with_capacity(others.len() + 1);
        if !default.is_empty() {
            groups.push(GeneratorGroup {
                name: DEFAULT_NAMESPACE.to_string(),
                namespaces: default,
            });
        }
        groups.extend(
            others
                .into_iter()
                .map(|(name, namespaces)| GeneratorGroup { name, namespaces }),
        );
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.namespaces.len()).sum()
    }
}

// ── Aggregator ───────────────────────────────────────────────────────────────

/// Enumerates generators across the lookup roots.
pub struct HelpAggregator {
    loader: Arc<dyn GeneratorLoader>,
    roots: LookupRoots,
    hidden: BTreeSet<String>,
}

impl HelpAggregator {
    pub fn new(loader: Arc<dyn GeneratorLoader>, roots: LookupRoots) -> Self {
        Self {
            loader,
            roots,
            hidden: HIDDEN_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
        }
    }

    /// Aggregator over the same loader and roots as `registry`.
    pub fn for_registry(registry: &Registry) -> Self {
        Self::new(registry.loader(), registry.roots().clone())
    }

    /// Hide more namespaces on top of [`HIDDEN_NAMESPACES`].
    pub fn hide<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden.extend(namespaces.into_iter().map(Into::into));
        self
    }

    pub fn is_hidden(&self, namespace: &Namespace) -> bool {
        self.hidden.contains(&namespace.to_string())
    }

    /// Every conforming generator, sorted by namespace. One file reachable
    /// twice is listed once, and of two files claiming the same namespace
    /// only the one resolution would pick (caller root first, then
    /// convention order) is kept. Hidden namespaces are included.
    #[instrument(skip_all)]
    pub fn discover(&self, invocation: &Invocation) -> HatchResult<Vec<GeneratorEntry>> {
        let mut entries = Vec::new();

        for root in self.roots.iter() {
            for convention in SubfolderConvention::ALL {
                let prefix = convention.dir(&root.path);
                for index_file in self.loader.find_index_files(&prefix)? {
                    if let Some(entry) =
                        self.entry_for(root, convention, &prefix, &index_file, invocation)
                    {
                        entries.push(entry);
                    }
                }
            }
        }

        // Stable sort: equal namespaces stay in lookup order.
        entries.sort_by(|a, b| a.namespace.to_string().cmp(&b.namespace.to_string()));

        let mut seen_files = HashSet::new();
        let mut seen_namespaces = HashSet::new();
        entries.retain(|entry| {
            seen_files.insert(entry.canonical_path.clone())
                && seen_namespaces.insert(entry.namespace.clone())
        });

        debug!(count = entries.len(), "generators discovered");
        Ok(entries)
    }

    /// Discovered generators minus the hidden ones.
    pub fn visible(&self, invocation: &Invocation) -> HatchResult<Vec<GeneratorEntry>> {
        let mut entries = self.discover(invocation)?;
        entries.retain(|entry| !self.is_hidden(&entry.namespace));
        Ok(entries)
    }

    /// Grouped listing for display.
    pub fn listing(&self, invocation: &Invocation, include_hidden: bool) -> HatchResult<GeneratorListing> {
        let entries = if include_hidden {
            self.discover(invocation)?
        } else {
            self.visible(invocation)?
        };
        Ok(GeneratorListing::from_entries(&entries))
    }

    fn entry_for(
        &self,
        root: &LookupRoot,
        convention: SubfolderConvention,
        prefix: &Path,
        index_file: &Path,
        invocation: &Invocation,
    ) -> Option<GeneratorEntry> {
        let module_path = index_file.parent()?;
        let relative = module_path.strip_prefix(prefix).ok()?;

        let namespace = match Namespace::from_relative_path(relative) {
            Ok(namespace) => namespace,
            Err(e) => {
                debug!(path = %index_file.display(), error = %e, "skipping unnamed index file");
                return None;
            }
        };

        let factory = match self.loader.load(module_path) {
            LoadOutcome::Found(LoadedModule::Factory(factory)) => factory,
            LoadOutcome::Found(LoadedModule::Inert { kind }) => {
                debug!(namespace = %namespace, kind, "skipping non-generator module");
                return None;
            }
            LoadOutcome::NotFoundAtPath => {
                debug!(namespace = %namespace, "index file vanished during discovery");
                return None;
            }
            LoadOutcome::LoadFailed(reason) => {
                warn!(
                    path = %module_path.display(),
                    error = %reason,
                    "skipping generator due to load error"
                );
                return None;
            }
        };

        let identity = GeneratorIdentity::new(namespace.clone(), namespace.name());
        let instance = match factory.create(GeneratorContext {
            identity,
            invocation: invocation.clone(),
        }) {
            Ok(instance) => instance,
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "skipping generator that failed to instantiate");
                return None;
            }
        };

        if let Err(e) = DomainValidator::validate_conformance(&instance.help(), instance.arguments()) {
            debug!(namespace = %namespace, error = %e, "skipping non-conforming generator");
            return None;
        }

        Some(GeneratorEntry {
            canonical_path: self.loader.canonicalize(index_file),
            namespace,
            module_path: module_path.to_path_buf(),
            index_file: index_file.to_path_buf(),
            root: root.kind,
            convention,
        })
    }
}
