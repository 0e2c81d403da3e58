//! Dispatcher - resolve a requested namespace and run the generator.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DispatchOutcome, Invoker},
        services::registry::{Registry, Resolution},
    },
    domain::{GeneratorContext, GeneratorIdentity, Invocation, LookupQuery, Namespace},
    error::HatchResult,
};

/// Directory below a generator's module path that holds its templates
/// unless the generator sets its own source root.
pub const TEMPLATES_DIR: &str = "templates";

/// Resolves and runs generators.
///
/// Also the [`Invoker`] handed to running generators, so nested requests
/// follow the same lookup rules as top-level ones. A generator that is
/// already running cannot be entered again through its own hooks.
pub struct Dispatcher {
    registry: Registry,
    /// Module path and namespace of every generator mid-run, outermost first.
    running: Mutex<Vec<(PathBuf, Namespace)>>,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            running: Mutex::new(Vec::new()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `requested`, retrying under the default namespace when the
    /// request carried no base of its own.
    pub fn resolve(&self, requested: &str) -> HatchResult<Resolution> {
        let query = LookupQuery::from_requested(requested)?;
        let first = self.registry.find(&query)?;
        if first.is_found() || query.has_base() {
            return Ok(first);
        }

        let fallback = query.with_default_base();
        debug!(requested, "retrying under the default namespace");
        let second = self.registry.find(&fallback)?;

        let mut attempted = first.attempted;
        attempted.extend(second.attempted);
        Ok(Resolution {
            descriptor: second.descriptor,
            attempted,
        })
    }

    /// Resolve, instantiate and run one generator.
    #[instrument(skip(self, invocation), fields(args = invocation.args.len()))]
    pub fn dispatch(&self, requested: &str, invocation: Invocation) -> HatchResult<DispatchOutcome> {
        let Resolution {
            descriptor,
            attempted,
        } = self.resolve(requested)?;

        let Some(descriptor) = descriptor else {
            warn!(requested, attempted = attempted.len(), "generator not found");
            return Ok(DispatchOutcome::NotFound {
                requested: requested.to_string(),
                attempted,
            });
        };

        let identity = GeneratorIdentity::new(
            descriptor.namespace.clone(),
            descriptor.namespace.name(),
        );
        let mut generator = descriptor.factory.create(GeneratorContext {
            identity,
            invocation: invocation.clone(),
        })?;

        if generator.source_root().is_none() {
            generator.set_source_root(default_source_root(&descriptor.path));
        }

        let missing_required =
            invocation.args.is_empty() && generator.arguments().iter().any(|arg| arg.required);
        if missing_required || invocation.options.help {
            debug!(namespace = %descriptor.namespace, missing_required, "showing help");
            return Ok(DispatchOutcome::HelpShown {
                namespace: descriptor.namespace,
                help: generator.help(),
            });
        }

        let _running = self.enter(&descriptor.path, &descriptor.namespace)?;
        info!(namespace = %descriptor.namespace, path = %descriptor.path.display(), "running generator");
        generator.run(requested, &invocation, self)?;

        Ok(DispatchOutcome::Ran {
            namespace: descriptor.namespace,
        })
    }

    fn enter(&self, module_path: &Path, namespace: &Namespace) -> HatchResult<Running<'_>> {
        let mut running = self
            .running
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        if running.iter().any(|(path, _)| path == module_path) {
            let chain = running
                .iter()
                .map(|(_, active)| active)
                .chain(std::iter::once(namespace))
                .map(ToString::to_string)
                .collect();
            return Err(ApplicationError::HookCycle { chain }.into());
        }
        running.push((module_path.to_path_buf(), namespace.clone()));
        Ok(Running {
            stack: &self.running,
        })
    }
}

/// Pops its generator off the running stack when the run ends, however it
/// ends.
struct Running<'a> {
    stack: &'a Mutex<Vec<(PathBuf, Namespace)>>,
}

impl Drop for Running<'_> {
    fn drop(&mut self) {
        if let Ok(mut stack) = self.stack.lock() {
            stack.pop();
        }
    }
}

impl Invoker for Dispatcher {
    fn invoke(&self, namespace: &str, invocation: Invocation) -> HatchResult<DispatchOutcome> {
        self.dispatch(namespace, invocation)
    }
}

fn default_source_root(module_path: &Path) -> PathBuf {
    module_path.join(TEMPLATES_DIR)
}
