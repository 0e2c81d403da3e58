//! Wiring between the CLI and the core services.
//!
//! A [`Session`] resolves the host project, enters it, and builds the
//! registry over `(project root, built-in root)`.

use std::sync::Arc;

use tracing::debug;

use hatch_adapters::{GeneratorEnv, LocalFilesystem, LocalLoader};
use hatch_core::prelude::*;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    project::HostProject,
};

pub struct Session {
    pub project: HostProject,
    pub dispatcher: Dispatcher,
    pub aggregator: HelpAggregator,
}

impl Session {
    pub fn open(global: &GlobalArgs, config: &AppConfig) -> CliResult<Self> {
        let cwd = std::env::current_dir().with_cli_context(|| "reading the working directory")?;
        // Relative built-in roots are taken from where the user ran us, not
        // from the project root we are about to enter.
        let builtin = cwd.join(config.builtin_root(global.builtin_root.as_deref()));

        let project = HostProject::discover(&cwd, &config.lookup.project_marker).enter(&cwd);
        debug!(
            caller = %project.root.display(),
            builtin = %builtin.display(),
            "lookup roots"
        );

        let env = GeneratorEnv::new(Arc::new(LocalFilesystem::new()), project.root.clone());
        let registry = Registry::new(
            Arc::new(LocalLoader::new(env)),
            LookupRoots::new(project.root.clone(), builtin),
        );
        let aggregator =
            HelpAggregator::for_registry(&registry).hide(config.lookup.hidden.iter().cloned());

        Ok(Self {
            project,
            dispatcher: Dispatcher::new(registry),
            aggregator,
        })
    }

    /// An invocation carrying the project's configuration.
    pub fn invocation(&self, args: Vec<String>, options: GeneratorOptions) -> Invocation {
        Invocation::new(args)
            .with_options(options)
            .with_config(self.project.config.clone())
    }
}
