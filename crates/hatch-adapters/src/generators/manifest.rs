//! Declarative generator: copy a template tree, then run hooks.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use hatch_core::{
    application::{
        ApplicationError,
        ports::{DispatchOutcome, Generator, GeneratorFactory, Invoker},
    },
    domain::{ArgumentSpec, GeneratorContext, GeneratorIdentity, Invocation, Namespace},
    error::HatchResult,
};

use crate::generators::GeneratorEnv;
use crate::loader::GeneratorSection;

// ── Factory ──────────────────────────────────────────────────────────────────

/// Builds [`ManifestGenerator`]s from one parsed `[generator]` table.
#[derive(Debug, Clone)]
pub struct ManifestFactory {
    module_path: PathBuf,
    section: GeneratorSection,
    env: GeneratorEnv,
}

impl ManifestFactory {
    /// Validate the table's hook namespaces up front so a typo surfaces as a
    /// load failure rather than halfway through a run.
    pub fn new(
        module_path: impl Into<PathBuf>,
        section: GeneratorSection,
        env: GeneratorEnv,
    ) -> HatchResult<Self> {
        let module_path = module_path.into();
        for hook in &section.hooks {
            Namespace::parse(hook).map_err(|e| ApplicationError::InvalidManifest {
                path: module_path.clone(),
                reason: format!("hook '{hook}': {e}"),
            })?;
        }
        Ok(Self {
            module_path,
            section,
            env,
        })
    }

    pub fn module_path(&self) -> &Path {
        &self.module_path
    }
}

impl GeneratorFactory for ManifestFactory {
    fn create(&self, context: GeneratorContext) -> HatchResult<Box<dyn Generator>> {
        Ok(Box::new(ManifestGenerator {
            identity: context.identity,
            description: self.section.description.clone(),
            usage: self.section.usage.clone(),
            arguments: self.section.arguments.clone(),
            source_root: self
                .section
                .source_root
                .as_ref()
                .map(|root| self.module_path.join(root)),
            hooks: self.section.hooks.clone(),
            env: self.env.clone(),
        }))
    }
}

// ── Generator ────────────────────────────────────────────────────────────────

/// Copies every file under its source root into the destination root.
///
/// Existing files are left alone unless `force` is set; `pretend` reports
/// without writing. Hooks run afterwards through the invoker with the same
/// invocation.
#[derive(Debug)]
pub struct ManifestGenerator {
    identity: GeneratorIdentity,
    description: String,
    usage: Option<String>,
    arguments: Vec<ArgumentSpec>,
    source_root: Option<PathBuf>,
    hooks: Vec<String>,
    env: GeneratorEnv,
}

impl ManifestGenerator {
    pub fn identity(&self) -> &GeneratorIdentity {
        &self.identity
    }

    fn usage_line(&self) -> String {
        if let Some(usage) = &self.usage {
            return usage.clone();
        }
        let mut line = format!("hatch generate {}", self.identity.namespace);
        for arg in &self.arguments {
            let name = arg.name.to_uppercase();
            if arg.required {
                let _ = write!(line, " {name}");
            } else {
                let _ = write!(line, " [{name}]");
            }
        }
        line.push_str(" [options]");
        line
    }

    fn copy_file(&self, source_root: &Path, relative: &Path, invocation: &Invocation) -> HatchResult<()> {
        let fs = &self.env.filesystem;
        let target = self.env.destination.join(relative);

        if fs.exists(&target) && !invocation.options.force {
            info!(path = %relative.display(), "skip (exists)");
            return Ok(());
        }
        if invocation.options.pretend {
            info!(path = %relative.display(), "create (pretend)");
            return Ok(());
        }

        let content = fs.read_file(&source_root.join(relative))?;
        if let Some(parent) = target.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.write_file(&target, &content)?;
        info!(path = %relative.display(), "create");
        Ok(())
    }
}

impl Generator for ManifestGenerator {
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
        let mut out = format!("Usage:\n  {}\n", self.usage_line());

        if !self.description.is_empty() {
            let _ = write!(out, "\nDescription:\n  {}\n", self.description);
        }

        if !self.arguments.is_empty() {
            let width = self
                .arguments
                .iter()
                .map(|a| a.name.len())
                .max()
                .unwrap_or(0);
            out.push_str("\nArguments:\n");
            for arg in &self.arguments {
                let marker = if arg.required { " (required)" } else { "" };
                let _ = writeln!(
                    out,
                    "  {:width$}  {}{}",
                    arg.name.to_uppercase(),
                    arg.description,
                    marker
                );
            }
        }

        out.push_str(concat!(
            "\nOptions:\n",
            "  -h, --help     Print this help\n",
            "  -p, --pretend  Report what would be written\n",
            "  -f, --force    Overwrite existing files\n",
            "  -s, --skip     Leave existing files alone\n",
        ));
        out
    }

    #[instrument(skip_all, fields(namespace = %self.identity.namespace))]
    fn run(&mut self, namespace: &str, invocation: &Invocation, invoker: &dyn Invoker) -> HatchResult<()> {
        let source_root = self.source_root.clone().ok_or_else(|| ApplicationError::GeneratorFailed {
            namespace: namespace.to_string(),
            reason: "no source root set".into(),
        })?;

        let files = self.env.filesystem.list_files(&source_root)?;
        debug!(count = files.len(), root = %source_root.display(), "copying templates");
        for relative in &files {
            self.copy_file(&source_root, relative, invocation)?;
        }

        for hook in &self.hooks {
            if let DispatchOutcome::NotFound { requested, .. } = invoker.invoke(hook, invocation.clone())? {
                warn!(hook = %requested, "hook generator not found");
            }
        }
        Ok(())
    }
}
