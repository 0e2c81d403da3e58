//! Lookup roots and the subfolder conventions searched beneath them.
//!
//! # Layout
//!
//! ```text
//! <root>/
//! └── lib/
//!     ├── hatch/generators/   ← namespaced-under-tool
//!     ├── generators/hatch/   ← tool-under-namespace
//!     └── generators/         ← flat
//! ```
//!
//! Every candidate namespace is tried under all three conventions, in the
//! order above, for the caller root before the built-in root.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Directory below each root that holds the conventions.
pub const LIBRARY_DIR: &str = "lib";

/// File that marks a directory-style generator, and the only file the help
/// listing enumerates.
pub const INDEX_FILE: &str = "index.toml";

/// Extension of a flat-file generator (`lib/generators/model.toml`).
pub const MODULE_EXTENSION: &str = "toml";

// ── SubfolderConvention ──────────────────────────────────────────────────────

/// One of the three fixed nesting layouts under a root's library directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubfolderConvention {
    NamespacedUnderTool,
    ToolUnderNamespace,
    Flat,
}

impl SubfolderConvention {
    /// Lookup order.
    pub const ALL: [Self; 3] = [Self::NamespacedUnderTool, Self::ToolUnderNamespace, Self::Flat];

    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::NamespacedUnderTool => "hatch/generators",
            Self::ToolUnderNamespace => "generators/hatch",
            Self::Flat => "generators",
        }
    }

    /// `<root>/lib/<prefix>`.
    pub fn dir(&self, root: &Path) -> PathBuf {
        self.prefix()
            .split('/')
            .fold(root.join(LIBRARY_DIR), |dir, part| dir.join(part))
    }
}

impl fmt::Display for SubfolderConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// ── LookupRoot ───────────────────────────────────────────────────────────────

/// Which origin a generator came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    /// The project being scaffolded.
    Caller,
    /// Generators shipped with the tool.
    Builtin,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caller => f.write_str("caller"),
            Self::Builtin => f.write_str("builtin"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRoot {
    pub kind: RootKind,
    pub path: PathBuf,
}

/// The two roots of a top-level resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRoots {
    caller: LookupRoot,
    builtin: LookupRoot,
}

impl LookupRoots {
    pub fn new(caller: impl Into<PathBuf>, builtin: impl Into<PathBuf>) -> Self {
        Self {
            caller: LookupRoot {
                kind: RootKind::Caller,
                path: caller.into(),
            },
            builtin: LookupRoot {
                kind: RootKind::Builtin,
                path: builtin.into(),
            },
        }
    }

    pub fn caller(&self) -> &LookupRoot {
        &self.caller
    }

    pub fn builtin(&self) -> &LookupRoot {
        &self.builtin
    }

    /// Caller first, then built-in.
    pub fn iter(&self) -> impl Iterator<Item = &LookupRoot> {
        [&self.caller, &self.builtin].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventions_are_tried_in_fixed_order() {
        let prefixes: Vec<_> = SubfolderConvention::ALL.iter().map(|c| c.prefix()).collect();
        assert_eq!(prefixes, ["hatch/generators", "generators/hatch", "generators"]);
    }

    #[test]
    fn convention_dir_lives_under_lib() {
        let dir = SubfolderConvention::ToolUnderNamespace.dir(Path::new("/proj"));
        assert_eq!(dir, Path::new("/proj").join("lib").join("generators").join("hatch"));
    }

    #[test]
    fn caller_root_comes_first() {
        let roots = LookupRoots::new("/proj", "/usr/share/hatch");
        let kinds: Vec<_> = roots.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, [RootKind::Caller, RootKind::Builtin]);
        assert_eq!(roots.builtin().path, PathBuf::from("/usr/share/hatch"));
    }
}
