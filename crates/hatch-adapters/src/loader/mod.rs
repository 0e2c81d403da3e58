//! Generator loaders.
//!
//! - [`LocalLoader`]: TOML manifests on disk
//! - [`MemoryLoader`]: modules registered in memory

mod local;
mod manifest;
mod memory;

pub use local::LocalLoader;
pub use manifest::{GENERATOR_TABLE, GeneratorSection, Manifest, ManifestError};
pub use memory::MemoryLoader;
