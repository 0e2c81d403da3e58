//! Infrastructure adapters for Hatch.
//!
//! This crate implements the ports defined in `hatch-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod generators;
pub mod loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use generators::{GeneratorEnv, ManifestFactory, ManifestGenerator};
pub use loader::{LocalLoader, MemoryLoader};
