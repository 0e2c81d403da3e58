//! Application layer for Hatch.
//!
//! This layer contains:
//! - **Services**: `Registry` (lookup), `Dispatcher` (resolve and run),
//!   `HelpAggregator` (enumerate and group)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Namespace and path rules live in `crate::domain`; this layer only walks
//! the roots and talks to the ports.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    Dispatcher, GeneratorDescriptor, GeneratorEntry, GeneratorGroup, GeneratorListing,
    HIDDEN_NAMESPACES, HelpAggregator, Registry, Resolution, TEMPLATES_DIR,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DispatchOutcome, Filesystem, Generator, GeneratorFactory, GeneratorLoader, Invoker,
    LoadOutcome, LoadedModule,
};

pub use error::ApplicationError;
