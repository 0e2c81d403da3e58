//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! "find a generator", "run a generator" and "list generators".

pub mod dispatcher;
pub mod help_aggregator;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::{Dispatcher, TEMPLATES_DIR};
pub use help_aggregator::{
    GeneratorEntry, GeneratorGroup, GeneratorListing, HIDDEN_NAMESPACES, HelpAggregator,
};
pub use registry::{GeneratorDescriptor, Registry, Resolution};
