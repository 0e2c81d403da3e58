//! Pure values of the generator lookup.
//!
//! Namespaces and their path form, candidate construction, the lookup
//! layout, and what a generator receives when it runs. Nothing here performs
//! I/O; loading and running sit behind ports in the application layer.

pub mod candidates;
pub mod error;
pub mod generator;
pub mod lookup;
pub mod namespace;

mod validation;

pub use candidates::{DEFAULT_NAMESPACE, LookupQuery};
pub use error::DomainError;
pub use generator::{
    ArgumentSpec, GeneratorContext, GeneratorIdentity, GeneratorOptions, Invocation,
};
pub use lookup::{
    INDEX_FILE, LIBRARY_DIR, LookupRoot, LookupRoots, MODULE_EXTENSION, RootKind,
    SubfolderConvention,
};
pub use namespace::Namespace;
pub use validation::DomainValidator;
