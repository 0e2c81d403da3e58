//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hatch-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `GeneratorLoader`: Module loading and index discovery
//!   - `GeneratorFactory` / `Generator`: The base generator capability
//!   - `Filesystem`: File operations used by generators
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `Invoker`: Resolve-and-run, implemented by `Dispatcher` and handed
//!     to generators for sub-invocation

pub mod input;
pub mod output;

pub use input::{DispatchOutcome, Invoker};
pub use output::{
    Filesystem, Generator, GeneratorFactory, GeneratorLoader, LoadOutcome, LoadedModule,
};
