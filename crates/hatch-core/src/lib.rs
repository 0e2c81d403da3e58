//! Namespace resolution and dispatch for Hatch generators.
//!
//! Three layers, innermost first:
//!
//! - [`domain`]: namespaces, candidate construction and the on-disk lookup
//!   layout. Paths are computed here but never touched.
//! - [`application`]: the [`Registry`](application::Registry) that walks
//!   roots and conventions, the [`Dispatcher`](application::Dispatcher) that
//!   retries under the default base and runs what it finds, and the
//!   [`HelpAggregator`](application::HelpAggregator) behind listings. I/O
//!   goes through the traits in [`application::ports`].
//! - `hatch-adapters` implements those ports against the local disk or in
//!   memory; `hatch-cli` wires everything to a terminal.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hatch_core::prelude::*;
//!
//! // `loader` is any GeneratorLoader implementation.
//! let roots = LookupRoots::new("./my-app", "/usr/share/hatch");
//! let dispatcher = Dispatcher::new(Registry::new(loader, roots));
//!
//! match dispatcher.dispatch("model", Invocation::new(vec!["User".into()]))? {
//!     DispatchOutcome::Ran { namespace } => println!("ran {namespace}"),
//!     DispatchOutcome::HelpShown { help, .. } => println!("{help}"),
//!     DispatchOutcome::NotFound { attempted, .. } => eprintln!("{attempted:?}"),
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        Dispatcher, GeneratorDescriptor, GeneratorEntry, GeneratorGroup, GeneratorListing,
        HelpAggregator, Registry, Resolution,
        ports::{
            DispatchOutcome, Filesystem, Generator, GeneratorFactory, GeneratorLoader, Invoker,
            LoadOutcome, LoadedModule,
        },
    };
    pub use crate::domain::{
        ArgumentSpec, DEFAULT_NAMESPACE, GeneratorContext, GeneratorIdentity, GeneratorOptions,
        Invocation, LookupQuery, LookupRoot, LookupRoots, Namespace, RootKind, SubfolderConvention,
    };
    pub use crate::error::{HatchError, HatchResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
