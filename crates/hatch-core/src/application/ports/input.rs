//! Driving (input) ports - implemented by the application.

use std::path::PathBuf;

use crate::domain::{Invocation, Namespace};
use crate::error::HatchResult;

/// What a dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// The generator's `run` completed.
    Ran { namespace: Namespace },
    /// A required argument was missing or help was requested; `run` was
    /// never called.
    HelpShown { namespace: Namespace, help: String },
    /// Nothing matched anywhere. Not an error: the caller decides whether to
    /// continue.
    NotFound {
        requested: String,
        attempted: Vec<PathBuf>,
    },
}

/// Resolve a namespace and run the generator behind it.
///
/// Generators receive the dispatcher through this trait so sub-generators
/// resolve with exactly the same rules as top-level requests.
pub trait Invoker {
    fn invoke(&self, namespace: &str, invocation: Invocation) -> HatchResult<DispatchOutcome>;
}
