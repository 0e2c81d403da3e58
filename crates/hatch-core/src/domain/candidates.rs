//! Candidate namespace construction.
//!
//! Given a short name plus optional base and context hints, produce the
//! ordered fallback list the registry tries:
//!
//! ```text
//! name = "jasmine", base = "hatch", context = "integration"
//!   1. hatch:jasmine        (base-qualified)
//!   2. jasmine:integration  (context-qualified)
//!   3. hatch                (bare base)
//! ```

use crate::domain::error::DomainError;
use crate::domain::namespace::Namespace;

/// The tool's own namespace. Unqualified names fall back to it and its
/// listing group is rendered first, without the prefix.
pub const DEFAULT_NAMESPACE: &str = "hatch";

/// Inputs to one resolution: the short name and its optional hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    name: Namespace,
    base: Option<Namespace>,
    context: Option<Namespace>,
}

impl LookupQuery {
    /// Query for a bare generator name.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: Namespace::segment(name)?,
            base: None,
            context: None,
        })
    }

    /// Split a requested namespace into short name (last segment) and base
    /// (the remaining segments, if any).
    pub fn from_requested(requested: &str) -> Result<Self, DomainError> {
        let namespace = Namespace::parse(requested)?;
        Ok(Self {
            name: Namespace::segment(namespace.name())?,
            base: namespace.parent(),
            context: None,
        })
    }

    pub fn base(mut self, base: Namespace) -> Self {
        self.base = Some(base);
        self
    }

    pub fn context(mut self, context: Namespace) -> Self {
        self.context = Some(context);
        self
    }

    /// The same query with its base forced to [`DEFAULT_NAMESPACE`].
    pub fn with_default_base(&self) -> Self {
        Self {
            name: self.name.clone(),
            base: Some(Namespace::from_static(DEFAULT_NAMESPACE)),
            context: self.context.clone(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Ordered candidates, most specific first.
    pub fn candidates(&self) -> Vec<Namespace> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(base) = &self.base {
            candidates.push(base.join(&self.name));
        }
        if let Some(context) = &self.context {
            candidates.push(self.name.join(context));
        }
        if let Some(base) = &self.base {
            candidates.push(base.clone());
        }
        candidates
    }
}
