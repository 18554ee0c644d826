//! The error union surfaced by the mutation and traversal engines.

use thiserror::Error;

use directed_core::error::{CollectionError, ResolveError, Violation};
use directed_store::error::StoreError;

/// Any failure an engine call can propagate.
///
/// Violations and resolution failures are logic errors and are never
/// retried; store errors are backend faults. None of them roll back prior
/// successes in a bulk operation.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A structural invariant rejected the mutation.
    #[error(transparent)]
    Violation(#[from] Violation),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A discipline or entity name could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A conversion helper was handed the wrong collection kind.
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

impl GraphError {
    /// Returns the violation if this error is one.
    #[must_use]
    pub fn as_violation(&self) -> Option<&Violation> {
        match self {
            GraphError::Violation(violation) => Some(violation),
            _ => None,
        }
    }
}
