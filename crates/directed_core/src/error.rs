//! Violation and lookup error types shared across layers.

use thiserror::Error;

use crate::config::EntityName;
use crate::id::NodeId;

/// A structural invariant rejected an attempted edge mutation.
///
/// Violations are raised synchronously at mutation time, before anything is
/// persisted; a rejected mutation leaves the store unmodified for that edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The candidate edge would link a node to itself.
    #[error("{node} cannot be linked to itself")]
    SelfLink {
        /// The node on both ends of the candidate edge.
        node: NodeId,
    },

    /// The candidate child is already an ancestor of the candidate parent.
    #[error("{child} is already an ancestor of {parent}")]
    Circularity {
        /// The candidate parent node.
        parent: NodeId,
        /// The candidate child node.
        child: NodeId,
    },

    /// The candidate child is already a descendant of the candidate parent.
    #[error("edge {parent} -> {child} is a duplicate")]
    DuplicateEdge {
        /// The candidate parent node.
        parent: NodeId,
        /// The candidate child node.
        child: NodeId,
    },

    /// The candidate parent is at its configured children maximum.
    #[error("{parent} is at the configured maximum of {max} children")]
    QuantityExceeded {
        /// The candidate parent node.
        parent: NodeId,
        /// The configured maximum number of children.
        max: u32,
    },
}

/// A named discipline or entity could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The discipline tag was never registered.
    #[error("discipline '{0}' not found in the set of registered disciplines")]
    UnknownDiscipline(String),

    /// No service is registered under the given entity fullname.
    #[error("entity '{0}' does not resolve to a registered graph service")]
    EntityResolution(EntityName),
}

/// A conversion helper was handed the wrong kind of tagged collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The collection's tag does not match what the helper expects.
    #[error("expected a {expected} collection, got a {actual} collection")]
    TypeMismatch {
        /// The collection kind the helper operates on.
        expected: &'static str,
        /// The collection kind it was given.
        actual: &'static str,
    },
}
