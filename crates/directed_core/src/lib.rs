//! Core primitives for directed (Layer 1).
//!
//! `directed_core` provides the foundation the storage and graph layers are
//! built on: identifier newtypes, the validated [`GraphConfig`] descriptor,
//! the closed set of structural [`Discipline`]s with their check policies,
//! the violation/error taxonomy, and the nestable [`GraphScope`] context.
//!
//! # Architecture
//!
//! This crate is Layer 1 of the directed architecture:
//!
//! - **Layer 1** (`directed_core`): configuration and discipline primitives (this crate)
//! - **Layer 1** (`directed_store`): the relational storage contract and backends
//! - **Layer 2** (`directed_graph`): constraint, traversal, and mutation engines

/// Validated configuration descriptor for a graph deployment.
pub mod config;

/// The closed set of structural disciplines and their check policies.
pub mod discipline;

/// Violation and lookup error types shared across layers.
pub mod error;

/// Identifier newtypes for graphs, nodes, and edges.
pub mod id;

/// Nestable, scope-local binding of the current graph instance.
pub mod scope;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ConfigError, EntityName, GraphConfig};
    pub use crate::discipline::{CheckSet, Discipline};
    pub use crate::error::{CollectionError, ResolveError, Violation};
    pub use crate::id::{EdgeId, GraphId, NodeId};
    pub use crate::scope::{GraphScope, ScopeGuard};
}

pub use config::{ConfigBuilder, ConfigError, EntityName, GraphConfig};
pub use discipline::{CheckSet, Discipline};
pub use error::{CollectionError, ResolveError, Violation};
pub use id::{EdgeId, GraphId, NodeId};
pub use scope::{GraphScope, ScopeGuard};
