//! Graph engines for directed (Layer 2).
//!
//! `directed_graph` provides the engines that make a stored edge relation
//! behave like a disciplined graph:
//!
//! - [`GraphService`] - a discipline-bound binding of configuration,
//!   policy, store, hooks, and scope
//! - [`checks`] - the constraint engine validating candidate edges
//! - [`traverse`] - the reachability engine (ancestor/descendant sets,
//!   bounded by depth, deterministic ordering)
//! - [`NodeRef`] / [`GraphRef`] - handles carrying the mutation API
//! - [`MutationHooks`] - synchronous best-effort mutation events
//!
//! # Example
//!
//! ```ignore
//! use directed_core::prelude::*;
//! use directed_graph::prelude::*;
//! use directed_store::prelude::*;
//!
//! let config = GraphConfig::builder()
//!     .graph_type(Discipline::Dag)
//!     .graph_fullname("orgs.OrgChartGraph")
//!     .edge_fullname("orgs.ReportsToEdge")
//!     .node_fullname("orgs.PersonNode")
//!     .build()?;
//! let service = GraphService::new(config, Arc::new(MemoryStore::new()));
//!
//! let a = service.create_node().await?;
//! let b = service.create_node().await?;
//! a.add_child(&b).await?;
//! assert_eq!(a.descendants().await?, vec![b.id()]);
//! ```
//!
//! # Architecture
//!
//! This crate is Layer 2 of the directed architecture:
//!
//! - **Layer 1** (`directed_core`): configuration and discipline primitives
//! - **Layer 1** (`directed_store`): the relational storage contract and backends
//! - **Layer 2** (`directed_graph`): constraint, traversal, and mutation engines (this crate)

/// The constraint engine: checks run before an edge is persisted.
pub mod checks;

/// Tagged node/edge collections and conversions between them.
pub mod collection;

/// The error union surfaced by the engines.
pub mod error;

/// Graph handles.
pub mod graph;

/// Mutation events and the observer registry.
pub mod hooks;

/// Node handles: the edge mutation API and traversal accessors.
pub mod node;

/// Registry of configured graph services.
pub mod registry;

/// The discipline-bound service binding configuration, policy, and store.
pub mod service;

/// The reachability engine.
pub mod traverse;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::collection::{Collection, edges_from_nodes, nodes_from_edges};
    pub use crate::error::GraphError;
    pub use crate::graph::GraphRef;
    pub use crate::hooks::{HookError, MutationEvent, MutationHooks};
    pub use crate::node::NodeRef;
    pub use crate::registry::ServiceRegistry;
    pub use crate::service::GraphService;
    pub use crate::traverse::DEFAULT_MAX_DEPTH;
}

// Re-export key types at crate root for convenience
pub use error::GraphError;
pub use graph::GraphRef;
pub use hooks::{HookError, MutationEvent, MutationHooks};
pub use node::NodeRef;
pub use registry::ServiceRegistry;
pub use service::GraphService;
pub use traverse::DEFAULT_MAX_DEPTH;
