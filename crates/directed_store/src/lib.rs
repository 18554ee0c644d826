//! Relational storage contract and backends for directed (Layer 1).
//!
//! This crate defines the storage contract the graph layer is written
//! against:
//! - stored records for graphs, nodes, and edges ([`model`])
//! - the [`GraphStore`] trait, including the reachability query contract
//! - a deterministic in-memory adapter for tests and small graphs
//! - a SQLite adapter whose traversal is a single recursive CTE
//!   (behind the `sqlite` feature)
//!
//! Design stance:
//! - the relational store remains the source of truth; nothing here caches
//!   derived parent/child relations
//! - traversal is a single bounded-depth set operation per call, never an
//!   N+1 walk over edges

/// Storage-layer errors.
pub mod error;

/// Deterministic in-memory storage adapter.
pub mod memory;

/// Stored record types and the traversal row shape.
pub mod model;

/// SQLite storage adapter backed by sqlx.
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// The storage contract any relational backend must satisfy.
pub mod traits;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::{StoreError, StoreResult};
    pub use crate::memory::MemoryStore;
    #[cfg(feature = "sqlite")]
    pub use crate::sqlite::SqliteStore;
    pub use crate::model::{Direction, EdgeRecord, GraphRecord, NodeRecord, TraversalRow};
    pub use crate::traits::GraphStore;
}

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{Direction, EdgeRecord, GraphRecord, NodeRecord, TraversalRow};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use traits::GraphStore;
