//! # Directed Internal Library
//!
//! Re-exports the core directed crates for convenience.

/// Layer 1: configuration and discipline primitives.
pub use directed_core;

/// Layer 1: the relational storage contract and backends.
pub use directed_store;

/// Layer 2: constraint, traversal, and mutation engines.
pub use directed_graph;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use directed_core::prelude::*;
    pub use directed_graph::prelude::*;
    pub use directed_store::prelude::*;
}
