//! Directed graphs with pluggable structural disciplines over a relational store.
//!

pub use directed_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use directed_internal::prelude::*;
}
