//! Example airports bulk loader built on directed.
//!
//! This example demonstrates the CSV bulk-load surface built on the core:
//! ingestion of airports (nodes), airlines (graphs), and routes (edges),
//! followed by a post-load cleanup that deletes airlines with no routes and
//! airports with no connections.
//!
//! The loader talks to the core only through the public
//! [`GraphStore`](directed_store::traits::GraphStore) contract; airline and
//! airport attributes (names, cities, callsigns) are application data and
//! would live in the application's own tables.

/// Post-load and full-wipe cleanup passes.
pub mod cleanup;

/// CSV parsing for the airports dataset.
pub mod dataset;

/// Bulk ingestion into a graph store.
pub mod load;

pub use cleanup::{clear, cleanup};
pub use dataset::{Airline, Airport, Dataset, Route};
pub use load::{LoadReport, load};

use directed_core::config::{ConfigError, GraphConfig};
use directed_core::discipline::Discipline;

/// The airports deployment configuration: cyclic graphs (air routes loop),
/// duplicate routes allowed (the same leg appears once per airline and
/// sometimes twice within one).
///
/// # Errors
///
/// Never fails in practice; the names are static and valid.
pub fn airports_config() -> Result<GraphConfig, ConfigError> {
    GraphConfig::builder()
        .graph_type(Discipline::Cyclic)
        .graph_fullname("airports.AirlineGraph")
        .edge_fullname("airports.AirRouteEdge")
        .node_fullname("airports.AirportNode")
        .allow_duplicate_edges(true)
        .build()
}
