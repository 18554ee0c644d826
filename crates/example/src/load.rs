//! Bulk ingestion into a graph store.
//!
//! Mirrors the bulk-load contract: explicit IDs from the dataset, conflicts
//! skipped rather than fatal, and a post-load cleanup that drops empty
//! airlines and unconnected airports.

use directed_core::discipline::Discipline;
use directed_core::id::{EdgeId, GraphId, NodeId};
use directed_store::error::{StoreError, StoreResult};
use directed_store::model::{EdgeRecord, GraphRecord, NodeRecord};
use directed_store::traits::GraphStore;

use crate::cleanup::cleanup;
use crate::dataset::Dataset;

/// Counters for one bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Airports inserted.
    pub airports: u64,
    /// Airlines inserted.
    pub airlines: u64,
    /// Routes inserted.
    pub routes: u64,
    /// Unconnected airports deleted by the cleanup pass.
    pub deleted_nodes: u64,
    /// Empty airlines deleted by the cleanup pass.
    pub deleted_graphs: u64,
}

/// Returns true for accepted inserts and false for skipped conflicts.
fn accepted(result: StoreResult<()>, what: &str) -> StoreResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(StoreError::Conflict(detail)) => {
            tracing::warn!(%detail, "{what} already present; row skipped");
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// Loads a parsed dataset and runs the cleanup pass.
///
/// Rows whose IDs already exist are skipped, matching the original
/// ignore-conflicts load.
///
/// # Errors
///
/// Propagates any non-conflict store failure.
pub async fn load(store: &dyn GraphStore, dataset: &Dataset) -> StoreResult<LoadReport> {
    let mut report = LoadReport::default();

    for airport in &dataset.airports {
        let record = NodeRecord {
            id: NodeId::new(airport.id),
        };
        if accepted(store.insert_node(record).await, "airport")? {
            report.airports += 1;
        }
    }
    tracing::info!(count = report.airports, "inserted airports");

    for airline in &dataset.airlines {
        let record = GraphRecord {
            id: GraphId::new(airline.id),
            kind: Discipline::Cyclic,
        };
        if accepted(store.insert_graph(record).await, "airline")? {
            report.airlines += 1;
        }
    }
    tracing::info!(count = report.airlines, "inserted airlines");

    for route in &dataset.routes {
        let record = EdgeRecord {
            id: EdgeId::from_string(route.id.as_str()),
            parent: Some(NodeId::new(route.parent_id)),
            child: Some(NodeId::new(route.child_id)),
            graph: Some(GraphId::new(route.graph_id)),
            weight: 1,
        };
        if accepted(store.insert_edge(record).await, "route")? {
            report.routes += 1;
        }
    }
    tracing::info!(count = report.routes, "inserted routes");

    let (deleted_nodes, deleted_graphs) = cleanup(store).await?;
    report.deleted_nodes = deleted_nodes;
    report.deleted_graphs = deleted_graphs;
    Ok(report)
}
