//! Post-load and full-wipe cleanup passes.

use directed_store::error::StoreResult;
use directed_store::traits::GraphStore;

/// Deletes airports with no connections and airlines with no routes.
///
/// Returns `(deleted_nodes, deleted_graphs)`.
///
/// # Errors
///
/// Propagates store failures.
pub async fn cleanup(store: &dyn GraphStore) -> StoreResult<(u64, u64)> {
    let mut deleted_graphs = 0;
    for graph in store.graph_ids().await? {
        if store.graph_edge_count(graph).await? == 0 && store.delete_graph(graph).await? {
            deleted_graphs += 1;
        }
    }

    let mut deleted_nodes = 0;
    for node in store.node_ids().await? {
        if store.edge_degree(node).await? == 0 && store.delete_node(node).await? {
            deleted_nodes += 1;
        }
    }

    tracing::info!(deleted_nodes, deleted_graphs, "cleanup pass complete");
    Ok((deleted_nodes, deleted_graphs))
}

/// Deletes every airline, route, and airport.
///
/// Graphs go first so their routes cascade; remaining airports are then
/// removed one by one.
///
/// # Errors
///
/// Propagates store failures.
pub async fn clear(store: &dyn GraphStore) -> StoreResult<()> {
    for graph in store.graph_ids().await? {
        store.delete_graph(graph).await?;
    }
    for node in store.node_ids().await? {
        store.delete_node(node).await?;
    }
    tracing::info!("cleared all airports data");
    Ok(())
}
