//! The reachability engine: ancestor/descendant sets bounded by depth.
//!
//! Every query here is one bounded-depth set operation against the store
//! (see the [`GraphStore::reachable`] contract), never an N+1 walk over
//! edges. Results are deterministic: ascending by minimum depth, ties
//! broken by node identifier ascending.

use directed_core::id::NodeId;
use directed_store::error::StoreResult;
use directed_store::model::Direction;
use directed_store::traits::GraphStore;

/// Default bound on traversal depth.
///
/// Traversal silently truncates here; on cyclic graphs the bound is what
/// guarantees termination.
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// All nodes reachable leafward from `node`, nearest first.
pub async fn descendants(
    store: &dyn GraphStore,
    node: NodeId,
    max_depth: u32,
) -> StoreResult<Vec<NodeId>> {
    let rows = store.reachable(node, Direction::Leafward, max_depth).await?;
    Ok(rows.into_iter().map(|row| row.node).collect())
}

/// All nodes reachable rootward from `node`, nearest first.
pub async fn ancestors(
    store: &dyn GraphStore,
    node: NodeId,
    max_depth: u32,
) -> StoreResult<Vec<NodeId>> {
    let rows = store.reachable(node, Direction::Rootward, max_depth).await?;
    Ok(rows.into_iter().map(|row| row.node).collect())
}

/// Descendants with `node` prepended at depth 0.
///
/// The start node appears exactly once even when a cyclic path reaches it;
/// no second query is issued.
pub async fn self_and_descendants(
    store: &dyn GraphStore,
    node: NodeId,
    max_depth: u32,
) -> StoreResult<Vec<NodeId>> {
    let mut result = vec![node];
    result.extend(descendants(store, node, max_depth).await?);
    Ok(result)
}

/// Descendants with `node` appended after the reachable set.
pub async fn descendants_and_self(
    store: &dyn GraphStore,
    node: NodeId,
    max_depth: u32,
) -> StoreResult<Vec<NodeId>> {
    let mut result = descendants(store, node, max_depth).await?;
    result.push(node);
    Ok(result)
}

/// Ancestors with `node` prepended at depth 0.
pub async fn self_and_ancestors(
    store: &dyn GraphStore,
    node: NodeId,
    max_depth: u32,
) -> StoreResult<Vec<NodeId>> {
    let mut result = vec![node];
    result.extend(ancestors(store, node, max_depth).await?);
    Ok(result)
}

/// Ancestors with `node` appended after the reachable set.
pub async fn ancestors_and_self(
    store: &dyn GraphStore,
    node: NodeId,
    max_depth: u32,
) -> StoreResult<Vec<NodeId>> {
    let mut result = ancestors(store, node, max_depth).await?;
    result.push(node);
    Ok(result)
}
