//! The constraint engine: stateless checks run before an edge is persisted.
//!
//! Each check validates one invariant for a candidate `(parent, child)`
//! pair against the backing store. The policy registry decides which checks
//! a discipline composes; the checks themselves are discipline-agnostic.
//!
//! Ancestry-based checks read a snapshot: under concurrent writers, two
//! edges that individually pass the circularity check can together still
//! form a cycle. Serialization is the backing store's responsibility.

use directed_core::config::GraphConfig;
use directed_core::error::Violation;
use directed_core::id::NodeId;
use directed_store::model::Direction;
use directed_store::traits::GraphStore;

use crate::error::GraphError;
use crate::traverse::DEFAULT_MAX_DEPTH;

/// Checks that the candidate edge does not link a node to itself.
///
/// # Errors
///
/// Returns [`Violation::SelfLink`] when `parent == child` and the
/// configuration disallows self links.
pub fn self_link_check(
    config: &GraphConfig,
    parent: NodeId,
    child: NodeId,
) -> Result<(), Violation> {
    if !config.allow_self_links() && parent == child {
        return Err(Violation::SelfLink { node: parent });
    }
    Ok(())
}

/// Checks that the candidate edge does not create a cycle.
///
/// A self link is a degenerate cycle and is rejected here regardless of the
/// `allow_self_links` flag. Otherwise the check queries the parent's
/// ancestor set and rejects the edge if the child is a member.
///
/// # Errors
///
/// Returns [`Violation::Circularity`] for a rejected edge, or the store's
/// error if the ancestry query fails.
pub async fn circular_check(
    store: &dyn GraphStore,
    parent: NodeId,
    child: NodeId,
) -> Result<(), GraphError> {
    if parent == child {
        return Err(Violation::Circularity { parent, child }.into());
    }
    let ancestors = store
        .reachable(parent, Direction::Rootward, DEFAULT_MAX_DEPTH)
        .await?;
    if ancestors.iter().any(|row| row.node == child) {
        return Err(Violation::Circularity { parent, child }.into());
    }
    Ok(())
}

/// Checks that the candidate edge is not a duplicate.
///
/// The parent's descendant set is taken self-inclusive, so a self link is
/// always a duplicate under this check.
///
/// # Errors
///
/// Returns [`Violation::DuplicateEdge`] when the child is already reachable
/// from the parent, or the store's error if the query fails.
pub async fn duplicate_edge_check(
    store: &dyn GraphStore,
    parent: NodeId,
    child: NodeId,
) -> Result<(), GraphError> {
    if parent == child {
        return Err(Violation::DuplicateEdge { parent, child }.into());
    }
    let descendants = store
        .reachable(parent, Direction::Leafward, DEFAULT_MAX_DEPTH)
        .await?;
    if descendants.iter().any(|row| row.node == child) {
        return Err(Violation::DuplicateEdge { parent, child }.into());
    }
    Ok(())
}

/// Checks that the parent is below its configured children maximum.
///
/// A no-op unless a positive maximum is configured. The count is a single
/// read of the parent's current outgoing-edge count.
///
/// # Errors
///
/// Returns [`Violation::QuantityExceeded`] when the parent is at or above
/// the maximum, or the store's error if the count fails.
pub async fn children_quantity_check(
    store: &dyn GraphStore,
    config: &GraphConfig,
    parent: NodeId,
) -> Result<(), GraphError> {
    let Some(max) = config.children_quantity_max() else {
        return Ok(());
    };
    let count = store.child_edge_count(parent).await?;
    if count >= u64::from(max) {
        return Err(Violation::QuantityExceeded { parent, max }.into());
    }
    Ok(())
}
