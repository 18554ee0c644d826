//! The storage contract any relational backend must satisfy.

use async_trait::async_trait;

use directed_core::discipline::Discipline;
use directed_core::id::{EdgeId, GraphId, NodeId};

use crate::error::StoreResult;
use crate::model::{Direction, EdgeRecord, GraphRecord, NodeRecord, TraversalRow};

/// Storage interface for graph, node, and edge records.
///
/// The graph layer is written entirely against this trait. Backends must
/// honor two contracts beyond plain CRUD:
///
/// - **Reachability**: [`reachable`](GraphStore::reachable) is a single
///   bounded-depth set operation (a recursive query or an equivalent
///   iterative join), returning each reachable node exactly once at its
///   minimum depth, ordered `(depth ASC, node ASC)`, with the start node
///   excluded and traversal silently truncated at `max_depth`.
/// - **Detach semantics**: deleting a node nulls out the endpoint references
///   of its edges; deleting a graph deletes the edges it owns.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────
    // Graphs
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a graph with a store-allocated ID.
    async fn create_graph(&self, kind: Discipline) -> StoreResult<GraphRecord>;

    /// Inserts a graph with an explicit ID (bulk loads).
    ///
    /// Fails with [`StoreError::Conflict`](crate::error::StoreError::Conflict)
    /// if the ID is taken.
    async fn insert_graph(&self, record: GraphRecord) -> StoreResult<()>;

    /// Fetches one graph by ID.
    async fn get_graph(&self, id: GraphId) -> StoreResult<Option<GraphRecord>>;

    /// Deletes a graph and the edges it owns. Returns false if absent.
    async fn delete_graph(&self, id: GraphId) -> StoreResult<bool>;

    /// Lists all graph IDs, ascending.
    async fn graph_ids(&self) -> StoreResult<Vec<GraphId>>;

    /// Counts the edges owned by a graph.
    async fn graph_edge_count(&self, id: GraphId) -> StoreResult<u64>;

    // ─────────────────────────────────────────────────────────────────────
    // Nodes
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a node with a store-allocated ID.
    async fn create_node(&self) -> StoreResult<NodeRecord>;

    /// Inserts a node with an explicit ID (bulk loads).
    ///
    /// Fails with [`StoreError::Conflict`](crate::error::StoreError::Conflict)
    /// if the ID is taken.
    async fn insert_node(&self, record: NodeRecord) -> StoreResult<()>;

    /// Fetches one node by ID.
    async fn get_node(&self, id: NodeId) -> StoreResult<Option<NodeRecord>>;

    /// Deletes a node, detaching (not deleting) its edges. Returns false if
    /// absent.
    async fn delete_node(&self, id: NodeId) -> StoreResult<bool>;

    /// Lists all node IDs, ascending.
    async fn node_ids(&self) -> StoreResult<Vec<NodeId>>;

    /// Counts the edges touching a node on either end.
    async fn edge_degree(&self, id: NodeId) -> StoreResult<u64>;

    // ─────────────────────────────────────────────────────────────────────
    // Edges
    // ─────────────────────────────────────────────────────────────────────

    /// Persists one edge record.
    async fn insert_edge(&self, record: EdgeRecord) -> StoreResult<()>;

    /// Fetches one edge by ID.
    async fn get_edge(&self, id: &EdgeId) -> StoreResult<Option<EdgeRecord>>;

    /// Fetches edges by ID, in the order given. Unknown IDs are skipped.
    async fn get_edges(&self, ids: &[EdgeId]) -> StoreResult<Vec<EdgeRecord>>;

    /// Deletes every edge from `parent` to `child`. Returns the number of
    /// edges removed.
    async fn delete_edges_between(&self, parent: NodeId, child: NodeId) -> StoreResult<u64>;

    /// Distinct direct children of a node, ascending by ID.
    async fn children_of(&self, node: NodeId) -> StoreResult<Vec<NodeId>>;

    /// Distinct direct parents of a node, ascending by ID.
    async fn parents_of(&self, node: NodeId) -> StoreResult<Vec<NodeId>>;

    /// Counts a node's outgoing edges (duplicates included).
    async fn child_edge_count(&self, node: NodeId) -> StoreResult<u64>;

    /// Edges whose parent and child are both members of `nodes`.
    async fn edges_within(&self, nodes: &[NodeId]) -> StoreResult<Vec<EdgeRecord>>;

    // ─────────────────────────────────────────────────────────────────────
    // Reachability
    // ─────────────────────────────────────────────────────────────────────

    /// Computes the set of nodes reachable from `start` in the given
    /// direction, up to `max_depth` hops.
    ///
    /// Output contract: rows ordered `(depth ASC, node ASC)`, each node
    /// exactly once at its minimum depth, `start` excluded. Truncation at
    /// `max_depth` is a correctness boundary, not an error.
    async fn reachable(
        &self,
        start: NodeId,
        direction: Direction,
        max_depth: u32,
    ) -> StoreResult<Vec<TraversalRow>>;
}
