//! Stored record types and the traversal row shape.

use directed_core::discipline::Discipline;
use directed_core::id::{EdgeId, GraphId, NodeId};

/// A stored graph identity: a grouping of edges under one discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphRecord {
    /// Unique identifier.
    pub id: GraphId,
    /// Structural discipline, fixed at creation and never changed.
    pub kind: Discipline,
}

/// A stored vertex.
///
/// Nodes carry no relations of their own; `children` and `parents` are
/// derived from the edge relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord {
    /// Unique identifier.
    pub id: NodeId,
}

/// A stored directed relation between two nodes, owned by one graph.
///
/// Endpoint and graph references are nullable: deleting a node detaches its
/// edges rather than deleting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Unique identifier.
    pub id: EdgeId,
    /// Source node, if still present.
    pub parent: Option<NodeId>,
    /// Target node, if still present.
    pub child: Option<NodeId>,
    /// Owning graph, if any.
    pub graph: Option<GraphId>,
    /// Edge payload.
    pub weight: i64,
}

impl EdgeRecord {
    /// Creates a new edge record with a fresh ID and the default weight.
    #[must_use]
    pub fn new(parent: NodeId, child: NodeId, graph: Option<GraphId>) -> Self {
        Self {
            id: EdgeId::new(),
            parent: Some(parent),
            child: Some(child),
            graph,
            weight: 1,
        }
    }

    /// Sets the edge payload.
    #[must_use]
    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }
}

/// Traversal direction through the edge relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow outgoing edges: parents toward children (descendants).
    Leafward,
    /// Follow incoming edges: children toward parents (ancestors).
    Rootward,
}

/// One row of a reachability query result.
///
/// Rows are returned ordered by `(depth ASC, node ASC)`, each node exactly
/// once at the minimum depth it was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalRow {
    /// The reached node.
    pub node: NodeId,
    /// Minimum depth at which the node was reached (1 = direct neighbor).
    pub depth: u32,
}
