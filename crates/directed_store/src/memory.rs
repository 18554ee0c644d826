//! Deterministic in-memory storage adapter.
//!
//! Test-friendly reference implementation of [`GraphStore`]. Production
//! deployments should use a transactional backend; this adapter exists so
//! the engines can be exercised without a database, and doubles as the
//! reference for the reachability output contract.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;

use directed_core::discipline::Discipline;
use directed_core::id::{EdgeId, GraphId, NodeId};

use crate::error::{StoreError, StoreResult};
use crate::model::{Direction, EdgeRecord, GraphRecord, NodeRecord, TraversalRow};
use crate::traits::GraphStore;

#[derive(Debug, Default)]
struct Inner {
    graphs: HashMap<GraphId, GraphRecord>,
    nodes: HashMap<NodeId, NodeRecord>,
    edges: Vec<EdgeRecord>,
}

impl Inner {
    /// Direct neighbors of `node` in the given direction, duplicates kept.
    fn neighbors(&self, node: NodeId, direction: Direction) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter_map(|edge| match direction {
                Direction::Leafward if edge.parent == Some(node) => edge.child,
                Direction::Rootward if edge.child == Some(node) => edge.parent,
                _ => None,
            })
            .collect()
    }
}

/// In-memory [`GraphStore`] adapter.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    next_graph_id: AtomicI64,
    next_node_id: AtomicI64,
}

impl MemoryStore {
    /// Creates an empty store. IDs are allocated starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_graph_id: AtomicI64::new(1),
            next_node_id: AtomicI64::new(1),
        }
    }

    /// Keeps an allocator ahead of an explicitly inserted ID.
    fn bump(counter: &AtomicI64, taken: i64) {
        counter.fetch_max(taken + 1, Ordering::Relaxed);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn create_graph(&self, kind: Discipline) -> StoreResult<GraphRecord> {
        let id = GraphId::new(self.next_graph_id.fetch_add(1, Ordering::Relaxed));
        let record = GraphRecord { id, kind };
        self.inner.write().graphs.insert(id, record);
        Ok(record)
    }

    async fn insert_graph(&self, record: GraphRecord) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if inner.graphs.contains_key(&record.id) {
            return Err(StoreError::Conflict(format!("{} already exists", record.id)));
        }
        Self::bump(&self.next_graph_id, record.id.value());
        inner.graphs.insert(record.id, record);
        Ok(())
    }

    async fn get_graph(&self, id: GraphId) -> StoreResult<Option<GraphRecord>> {
        Ok(self.inner.read().graphs.get(&id).copied())
    }

    async fn delete_graph(&self, id: GraphId) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let existed = inner.graphs.remove(&id).is_some();
        if existed {
            inner.edges.retain(|edge| edge.graph != Some(id));
        }
        Ok(existed)
    }

    async fn graph_ids(&self) -> StoreResult<Vec<GraphId>> {
        let mut ids: Vec<GraphId> = self.inner.read().graphs.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn graph_edge_count(&self, id: GraphId) -> StoreResult<u64> {
        let count = self
            .inner
            .read()
            .edges
            .iter()
            .filter(|edge| edge.graph == Some(id))
            .count();
        Ok(count as u64)
    }

    async fn create_node(&self) -> StoreResult<NodeRecord> {
        let id = NodeId::new(self.next_node_id.fetch_add(1, Ordering::Relaxed));
        let record = NodeRecord { id };
        self.inner.write().nodes.insert(id, record);
        Ok(record)
    }

    async fn insert_node(&self, record: NodeRecord) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if inner.nodes.contains_key(&record.id) {
            return Err(StoreError::Conflict(format!("{} already exists", record.id)));
        }
        Self::bump(&self.next_node_id, record.id.value());
        inner.nodes.insert(record.id, record);
        Ok(())
    }

    async fn get_node(&self, id: NodeId) -> StoreResult<Option<NodeRecord>> {
        Ok(self.inner.read().nodes.get(&id).copied())
    }

    async fn delete_node(&self, id: NodeId) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        let existed = inner.nodes.remove(&id).is_some();
        if existed {
            // Detach, never delete: endpoint references go null.
            for edge in &mut inner.edges {
                if edge.parent == Some(id) {
                    edge.parent = None;
                }
                if edge.child == Some(id) {
                    edge.child = None;
                }
            }
        }
        Ok(existed)
    }

    async fn node_ids(&self) -> StoreResult<Vec<NodeId>> {
        let mut ids: Vec<NodeId> = self.inner.read().nodes.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn edge_degree(&self, id: NodeId) -> StoreResult<u64> {
        let count = self
            .inner
            .read()
            .edges
            .iter()
            .filter(|edge| edge.parent == Some(id) || edge.child == Some(id))
            .count();
        Ok(count as u64)
    }

    async fn insert_edge(&self, record: EdgeRecord) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if inner.edges.iter().any(|edge| edge.id == record.id) {
            return Err(StoreError::Conflict(format!("{} already exists", record.id)));
        }
        inner.edges.push(record);
        Ok(())
    }

    async fn get_edge(&self, id: &EdgeId) -> StoreResult<Option<EdgeRecord>> {
        Ok(self
            .inner
            .read()
            .edges
            .iter()
            .find(|edge| edge.id == *id)
            .cloned())
    }

    async fn get_edges(&self, ids: &[EdgeId]) -> StoreResult<Vec<EdgeRecord>> {
        let inner = self.inner.read();
        Ok(ids
            .iter()
            .filter_map(|id| inner.edges.iter().find(|edge| edge.id == *id).cloned())
            .collect())
    }

    async fn delete_edges_between(&self, parent: NodeId, child: NodeId) -> StoreResult<u64> {
        let mut inner = self.inner.write();
        let before = inner.edges.len();
        inner
            .edges
            .retain(|edge| !(edge.parent == Some(parent) && edge.child == Some(child)));
        Ok((before - inner.edges.len()) as u64)
    }

    async fn children_of(&self, node: NodeId) -> StoreResult<Vec<NodeId>> {
        let mut ids = self.inner.read().neighbors(node, Direction::Leafward);
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn parents_of(&self, node: NodeId) -> StoreResult<Vec<NodeId>> {
        let mut ids = self.inner.read().neighbors(node, Direction::Rootward);
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn child_edge_count(&self, node: NodeId) -> StoreResult<u64> {
        let count = self
            .inner
            .read()
            .edges
            .iter()
            .filter(|edge| edge.parent == Some(node))
            .count();
        Ok(count as u64)
    }

    async fn edges_within(&self, nodes: &[NodeId]) -> StoreResult<Vec<EdgeRecord>> {
        let members: HashSet<NodeId> = nodes.iter().copied().collect();
        Ok(self
            .inner
            .read()
            .edges
            .iter()
            .filter(|edge| match (edge.parent, edge.child) {
                (Some(parent), Some(child)) => {
                    members.contains(&parent) && members.contains(&child)
                }
                _ => false,
            })
            .cloned()
            .collect())
    }

    async fn reachable(
        &self,
        start: NodeId,
        direction: Direction,
        max_depth: u32,
    ) -> StoreResult<Vec<TraversalRow>> {
        let inner = self.inner.read();

        // Breadth-first fixpoint: each node is recorded at the minimum depth
        // it was first discovered, and the start node is never recorded.
        let mut depths: HashMap<NodeId, u32> = HashMap::new();
        let mut frontier = vec![start];
        let mut depth = 0;

        while !frontier.is_empty() && depth < max_depth {
            depth += 1;
            let mut next = Vec::new();
            for &node in &frontier {
                for neighbor in inner.neighbors(node, direction) {
                    if neighbor != start && !depths.contains_key(&neighbor) {
                        depths.insert(neighbor, depth);
                        next.push(neighbor);
                    }
                }
            }
            frontier = next;
        }

        let mut rows: Vec<TraversalRow> = depths
            .into_iter()
            .map(|(node, depth)| TraversalRow { node, depth })
            .collect();
        rows.sort_by_key(|row| (row.depth, row.node));
        Ok(rows)
    }
}
