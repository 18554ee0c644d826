//! SQLite storage adapter backed by sqlx.
//!
//! Traversal is a single recursive CTE per call; the bounded-depth `UNION`
//! keeps cyclic graphs finite (at most `nodes x max_depth` distinct rows).

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use directed_core::discipline::Discipline;
use directed_core::id::{EdgeId, GraphId, NodeId};

use crate::error::{StoreError, StoreResult};
use crate::model::{Direction, EdgeRecord, GraphRecord, NodeRecord, TraversalRow};
use crate::traits::GraphStore;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS graphs (
        id INTEGER PRIMARY KEY,
        kind TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS nodes (
        id INTEGER PRIMARY KEY
    )",
    "CREATE TABLE IF NOT EXISTS edges (
        id TEXT PRIMARY KEY,
        parent_id INTEGER,
        child_id INTEGER,
        graph_id INTEGER,
        weight INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE INDEX IF NOT EXISTS idx_edges_parent ON edges (parent_id)",
    "CREATE INDEX IF NOT EXISTS idx_edges_child ON edges (child_id)",
    "CREATE INDEX IF NOT EXISTS idx_edges_graph ON edges (graph_id)",
];

/// Reachability over outgoing edges: parents toward children.
const REACHABLE_LEAFWARD: &str = "
    WITH RECURSIVE walk (node_id, depth) AS (
        SELECT child_id, 1 FROM edges
            WHERE parent_id = ?1 AND child_id IS NOT NULL
        UNION
        SELECT edges.child_id, walk.depth + 1 FROM edges
            INNER JOIN walk ON edges.parent_id = walk.node_id
            WHERE walk.depth < ?2 AND edges.child_id IS NOT NULL
    )
    SELECT node_id, MIN(depth) AS depth FROM walk
        WHERE node_id <> ?1
        GROUP BY node_id
        ORDER BY depth ASC, node_id ASC
";

/// Reachability over incoming edges: children toward parents.
const REACHABLE_ROOTWARD: &str = "
    WITH RECURSIVE walk (node_id, depth) AS (
        SELECT parent_id, 1 FROM edges
            WHERE child_id = ?1 AND parent_id IS NOT NULL
        UNION
        SELECT edges.parent_id, walk.depth + 1 FROM edges
            INNER JOIN walk ON edges.child_id = walk.node_id
            WHERE walk.depth < ?2 AND edges.parent_id IS NOT NULL
    )
    SELECT node_id, MIN(depth) AS depth FROM walk
        WHERE node_id <> ?1
        GROUP BY node_id
        ORDER BY depth ASC, node_id ASC
";

#[derive(Debug, Clone, sqlx::FromRow)]
struct EdgeRow {
    id: String,
    parent_id: Option<i64>,
    child_id: Option<i64>,
    graph_id: Option<i64>,
    weight: i64,
}

impl From<EdgeRow> for EdgeRecord {
    fn from(row: EdgeRow) -> Self {
        Self {
            id: EdgeId::from_string(row.id),
            parent: row.parent_id.map(NodeId::new),
            child: row.child_id.map(NodeId::new),
            graph: row.graph_id.map(GraphId::new),
            weight: row.weight,
        }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// Maps a unique-constraint failure to [`StoreError::Conflict`], everything
/// else to [`StoreError::Backend`].
fn insert_error(err: sqlx::Error, what: String) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict(what),
        _ => backend(err),
    }
}

/// SQLite [`GraphStore`] adapter.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to a SQLite database and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the connection or schema setup
    /// fails.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .connect(url)
            .await
            .map_err(backend)?;
        Self::from_pool(pool).await
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is pinned to a single connection: each SQLite in-memory
    /// connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the connection or schema setup
    /// fails.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(backend)?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if schema setup fails.
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(backend)?;
        }
        Ok(Self { pool })
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl GraphStore for SqliteStore {
    async fn create_graph(&self, kind: Discipline) -> StoreResult<GraphRecord> {
        let result = sqlx::query("INSERT INTO graphs (kind) VALUES (?1)")
            .bind(kind.tag())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(GraphRecord {
            id: GraphId::new(result.last_insert_rowid()),
            kind,
        })
    }

    async fn insert_graph(&self, record: GraphRecord) -> StoreResult<()> {
        sqlx::query("INSERT INTO graphs (id, kind) VALUES (?1, ?2)")
            .bind(record.id.value())
            .bind(record.kind.tag())
            .execute(&self.pool)
            .await
            .map_err(|err| insert_error(err, format!("{} already exists", record.id)))?;
        Ok(())
    }

    async fn get_graph(&self, id: GraphId) -> StoreResult<Option<GraphRecord>> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, kind FROM graphs WHERE id = ?1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(backend)?;
        row.map(|(id, kind)| {
            let kind = Discipline::from_tag(&kind)
                .map_err(|_| StoreError::Backend(format!("stored discipline '{kind}' unknown")))?;
            Ok(GraphRecord {
                id: GraphId::new(id),
                kind,
            })
        })
        .transpose()
    }

    async fn delete_graph(&self, id: GraphId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        sqlx::query("DELETE FROM edges WHERE graph_id = ?1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        let result = sqlx::query("DELETE FROM graphs WHERE id = ?1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        tx.commit().await.map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn graph_ids(&self) -> StoreResult<Vec<GraphId>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM graphs ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(ids.into_iter().map(GraphId::new).collect())
    }

    async fn graph_edge_count(&self, id: GraphId) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM edges WHERE graph_id = ?1")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(count as u64)
    }

    async fn create_node(&self) -> StoreResult<NodeRecord> {
        let result = sqlx::query("INSERT INTO nodes DEFAULT VALUES")
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(NodeRecord {
            id: NodeId::new(result.last_insert_rowid()),
        })
    }

    async fn insert_node(&self, record: NodeRecord) -> StoreResult<()> {
        sqlx::query("INSERT INTO nodes (id) VALUES (?1)")
            .bind(record.id.value())
            .execute(&self.pool)
            .await
            .map_err(|err| insert_error(err, format!("{} already exists", record.id)))?;
        Ok(())
    }

    async fn get_node(&self, id: NodeId) -> StoreResult<Option<NodeRecord>> {
        let row: Option<i64> = sqlx::query_scalar("SELECT id FROM nodes WHERE id = ?1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(|id| NodeRecord { id: NodeId::new(id) }))
    }

    async fn delete_node(&self, id: NodeId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await.map_err(backend)?;
        // Detach, never delete: endpoint references go null.
        sqlx::query("UPDATE edges SET parent_id = NULL WHERE parent_id = ?1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        sqlx::query("UPDATE edges SET child_id = NULL WHERE child_id = ?1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        let result = sqlx::query("DELETE FROM nodes WHERE id = ?1")
            .bind(id.value())
            .execute(&mut *tx)
            .await
            .map_err(backend)?;
        tx.commit().await.map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn node_ids(&self) -> StoreResult<Vec<NodeId>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM nodes ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(ids.into_iter().map(NodeId::new).collect())
    }

    async fn edge_degree(&self, id: NodeId) -> StoreResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM edges WHERE parent_id = ?1 OR child_id = ?1")
                .bind(id.value())
                .fetch_one(&self.pool)
                .await
                .map_err(backend)?;
        Ok(count as u64)
    }

    async fn insert_edge(&self, record: EdgeRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO edges (id, parent_id, child_id, graph_id, weight)
                VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(record.id.as_str())
        .bind(record.parent.map(|id| id.value()))
        .bind(record.child.map(|id| id.value()))
        .bind(record.graph.map(|id| id.value()))
        .bind(record.weight)
        .execute(&self.pool)
        .await
        .map_err(|err| insert_error(err, format!("{} already exists", record.id)))?;
        Ok(())
    }

    async fn get_edge(&self, id: &EdgeId) -> StoreResult<Option<EdgeRecord>> {
        let row: Option<EdgeRow> = sqlx::query_as(
            "SELECT id, parent_id, child_id, graph_id, weight FROM edges WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(EdgeRecord::from))
    }

    async fn get_edges(&self, ids: &[EdgeId]) -> StoreResult<Vec<EdgeRecord>> {
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get_edge(id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn delete_edges_between(&self, parent: NodeId, child: NodeId) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM edges WHERE parent_id = ?1 AND child_id = ?2")
            .bind(parent.value())
            .bind(child.value())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }

    async fn children_of(&self, node: NodeId) -> StoreResult<Vec<NodeId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT child_id FROM edges
                WHERE parent_id = ?1 AND child_id IS NOT NULL
                ORDER BY child_id",
        )
        .bind(node.value())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(ids.into_iter().map(NodeId::new).collect())
    }

    async fn parents_of(&self, node: NodeId) -> StoreResult<Vec<NodeId>> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT parent_id FROM edges
                WHERE child_id = ?1 AND parent_id IS NOT NULL
                ORDER BY parent_id",
        )
        .bind(node.value())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(ids.into_iter().map(NodeId::new).collect())
    }

    async fn child_edge_count(&self, node: NodeId) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM edges WHERE parent_id = ?1")
            .bind(node.value())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(count as u64)
    }

    async fn edges_within(&self, nodes: &[NodeId]) -> StoreResult<Vec<EdgeRecord>> {
        if nodes.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = sqlx::QueryBuilder::new(
            "SELECT id, parent_id, child_id, graph_id, weight FROM edges WHERE parent_id IN (",
        );
        let mut members = builder.separated(", ");
        for node in nodes {
            members.push_bind(node.value());
        }
        builder.push(") AND child_id IN (");
        let mut members = builder.separated(", ");
        for node in nodes {
            members.push_bind(node.value());
        }
        builder.push(")");

        let rows: Vec<EdgeRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().map(EdgeRecord::from).collect())
    }

    async fn reachable(
        &self,
        start: NodeId,
        direction: Direction,
        max_depth: u32,
    ) -> StoreResult<Vec<TraversalRow>> {
        let query = match direction {
            Direction::Leafward => REACHABLE_LEAFWARD,
            Direction::Rootward => REACHABLE_ROOTWARD,
        };
        let rows: Vec<(i64, i64)> = sqlx::query_as(query)
            .bind(start.value())
            .bind(i64::from(max_depth))
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows
            .into_iter()
            .map(|(node, depth)| TraversalRow {
                node: NodeId::new(node),
                depth: depth as u32,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn node(store: &SqliteStore) -> NodeId {
        store.create_node().await.unwrap().id
    }

    async fn link(store: &SqliteStore, parent: NodeId, child: NodeId) {
        store
            .insert_edge(EdgeRecord::new(parent, child, None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn graph_round_trips_discipline() {
        let store = SqliteStore::in_memory().await.unwrap();
        let graph = store.create_graph(Discipline::Polytree).await.unwrap();
        let fetched = store.get_graph(graph.id).await.unwrap().unwrap();
        assert_eq!(fetched.kind, Discipline::Polytree);
    }

    #[tokio::test]
    async fn explicit_inserts_conflict() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .insert_node(NodeRecord { id: NodeId::new(5) })
            .await
            .unwrap();
        let err = store
            .insert_node(NodeRecord { id: NodeId::new(5) })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn recursive_query_matches_the_output_contract() {
        let store = SqliteStore::in_memory().await.unwrap();
        let (a, b, c, d) = (
            node(&store).await,
            node(&store).await,
            node(&store).await,
            node(&store).await,
        );
        // a -> b -> d and a -> c -> d: d is kept at its minimum depth 2.
        link(&store, a, b).await;
        link(&store, a, c).await;
        link(&store, b, d).await;
        link(&store, c, d).await;

        let rows = store.reachable(a, Direction::Leafward, 100).await.unwrap();
        assert_eq!(
            rows,
            vec![
                TraversalRow { node: b, depth: 1 },
                TraversalRow { node: c, depth: 1 },
                TraversalRow { node: d, depth: 2 },
            ]
        );

        let rows = store.reachable(d, Direction::Rootward, 100).await.unwrap();
        assert_eq!(
            rows,
            vec![
                TraversalRow { node: b, depth: 1 },
                TraversalRow { node: c, depth: 1 },
                TraversalRow { node: a, depth: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn recursive_query_terminates_on_cycles() {
        let store = SqliteStore::in_memory().await.unwrap();
        let (a, b, c) = (node(&store).await, node(&store).await, node(&store).await);
        link(&store, a, b).await;
        link(&store, b, c).await;
        link(&store, c, a).await;

        let rows = store.reachable(a, Direction::Leafward, 100).await.unwrap();
        assert_eq!(
            rows,
            vec![
                TraversalRow { node: b, depth: 1 },
                TraversalRow { node: c, depth: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn delete_node_detaches_edges() {
        let store = SqliteStore::in_memory().await.unwrap();
        let (a, b) = (node(&store).await, node(&store).await);
        let edge = EdgeRecord::new(a, b, None);
        let edge_id = edge.id.clone();
        store.insert_edge(edge).await.unwrap();

        assert!(store.delete_node(b).await.unwrap());
        let detached = store.get_edge(&edge_id).await.unwrap().unwrap();
        assert_eq!(detached.parent, Some(a));
        assert_eq!(detached.child, None);
    }

    #[tokio::test]
    async fn edges_within_requires_both_endpoints() {
        let store = SqliteStore::in_memory().await.unwrap();
        let (a, b, c) = (node(&store).await, node(&store).await, node(&store).await);
        link(&store, a, b).await;
        link(&store, b, c).await;

        let within = store.edges_within(&[a, b]).await.unwrap();
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].parent, Some(a));
        assert_eq!(within[0].child, Some(b));
    }
}
