//! Tagged node/edge collections and the conversions between them.
//!
//! The caller says what a collection holds; nothing here probes the data to
//! guess. Handing a helper the wrong tag is a
//! [`CollectionError::TypeMismatch`].

use directed_core::error::CollectionError;
use directed_core::id::{EdgeId, NodeId};
use directed_store::model::EdgeRecord;
use directed_store::traits::GraphStore;

use crate::error::GraphError;

/// A collection of node or edge identifiers, tagged by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// A collection of node IDs.
    Nodes(Vec<NodeId>),
    /// A collection of edge IDs.
    Edges(Vec<EdgeId>),
}

impl Collection {
    /// Returns the collection's kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Collection::Nodes(_) => "node",
            Collection::Edges(_) => "edge",
        }
    }

    /// Number of identifiers in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Collection::Nodes(ids) => ids.len(),
            Collection::Edges(ids) => ids.len(),
        }
    }

    /// True if the collection holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<NodeId>> for Collection {
    fn from(ids: Vec<NodeId>) -> Self {
        Collection::Nodes(ids)
    }
}

impl From<Vec<EdgeId>> for Collection {
    fn from(ids: Vec<EdgeId>) -> Self {
        Collection::Edges(ids)
    }
}

/// Returns the edges whose endpoints are both members of the given node
/// collection.
///
/// # Errors
///
/// Returns [`CollectionError::TypeMismatch`] for an edge collection, or the
/// store's error if the query fails.
pub async fn edges_from_nodes(
    store: &dyn GraphStore,
    collection: &Collection,
) -> Result<Vec<EdgeRecord>, GraphError> {
    let Collection::Nodes(nodes) = collection else {
        return Err(CollectionError::TypeMismatch {
            expected: "node",
            actual: collection.kind(),
        }
        .into());
    };
    Ok(store.edges_within(nodes).await?)
}

/// Returns the nodes participating in the given edge collection, ascending
/// by ID.
///
/// # Errors
///
/// Returns [`CollectionError::TypeMismatch`] for a node collection, or the
/// store's error if the lookup fails.
pub async fn nodes_from_edges(
    store: &dyn GraphStore,
    collection: &Collection,
) -> Result<Vec<NodeId>, GraphError> {
    let Collection::Edges(edges) = collection else {
        return Err(CollectionError::TypeMismatch {
            expected: "edge",
            actual: collection.kind(),
        }
        .into());
    };
    let records = store.get_edges(edges).await?;
    let mut nodes: Vec<NodeId> = records
        .iter()
        .flat_map(|record| [record.parent, record.child])
        .flatten()
        .collect();
    nodes.sort();
    nodes.dedup();
    Ok(nodes)
}
