//! Node handles: the edge mutation API and traversal accessors.
//!
//! A [`NodeRef`] is a cheap handle binding a node ID to its service. All
//! parent/child relationships are established and severed here, through the
//! discipline's checks; reads go straight to the reachability engine.

use directed_core::id::NodeId;
use directed_store::model::EdgeRecord;

use crate::checks::{
    children_quantity_check, circular_check, duplicate_edge_check, self_link_check,
};
use crate::error::GraphError;
use crate::hooks::MutationEvent;
use crate::service::GraphService;
use crate::traverse;

/// A node bound to its discipline's service.
#[derive(Debug, Clone)]
pub struct NodeRef {
    service: GraphService,
    id: NodeId,
}

impl NodeRef {
    pub(crate) fn new(service: GraphService, id: NodeId) -> Self {
        Self { service, id }
    }

    /// This node's ID.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    /// Distinct direct children, ascending by ID.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn children(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.service.store().children_of(self.id).await?)
    }

    /// Distinct direct parents, ascending by ID.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn parents(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.service.store().parents_of(self.id).await?)
    }

    /// All nodes in connected paths in a leafward direction, nearest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn descendants(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(traverse::descendants(self.service.store(), self.id, self.service.max_depth()).await?)
    }

    /// Total number of descendant nodes.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn descendants_count(&self) -> Result<u64, GraphError> {
        Ok(self.descendants().await?.len() as u64)
    }

    /// Descendants prepended with this node.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn self_and_descendants(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(
            traverse::self_and_descendants(self.service.store(), self.id, self.service.max_depth())
                .await?,
        )
    }

    /// Descendants appended with this node.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn descendants_and_self(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(
            traverse::descendants_and_self(self.service.store(), self.id, self.service.max_depth())
                .await?,
        )
    }

    /// All nodes in connected paths in a rootward direction, nearest first.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn ancestors(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(traverse::ancestors(self.service.store(), self.id, self.service.max_depth()).await?)
    }

    /// Total number of ancestor nodes.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn ancestors_count(&self) -> Result<u64, GraphError> {
        Ok(self.ancestors().await?.len() as u64)
    }

    /// Ancestors prepended with this node.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn self_and_ancestors(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(
            traverse::self_and_ancestors(self.service.store(), self.id, self.service.max_depth())
                .await?,
        )
    }

    /// Ancestors appended with this node.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn ancestors_and_self(&self) -> Result<Vec<NodeId>, GraphError> {
        Ok(
            traverse::ancestors_and_self(self.service.store(), self.id, self.service.max_depth())
                .await?,
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────

    /// Attaches `child` as a child of this node.
    ///
    /// Runs the discipline's checks, persists one edge (owned by the
    /// scope's current graph, if one is bound), emits
    /// [`MutationEvent::ChildAdded`], and returns the created edge.
    ///
    /// # Errors
    ///
    /// Propagates whichever constraint violation triggered; the edge is not
    /// persisted on failure.
    pub async fn add_child(&self, child: &NodeRef) -> Result<EdgeRecord, GraphError> {
        let config = self.service.config();
        let checks = self.service.checks();
        let store = self.service.store();

        if checks.self_link {
            self_link_check(config, self.id, child.id)?;
        }
        if checks.circularity {
            circular_check(store, self.id, child.id).await?;
        }
        if !config.allow_duplicate_edges() {
            duplicate_edge_check(store, self.id, child.id).await?;
        }
        children_quantity_check(store, config, self.id).await?;

        let edge = EdgeRecord::new(self.id, child.id, self.service.current_graph());
        store.insert_edge(edge.clone()).await?;

        self.service.hooks().emit(&MutationEvent::ChildAdded {
            parent: self.id,
            child: child.id,
            graph: config.graph_fullname().clone(),
        });
        Ok(edge)
    }

    /// Attaches each candidate as a child, in iteration order.
    ///
    /// Returns the created edges in the same order. A failure on one
    /// candidate does not roll back prior successes.
    ///
    /// # Errors
    ///
    /// Propagates the first failure.
    pub async fn add_children(&self, children: &[NodeRef]) -> Result<Vec<EdgeRecord>, GraphError> {
        let mut edges = Vec::with_capacity(children.len());
        for child in children {
            edges.push(self.add_child(child).await?);
        }
        Ok(edges)
    }

    /// Attaches `parent` as a parent of this node.
    ///
    /// # Errors
    ///
    /// Propagates whichever constraint violation triggered on the parent's
    /// side.
    pub async fn add_parent(&self, parent: &NodeRef) -> Result<EdgeRecord, GraphError> {
        parent.add_child(self).await
    }

    /// Attaches each candidate as a parent, in iteration order.
    ///
    /// # Errors
    ///
    /// Propagates the first failure; prior successes are not rolled back.
    pub async fn add_parents(&self, parents: &[NodeRef]) -> Result<Vec<EdgeRecord>, GraphError> {
        let mut edges = Vec::with_capacity(parents.len());
        for parent in parents {
            edges.push(parent.add_child(self).await?);
        }
        Ok(edges)
    }

    /// Removes the edge(s) connecting this node to `child`, optionally
    /// deleting the child node as well.
    ///
    /// Emits [`MutationEvent::ChildRemoved`] on success. Returns false
    /// without raising when `child` is not currently a child; that is a
    /// caller-precondition issue, reported through logging.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn remove_child(
        &self,
        child: &NodeRef,
        delete_node: bool,
    ) -> Result<bool, GraphError> {
        let store = self.service.store();
        if !store.children_of(self.id).await?.contains(&child.id) {
            tracing::debug!(
                parent = %self.id,
                child = %child.id,
                "`remove_child` target was not a child of the current node; no action taken"
            );
            return Ok(false);
        }

        store.delete_edges_between(self.id, child.id).await?;
        if delete_node {
            store.delete_node(child.id).await?;
        }

        self.service.hooks().emit(&MutationEvent::ChildRemoved {
            parent: self.id,
            child: child.id,
            graph: self.service.config().graph_fullname().clone(),
        });
        Ok(true)
    }

    /// Removes the edges connecting this node to each child specified.
    ///
    /// If `children` is given, removes exactly those; if `remove_all` is
    /// set, removes every current child. Calling with neither is a no-op
    /// that reports the caller's error via logging and returns false.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn remove_children(
        &self,
        children: Option<Vec<NodeRef>>,
        remove_all: bool,
        delete_nodes: bool,
    ) -> Result<bool, GraphError> {
        if let Some(children) = children {
            let mut all_successful = true;
            for child in &children {
                all_successful &= self.remove_child(child, delete_nodes).await?;
            }
            if !all_successful {
                tracing::debug!(parent = %self.id, "one or more children could not be removed");
            }
            Ok(all_successful)
        } else if remove_all {
            let current = self.service.store().children_of(self.id).await?;
            let mut all_successful = true;
            for id in current {
                all_successful &= self
                    .remove_child(&self.service.node(id), delete_nodes)
                    .await?;
            }
            Ok(all_successful)
        } else {
            tracing::warn!(
                parent = %self.id,
                "`remove_children` should receive an argument for `children` or `remove_all`; no action taken"
            );
            Ok(false)
        }
    }

    /// Deletes this node from the store, detaching (not deleting) its
    /// edges. Returns false if the node was already absent.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn delete(&self) -> Result<bool, GraphError> {
        Ok(self.service.store().delete_node(self.id).await?)
    }
}
