//! The discipline-bound service: configuration, policy, store, and hooks.
//!
//! A [`GraphService`] is the entry point of the crate. It binds a validated
//! [`GraphConfig`] to a [`GraphStore`], fixes the discipline's check set,
//! and mints the graph and node handles everything else goes through.

use std::sync::Arc;

use directed_core::config::GraphConfig;
use directed_core::discipline::CheckSet;
use directed_core::id::{GraphId, NodeId};
use directed_core::scope::{GraphScope, ScopeGuard};
use directed_store::traits::GraphStore;

use crate::error::GraphError;
use crate::graph::GraphRef;
use crate::hooks::MutationHooks;
use crate::node::NodeRef;
use crate::traverse::DEFAULT_MAX_DEPTH;

pub(crate) struct ServiceInner {
    pub(crate) config: GraphConfig,
    pub(crate) checks: CheckSet,
    pub(crate) store: Arc<dyn GraphStore>,
    pub(crate) hooks: MutationHooks,
}

/// A discipline-bound binding of configuration, policy, store, hooks, and
/// scope.
///
/// Cloning is cheap and shares the store and hooks. Each execution context
/// should derive its own scope view with [`scoped`](GraphService::scoped);
/// scope bindings never leak between views that don't share a
/// [`GraphScope`].
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MemoryStore::new());
/// let service = GraphService::new(config, store);
///
/// let graph = service.create_graph().await?;
/// let _guard = graph.enter();
///
/// let a = service.create_node().await?;
/// let b = service.create_node().await?;
/// a.add_child(&b).await?;
/// ```
#[derive(Clone)]
pub struct GraphService {
    pub(crate) inner: Arc<ServiceInner>,
    pub(crate) scope: Arc<GraphScope>,
    pub(crate) max_depth: u32,
}

impl std::fmt::Debug for GraphService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphService")
            .field("config", &self.inner.config)
            .field("checks", &self.inner.checks)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

impl GraphService {
    /// Creates a service for one graph deployment.
    ///
    /// The discipline's check set is fixed here from the configuration.
    #[must_use]
    pub fn new(config: GraphConfig, store: Arc<dyn GraphStore>) -> Self {
        let checks = config.graph_type().checks();
        Self {
            inner: Arc::new(ServiceInner {
                config,
                checks,
                store,
                hooks: MutationHooks::new(),
            }),
            scope: Arc::new(GraphScope::new()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Returns a view with a different traversal depth bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns a view bound to the given scope context.
    ///
    /// Use one scope per execution context; views created this way share
    /// the store and hooks but not the "current graph" bindings.
    #[must_use]
    pub fn scoped(&self, scope: Arc<GraphScope>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            scope,
            max_depth: self.max_depth,
        }
    }

    /// The validated configuration this service was built from.
    #[must_use]
    pub fn config(&self) -> &GraphConfig {
        &self.inner.config
    }

    /// The check set composed for the configured discipline.
    #[must_use]
    pub fn checks(&self) -> CheckSet {
        self.inner.checks
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &dyn GraphStore {
        self.inner.store.as_ref()
    }

    /// The mutation observer registry.
    #[must_use]
    pub fn hooks(&self) -> &MutationHooks {
        &self.inner.hooks
    }

    /// The scope context of this view.
    #[must_use]
    pub fn scope(&self) -> &GraphScope {
        &self.scope
    }

    /// The traversal depth bound of this view.
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Binds `graph` as the current instance for this service's graph type.
    ///
    /// The binding lasts until the returned guard is dropped.
    #[must_use]
    pub fn enter(&self, graph: GraphId) -> ScopeGuard<'_> {
        self.scope
            .enter(self.inner.config.graph_fullname().clone(), graph)
    }

    /// The graph currently bound in this view's scope, if any.
    #[must_use]
    pub fn current_graph(&self) -> Option<GraphId> {
        self.scope.current(self.inner.config.graph_fullname())
    }

    /// Creates a graph under the configured discipline.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn create_graph(&self) -> Result<GraphRef, GraphError> {
        let record = self
            .inner
            .store
            .create_graph(self.inner.config.graph_type())
            .await?;
        Ok(GraphRef::new(self.clone(), record))
    }

    /// Fetches a graph by ID.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn graph(&self, id: GraphId) -> Result<Option<GraphRef>, GraphError> {
        let record = self.inner.store.get_graph(id).await?;
        Ok(record.map(|record| GraphRef::new(self.clone(), record)))
    }

    /// Creates a node.
    ///
    /// Nodes are created independently of any graph; only edges bind them
    /// to one.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn create_node(&self) -> Result<NodeRef, GraphError> {
        let record = self.inner.store.create_node().await?;
        Ok(NodeRef::new(self.clone(), record.id))
    }

    /// Returns a handle for an existing node ID.
    ///
    /// The handle is constructed without a store round trip; operations on
    /// it surface whatever the store knows.
    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeRef {
        NodeRef::new(self.clone(), id)
    }
}
