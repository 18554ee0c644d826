//! Graph handles.

use directed_core::discipline::Discipline;
use directed_core::id::GraphId;
use directed_core::scope::ScopeGuard;
use directed_store::model::GraphRecord;

use crate::error::GraphError;
use crate::service::GraphService;

/// A graph identity bound to its service.
#[derive(Debug, Clone)]
pub struct GraphRef {
    service: GraphService,
    record: GraphRecord,
}

impl GraphRef {
    pub(crate) fn new(service: GraphService, record: GraphRecord) -> Self {
        Self { service, record }
    }

    /// This graph's ID.
    #[must_use]
    pub fn id(&self) -> GraphId {
        self.record.id
    }

    /// The discipline this graph was created under.
    #[must_use]
    pub fn kind(&self) -> Discipline {
        self.record.kind
    }

    /// Binds this graph as the current instance in the service's scope.
    ///
    /// While the returned guard is alive, edges created without an explicit
    /// owner default to this graph.
    #[must_use]
    pub fn enter(&self) -> ScopeGuard<'_> {
        self.service.enter(self.record.id)
    }

    /// Counts the edges owned by this graph.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn edge_count(&self) -> Result<u64, GraphError> {
        Ok(self.service.store().graph_edge_count(self.record.id).await?)
    }

    /// Deletes this graph and the edges it owns. Nodes are untouched.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn delete(self) -> Result<bool, GraphError> {
        Ok(self.service.store().delete_graph(self.record.id).await?)
    }
}
