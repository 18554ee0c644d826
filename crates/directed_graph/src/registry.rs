//! Registry of graph services, keyed by graph entity fullname.
//!
//! The discipline table itself is closed (see
//! [`Discipline`](directed_core::discipline::Discipline)); this registry
//! resolves *deployments* — a configured service per graph entity — the way
//! the host wired them at startup.

use hashbrown::HashMap;
use parking_lot::RwLock;

use directed_core::config::EntityName;
use directed_core::error::ResolveError;

use crate::service::GraphService;

/// Registry of configured services.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: RwLock<HashMap<EntityName, GraphService>>,
}

impl ServiceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a service under its configured graph fullname, replacing
    /// any previous registration for that name.
    pub fn register(&self, service: GraphService) {
        let key = service.config().graph_fullname().clone();
        self.services.write().insert(key, service);
    }

    /// Resolves the service registered for a graph entity fullname.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EntityResolution`] if nothing is registered
    /// under the name.
    pub fn get(&self, graph_fullname: &EntityName) -> Result<GraphService, ResolveError> {
        self.services
            .read()
            .get(graph_fullname)
            .cloned()
            .ok_or_else(|| ResolveError::EntityResolution(graph_fullname.clone()))
    }

    /// Lists the registered graph fullnames, in no particular order.
    #[must_use]
    pub fn services_list(&self) -> Vec<EntityName> {
        self.services.read().keys().cloned().collect()
    }
}
