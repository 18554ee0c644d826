//! Nestable, scope-local binding of the current graph instance.
//!
//! A [`GraphScope`] is an explicit context object owned by one execution
//! context. It is not process-global and holds no thread-local state:
//! callers that want an implicit "current graph" create a scope, share it
//! with their service, and bind graphs through RAII guards.
//!
//! Bindings are keyed by graph entity fullname, so concurrent scopes for
//! different graph types are independent, and nested scopes for the same
//! graph type restore LIFO on guard drop — on every exit path, including
//! early returns from a rejected mutation.

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::config::EntityName;
use crate::id::GraphId;

/// Scope-local bindings of "the current graph instance", one slot per graph
/// entity fullname.
///
/// # Example
///
/// ```
/// use directed_core::config::EntityName;
/// use directed_core::id::GraphId;
/// use directed_core::scope::GraphScope;
///
/// let scope = GraphScope::new();
/// let key = EntityName::parse("airports.AirlineGraph").unwrap();
///
/// assert_eq!(scope.current(&key), None);
/// {
///     let _guard = scope.enter(key.clone(), GraphId::new(1));
///     assert_eq!(scope.current(&key), Some(GraphId::new(1)));
/// }
/// assert_eq!(scope.current(&key), None);
/// ```
#[derive(Debug, Default)]
pub struct GraphScope {
    slots: Mutex<HashMap<EntityName, GraphId>>,
}

impl GraphScope {
    /// Creates a scope with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `graph` as the current instance for `key`, saving whatever was
    /// previously bound.
    ///
    /// The returned guard restores the previous binding (or clears the slot
    /// if there was none) when dropped.
    #[must_use]
    pub fn enter(&self, key: EntityName, graph: GraphId) -> ScopeGuard<'_> {
        let previous = self.slots.lock().insert(key.clone(), graph);
        ScopeGuard {
            scope: self,
            key,
            previous,
        }
    }

    /// Returns the graph currently bound for `key`, if any.
    #[must_use]
    pub fn current(&self, key: &EntityName) -> Option<GraphId> {
        self.slots.lock().get(key).copied()
    }
}

/// RAII guard for a [`GraphScope`] binding.
///
/// Dropping the guard restores the binding that was active when the guard
/// was created.
#[derive(Debug)]
pub struct ScopeGuard<'scope> {
    scope: &'scope GraphScope,
    key: EntityName,
    previous: Option<GraphId>,
}

impl ScopeGuard<'_> {
    /// The graph entity fullname this guard's binding is keyed by.
    #[must_use]
    pub fn key(&self) -> &EntityName {
        &self.key
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        let mut slots = self.scope.slots.lock();
        match self.previous.take() {
            Some(previous) => {
                slots.insert(self.key.clone(), previous);
            }
            None => {
                slots.remove(&self.key);
            }
        }
    }
}
