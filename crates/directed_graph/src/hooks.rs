//! Mutation events and the observer registry.
//!
//! All observers receive `&MutationEvent` and can match on variants for
//! typed access. Delivery is synchronous and best-effort: observers run on
//! the mutating call's stack, there is no retry, and missed events are not
//! persisted.
//!
//! # Example
//!
//! ```ignore
//! service.hooks().register_observer("audit", |event: &MutationEvent| {
//!     if let MutationEvent::ChildAdded { parent, child, .. } = event {
//!         tracing::info!("edge {} -> {} created", parent, child);
//!     }
//! })?;
//! ```

use core::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use directed_core::config::EntityName;
use directed_core::id::NodeId;

/// Unified event enum for edge mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    /// An edge was created from `parent` to `child`.
    ChildAdded {
        /// The parent node of the created edge.
        parent: NodeId,
        /// The child node of the created edge.
        child: NodeId,
        /// Fullname of the graph entity the mutation ran under.
        graph: EntityName,
    },

    /// The edge(s) from `parent` to `child` were removed.
    ChildRemoved {
        /// The parent node of the removed edge(s).
        parent: NodeId,
        /// The child node of the removed edge(s).
        child: NodeId,
        /// Fullname of the graph entity the mutation ran under.
        graph: EntityName,
    },
}

impl MutationEvent {
    /// Returns the event's kind name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MutationEvent::ChildAdded { .. } => "ChildAdded",
            MutationEvent::ChildRemoved { .. } => "ChildRemoved",
        }
    }

    /// The parent node of the mutated edge.
    #[must_use]
    pub fn parent(&self) -> NodeId {
        match self {
            MutationEvent::ChildAdded { parent, .. }
            | MutationEvent::ChildRemoved { parent, .. } => *parent,
        }
    }

    /// The child node of the mutated edge.
    #[must_use]
    pub fn child(&self) -> NodeId {
        match self {
            MutationEvent::ChildAdded { child, .. } | MutationEvent::ChildRemoved { child, .. } => {
                *child
            }
        }
    }
}

impl fmt::Display for MutationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationEvent::ChildAdded {
                parent,
                child,
                graph,
            } => {
                write!(f, "ChildAdded({parent} -> {child} in {graph})")
            }
            MutationEvent::ChildRemoved {
                parent,
                child,
                graph,
            } => {
                write!(f, "ChildRemoved({parent} -> {child} in {graph})")
            }
        }
    }
}

/// Errors from observer registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    /// An observer with the same name is already registered.
    #[error("observer '{0}' is already registered")]
    DuplicateObserver(String),
}

type BoxedObserver = Arc<dyn Fn(&MutationEvent) + Send + Sync>;

/// Registry of mutation observers.
///
/// Cloning the registry shares the underlying observer list.
#[derive(Clone, Default)]
pub struct MutationHooks {
    observers: Arc<RwLock<Vec<(String, BoxedObserver)>>>,
}

impl MutationHooks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named observer for all mutation events.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateObserver`] if the name is taken.
    pub fn register_observer(
        &self,
        name: impl Into<String>,
        observer: impl Fn(&MutationEvent) + Send + Sync + 'static,
    ) -> Result<(), HookError> {
        let name = name.into();
        let mut observers = self.observers.write();
        if observers.iter().any(|(existing, _)| *existing == name) {
            return Err(HookError::DuplicateObserver(name));
        }
        observers.push((name, Arc::new(observer)));
        Ok(())
    }

    /// Removes an observer by name. Returns false if it was not registered.
    pub fn unregister_observer(&self, name: &str) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|(existing, _)| existing != name);
        before != observers.len()
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Delivers an event to every registered observer, in registration
    /// order.
    pub fn emit(&self, event: &MutationEvent) {
        let observers: Vec<BoxedObserver> = self
            .observers
            .read()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(event);
        }
    }
}

impl fmt::Debug for MutationHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationHooks")
            .field("observers", &self.observer_count())
            .finish()
    }
}
