//! The closed set of structural disciplines and their check policies.
//!
//! A discipline is a fixed bundle of structural invariants enforced on every
//! edge insertion. The set is closed: new disciplines are added here, not
//! registered at runtime.

use core::fmt;

use crate::error::ResolveError;

/// A structural discipline for a directed graph.
///
/// The discipline is fixed when a graph is created and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// Unconstrained directed graph. Cycles are allowed; self links are
    /// rejected unless explicitly permitted by configuration.
    Cyclic,
    /// Directed acyclic graph. No edge may create a cycle.
    Dag,
    /// Acyclic graph whose underlying undirected graph is a tree.
    ///
    /// Composes the same checks as [`Discipline::Dag`]; the single-parent
    /// property is not separately enforced.
    Polytree,
    /// Rooted tree with all edges pointing away from the root.
    ///
    /// Composes the same checks as [`Discipline::Dag`]; the in-degree
    /// property is not separately enforced.
    Arborescence,
}

/// All registered disciplines, in tag order.
pub const ALL_DISCIPLINES: [Discipline; 4] = [
    Discipline::Cyclic,
    Discipline::Dag,
    Discipline::Polytree,
    Discipline::Arborescence,
];

impl Discipline {
    /// Resolves a discipline from its registration tag.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownDiscipline`] if the tag was never
    /// registered.
    pub fn from_tag(tag: &str) -> Result<Self, ResolveError> {
        match tag {
            "CYCLIC" => Ok(Discipline::Cyclic),
            "DAG" => Ok(Discipline::Dag),
            "POLYTREE" => Ok(Discipline::Polytree),
            "ARBORESCENCE" => Ok(Discipline::Arborescence),
            other => Err(ResolveError::UnknownDiscipline(other.to_string())),
        }
    }

    /// Returns the discipline's registration tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Discipline::Cyclic => "CYCLIC",
            Discipline::Dag => "DAG",
            Discipline::Polytree => "POLYTREE",
            Discipline::Arborescence => "ARBORESCENCE",
        }
    }

    /// Returns the set of structural checks composed for this discipline.
    ///
    /// The duplicate-edge and children-quantity checks are opt-in through
    /// configuration and apply to every discipline, so they are not part of
    /// the per-discipline set.
    #[must_use]
    pub fn checks(&self) -> CheckSet {
        match self {
            Discipline::Cyclic => CheckSet {
                self_link: true,
                circularity: false,
            },
            // Circularity subsumes the self-link check: a self link is a
            // degenerate cycle and is rejected regardless of configuration.
            Discipline::Dag | Discipline::Polytree | Discipline::Arborescence => CheckSet {
                self_link: false,
                circularity: true,
            },
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The subset of constraint checks a discipline composes on edge insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSet {
    /// Reject self links when configuration disallows them.
    pub self_link: bool,
    /// Reject edges that would create a cycle (self links included).
    pub circularity: bool,
}
