//! Validated configuration descriptor for a graph deployment.
//!
//! A [`GraphConfig`] names the three backing entity types (graph, edge,
//! node), fixes the structural [`Discipline`], and carries the optional
//! edge-insertion policies. Configurations are built through
//! [`ConfigBuilder`] and validated once; after that they are immutable.

use core::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::discipline::Discipline;

/// A fully-qualified entity name of the form `namespace.TypeName`.
///
/// The namespace segment starts with a lowercase letter, the type segment
/// with any letter; both continue with letters, digits, or underscores and
/// are at least two characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityName(Arc<str>);

impl EntityName {
    /// Parses and validates an entity fullname.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEntityName`] if the name does not match
    /// the `namespace.TypeName` pattern.
    pub fn parse(fullname: &str) -> Result<Self, ConfigError> {
        let Some((namespace, type_name)) = fullname.split_once('.') else {
            return Err(ConfigError::InvalidEntityName(fullname.to_string()));
        };

        if !segment_is_valid(namespace, |c| c.is_ascii_lowercase())
            || !segment_is_valid(type_name, |c| c.is_ascii_alphabetic())
            || type_name.contains('.')
        {
            return Err(ConfigError::InvalidEntityName(fullname.to_string()));
        }

        Ok(Self(fullname.into()))
    }

    /// Returns the namespace segment (before the dot).
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.0.split_once('.').map(|(ns, _)| ns).unwrap_or("")
    }

    /// Returns the type segment (after the dot).
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.0.split_once('.').map(|(_, ty)| ty).unwrap_or("")
    }

    /// Returns the full `namespace.TypeName` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks one fullname segment: a leading character satisfying `first`,
/// followed by one or more `[a-zA-Z0-9_]`.
fn segment_is_valid(segment: &str, first: impl Fn(char) -> bool) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if first(c) => {}
        _ => return false,
    }
    let mut rest = false;
    for c in chars {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return false;
        }
        rest = true;
    }
    rest
}

/// Errors raised while building or validating a [`GraphConfig`].
///
/// Configuration errors are always raised at validation time, never deferred
/// to mutation time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An entity fullname does not match `namespace.TypeName`.
    #[error("entity fullnames must be specified as 'namespace.TypeName', got '{0}'")]
    InvalidEntityName(String),

    /// The discipline tag given to the builder is not registered.
    #[error("discipline '{0}' not found in the set of registered disciplines")]
    UnknownDiscipline(String),

    /// A required builder field was never set.
    #[error("configuration is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Immutable-after-validation descriptor for one graph deployment.
///
/// # Example
///
/// ```
/// use directed_core::config::GraphConfig;
/// use directed_core::discipline::Discipline;
///
/// let config = GraphConfig::builder()
///     .graph_type(Discipline::Dag)
///     .graph_fullname("airports.AirlineGraph")
///     .edge_fullname("airports.AirRouteEdge")
///     .node_fullname("airports.AirportNode")
///     .children_quantity_max(3)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.graph_type(), Discipline::Dag);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    graph_type: Discipline,
    graph_fullname: EntityName,
    edge_fullname: EntityName,
    node_fullname: EntityName,
    children_quantity_max: Option<u32>,
    children_blank_null: bool,
    allow_duplicate_edges: bool,
    allow_self_links: bool,
}

impl GraphConfig {
    /// Starts building a configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The structural discipline, fixed at graph creation.
    #[must_use]
    pub fn graph_type(&self) -> Discipline {
        self.graph_type
    }

    /// Fullname of the graph entity type.
    #[must_use]
    pub fn graph_fullname(&self) -> &EntityName {
        &self.graph_fullname
    }

    /// Fullname of the edge entity type.
    #[must_use]
    pub fn edge_fullname(&self) -> &EntityName {
        &self.edge_fullname
    }

    /// Fullname of the node entity type.
    #[must_use]
    pub fn node_fullname(&self) -> &EntityName {
        &self.node_fullname
    }

    /// Maximum number of children per node, if a positive maximum was
    /// configured.
    #[must_use]
    pub fn children_quantity_max(&self) -> Option<u32> {
        self.children_quantity_max
    }

    /// Whether the derived `children` relation may be empty on entity forms.
    #[must_use]
    pub fn children_blank_null(&self) -> bool {
        self.children_blank_null
    }

    /// Whether multiple edges are allowed between one (parent, child) pair.
    #[must_use]
    pub fn allow_duplicate_edges(&self) -> bool {
        self.allow_duplicate_edges
    }

    /// Whether nodes may link back to themselves. Only consulted by the
    /// CYCLIC discipline; acyclic disciplines reject self links regardless.
    #[must_use]
    pub fn allow_self_links(&self) -> bool {
        self.allow_self_links
    }
}

/// Builder for [`GraphConfig`].
///
/// All validation happens in [`build`](ConfigBuilder::build); the builder
/// itself accepts anything.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    graph_type: Option<Discipline>,
    graph_type_tag: Option<String>,
    graph_fullname: Option<String>,
    edge_fullname: Option<String>,
    node_fullname: Option<String>,
    children_quantity_max: Option<u32>,
    children_blank_null: Option<bool>,
    allow_duplicate_edges: bool,
    allow_self_links: bool,
}

impl ConfigBuilder {
    /// Sets the structural discipline.
    #[must_use]
    pub fn graph_type(mut self, discipline: Discipline) -> Self {
        self.graph_type = Some(discipline);
        self
    }

    /// Sets the structural discipline from its registration tag
    /// (e.g. `"DAG"`). Resolution happens at build time.
    #[must_use]
    pub fn graph_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.graph_type_tag = Some(tag.into());
        self
    }

    /// Sets the graph entity fullname (`namespace.TypeName`).
    #[must_use]
    pub fn graph_fullname(mut self, fullname: impl Into<String>) -> Self {
        self.graph_fullname = Some(fullname.into());
        self
    }

    /// Sets the edge entity fullname (`namespace.TypeName`).
    #[must_use]
    pub fn edge_fullname(mut self, fullname: impl Into<String>) -> Self {
        self.edge_fullname = Some(fullname.into());
        self
    }

    /// Sets the node entity fullname (`namespace.TypeName`).
    #[must_use]
    pub fn node_fullname(mut self, fullname: impl Into<String>) -> Self {
        self.node_fullname = Some(fullname.into());
        self
    }

    /// Sets the maximum number of children per node. Zero is treated as
    /// unbounded.
    #[must_use]
    pub fn children_quantity_max(mut self, max: u32) -> Self {
        self.children_quantity_max = Some(max);
        self
    }

    /// Sets whether the derived `children` relation may be empty on entity
    /// forms. Defaults to `true`.
    #[must_use]
    pub fn children_blank_null(mut self, value: bool) -> Self {
        self.children_blank_null = Some(value);
        self
    }

    /// Allows multiple edges between one (parent, child) pair. Defaults to
    /// disallowed.
    #[must_use]
    pub fn allow_duplicate_edges(mut self, value: bool) -> Self {
        self.allow_duplicate_edges = value;
        self
    }

    /// Allows nodes to link back to themselves under CYCLIC. Defaults to
    /// disallowed.
    #[must_use]
    pub fn allow_self_links(mut self, value: bool) -> Self {
        self.allow_self_links = value;
        self
    }

    /// Validates the collected fields and produces the immutable
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required field is missing, an entity
    /// fullname is malformed, or the discipline tag is unknown.
    pub fn build(self) -> Result<GraphConfig, ConfigError> {
        let graph_type = match (self.graph_type, self.graph_type_tag) {
            (Some(discipline), _) => discipline,
            (None, Some(tag)) => {
                Discipline::from_tag(&tag).map_err(|_| ConfigError::UnknownDiscipline(tag))?
            }
            (None, None) => return Err(ConfigError::MissingField("graph_type")),
        };

        let graph_fullname = self
            .graph_fullname
            .ok_or(ConfigError::MissingField("graph_fullname"))?;
        let edge_fullname = self
            .edge_fullname
            .ok_or(ConfigError::MissingField("edge_fullname"))?;
        let node_fullname = self
            .node_fullname
            .ok_or(ConfigError::MissingField("node_fullname"))?;

        Ok(GraphConfig {
            graph_type,
            graph_fullname: EntityName::parse(&graph_fullname)?,
            edge_fullname: EntityName::parse(&edge_fullname)?,
            node_fullname: EntityName::parse(&node_fullname)?,
            // Any value of less than 1 resolves to unbounded.
            children_quantity_max: self.children_quantity_max.filter(|max| *max > 0),
            children_blank_null: self.children_blank_null.unwrap_or(true),
            allow_duplicate_edges: self.allow_duplicate_edges,
            allow_self_links: self.allow_self_links,
        })
    }
}
