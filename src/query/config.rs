//! Path finder request validation
//!
//! A `PathFinderRequest` is the raw, client-supplied shape. `validate` turns it
//! into a `PathFinderConfig` or rejects it before any traversal work happens:
//! structural problems first (`InvalidConfig`), then node existence
//! (`NodeNotFound`).

use super::types::{Direction, RelationshipFilter, TypedDirection};
use crate::graph::{CostPathError, CostPathResult, Graph, NodeId};
use serde::{Deserialize, Serialize};

/// Default maximum number of hops when a request does not set one
pub const DEFAULT_MAX_DEPTH: usize = 3;
/// Default maximum number of paths when a request does not set one
pub const DEFAULT_MAX_RESULTS: usize = 10;
/// Cost of a relationship with no usable cost property
pub const DEFAULT_COST: f64 = 1.0;

/// Node reference as it appears in a request: a string id or an integer id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum NodeRef {
    Number(i64),
    Id(String),
}

impl From<NodeRef> for NodeId {
    fn from(r: NodeRef) -> Self {
        match r {
            NodeRef::Number(n) => NodeId::from(n),
            NodeRef::Id(s) => NodeId::from(s),
        }
    }
}

impl From<&str> for NodeRef {
    fn from(s: &str) -> Self {
        NodeRef::Id(s.to_string())
    }
}

/// One `{type, direction}` entry of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAndDirection {
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Raw path finder request, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathFinderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_node: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_node: Option<NodeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_types: Option<Vec<TypeAndDirection>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_properties: Vec<String>,
}

impl PathFinderRequest {
    /// Create a request between two nodes with everything else defaulted
    pub fn between(start: impl Into<NodeRef>, end: impl Into<NodeRef>) -> Self {
        Self {
            start_node: Some(start.into()),
            end_node: Some(end.into()),
            ..Default::default()
        }
    }

    /// Structural validation only; does not look at the graph
    pub fn into_config(self) -> CostPathResult<PathFinderConfig> {
        let max_depth = positive("maxDepth", self.max_depth, DEFAULT_MAX_DEPTH)?;
        let max_results = positive("maxResults", self.max_results, DEFAULT_MAX_RESULTS)?;

        let filter = match (self.direction, self.relationship_types) {
            (Some(_), Some(_)) => {
                return Err(CostPathError::invalid(
                    "specify either a global direction or relationshipTypes, not both",
                ))
            }
            (Some(direction), None) => RelationshipFilter::Global(direction),
            (None, None) => RelationshipFilter::default(),
            (None, Some(types)) => {
                if types.is_empty() {
                    return Err(CostPathError::invalid("relationshipTypes must not be empty"));
                }
                let mut pairs = Vec::with_capacity(types.len());
                for entry in types {
                    if entry.rel_type.trim().is_empty() {
                        return Err(CostPathError::invalid(
                            "relationshipTypes entries need a non-blank type",
                        ));
                    }
                    pairs.push(TypedDirection::new(
                        entry.rel_type,
                        entry.direction.unwrap_or_default(),
                    ));
                }
                RelationshipFilter::Typed(pairs)
            }
        };

        if let Some(property) = &self.cost_property {
            if property.trim().is_empty() {
                return Err(CostPathError::invalid("costProperty must not be blank"));
            }
        }

        let start_node = self
            .start_node
            .ok_or_else(|| CostPathError::invalid("startNode is required"))?;
        let end_node = self
            .end_node
            .ok_or_else(|| CostPathError::invalid("endNode is required"))?;

        Ok(PathFinderConfig {
            start_node: start_node.into(),
            end_node: end_node.into(),
            max_depth,
            max_results,
            cost_property: self.cost_property,
            default_cost: DEFAULT_COST,
            filter,
            node_properties: dedup(self.node_properties),
            relationship_properties: dedup(self.relationship_properties),
        })
    }
}

fn positive(field: &str, value: Option<i64>, default: usize) -> CostPathResult<usize> {
    match value {
        None => Ok(default),
        Some(v) if v >= 1 => usize::try_from(v)
            .map_err(|_| CostPathError::invalid(format!("{field} is out of range"))),
        Some(v) => Err(CostPathError::invalid(format!(
            "{field} must be a positive integer, got {v}"
        ))),
    }
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Validated path finder configuration. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFinderConfig {
    pub start_node: NodeId,
    pub end_node: NodeId,
    /// Maximum number of relationships in a returned path
    pub max_depth: usize,
    /// Maximum number of returned paths
    pub max_results: usize,
    /// Relationship property holding the cost of traversing it
    pub cost_property: Option<String>,
    pub default_cost: f64,
    pub filter: RelationshipFilter,
    /// Node properties to include in the output, when present
    pub node_properties: Vec<String>,
    /// Relationship properties to include in the output, when present
    pub relationship_properties: Vec<String>,
}

impl PathFinderConfig {
    /// Create a configuration between two nodes with default limits
    pub fn between(start: impl Into<NodeId>, end: impl Into<NodeId>) -> Self {
        Self {
            start_node: start.into(),
            end_node: end.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_results: DEFAULT_MAX_RESULTS,
            cost_property: None,
            default_cost: DEFAULT_COST,
            filter: RelationshipFilter::default(),
            node_properties: Vec::new(),
            relationship_properties: Vec::new(),
        }
    }

    /// Set maximum path length in hops
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set maximum number of paths
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Weight relationships by a property
    pub fn cost_property(mut self, property: impl Into<String>) -> Self {
        self.cost_property = Some(property.into());
        self
    }

    /// Follow every relationship type in one direction
    pub fn direction(mut self, direction: Direction) -> Self {
        self.filter = RelationshipFilter::Global(direction);
        self
    }

    /// Restrict traversal to a relationship type in a direction
    ///
    /// The first call replaces a global direction; later calls add types.
    pub fn with_type(mut self, rel_type: impl Into<String>, direction: Direction) -> Self {
        let pair = TypedDirection::new(rel_type, direction);
        match &mut self.filter {
            RelationshipFilter::Typed(pairs) => pairs.push(pair),
            RelationshipFilter::Global(_) => self.filter = RelationshipFilter::Typed(vec![pair]),
        }
        self
    }

    /// Include a node property in the output
    pub fn with_node_property(mut self, name: impl Into<String>) -> Self {
        self.node_properties.push(name.into());
        self
    }

    /// Include a relationship property in the output
    pub fn with_relationship_property(mut self, name: impl Into<String>) -> Self {
        self.relationship_properties.push(name.into());
        self
    }

    /// Whether the caller asked for cost accounting
    pub fn is_weighted(&self) -> bool {
        self.cost_property.is_some()
    }

    /// Check limits and filter shape, then that both endpoints exist
    pub fn check(&self, graph: &Graph) -> CostPathResult<()> {
        if self.max_depth == 0 {
            return Err(CostPathError::invalid("maxDepth must be a positive integer"));
        }
        if self.max_results == 0 {
            return Err(CostPathError::invalid("maxResults must be a positive integer"));
        }
        if matches!(&self.filter, RelationshipFilter::Typed(pairs) if pairs.is_empty()) {
            return Err(CostPathError::invalid("relationshipTypes must not be empty"));
        }
        if !(self.default_cost.is_finite() && self.default_cost >= 0.0) {
            return Err(CostPathError::invalid("default cost must be finite and non-negative"));
        }

        for id in [&self.start_node, &self.end_node] {
            if !graph.contains_node(id) {
                return Err(CostPathError::NodeNotFound(id.clone()));
            }
        }
        Ok(())
    }
}

/// Validate a raw request against a graph
pub fn validate(request: PathFinderRequest, graph: &Graph) -> CostPathResult<PathFinderConfig> {
    let config = request.into_config()?;
    config.check(graph)?;
    Ok(config)
}
