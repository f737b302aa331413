//! Query types shared by validation, filtering and the search

use serde::{Deserialize, Serialize};

/// Direction for relationship traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Follow relationships from start node to end node
    #[serde(alias = "OUTGOING", alias = "Outgoing")]
    Outgoing,
    /// Follow relationships from end node back to start node
    #[serde(alias = "INCOMING", alias = "Incoming")]
    Incoming,
    /// Follow relationships either way
    #[default]
    #[serde(alias = "BOTH", alias = "Both")]
    Both,
}

impl Direction {
    /// Whether a relationship walked in `traversal` direction is admitted.
    ///
    /// `traversal` is always `Outgoing` or `Incoming`: the direction a concrete
    /// step actually takes relative to the relationship.
    pub fn admits(self, traversal: Direction) -> bool {
        match self {
            Direction::Both => true,
            configured => configured == traversal,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::Outgoing => "outgoing",
            Direction::Incoming => "incoming",
            Direction::Both => "both",
        };
        f.write_str(s)
    }
}

/// A relationship type together with the direction it may be walked in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypedDirection {
    pub rel_type: String,
    pub direction: Direction,
}

impl TypedDirection {
    pub fn new(rel_type: impl Into<String>, direction: Direction) -> Self {
        Self {
            rel_type: rel_type.into(),
            direction,
        }
    }
}

/// Which relationships a search may follow
///
/// Either every relationship type in one global direction, or only the listed
/// types, each in its own direction. The two schemes never mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipFilter {
    Global(Direction),
    Typed(Vec<TypedDirection>),
}

impl Default for RelationshipFilter {
    fn default() -> Self {
        RelationshipFilter::Global(Direction::Both)
    }
}
