//! Directed, typed relationship between two nodes

use super::node::{NodeId, Properties, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a relationship
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(String);

impl RelationshipId {
    /// Create a new random RelationshipId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a RelationshipId from a string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RelationshipId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RelationshipId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RelationshipId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A directed relationship. Direction runs from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Unique identifier
    #[serde(default)]
    pub id: RelationshipId,
    /// Type of relationship (e.g., "R1", "KNOWS")
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Start node
    #[serde(rename = "startNode")]
    pub start: NodeId,
    /// End node
    #[serde(rename = "endNode")]
    pub end: NodeId,
    /// Additional properties
    #[serde(default)]
    pub properties: Properties,
}

impl Relationship {
    /// Create a new relationship with a random id
    pub fn new(start: NodeId, end: NodeId, rel_type: impl Into<String>) -> Self {
        Self {
            id: RelationshipId::new(),
            rel_type: rel_type.into(),
            start,
            end,
            properties: HashMap::new(),
        }
    }

    /// Set the relationship id
    pub fn with_id(mut self, id: impl Into<RelationshipId>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a property to the relationship
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property by name
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}
