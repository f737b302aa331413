//! Core graph data structures

mod engine;
mod node;
mod property_graph;
mod relationship;


pub use engine::{
    CostPathEngine, CostPathError, CostPathResult, EngineSettings, DEFAULT_FRONTIER_LIMIT,
};
pub use node::{Node, NodeId, Properties, PropertyValue};
pub use property_graph::Graph;
pub use relationship::{Relationship, RelationshipId};
