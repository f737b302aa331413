//! costpath: cost-ordered path search over property graphs
//!
//! Finds simple paths between two nodes and returns them cheapest first,
//! within limits on path length and result count. Relationships can be
//! weighted by a numeric property and restricted by type and direction.
//!
//! # Core Concepts
//!
//! - **Graph**: read-only property graph of labelled nodes and typed, directed relationships
//! - **PathFinderConfig**: validated request (endpoints, limits, cost property, filters)
//! - **ShortestPathEnumerator**: lazy search yielding paths in non-decreasing cost order
//!
//! # Example
//!
//! ```
//! use costpath::{find_paths, EngineSettings, Graph, Node, NodeId, PathFinderConfig, Relationship};
//!
//! let mut graph = Graph::new("roads");
//! for id in ["a", "b", "c"] {
//!     graph.add_node(Node::with_id(id));
//! }
//! graph.add_relationship(Relationship::new(NodeId::from("a"), NodeId::from("b"), "ROAD").with_property("km", 5)).unwrap();
//! graph.add_relationship(Relationship::new(NodeId::from("b"), NodeId::from("c"), "ROAD").with_property("km", 1)).unwrap();
//! graph.add_relationship(Relationship::new(NodeId::from("a"), NodeId::from("c"), "ROAD").with_property("km", 9)).unwrap();
//!
//! let config = PathFinderConfig::between("a", "c").cost_property("km");
//! let paths = find_paths(&graph, &config, EngineSettings::default()).unwrap();
//! assert_eq!(paths[0].cost, Some(6.0));
//! assert_eq!(paths[1].cost, Some(9.0));
//! ```

mod graph;
pub mod api;
pub mod generator;
pub mod mcp;
pub mod query;
pub mod storage;

pub use api::{find_paths, ApiResponse, ApiStatus, PathFinderApi};
pub use graph::{
    CostPathEngine, CostPathError, CostPathResult, EngineSettings, Graph, Node, NodeId,
    Properties, PropertyValue, Relationship, RelationshipId, DEFAULT_FRONTIER_LIMIT,
};
pub use query::{
    Direction, PathCandidate, PathFinderConfig, PathFinderRequest, ProjectedPath,
    RelationshipFilter, ShortestPathEnumerator,
};
pub use storage::{FileStore, GraphDocument, GraphStore, OpenStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
