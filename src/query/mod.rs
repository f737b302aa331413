//! Path queries for property graphs
//!
//! Validation turns a raw request into a `PathFinderConfig`; the enumerator
//! walks the graph in cost order; the limiter caps the result count; the
//! projector shapes each path for output.

mod config;
mod cost;
mod filter;
mod limit;
mod path;
mod projection;
mod types;

pub use config::{
    validate, NodeRef, PathFinderConfig, PathFinderRequest, TypeAndDirection, DEFAULT_COST,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_RESULTS,
};
pub use cost::CostResolver;
pub use filter::FilterPredicate;
pub use limit::ResultLimiter;
pub use path::{PathCandidate, SearchStats, ShortestPathEnumerator};
pub use projection::{PathProjector, ProjectedNode, ProjectedPath, ProjectedRelationship};
pub use types::{Direction, RelationshipFilter, TypedDirection};
