//! Random graph generators
//!
//! Seeded generators for synthetic test graphs. Node ids are `0..nodes` as
//! strings, so requests can refer to them by integer id; relationships are
//! numbered in creation order.

mod barabasi_albert;
mod erdos_renyi;
mod sampling;

pub use barabasi_albert::BarabasiAlbertConfig;
pub use erdos_renyi::ErdosRenyiConfig;
pub use sampling::{RandomIndexChoice, WeightedReservoirSampler};

use crate::graph::{CostPathError, Graph, Node, NodeId, Relationship};
use rand::Rng;
use thiserror::Error;

/// Default relationship type of generated relationships
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "RELATED_TO";
/// Default upper bound of generated costs
pub const DEFAULT_MAX_COST: u32 = 10;

/// Errors raised by the generators
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid Erdős–Rényi config: {nodes} nodes cannot hold {edges} edges")]
    InvalidErdosRenyi { nodes: u64, edges: u64 },

    #[error("Invalid Barabási–Albert config: {nodes} nodes, {edges_per_node} edges per node")]
    InvalidBarabasiAlbert { nodes: u64, edges_per_node: u64 },

    #[error("Maximum cost must be at least 1, got {0}")]
    InvalidMaxCost(u32),

    #[error("Graph of {0} elements is too large to generate")]
    TooLarge(u64),

    #[error("Graph error: {0}")]
    Graph(#[from] CostPathError),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Shape of generated graphs beyond their topology
#[derive(Debug, Clone, PartialEq)]
pub struct GraphOptions {
    /// Name of the generated graph
    pub name: String,
    pub relationship_type: String,
    /// Label put on every node, if any
    pub label: Option<String>,
    /// When set, every relationship gets an integer cost in `1..=max_cost`
    pub cost_property: Option<String>,
    pub max_cost: u32,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            name: "generated".to_string(),
            relationship_type: DEFAULT_RELATIONSHIP_TYPE.to_string(),
            label: None,
            cost_property: None,
            max_cost: DEFAULT_MAX_COST,
        }
    }
}

impl GraphOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_cost_property(mut self, property: impl Into<String>, max_cost: u32) -> Self {
        self.cost_property = Some(property.into());
        self.max_cost = max_cost;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn validate(&self) -> GeneratorResult<()> {
        if self.cost_property.is_some() && self.max_cost == 0 {
            return Err(GeneratorError::InvalidMaxCost(self.max_cost));
        }
        Ok(())
    }
}

/// Accumulates nodes and relationships of a generated graph
struct GraphBuilder<'o> {
    graph: Graph,
    options: &'o GraphOptions,
    next_relationship: u64,
}

impl<'o> GraphBuilder<'o> {
    fn new(options: &'o GraphOptions, nodes: usize) -> GeneratorResult<Self> {
        options.validate()?;
        let mut graph = Graph::new(options.name.clone());
        for i in 0..nodes {
            let mut node = Node::with_id(i.to_string());
            if let Some(label) = &options.label {
                node = node.with_label(label.clone());
            }
            graph.add_node(node);
        }
        Ok(Self {
            graph,
            options,
            next_relationship: 0,
        })
    }

    fn connect<R: Rng>(&mut self, rng: &mut R, start: usize, end: usize) -> GeneratorResult<()> {
        let mut relationship = Relationship::new(
            NodeId::from(start.to_string()),
            NodeId::from(end.to_string()),
            self.options.relationship_type.clone(),
        )
        .with_id(self.next_relationship.to_string());

        if let Some(property) = &self.options.cost_property {
            let cost = rng.gen_range(1..=self.options.max_cost);
            relationship = relationship.with_property(property.clone(), i64::from(cost));
        }

        self.graph.add_relationship(relationship)?;
        self.next_relationship += 1;
        Ok(())
    }

    fn finish(self) -> Graph {
        self.graph
    }
}

fn to_usize(n: u64) -> GeneratorResult<usize> {
    usize::try_from(n).map_err(|_| GeneratorError::TooLarge(n))
}
