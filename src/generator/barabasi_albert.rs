//! Barabási–Albert preferential attachment graphs

use super::sampling::WeightedReservoirSampler;
use super::{to_usize, GeneratorError, GeneratorResult, GraphBuilder, GraphOptions};
use crate::graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tracing::debug;

/// Grows a graph from a complete core of `edges_per_node + 1` nodes; every
/// later node links to `edges_per_node` distinct earlier nodes, picked with
/// probability proportional to their degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarabasiAlbertConfig {
    pub nodes: u64,
    pub edges_per_node: u64,
}

impl BarabasiAlbertConfig {
    pub fn new(nodes: u64, edges_per_node: u64) -> Self {
        Self {
            nodes,
            edges_per_node,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.edges_per_node >= 1 && self.nodes > self.edges_per_node
    }

    pub fn validate(&self) -> GeneratorResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeneratorError::InvalidBarabasiAlbert {
                nodes: self.nodes,
                edges_per_node: self.edges_per_node,
            })
        }
    }

    /// Relationship count of the generated graph
    pub fn expected_edges(&self) -> u128 {
        let n = u128::from(self.nodes);
        let k = u128::from(self.edges_per_node);
        k * (k + 1) / 2 + n.saturating_sub(k + 1) * k
    }

    pub fn generate_seeded(&self, seed: u64, options: &GraphOptions) -> GeneratorResult<Graph> {
        self.generate(StdRng::seed_from_u64(seed), options)
    }

    pub fn generate<R: Rng>(&self, rng: R, options: &GraphOptions) -> GeneratorResult<Graph> {
        self.validate()?;
        let n = to_usize(self.nodes)?;
        let k = to_usize(self.edges_per_node)?;

        let mut builder = GraphBuilder::new(options, n)?;
        let mut sampler = WeightedReservoirSampler::new(rng);
        let mut degrees = vec![0u64; n];

        let core = k + 1;
        for i in 0..core {
            for j in (i + 1)..core {
                builder.connect(sampler.rng(), i, j)?;
                degrees[i] += 1;
                degrees[j] += 1;
            }
        }

        for node in core..n {
            let mut targets = BTreeSet::new();
            while targets.len() < k {
                match sampler.choose_omitting(&degrees[..node], &targets) {
                    Some(target) => {
                        targets.insert(target);
                    }
                    None => break,
                }
            }
            for &target in &targets {
                builder.connect(sampler.rng(), node, target)?;
                degrees[target] += 1;
            }
            degrees[node] = targets.len() as u64;
        }

        let graph = builder.finish();
        debug!(
            nodes = graph.node_count(),
            relationships = graph.relationship_count(),
            "generated Barabási–Albert graph"
        );
        Ok(graph)
    }
}
