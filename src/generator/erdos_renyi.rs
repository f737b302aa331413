//! Erdős–Rényi G(n, m) random graphs

use super::sampling::RandomIndexChoice;
use super::{to_usize, GeneratorError, GeneratorResult, GraphBuilder, GraphOptions};
use crate::graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::debug;

/// `nodes` nodes joined by `edges` relationships, each node pair joined at
/// most once and no node joined to itself. Relationship direction is random.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErdosRenyiConfig {
    pub nodes: u64,
    pub edges: u64,
}

impl ErdosRenyiConfig {
    pub fn new(nodes: u64, edges: u64) -> Self {
        Self { nodes, edges }
    }

    /// Number of distinct node pairs among `nodes` nodes
    pub fn max_edges(nodes: u64) -> u128 {
        let n = u128::from(nodes);
        n * n.saturating_sub(1) / 2
    }

    pub fn is_valid(&self) -> bool {
        self.nodes >= 2 && self.edges >= 1 && u128::from(self.edges) <= Self::max_edges(self.nodes)
    }

    pub fn validate(&self) -> GeneratorResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeneratorError::InvalidErdosRenyi {
                nodes: self.nodes,
                edges: self.edges,
            })
        }
    }

    pub fn generate_seeded(&self, seed: u64, options: &GraphOptions) -> GeneratorResult<Graph> {
        self.generate(StdRng::seed_from_u64(seed), options)
    }

    pub fn generate<R: Rng>(&self, rng: R, options: &GraphOptions) -> GeneratorResult<Graph> {
        self.validate()?;
        let n = to_usize(self.nodes)?;
        let m = to_usize(self.edges)?;
        let total = Self::max_edges(self.nodes);

        let mut builder = GraphBuilder::new(options, n)?;
        let mut choice = RandomIndexChoice::new(rng);

        if (m as u128) * 2 <= total {
            // Sparse: draw pairs and reject repeats
            let mut seen = HashSet::with_capacity(m);
            while seen.len() < m {
                let Some(first) = choice.index(n) else { break };
                let Some(second) = choice.index_except(n, first) else { break };
                if seen.insert((first.min(second), first.max(second))) {
                    builder.connect(choice.rng(), first, second)?;
                }
            }
        } else {
            // Dense: sample pair ranks without replacement
            let total = usize::try_from(total)
                .map_err(|_| GeneratorError::TooLarge(u64::try_from(total).unwrap_or(u64::MAX)))?;
            let mut ranks = rand::seq::index::sample(choice.rng(), total, m).into_vec();
            ranks.sort_unstable();
            let mut wanted = ranks.into_iter().peekable();

            let mut rank = 0;
            'rows: for i in 0..n {
                for j in (i + 1)..n {
                    if wanted.peek() == Some(&rank) {
                        wanted.next();
                        if choice.rng().gen_bool(0.5) {
                            builder.connect(choice.rng(), i, j)?;
                        } else {
                            builder.connect(choice.rng(), j, i)?;
                        }
                        if wanted.peek().is_none() {
                            break 'rows;
                        }
                    }
                    rank += 1;
                }
            }
        }

        let graph = builder.finish();
        debug!(
            nodes = graph.node_count(),
            relationships = graph.relationship_count(),
            "generated Erdős–Rényi graph"
        );
        Ok(graph)
    }
}
