//! Cost-ordered enumeration of simple paths
//!
//! `ShortestPathEnumerator` is a pull-driven iterator: each call to `next`
//! runs the search just far enough to produce the next path, so a consumer that
//! stops pulling stops all work. Paths come out in non-decreasing cost order;
//! equal-cost paths come out in the order they were discovered.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use super::config::PathFinderConfig;
use super::cost::CostResolver;
use super::filter::FilterPredicate;
use super::types::Direction;
use crate::graph::{
    CostPathError, CostPathResult, EngineSettings, Graph, Node, NodeId, Relationship,
};
use tracing::{debug, trace};

/// A simple path between the start and end node, with its cumulative cost
#[derive(Debug, Clone, PartialEq)]
pub struct PathCandidate<'g> {
    /// Nodes from start to end (inclusive)
    pub nodes: Vec<&'g Node>,
    /// Relationships between consecutive nodes
    pub relationships: Vec<&'g Relationship>,
    /// Sum of the relationship costs
    pub cost: f64,
}

impl PathCandidate<'_> {
    /// Number of relationships in the path
    pub fn hops(&self) -> usize {
        self.relationships.len()
    }

    pub fn node_ids(&self) -> Vec<&NodeId> {
        self.nodes.iter().map(|n| &n.id).collect()
    }
}

/// One step of a partial path. Partial paths share their prefixes, so the
/// frontier never copies a path to extend it.
#[derive(Debug)]
struct Segment {
    node: usize,
    via: Option<usize>,
    parent: Option<Rc<Segment>>,
    hops: usize,
}

impl Segment {
    fn root(node: usize) -> Rc<Self> {
        Rc::new(Self {
            node,
            via: None,
            parent: None,
            hops: 0,
        })
    }

    fn extend(self: &Rc<Self>, node: usize, via: usize) -> Rc<Self> {
        Rc::new(Self {
            node,
            via: Some(via),
            parent: Some(Rc::clone(self)),
            hops: self.hops + 1,
        })
    }

    /// Whether `node` already occurs on this partial path
    fn visits(&self, node: usize) -> bool {
        let mut current = Some(self);
        while let Some(segment) = current {
            if segment.node == node {
                return true;
            }
            current = segment.parent.as_deref();
        }
        false
    }
}

/// Frontier entry, ordered so `BinaryHeap` pops the lowest (cost, sequence)
#[derive(Debug)]
struct FrontierEntry {
    cost: f64,
    sequence: u64,
    tail: Rc<Segment>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Counters describing the work a search has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Partial paths popped and expanded
    pub expanded: usize,
    /// Completed paths handed to the caller
    pub emitted: usize,
    /// Largest frontier size observed
    pub peak_frontier: usize,
}

/// Lazily enumerates simple paths from start to end in non-decreasing cost
/// order, each at most `max_depth` relationships long.
pub struct ShortestPathEnumerator<'g> {
    graph: &'g Graph,
    end: usize,
    max_depth: usize,
    costs: CostResolver,
    filter: FilterPredicate,
    frontier: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
    frontier_limit: usize,
    stats: SearchStats,
    done: bool,
}

impl<'g> ShortestPathEnumerator<'g> {
    /// Prepare a search. No traversal happens until the first `next`.
    pub fn new(
        graph: &'g Graph,
        config: &PathFinderConfig,
        settings: EngineSettings,
    ) -> CostPathResult<Self> {
        let start = graph
            .index_of(&config.start_node)
            .ok_or_else(|| CostPathError::NodeNotFound(config.start_node.clone()))?;
        let end = graph
            .index_of(&config.end_node)
            .ok_or_else(|| CostPathError::NodeNotFound(config.end_node.clone()))?;

        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            cost: 0.0,
            sequence: 0,
            tail: Segment::root(start),
        });

        debug!(
            graph = %graph.name,
            start = %config.start_node,
            end = %config.end_node,
            max_depth = config.max_depth,
            "starting path search"
        );

        Ok(Self {
            graph,
            end,
            max_depth: config.max_depth,
            costs: CostResolver::from_config(config),
            filter: FilterPredicate::new(config.filter.clone()),
            frontier,
            next_sequence: 1,
            frontier_limit: settings.frontier_limit,
            stats: SearchStats {
                peak_frontier: 1,
                ..Default::default()
            },
            done: false,
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn expand(&mut self, entry: &FrontierEntry) -> CostPathResult<()> {
        self.stats.expanded += 1;
        let node = entry.tail.node;
        let hops = entry.tail.hops + 1;

        let steps = [
            (self.graph.outgoing(node), Direction::Outgoing),
            (self.graph.incoming(node), Direction::Incoming),
        ];

        for (relationships, traversal) in steps {
            for &rel_idx in relationships {
                let relationship = self.graph.relationship_at(rel_idx);
                if !self.filter.allows(relationship, traversal) {
                    continue;
                }

                let (start, end) = self.graph.endpoints_of(rel_idx);
                let far = match traversal {
                    Direction::Incoming => start,
                    _ => end,
                };

                // Keep paths simple; this also rules out self-loops
                if entry.tail.visits(far) {
                    continue;
                }
                // A full-length partial path that misses the end is a dead end
                if hops == self.max_depth && far != self.end {
                    continue;
                }

                if self.frontier.len() >= self.frontier_limit {
                    return Err(CostPathError::FrontierExhausted {
                        limit: self.frontier_limit,
                    });
                }

                self.frontier.push(FrontierEntry {
                    cost: entry.cost + self.costs.cost(relationship),
                    sequence: self.next_sequence,
                    tail: entry.tail.extend(far, rel_idx),
                });
                self.next_sequence += 1;
            }
        }

        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        Ok(())
    }

    fn materialize(&self, entry: &FrontierEntry) -> PathCandidate<'g> {
        let mut nodes = Vec::with_capacity(entry.tail.hops + 1);
        let mut relationships = Vec::with_capacity(entry.tail.hops);

        let mut current = Some(entry.tail.as_ref());
        while let Some(segment) = current {
            nodes.push(self.graph.node_at(segment.node));
            if let Some(rel_idx) = segment.via {
                relationships.push(self.graph.relationship_at(rel_idx));
            }
            current = segment.parent.as_deref();
        }

        nodes.reverse();
        relationships.reverse();

        PathCandidate {
            nodes,
            relationships,
            cost: entry.cost,
        }
    }

    fn finish(&mut self) {
        self.done = true;
        debug!(
            expanded = self.stats.expanded,
            emitted = self.stats.emitted,
            peak_frontier = self.stats.peak_frontier,
            "path search exhausted"
        );
    }
}

impl<'g> Iterator for ShortestPathEnumerator<'g> {
    type Item = CostPathResult<PathCandidate<'g>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(entry) = self.frontier.pop() {
            if entry.tail.node == self.end {
                self.stats.emitted += 1;
                let path = self.materialize(&entry);
                trace!(cost = path.cost, hops = path.hops(), "emitting path");
                return Some(Ok(path));
            }

            if entry.tail.hops < self.max_depth {
                if let Err(e) = self.expand(&entry) {
                    self.done = true;
                    self.frontier.clear();
                    return Some(Err(e));
                }
            }
        }

        self.finish();
        None
    }
}

impl std::iter::FusedIterator for ShortestPathEnumerator<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, Relationship};

    /// A→B (5), B→C (1), A→D (1), D→E (2), E→C (1)
    fn weighted_graph() -> Graph {
        let mut graph = Graph::new("weighted");
        for id in ["A", "B", "C", "D", "E"] {
            graph.add_node(Node::with_id(id));
        }
        for (from, to, cost) in [("A", "B", 5), ("B", "C", 1), ("A", "D", 1), ("D", "E", 2), ("E", "C", 1)] {
            graph
                .add_relationship(
                    Relationship::new(from.into(), to.into(), "R").with_property("cost", cost),
                )
                .unwrap();
        }
        graph
    }

    fn ids(path: &PathCandidate<'_>) -> Vec<String> {
        path.nodes.iter().map(|n| n.id.to_string()).collect()
    }

    fn run<'g>(graph: &'g Graph, config: &PathFinderConfig) -> Vec<PathCandidate<'g>> {
        ShortestPathEnumerator::new(graph, config, EngineSettings::default())
            .unwrap()
            .collect::<CostPathResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_cheapest_path_first() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "C")
            .max_depth(4)
            .cost_property("cost")
            .direction(Direction::Outgoing);
        let paths = run(&graph, &config);

        assert_eq!(paths.len(), 2);
        assert_eq!(ids(&paths[0]), vec!["A", "D", "E", "C"]);
        assert_eq!(paths[0].cost, 4.0);
        assert_eq!(ids(&paths[1]), vec!["A", "B", "C"]);
        assert_eq!(paths[1].cost, 6.0);
    }

    #[test]
    fn test_uniform_cost_prefers_fewer_hops() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "C")
            .max_depth(4)
            .direction(Direction::Outgoing);
        let paths = run(&graph, &config);

        assert_eq!(ids(&paths[0]), vec!["A", "B", "C"]);
        assert_eq!(paths[0].cost, 2.0);
        assert_eq!(ids(&paths[1]), vec!["A", "D", "E", "C"]);
        assert_eq!(paths[1].cost, 3.0);
    }

    #[test]
    fn test_max_depth_prunes_long_paths() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "C")
            .max_depth(2)
            .cost_property("cost")
            .direction(Direction::Outgoing);
        let paths = run(&graph, &config);

        assert_eq!(paths.len(), 1);
        assert_eq!(ids(&paths[0]), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_same_start_and_end() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "A").cost_property("cost");
        let paths = run(&graph, &config);

        assert_eq!(paths.len(), 1);
        assert_eq!(ids(&paths[0]), vec!["A"]);
        assert_eq!(paths[0].hops(), 0);
        assert_eq!(paths[0].cost, 0.0);
    }

    #[test]
    fn test_incoming_direction_walks_backwards() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("C", "A")
            .max_depth(4)
            .direction(Direction::Incoming);
        let paths = run(&graph, &config);
        assert_eq!(paths.len(), 2);
        assert_eq!(ids(&paths[0]), vec!["C", "B", "A"]);

        let outgoing = PathFinderConfig::between("C", "A")
            .max_depth(4)
            .direction(Direction::Outgoing);
        assert!(run(&graph, &outgoing).is_empty());
    }

    #[test]
    fn test_both_directions_find_more_paths() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("B", "D").max_depth(4);
        let paths = run(&graph, &config);

        // B-A-D and B-C-E-D
        assert_eq!(paths.len(), 2);
        assert_eq!(ids(&paths[0]), vec!["B", "A", "D"]);
        assert_eq!(ids(&paths[1]), vec!["B", "C", "E", "D"]);
    }

    #[test]
    fn test_paths_are_simple() {
        let mut graph = weighted_graph();
        // Cycle back to the start
        graph
            .add_relationship(Relationship::new("C".into(), "A".into(), "R"))
            .unwrap();
        graph
            .add_relationship(Relationship::new("B".into(), "B".into(), "R"))
            .unwrap();

        let config = PathFinderConfig::between("A", "E").max_depth(6);
        for path in run(&graph, &config) {
            let mut seen = ids(&path);
            let len = seen.len();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), len, "path revisits a node");
        }
    }

    #[test]
    fn test_equal_costs_follow_discovery_order() {
        let mut graph = Graph::new("diamond");
        for id in ["S", "X", "Y", "T"] {
            graph.add_node(Node::with_id(id));
        }
        for (from, to) in [("S", "X"), ("S", "Y"), ("X", "T"), ("Y", "T")] {
            graph
                .add_relationship(Relationship::new(from.into(), to.into(), "R"))
                .unwrap();
        }

        let config = PathFinderConfig::between("S", "T").direction(Direction::Outgoing);
        let paths = run(&graph, &config);
        assert_eq!(ids(&paths[0]), vec!["S", "X", "T"]);
        assert_eq!(ids(&paths[1]), vec!["S", "Y", "T"]);
    }

    #[test]
    fn test_zero_cost_relationships() {
        let mut graph = Graph::new("zero");
        for id in ["S", "X", "T"] {
            graph.add_node(Node::with_id(id));
        }
        graph
            .add_relationship(Relationship::new("S".into(), "T".into(), "R").with_property("w", 1))
            .unwrap();
        graph
            .add_relationship(Relationship::new("S".into(), "X".into(), "R").with_property("w", 0))
            .unwrap();
        graph
            .add_relationship(Relationship::new("X".into(), "T".into(), "R").with_property("w", 0))
            .unwrap();

        let config = PathFinderConfig::between("S", "T")
            .cost_property("w")
            .direction(Direction::Outgoing);
        let paths = run(&graph, &config);
        assert_eq!(ids(&paths[0]), vec!["S", "X", "T"]);
        assert_eq!(paths[0].cost, 0.0);
        assert_eq!(paths[1].cost, 1.0);
    }

    #[test]
    fn test_lazy_enumeration_stops_when_caller_stops() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "C")
            .max_depth(4)
            .cost_property("cost")
            .direction(Direction::Outgoing);
        let mut search = ShortestPathEnumerator::new(&graph, &config, EngineSettings::default()).unwrap();

        let first = search.next().unwrap().unwrap();
        assert_eq!(first.cost, 4.0);
        let after_first = search.stats();
        assert_eq!(after_first.emitted, 1);

        // A-B-C is still in the frontier, not yet emitted
        let second = search.next().unwrap().unwrap();
        assert_eq!(second.cost, 6.0);
        assert!(search.next().is_none());
        assert!(search.next().is_none());
    }

    #[test]
    fn test_frontier_limit_is_an_error() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "C").max_depth(4);
        let settings = EngineSettings { frontier_limit: 1 };
        let mut search = ShortestPathEnumerator::new(&graph, &config, settings).unwrap();

        let result = search.next().unwrap();
        assert!(matches!(result, Err(CostPathError::FrontierExhausted { limit: 1 })));
        assert!(search.next().is_none());
    }

    #[test]
    fn test_unknown_endpoint() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("A", "Z");
        let err = ShortestPathEnumerator::new(&graph, &config, EngineSettings::default()).err();
        assert!(matches!(err, Some(CostPathError::NodeNotFound(id)) if id.as_str() == "Z"));
    }

    #[test]
    fn test_relationships_connect_consecutive_nodes() {
        let graph = weighted_graph();
        let config = PathFinderConfig::between("B", "D").max_depth(4);
        for path in run(&graph, &config) {
            for (i, rel) in path.relationships.iter().enumerate() {
                let a = &path.nodes[i].id;
                let b = &path.nodes[i + 1].id;
                assert!(
                    (&rel.start == a && &rel.end == b) || (&rel.start == b && &rel.end == a),
                    "relationship {} does not join {} and {}",
                    rel.id,
                    a,
                    b
                );
            }
        }
    }
}
