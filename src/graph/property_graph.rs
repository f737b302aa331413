//! Graph: an in-memory, read-only property graph with adjacency indexes

use super::engine::{CostPathError, CostPathResult};
use super::node::{Node, NodeId};
use super::relationship::Relationship;
use std::collections::HashMap;

/// An in-memory property graph.
///
/// Nodes and relationships are addressed internally by dense indexes so the
/// path engine can walk adjacency lists without hashing identifiers. Adjacency
/// lists keep relationship insertion order, which makes traversal order (and
/// therefore tie-breaking between equal-cost paths) deterministic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Human-readable name
    pub name: String,
    nodes: Vec<Node>,
    node_index: HashMap<NodeId, usize>,
    relationships: Vec<Relationship>,
    endpoints: Vec<(usize, usize)>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl Graph {
    /// Create a new, empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a node to the graph
    ///
    /// Adding a node whose id already exists replaces its labels and
    /// properties but keeps its adjacency.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        match self.node_index.get(&id) {
            Some(&idx) => self.nodes[idx] = node,
            None => {
                self.node_index.insert(id.clone(), self.nodes.len());
                self.nodes.push(node);
                self.outgoing.push(Vec::new());
                self.incoming.push(Vec::new());
            }
        }
        id
    }

    /// Add a relationship between two existing nodes
    pub fn add_relationship(&mut self, relationship: Relationship) -> CostPathResult<()> {
        let start = self.require(&relationship.start)?;
        let end = self.require(&relationship.end)?;

        let idx = self.relationships.len();
        self.relationships.push(relationship);
        self.endpoints.push((start, end));
        self.outgoing[start].push(idx);
        self.incoming[end].push(idx);
        Ok(())
    }

    fn require(&self, id: &NodeId) -> CostPathResult<usize> {
        self.node_index
            .get(id)
            .copied()
            .ok_or_else(|| CostPathError::NodeNotFound(id.clone()))
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &NodeId) -> Option<&Node> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Check if a node exists
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node_index.contains_key(id)
    }

    /// Get all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Get all relationships in insertion order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn relationship_at(&self, idx: usize) -> &Relationship {
        &self.relationships[idx]
    }

    /// (start, end) node indexes of a relationship
    pub(crate) fn endpoints_of(&self, idx: usize) -> (usize, usize) {
        self.endpoints[idx]
    }

    /// Relationship indexes starting at a node
    pub(crate) fn outgoing(&self, node: usize) -> &[usize] {
        &self.outgoing[node]
    }

    /// Relationship indexes ending at a node
    pub(crate) fn incoming(&self, node: usize) -> &[usize] {
        &self.incoming[node]
    }
}
