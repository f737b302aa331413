//! Common test utilities for costpath integration tests
//!
//! Provides the seven-node fixture graph and helpers for reading path lists
//! out of JSON responses.

use costpath::{CostPathEngine, Graph, Node, NodeId, PathFinderApi, Relationship};
use serde_json::Value;
use std::sync::Arc;

/// Name the fixture graph is registered under
pub const GRAPH: &str = "fixture";

/// Seven nodes with ids `0..=6` named "one" to "seven".
///
/// ```text
/// one -R1(5)-> two -R2(1)-> three -R1(1)-> seven
/// one -R2(1)-> four -R1(2)-> five -R1(1)-> three
/// two -R2(1)-> four
/// one -R1(1)-> six -R1(no cost)-> seven
/// ```
pub fn fixture_graph() -> Graph {
    let mut graph = Graph::new(GRAPH);
    let nodes: [(&str, &[&str]); 7] = [
        ("one", &["L1", "L2"]),
        ("two", &["L2"]),
        ("three", &["L1", "L2"]),
        ("four", &["L2"]),
        ("five", &["L1"]),
        ("six", &["L1"]),
        ("seven", &["L1"]),
    ];
    for (i, (name, labels)) in nodes.iter().enumerate() {
        let mut node = Node::with_id(i.to_string()).with_property("name", *name);
        for label in labels.iter() {
            node = node.with_label(*label);
        }
        graph.add_node(node);
    }

    let relationships: [(i64, i64, &str, Option<i64>); 9] = [
        (0, 1, "R1", Some(5)),
        (1, 2, "R2", Some(1)),
        (0, 3, "R2", Some(1)),
        (3, 4, "R1", Some(2)),
        (4, 2, "R1", Some(1)),
        (1, 3, "R2", Some(1)),
        (0, 5, "R1", Some(1)),
        (5, 6, "R1", None),
        (2, 6, "R1", Some(1)),
    ];
    for (i, (start, end, rel_type, cost)) in relationships.into_iter().enumerate() {
        let mut rel = Relationship::new(NodeId::from(start), NodeId::from(end), rel_type)
            .with_id(i.to_string().as_str());
        if let Some(cost) = cost {
            rel = rel.with_property("cost", cost);
        }
        graph
            .add_relationship(rel)
            .expect("fixture relationships join existing nodes");
    }
    graph
}

/// API with the fixture graph registered
pub fn fixture_api() -> PathFinderApi {
    let engine = CostPathEngine::new();
    engine.insert_graph(fixture_graph());
    PathFinderApi::new(Arc::new(engine))
}

/// Node ids of every path in a JSON path list
pub fn node_ids(body: &Value) -> Vec<Vec<String>> {
    body.as_array()
        .expect("path list")
        .iter()
        .map(|path| {
            path["nodes"]
                .as_array()
                .expect("nodes")
                .iter()
                .map(|n| n["id"].as_str().expect("node id").to_string())
                .collect()
        })
        .collect()
}

/// Costs of every path in a JSON path list; fixture costs are integers
pub fn costs(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("path list")
        .iter()
        .map(|path| path["cost"].as_i64().expect("integral cost"))
        .collect()
}

/// Shorthand for an expected node id sequence
pub fn ids(path: &[u32]) -> Vec<String> {
    path.iter().map(|i| i.to_string()).collect()
}
