//! Projection of found paths into their output form

use super::config::PathFinderConfig;
use super::path::PathCandidate;
use crate::graph::{NodeId, Properties, PropertyValue, RelationshipId};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Largest magnitude below which every integral `f64` is exact
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Output form of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedNode {
    pub id: NodeId,
    pub labels: Vec<String>,
    /// Requested properties that the node actually has
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Output form of a relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedRelationship {
    pub id: RelationshipId,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start_node: NodeId,
    pub end_node: NodeId,
    /// Requested properties that the relationship actually has
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Output form of a path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPath {
    pub nodes: Vec<ProjectedNode>,
    pub relationships: Vec<ProjectedRelationship>,
    /// Total cost; only present when a cost property was configured
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_cost"
    )]
    pub cost: Option<f64>,
}

impl ProjectedPath {
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}

/// Converts path candidates into `ProjectedPath`s for one request
#[derive(Debug, Clone, Copy)]
pub struct PathProjector<'c> {
    config: &'c PathFinderConfig,
}

impl<'c> PathProjector<'c> {
    pub fn new(config: &'c PathFinderConfig) -> Self {
        Self { config }
    }

    pub fn project(&self, path: &PathCandidate<'_>) -> ProjectedPath {
        let nodes = path
            .nodes
            .iter()
            .map(|node| ProjectedNode {
                id: node.id.clone(),
                labels: node.labels.clone(),
                properties: select(&node.properties, &self.config.node_properties),
            })
            .collect();

        let relationships = path
            .relationships
            .iter()
            .map(|rel| ProjectedRelationship {
                id: rel.id.clone(),
                rel_type: rel.rel_type.clone(),
                start_node: rel.start.clone(),
                end_node: rel.end.clone(),
                properties: select(&rel.properties, &self.config.relationship_properties),
            })
            .collect();

        ProjectedPath {
            nodes,
            relationships,
            cost: self.config.is_weighted().then_some(path.cost),
        }
    }
}

/// Integral totals go out as JSON integers, fractional ones as floats
fn serialize_cost<S: Serializer>(cost: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match *cost {
        Some(total) if total.fract() == 0.0 && total.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_some(&(total as i64))
        }
        Some(total) => serializer.serialize_some(&total),
        None => serializer.serialize_none(),
    }
}

/// Requested properties that exist; absent ones are left out entirely
fn select(properties: &Properties, names: &[String]) -> BTreeMap<String, PropertyValue> {
    names
        .iter()
        .filter_map(|name| {
            properties
                .get(name)
                .map(|value| (name.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, Relationship};

    fn candidate<'g>(a: &'g Node, b: &'g Node, rel: &'g Relationship) -> PathCandidate<'g> {
        PathCandidate {
            nodes: vec![a, b],
            relationships: vec![rel],
            cost: 5.0,
        }
    }

    fn fixtures() -> (Node, Node, Relationship) {
        let a = Node::with_id("one")
            .with_label("L1")
            .with_property("name", "one")
            .with_property("secret", "x");
        let b = Node::with_id("two").with_label("L2");
        let rel = Relationship::new(a.id.clone(), b.id.clone(), "R1")
            .with_id("r1")
            .with_property("cost", 5);
        (a, b, rel)
    }

    #[test]
    fn test_only_requested_existing_properties() {
        let (a, b, rel) = fixtures();
        let config = PathFinderConfig::between("one", "two").with_node_property("name");
        let projected = PathProjector::new(&config).project(&candidate(&a, &b, &rel));

        assert_eq!(projected.nodes[0].properties.len(), 1);
        assert_eq!(projected.nodes[0].properties["name"], PropertyValue::from("one"));
        // "two" has no name: omitted, not null
        assert!(projected.nodes[1].properties.is_empty());
        assert!(projected.relationships[0].properties.is_empty());
    }

    #[test]
    fn test_absent_properties_do_not_serialize() {
        let (a, b, rel) = fixtures();
        let config = PathFinderConfig::between("one", "two")
            .with_node_property("missing")
            .with_relationship_property("missing");
        let projected = PathProjector::new(&config).project(&candidate(&a, &b, &rel));
        let json = serde_json::to_value(&projected).unwrap();

        assert!(json["nodes"][0].get("properties").is_none());
        assert!(json["relationships"][0].get("properties").is_none());
        assert!(json.get("cost").is_none());
        assert_eq!(json["nodes"][0]["labels"][0], "L1");
        assert_eq!(json["relationships"][0]["type"], "R1");
        assert_eq!(json["relationships"][0]["startNode"], "one");
        assert_eq!(json["relationships"][0]["endNode"], "two");
    }

    #[test]
    fn test_cost_only_when_weighted() {
        let (a, b, rel) = fixtures();
        let unweighted = PathFinderConfig::between("one", "two");
        assert_eq!(PathProjector::new(&unweighted).project(&candidate(&a, &b, &rel)).cost, None);

        let weighted = PathFinderConfig::between("one", "two")
            .cost_property("cost")
            .with_relationship_property("cost");
        let projected = PathProjector::new(&weighted).project(&candidate(&a, &b, &rel));
        assert_eq!(projected.cost, Some(5.0));
        assert_eq!(projected.relationships[0].properties["cost"], PropertyValue::Int(5));
    }

    #[test]
    fn test_integral_cost_serializes_as_integer() {
        let (a, b, rel) = fixtures();
        let config = PathFinderConfig::between("one", "two").cost_property("cost");
        let mut path = candidate(&a, &b, &rel);
        let projected = PathProjector::new(&config).project(&path);
        let json = serde_json::to_string(&projected).unwrap();
        assert!(json.contains("\"cost\":5}"), "{json}");
        assert!(serde_json::to_value(&projected).unwrap()["cost"].is_i64());

        path.cost = 2.5;
        let projected = PathProjector::new(&config).project(&path);
        assert_eq!(serde_json::to_value(&projected).unwrap()["cost"], 2.5);

        // Integers deserialize back into the same total
        let back: ProjectedPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cost, Some(5.0));
    }
}
