//! MCP tool parameter structs with schemars-derived JSON schemas.

use crate::query::{Direction, NodeRef, PathFinderRequest, TypeAndDirection};
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoadGraphParams {
    #[schemars(description = "Name to register the graph under")]
    pub name: String,
    #[schemars(description = "Path to a JSON or YAML graph document")]
    pub path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTypeParam {
    #[serde(rename = "type")]
    pub rel_type: String,
    #[schemars(description = "'outgoing', 'incoming' or 'both' (default)")]
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindPathsParams {
    #[schemars(description = "Name of a loaded graph")]
    pub graph: String,
    #[schemars(description = "Id of the start node (string or integer)")]
    pub start_node: NodeRef,
    #[schemars(description = "Id of the end node (string or integer)")]
    pub end_node: NodeRef,
    #[schemars(description = "Maximum relationships per path (default 3)")]
    pub max_depth: Option<i64>,
    #[schemars(description = "Maximum number of paths (default 10)")]
    pub max_results: Option<i64>,
    #[schemars(description = "Relationship property holding the traversal cost")]
    pub cost_property: Option<String>,
    #[schemars(description = "'outgoing', 'incoming' or 'both'; excludes relationshipTypes")]
    pub direction: Option<String>,
    #[schemars(description = "Allowed relationship types with their directions")]
    pub relationship_types: Option<Vec<RelationshipTypeParam>>,
    #[schemars(description = "Node properties to include in the output")]
    pub node_properties: Option<Vec<String>>,
    #[schemars(description = "Relationship properties to include in the output")]
    pub relationship_properties: Option<Vec<String>>,
}

fn parse_direction(raw: &str) -> Result<Direction, String> {
    match raw.to_ascii_lowercase().as_str() {
        "outgoing" => Ok(Direction::Outgoing),
        "incoming" => Ok(Direction::Incoming),
        "both" => Ok(Direction::Both),
        other => Err(format!("unknown direction '{other}'")),
    }
}

impl FindPathsParams {
    /// Convert into a path request; fails only on unknown direction names
    pub fn into_request(self) -> Result<(String, PathFinderRequest), String> {
        let direction = self.direction.as_deref().map(parse_direction).transpose()?;
        let relationship_types = match self.relationship_types {
            Some(types) => Some(
                types
                    .into_iter()
                    .map(|t| {
                        Ok(TypeAndDirection {
                            rel_type: t.rel_type,
                            direction: t.direction.as_deref().map(parse_direction).transpose()?,
                        })
                    })
                    .collect::<Result<Vec<_>, String>>()?,
            ),
            None => None,
        };

        let request = PathFinderRequest {
            start_node: Some(self.start_node),
            end_node: Some(self.end_node),
            max_depth: self.max_depth,
            max_results: self.max_results,
            cost_property: self.cost_property,
            direction,
            relationship_types,
            node_properties: self.node_properties.unwrap_or_default(),
            relationship_properties: self.relationship_properties.unwrap_or_default(),
        };
        Ok((self.graph, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_into_request() {
        let params: FindPathsParams = serde_json::from_value(serde_json::json!({
            "graph": "roads",
            "startNode": "a",
            "endNode": "b",
            "relationshipTypes": [{"type": "R1", "direction": "OUTGOING"}, {"type": "R2"}],
            "nodeProperties": ["name"]
        }))
        .unwrap();
        let (graph, request) = params.into_request().unwrap();
        assert_eq!(graph, "roads");
        assert_eq!(request.start_node, Some(NodeRef::Id("a".into())));
        let types = request.relationship_types.unwrap();
        assert_eq!(types[0].direction, Some(Direction::Outgoing));
        assert_eq!(types[1].direction, None);
        assert_eq!(request.node_properties, vec!["name".to_string()]);
    }

    #[test]
    fn test_integer_node_ids_accepted() {
        let params: FindPathsParams = serde_json::from_value(serde_json::json!({
            "graph": "fixture", "startNode": 0, "endNode": "2"
        }))
        .unwrap();
        let (_, request) = params.into_request().unwrap();
        assert_eq!(request.start_node, Some(NodeRef::Number(0)));
        assert_eq!(request.end_node, Some(NodeRef::Id("2".into())));

        let schema = serde_json::to_value(schemars::schema_for!(FindPathsParams)).unwrap();
        assert!(schema["properties"]["startNode"].is_object());
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let params: FindPathsParams = serde_json::from_value(serde_json::json!({
            "graph": "roads", "startNode": "a", "endNode": "b", "direction": "sideways"
        }))
        .unwrap();
        assert!(params.into_request().unwrap_err().contains("sideways"));
    }
}
