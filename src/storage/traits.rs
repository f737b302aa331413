//! Storage trait definitions

use crate::graph::{CostPathError, Graph, Node, NodeId, Relationship};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading graphs
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    #[error("Unsupported graph document format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate node id in graph document: {0}")]
    DuplicateNode(NodeId),

    #[error("Relationship {relationship} references unknown node {node}")]
    DanglingRelationship { relationship: String, node: NodeId },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Serialized form of a graph: a node list and a relationship list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl GraphDocument {
    /// Build a graph from this document
    ///
    /// Duplicate node ids and relationships pointing at unknown nodes are
    /// rejected rather than silently merged or dropped.
    pub fn into_graph(self, name: impl Into<String>) -> StorageResult<Graph> {
        let mut graph = Graph::new(name);
        let mut seen: HashSet<NodeId> = HashSet::with_capacity(self.nodes.len());

        for node in self.nodes {
            if !seen.insert(node.id.clone()) {
                return Err(StorageError::DuplicateNode(node.id));
            }
            graph.add_node(node);
        }

        for rel in self.relationships {
            let relationship = rel.id.to_string();
            if let Err(CostPathError::NodeNotFound(node)) = graph.add_relationship(rel) {
                return Err(StorageError::DanglingRelationship { relationship, node });
            }
        }

        Ok(graph)
    }

    /// Capture a graph as a document
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            relationships: graph.relationships().cloned().collect(),
        }
    }

    /// Parse a document, picking the format from the file extension
    pub fn parse(path: &Path, contents: &str) -> StorageResult<Self> {
        match DocumentFormat::from_path(path)? {
            DocumentFormat::Json => Ok(serde_json::from_str(contents)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(contents)?),
        }
    }

    /// Read and parse a document from disk
    pub fn read(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::parse(path, &contents)
    }

    /// Serialize the document to disk, picking the format from the extension
    pub fn write(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let path = path.as_ref();
        let contents = match DocumentFormat::from_path(path)? {
            DocumentFormat::Json => serde_json::to_string_pretty(self)?,
            DocumentFormat::Yaml => serde_yaml::to_string(self)?,
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// On-disk encodings understood by the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Extensions recognised as graph documents
    pub const EXTENSIONS: [&'static str; 3] = ["json", "yaml", "yml"];

    pub fn from_path(path: &Path) -> StorageResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            _ => Err(StorageError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Trait for read-only graph sources
///
/// Implementations must be thread-safe (Send + Sync) so an engine can be
/// shared across concurrent requests.
pub trait GraphStore: Send + Sync {
    /// Load a graph by name
    fn load_graph(&self, name: &str) -> StorageResult<Graph>;

    /// List the names of all graphs in the store
    fn list_graphs(&self) -> StorageResult<Vec<String>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: GraphStore + Sized {
    /// Open a store rooted at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;
}
