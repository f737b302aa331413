//! CostPathEngine: registry of named graphs shared by path requests

use super::node::NodeId;
use super::property_graph::Graph;
use crate::storage::{GraphStore, StorageError};
use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur in costpath operations
#[derive(Debug, Error)]
pub enum CostPathError {
    /// Structurally invalid request; no traversal is attempted
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    /// The search frontier grew beyond the configured limit
    #[error("Search frontier exceeded {limit} partial paths")]
    FrontierExhausted { limit: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CostPathError {
    /// Shorthand for an invalid configuration error
    pub fn invalid(message: impl Into<String>) -> Self {
        CostPathError::InvalidConfig(message.into())
    }
}

/// Result type for costpath operations
pub type CostPathResult<T> = Result<T, CostPathError>;

/// Default cap on the number of partial paths held by one search
pub const DEFAULT_FRONTIER_LIMIT: usize = 1_000_000;

/// Engine-wide settings that apply to every search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Maximum number of partial paths a single search may hold
    pub frontier_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            frontier_limit: DEFAULT_FRONTIER_LIMIT,
        }
    }
}

/// The main costpath engine
///
/// Holds read-only graphs by name. Graphs are shared as `Arc<Graph>`, so any
/// number of searches may run against the same graph concurrently; each search
/// owns its own frontier.
#[derive(Default)]
pub struct CostPathEngine {
    graphs: DashMap<String, Arc<Graph>>,
    store: Option<Arc<dyn GraphStore>>,
    settings: EngineSettings,
}

impl std::fmt::Debug for CostPathEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostPathEngine")
            .field("graphs", &self.list_graphs())
            .field("has_store", &self.store.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl CostPathEngine {
    /// Create a new engine with no graphs and no backing store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that loads graphs from a store
    pub fn with_store(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::default()
        }
    }

    /// Replace the engine settings
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Engine settings
    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Load every graph the backing store knows about
    ///
    /// Returns the number of graphs loaded. Without a store this is a no-op.
    pub fn load_all(&self) -> CostPathResult<usize> {
        let Some(store) = &self.store else {
            return Ok(0);
        };

        let names = store.list_graphs()?;
        for name in &names {
            let graph = store.load_graph(name)?;
            info!(
                graph = %name,
                nodes = graph.node_count(),
                relationships = graph.relationship_count(),
                "loaded graph"
            );
            self.graphs.insert(name.clone(), Arc::new(graph));
        }
        Ok(names.len())
    }

    /// Register a graph under its name, replacing any graph of the same name
    pub fn insert_graph(&self, graph: Graph) -> Arc<Graph> {
        let graph = Arc::new(graph);
        self.graphs.insert(graph.name.clone(), graph.clone());
        graph
    }

    /// Get a graph by name
    ///
    /// Falls back to the backing store when the graph has not been loaded yet.
    pub fn get_graph(&self, name: &str) -> CostPathResult<Arc<Graph>> {
        if let Some(graph) = self.graphs.get(name) {
            return Ok(graph.clone());
        }

        let Some(store) = &self.store else {
            return Err(CostPathError::GraphNotFound(name.to_string()));
        };

        match store.load_graph(name) {
            Ok(graph) => {
                info!(graph = %name, nodes = graph.node_count(), "loaded graph on demand");
                Ok(self.insert_graph(graph))
            }
            Err(StorageError::GraphNotFound(_)) => {
                Err(CostPathError::GraphNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List the names of all registered graphs, sorted
    pub fn list_graphs(&self) -> Vec<String> {
        let mut names: Vec<String> = self.graphs.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    /// Get the number of registered graphs
    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    /// Check if a graph is registered
    pub fn has_graph(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_engine() {
        let engine = CostPathEngine::new();
        assert_eq!(engine.graph_count(), 0);
        assert_eq!(engine.settings().frontier_limit, DEFAULT_FRONTIER_LIMIT);
    }

    #[test]
    fn test_insert_and_get_graph() {
        let engine = CostPathEngine::new();
        engine.insert_graph(Graph::new("social"));

        assert!(engine.has_graph("social"));
        assert_eq!(engine.get_graph("social").unwrap().name, "social");
        assert_eq!(engine.list_graphs(), vec!["social".to_string()]);
    }

    #[test]
    fn test_missing_graph_without_store() {
        let engine = CostPathEngine::new();
        let err = engine.get_graph("nope").unwrap_err();
        assert!(matches!(err, CostPathError::GraphNotFound(name) if name == "nope"));
    }

    #[test]
    fn test_load_all_without_store_is_noop() {
        let engine = CostPathEngine::new();
        assert_eq!(engine.load_all().unwrap(), 0);
    }
}
