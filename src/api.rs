//! Transport-independent API layer.
//!
//! `PathFinderApi` is the single entry point for path requests. Transports
//! (CLI, MCP, direct embedding) call its methods; they never drive the
//! enumerator, limiter or projector themselves.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::graph::{CostPathEngine, CostPathError, CostPathResult, EngineSettings, Graph};
use crate::query::{
    self, PathFinderConfig, PathFinderRequest, PathProjector, ProjectedPath, ResultLimiter,
    ShortestPathEnumerator,
};
use crate::storage::load_graph_file;

/// Outcome class of a request, with HTTP-style codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApiStatus {
    Ok,
    BadRequest,
    NotFound,
    InternalError,
}

impl ApiStatus {
    pub fn code(self) -> u16 {
        match self {
            ApiStatus::Ok => 200,
            ApiStatus::BadRequest => 400,
            ApiStatus::NotFound => 404,
            ApiStatus::InternalError => 500,
        }
    }

    pub fn is_success(self) -> bool {
        self == ApiStatus::Ok
    }
}

impl From<&CostPathError> for ApiStatus {
    fn from(err: &CostPathError) -> Self {
        match err {
            CostPathError::InvalidConfig(_) => ApiStatus::BadRequest,
            CostPathError::NodeNotFound(_) | CostPathError::GraphNotFound(_) => {
                ApiStatus::NotFound
            }
            CostPathError::FrontierExhausted { .. }
            | CostPathError::Storage(_)
            | CostPathError::Serialization(_) => ApiStatus::InternalError,
        }
    }
}

/// Status plus JSON body: the path list on success, `{"error": ...}` otherwise
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: ApiStatus,
    pub body: serde_json::Value,
}

impl ApiResponse {
    fn error(status: ApiStatus, message: impl std::fmt::Display) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message.to_string() }),
        }
    }

    fn from_result(result: CostPathResult<Vec<ProjectedPath>>) -> Self {
        match result.and_then(|paths| Ok(serde_json::to_value(paths)?)) {
            Ok(body) => Self {
                status: ApiStatus::Ok,
                body,
            },
            Err(e) => Self::error(ApiStatus::from(&e), e),
        }
    }
}

/// Run a validated configuration against a graph and project the results.
///
/// The full set of paths is produced before anything is returned, so an
/// error never comes with a partial result.
pub fn find_paths(
    graph: &Graph,
    config: &PathFinderConfig,
    settings: EngineSettings,
) -> CostPathResult<Vec<ProjectedPath>> {
    config.check(graph)?;

    let mut enumerator = ShortestPathEnumerator::new(graph, config, settings)?;
    let candidates =
        ResultLimiter::new(&mut enumerator, config.max_results, config.max_depth).collect_paths()?;

    let stats = enumerator.stats();
    debug!(
        graph = %graph.name,
        paths = candidates.len(),
        expanded = stats.expanded,
        peak_frontier = stats.peak_frontier,
        "path search finished"
    );

    let projector = PathProjector::new(config);
    Ok(candidates.iter().map(|path| projector.project(path)).collect())
}

/// Single entry point for path requests against named graphs
#[derive(Debug, Clone)]
pub struct PathFinderApi {
    engine: Arc<CostPathEngine>,
}

impl PathFinderApi {
    pub fn new(engine: Arc<CostPathEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<CostPathEngine> {
        &self.engine
    }

    /// Names of the graphs currently registered
    pub fn list_graphs(&self) -> Vec<String> {
        self.engine.list_graphs()
    }

    /// Load a graph document from disk and register it under `name`,
    /// replacing any graph of the same name. Returns `(nodes, relationships)`.
    pub fn load_graph(&self, name: &str, path: impl AsRef<Path>) -> CostPathResult<(usize, usize)> {
        let mut graph = load_graph_file(path.as_ref())?;
        graph.name = name.to_string();
        let counts = (graph.node_count(), graph.relationship_count());
        self.engine.insert_graph(graph);
        info!(graph = name, nodes = counts.0, relationships = counts.1, "graph registered");
        Ok(counts)
    }

    /// Validate a request against a named graph and return its paths
    pub fn find_paths(
        &self,
        graph_name: &str,
        request: PathFinderRequest,
    ) -> CostPathResult<Vec<ProjectedPath>> {
        let result = self.run(graph_name, request);
        if let Err(e) = &result {
            warn!(graph = graph_name, status = ApiStatus::from(e).code(), error = %e, "path request rejected");
        }
        result
    }

    fn run(&self, graph_name: &str, request: PathFinderRequest) -> CostPathResult<Vec<ProjectedPath>> {
        // Structural problems are reported before graph lookup
        let config = request.into_config()?;
        let graph = self.engine.get_graph(graph_name)?;
        find_paths(&graph, &config, self.engine.settings())
    }

    /// Handle an already-parsed JSON request body
    pub fn handle(&self, graph_name: &str, request: serde_json::Value) -> ApiResponse {
        match serde_json::from_value::<PathFinderRequest>(request) {
            Ok(request) => ApiResponse::from_result(self.find_paths(graph_name, request)),
            Err(e) => Self::malformed(graph_name, e),
        }
    }

    /// Handle a raw JSON request body
    pub fn handle_json(&self, graph_name: &str, body: &str) -> ApiResponse {
        match serde_json::from_str::<PathFinderRequest>(body) {
            Ok(request) => ApiResponse::from_result(self.find_paths(graph_name, request)),
            Err(e) => Self::malformed(graph_name, e),
        }
    }

    fn malformed(graph_name: &str, e: serde_json::Error) -> ApiResponse {
        warn!(graph = graph_name, error = %e, "malformed path request");
        ApiResponse::error(ApiStatus::BadRequest, format!("Malformed request: {e}"))
    }
}

/// Convenience for embedding: validate and run a raw request against a graph
pub fn find_paths_for_request(
    graph: &Graph,
    request: PathFinderRequest,
    settings: EngineSettings,
) -> CostPathResult<Vec<ProjectedPath>> {
    let config = query::validate(request, graph)?;
    find_paths(graph, &config, settings)
}
