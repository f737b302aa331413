//! MCP server for costpath: exposes graph loading and cost-ordered path
//! search via the Model Context Protocol.
//!
//! Tools: `list_graphs`, `load_graph`, `find_paths`.

pub mod params;

use params::*;
use crate::api::{ApiStatus, PathFinderApi};
use crate::graph::CostPathEngine;
use crate::storage::{FileStore, OpenStore};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ok_json<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => err_text(e.to_string()),
    }
}

fn err_text(msg: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg)]))
}

// ---------------------------------------------------------------------------
// CostPathMcpServer
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct CostPathMcpServer {
    api: PathFinderApi,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CostPathMcpServer {
    pub fn new(engine: Arc<CostPathEngine>) -> Self {
        Self {
            api: PathFinderApi::new(engine),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List the names of all loaded graphs")]
    fn list_graphs(&self) -> Result<CallToolResult, McpError> {
        ok_json(&self.api.list_graphs())
    }

    #[tool(description = "Load a JSON or YAML graph document and register it under a name")]
    fn load_graph(
        &self,
        Parameters(p): Parameters<LoadGraphParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.api.load_graph(&p.name, &p.path) {
            Ok((nodes, relationships)) => ok_json(&serde_json::json!({
                "loaded": p.name,
                "nodes": nodes,
                "relationships": relationships,
            })),
            Err(e) => err_text(e.to_string()),
        }
    }

    #[tool(description = "Find simple paths between two nodes, cheapest first")]
    fn find_paths(
        &self,
        Parameters(p): Parameters<FindPathsParams>,
    ) -> Result<CallToolResult, McpError> {
        let (graph, request) = match p.into_request() {
            Ok(pair) => pair,
            Err(msg) => return err_text(format!("Invalid configuration: {msg}")),
        };
        match self.api.find_paths(&graph, request) {
            Ok(paths) => ok_json(&paths),
            Err(e) => err_text(format!("{} ({})", e, ApiStatus::from(&e).code())),
        }
    }
}

#[tool_handler]
impl ServerHandler for CostPathMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "costpath MCP server: load property graphs and find paths between nodes in order of increasing cost"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn open_engine(graphs_dir: Option<PathBuf>) -> Result<CostPathEngine, String> {
    let Some(dir) = graphs_dir else {
        return Ok(CostPathEngine::new());
    };
    let store = FileStore::open(&dir)
        .map_err(|e| format!("failed to open graph directory {}: {}", dir.display(), e))?;
    let engine = CostPathEngine::with_store(Arc::new(store));
    engine
        .load_all()
        .map_err(|e| format!("failed to load graphs: {}", e))?;
    Ok(engine)
}

/// Run the MCP server on stdio until the client disconnects. Returns an exit code.
pub fn run_mcp_server(graphs_dir: Option<PathBuf>) -> i32 {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return 1;
        }
    };

    rt.block_on(async {
        let engine = match open_engine(graphs_dir) {
            Ok(engine) => engine,
            Err(e) => {
                error!("{}", e);
                return 1;
            }
        };

        let server = CostPathMcpServer::new(Arc::new(engine));
        info!("costpath mcp server starting on stdio");

        let service = match server.serve(rmcp::transport::stdio()).await {
            Ok(s) => s,
            Err(e) => {
                error!("failed to start MCP server: {}", e);
                return 1;
            }
        };

        if let Err(e) = service.waiting().await {
            error!("MCP server error: {}", e);
            return 1;
        }

        0
    })
}
