//! costpath CLI: cost-ordered path search over property graphs, with an MCP server.
//!
//! Usage:
//!   costpath find --graph <file> [--request <file>]
//!   costpath generate <erdos-renyi|barabasi-albert> [options]
//!   costpath mcp [--transport stdio] [--graphs dir]

use clap::{Args, Parser, Subcommand};
use costpath::api::{ApiStatus, PathFinderApi};
use costpath::generator::{BarabasiAlbertConfig, ErdosRenyiConfig, GraphOptions, DEFAULT_MAX_COST};
use costpath::{CostPathEngine, Graph, GraphDocument};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "costpath",
    version,
    about = "Find paths between graph nodes in order of increasing cost"
)]
struct Cli {
    /// Log verbosity (error, warn, info, debug, trace); logs go to stderr
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one path request against a graph document
    Find {
        /// JSON or YAML graph document
        #[arg(long)]
        graph: PathBuf,
        /// JSON request file; read from stdin when omitted
        #[arg(long)]
        request: Option<PathBuf>,
    },
    /// Write a random graph document
    Generate {
        #[command(subcommand)]
        model: GenerateModel,
    },
    /// Start the MCP (Model Context Protocol) server
    Mcp {
        /// Transport type (currently only stdio)
        #[arg(long, default_value = "stdio")]
        transport: String,
        /// Directory of graph documents to load at startup
        #[arg(long)]
        graphs: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum GenerateModel {
    /// Uniform random graph with a fixed number of relationships
    ErdosRenyi {
        #[arg(long)]
        nodes: u64,
        #[arg(long)]
        edges: u64,
        #[command(flatten)]
        output: GenerateOutput,
    },
    /// Preferential attachment graph
    BarabasiAlbert {
        #[arg(long)]
        nodes: u64,
        #[arg(long)]
        edges_per_node: u64,
        #[command(flatten)]
        output: GenerateOutput,
    },
}

#[derive(Args)]
struct GenerateOutput {
    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Relationship property to fill with random integer costs
    #[arg(long)]
    cost_property: Option<String>,
    /// Upper bound of generated costs
    #[arg(long, default_value_t = DEFAULT_MAX_COST)]
    max_cost: u32,
    /// Output file (.json, .yaml or .yml); stdout as JSON when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

impl GenerateOutput {
    fn options(&self) -> GraphOptions {
        let name = self
            .out
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .unwrap_or("generated");
        let mut options = GraphOptions::named(name);
        if let Some(property) = &self.cost_property {
            options = options.with_cost_property(property.clone(), self.max_cost);
        }
        options
    }
}

/// Exit code for a finished request
fn exit_code(status: ApiStatus) -> i32 {
    match status {
        ApiStatus::Ok => 0,
        ApiStatus::BadRequest => 2,
        ApiStatus::NotFound => 3,
        ApiStatus::InternalError => 1,
    }
}

fn read_request(request: Option<&Path>) -> std::io::Result<String> {
    match request {
        Some(path) => std::fs::read_to_string(path),
        None => std::io::read_to_string(std::io::stdin()),
    }
}

fn cmd_find(graph: &Path, request: Option<&Path>) -> i32 {
    const GRAPH_NAME: &str = "cli";

    let api = PathFinderApi::new(Arc::new(CostPathEngine::new()));
    if let Err(e) = api.load_graph(GRAPH_NAME, graph) {
        eprintln!("Error: failed to load {}: {}", graph.display(), e);
        return 1;
    }

    let body = match read_request(request) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Error: failed to read request: {}", e);
            return 1;
        }
    };

    let response = api.handle_json(GRAPH_NAME, &body);
    match serde_json::to_string_pretty(&response.body) {
        Ok(text) if response.status.is_success() => println!("{}", text),
        Ok(text) => eprintln!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    }
    exit_code(response.status)
}

fn write_graph(graph: &Graph, out: Option<&Path>) -> i32 {
    let document = GraphDocument::from_graph(graph);
    let result = match out {
        Some(path) => document.write(path).map_err(|e| e.to_string()),
        None => serde_json::to_string_pretty(&document)
            .map(|text| println!("{}", text))
            .map_err(|e| e.to_string()),
    };
    match result {
        Ok(()) => {
            if let Some(path) = out {
                eprintln!(
                    "Wrote {} nodes and {} relationships to {}",
                    graph.node_count(),
                    graph.relationship_count(),
                    path.display()
                );
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_generate(model: GenerateModel) -> i32 {
    let (generated, output) = match model {
        GenerateModel::ErdosRenyi {
            nodes,
            edges,
            output,
        } => (
            ErdosRenyiConfig::new(nodes, edges).generate_seeded(output.seed, &output.options()),
            output,
        ),
        GenerateModel::BarabasiAlbert {
            nodes,
            edges_per_node,
            output,
        } => (
            BarabasiAlbertConfig::new(nodes, edges_per_node)
                .generate_seeded(output.seed, &output.options()),
            output,
        ),
    };

    match generated {
        Ok(graph) => write_graph(&graph, output.out.as_deref()),
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level)
        .init();

    let code = match cli.command {
        Commands::Find { graph, request } => cmd_find(&graph, request.as_deref()),
        Commands::Generate { model } => cmd_generate(model),
        Commands::Mcp { transport, graphs } => {
            if transport != "stdio" {
                eprintln!("error: only 'stdio' transport is currently supported");
                1
            } else {
                costpath::mcp::run_mcp_server(graphs)
            }
        }
    };
    std::process::exit(code);
}
