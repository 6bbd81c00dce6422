use clap::{Parser, ValueEnum};
use flowtree::prelude::*;
use std::fs;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Define CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionCli {
    Horizontal,
    Vertical,
    Radial,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// A nested workflow record
    Seed,
    /// A flat snapshot of nodes and edges, as saved by the builder
    Snapshot,
}

/// Lay out, edit and re-save workflow trees from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the workflow JSON file
    input_path: String,

    /// How the input file is shaped
    #[arg(short, long, value_enum, default_value = "seed")]
    format: InputFormat,

    /// Optional path to a layout options JSON file
    #[arg(long)]
    options: Option<String>,

    /// Layout direction, overriding the options file
    #[arg(short, long, value_enum)]
    direction: Option<DirectionCli>,

    /// Show ghost "add" affordances in the projection
    #[arg(short, long)]
    ghosts: bool,

    /// Add a node, given as PARENT_ID=KIND (repeatable)
    #[arg(long = "add", value_parser = parse_addition)]
    additions: Vec<(String, NodeKind)>,

    /// Remove a node and its subtree (repeatable)
    #[arg(long = "remove")]
    removals: Vec<String>,

    /// Write the resulting snapshot to this path instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowtree=info,warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Options and input ---
    let mut options = match &cli.options {
        Some(path) => LayoutOptions::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load layout options from '{}': {}", path, e))
        }),
        None => LayoutOptions::default(),
    };
    if let Some(direction) = cli.direction {
        options.direction = match direction {
            DirectionCli::Horizontal => LayoutDirection::Horizontal,
            DirectionCli::Vertical => LayoutDirection::Vertical,
            DirectionCli::Radial => LayoutDirection::Radial,
        };
    }
    if cli.ghosts {
        options.show_ghost_nodes = true;
    }

    let seed = load_seed(&cli.input_path, cli.format);

    // --- 2. Initialize ---
    let mut store = WorkflowStore::new(options);
    store
        .initialize(&seed)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid workflow: {}", e)));
    info!(nodes = store.nodes().len(), edges = store.edges().len(), "workflow loaded");

    // --- 3. Edits ---
    for (parent_id, kind) in &cli.additions {
        let request = AddNodeRequest::under(parent_id.clone()).with_kind(*kind);
        match store.request_add(&request) {
            Ok(Some(id)) => info!(%parent_id, node_id = %id, "node added"),
            Ok(None) => eprintln!("Warning: parent '{}' not found, nothing added", parent_id),
            Err(e) => exit_with_error(&format!("Could not add under '{}': {}", parent_id, e)),
        }
    }
    for node_id in &cli.removals {
        match store.remove_node(node_id) {
            Ok(true) => info!(%node_id, "node removed"),
            Ok(false) => eprintln!("Warning: node '{}' not found, nothing removed", node_id),
            Err(e) => exit_with_error(&format!("Could not remove '{}': {}", node_id, e)),
        }
    }

    // --- 4. Output ---
    let snapshot = store.to_snapshot();
    match &cli.output {
        Some(path) => snapshot
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save snapshot: {}", e))),
        None => {
            let json = snapshot
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode snapshot: {}", e)));
            println!("{}", json);
        }
    }

    eprintln!("\n--- Projection Summary ---");
    eprintln!("Direction:        {:?}", store.direction());
    eprintln!("Workflow Nodes:   {}", store.tree().map_or(0, WorkflowTree::len));
    eprintln!("Rendered Nodes:   {}", store.nodes().len());
    eprintln!("Rendered Edges:   {}", store.edges().len());
    eprintln!("Total Execution:  {:?}", total_start.elapsed());
}

fn load_seed(path: &str, format: InputFormat) -> WorkflowNode {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read workflow file '{}': {}", path, e))
    });
    match format {
        InputFormat::Seed => serde_json::from_str(&content)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse workflow JSON: {}", e))),
        InputFormat::Snapshot => {
            let snapshot = Snapshot::from_json(&content)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse snapshot: {}", e)));
            from_snapshot(snapshot).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to convert snapshot to workflow: {}", e))
            })
        }
    }
}

fn parse_addition(arg: &str) -> std::result::Result<(String, NodeKind), String> {
    let (parent_id, kind) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected PARENT_ID=KIND, got '{}'", arg))?;
    let kind: NodeKind = serde_json::from_value(serde_json::Value::String(kind.to_lowercase()))
        .map_err(|_| format!("unknown node kind '{}'", kind))?;
    Ok((parent_id.to_string(), kind))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
