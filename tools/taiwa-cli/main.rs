use clap::{Parser, Subcommand};
use std::fs;
use std::time::Instant;
use taiwa::prelude::*;
use taiwa::scenario::Severity;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Converts scenario dialog trees to editable node graphs and back
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Expand a scenario tree JSON file into a node graph
    Expand {
        /// Path to the tree JSON (a bare dialog node or a `{ "chats": ... }` document)
        tree_path: String,
        /// Stamp the graph as view-only
        #[arg(long)]
        read_only: bool,
        /// Canvas x coordinate of the first node
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        /// Canvas y coordinate of the first node
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        /// Horizontal distance between levels
        #[arg(long)]
        column_width: Option<f64>,
        /// Vertical distance between branches
        #[arg(long)]
        row_height: Option<f64>,
    },
    /// Collapse a node graph JSON file back into a `{ "chats": ... }` document
    Collapse {
        /// Path to the graph JSON
        graph_path: String,
    },
    /// Check a scenario tree for level and outcome problems
    Validate {
        /// Path to the tree JSON
        tree_path: String,
    },
    /// Print a scenario tree as an indented outline
    Outline {
        /// Path to the tree JSON
        tree_path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let start = Instant::now();
    match cli.command {
        Command::Expand {
            tree_path,
            read_only,
            x,
            y,
            column_width,
            row_height,
        } => {
            let tree = load_tree(&tree_path);
            let defaults = LayoutConfig::default();
            let layout = LayoutConfig::new(
                column_width.unwrap_or(defaults.column_width),
                row_height.unwrap_or(defaults.row_height),
            );
            let mut expander = Expander::builder().with_layout(layout).build();
            let graph = expander.expand(&tree, !read_only, Position::new(x, y), None);
            info!(
                nodes = graph.nodes.len(),
                edges = graph.edges.len(),
                "expanded '{}'",
                tree_path
            );
            let json = graph
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write graph: {}", e)));
            println!("{}", json);
        }
        Command::Collapse { graph_path } => {
            let json = read_file(&graph_path);
            let graph = FlowGraph::from_json(&json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse graph '{}': {}", graph_path, e))
            });
            let tree = collapse_graph(&graph)
                .unwrap_or_else(|e| exit_with_error(&format!("Cannot save graph: {}", e)));
            info!(nodes = tree.node_count(), "collapsed '{}'", graph_path);
            let json = ScenarioDocument::new(tree)
                .to_json()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write tree: {}", e)));
            println!("{}", json);
        }
        Command::Validate { tree_path } => {
            let tree = load_tree(&tree_path);
            let report = validate(&tree);
            if report.issues.is_empty() {
                println!("'{}': no issues found", tree_path);
            }
            for issue in &report.issues {
                let label = match issue.severity() {
                    Severity::Error => "error",
                    Severity::Advisory => "advisory",
                };
                println!("{}: {}", label, issue);
            }
            if !report.is_valid() {
                std::process::exit(1);
            }
        }
        Command::Outline { tree_path } => {
            let tree = load_tree(&tree_path);
            println!("{}", outline(&tree));
        }
    }
    debug!("finished in {:?}", start.elapsed());
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read file '{}': {}", path, e)))
}

fn load_tree(path: &str) -> ScenarioChatNode {
    let json = read_file(path);
    tree_from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse tree '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
