use clap::Parser;
use flowtree::model::{NodeKind, WorkflowNode};
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::json;
use std::fs;

/// A CLI tool to generate random workflow seeds for the flowtree engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// How many levels of tasks to generate below the start node
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// The minimum number of children per task
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of children per task
    #[arg(long, default_value_t = 3)]
    max: usize,
}

const TASK_KINDS: [NodeKind; 5] = [
    NodeKind::Task,
    NodeKind::Condition,
    NodeKind::Department,
    NodeKind::Api,
    NodeKind::Transform,
];
const PRIORITIES: [&str; 3] = ["low", "medium", "high"];
const STATUSES: [&str; 3] = ["todo", "in-progress", "done"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating new workflow (depth {}, children per task: {} to {})...",
        cli.depth, cli.min, cli.max
    );

    let mut counter = 0usize;
    let mut root = WorkflowNode::new("start", NodeKind::Start).with_label("Start");
    root.children = generate_level(&mut rng, &cli, 1, &mut counter);

    let json = serde_json::to_string_pretty(&root)?;
    fs::write(&cli.output, json)?;

    println!(
        "Successfully generated {} nodes and saved to '{}'",
        root.count(),
        cli.output
    );
    Ok(())
}

/// Builds the children of one node at `level`. Branches bottom out in an `end` node.
fn generate_level(
    rng: &mut ThreadRng,
    cli: &Cli,
    level: usize,
    counter: &mut usize,
) -> Vec<WorkflowNode> {
    if level > cli.depth {
        *counter += 1;
        return vec![WorkflowNode::new(format!("end-{}", counter), NodeKind::End).with_label("End")];
    }

    let width = rng.random_range(cli.min..=cli.max).max(1);
    (0..width)
        .map(|_| {
            *counter += 1;
            let kind = TASK_KINDS[rng.random_range(0..TASK_KINDS.len())];
            let mut node = WorkflowNode::new(format!("{}-{}", kind, counter), kind)
                .with_label(format!("{} {}", kind.label(), counter))
                .with_data(
                    "priority",
                    json!(PRIORITIES[rng.random_range(0..PRIORITIES.len())]),
                )
                .with_data(
                    "status",
                    json!(STATUSES[rng.random_range(0..STATUSES.len())]),
                );
            node.children = generate_level(rng, cli, level + 1, counter);
            node
        })
        .collect()
}
