//! Common test utilities for building workflow seeds and inspecting projections.
use flowtree::prelude::*;
use std::collections::BTreeSet;

/// The smallest useful workflow.
///
/// Shape: `start -> task-1`
#[allow(dead_code)]
pub fn create_simple_workflow() -> WorkflowNode {
    WorkflowNode::new("start", NodeKind::Start)
        .with_label("Start")
        .with_child(WorkflowNode::new("task-1", NodeKind::Task).with_label("Task 1"))
}

/// A workflow with two branches of different depth.
///
/// Shape:
/// ```text
/// start -> task-a -> task-c
///                 -> end-1
///       -> task-b -> end-2
/// ```
#[allow(dead_code)]
pub fn create_branching_workflow() -> WorkflowNode {
    WorkflowNode::new("start", NodeKind::Start)
        .with_label("Start")
        .with_child(
            WorkflowNode::new("task-a", NodeKind::Task)
                .with_label("Collect")
                .with_child(WorkflowNode::new("task-c", NodeKind::Condition).with_label("Check"))
                .with_child(WorkflowNode::new("end-1", NodeKind::End).with_label("End")),
        )
        .with_child(
            WorkflowNode::new("task-b", NodeKind::Department)
                .with_label("Department")
                .with_data("assignee", serde_json::json!("Ada"))
                .with_data("tags", serde_json::json!(["urgent", "q3"]))
                .with_child(WorkflowNode::new("end-2", NodeKind::End).with_label("End")),
        )
}

/// A store initialized with `seed` and default options.
#[allow(dead_code)]
pub fn create_store(seed: &WorkflowNode) -> WorkflowStore {
    let mut store = WorkflowStore::new(LayoutOptions::default());
    store.initialize(seed).expect("seed should be a valid workflow");
    store
}

#[allow(dead_code)]
pub fn node_ids(nodes: &[FlowNode]) -> BTreeSet<String> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

#[allow(dead_code)]
pub fn edge_ids(edges: &[FlowEdge]) -> BTreeSet<String> {
    edges.iter().map(|e| e.id.clone()).collect()
}

#[allow(dead_code)]
pub fn set_of(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[allow(dead_code)]
pub fn position_of(nodes: &[FlowNode], id: &str) -> Position {
    nodes
        .iter()
        .find(|n| n.id == id)
        .map(|n| n.position)
        .unwrap_or_else(|| panic!("node '{}' not in projection", id))
}
