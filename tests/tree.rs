//! Tests for the canonical tree and its add/remove/find operations.
mod common;
use common::*;
use flowtree::prelude::*;
use flowtree::tree::{add_child, find_node, remove_subtree, update_data};
use std::collections::HashSet;

fn build(seed: &WorkflowNode) -> WorkflowTree {
    WorkflowTree::from_record(seed).expect("valid seed")
}

#[test]
fn test_from_record_derives_parent_and_depth() {
    let tree = build(&create_branching_workflow());
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.root_id(), "start");

    let task_c = tree.get("task-c").unwrap();
    assert_eq!(task_c.depth, 2);
    assert_eq!(task_c.parent_id.as_deref(), Some("task-a"));
    assert_eq!(tree.get("start").unwrap().depth, 0);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_depth_first_order_follows_insertion_order() {
    let tree = build(&create_branching_workflow());
    let order: Vec<&str> = tree.depth_first().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec!["start", "task-a", "task-c", "end-1", "task-b", "end-2"]);
}

#[test]
fn test_record_round_trip_preserves_structure() {
    let seed = create_branching_workflow();
    let tree = build(&seed);
    let record = tree.to_record();
    assert_eq!(record.count(), seed.count());
    assert_eq!(record.children[1].children[0].depth, Some(2));
    assert_eq!(record.children[1].data["assignee"], "Ada");
    assert_eq!(build(&record), tree);
}

#[test]
fn test_add_child_appends_with_depth() {
    let tree = build(&create_simple_workflow());
    let spec = NodeSpec::new(NodeKind::Task).with_id("task-2");
    let next = add_child(&tree, "task-1", spec, None)
        .expect("no violation")
        .expect("parent exists");

    let added = find_node(&next, "task-2").unwrap();
    assert_eq!(added.depth, 2);
    assert_eq!(added.parent_id.as_deref(), Some("task-1"));
    assert_eq!(next.get("task-1").unwrap().children, vec!["task-2".to_string()]);

    // The original value is untouched.
    assert!(!tree.contains("task-2"));
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_add_child_inserts_at_index() {
    let tree = build(&create_branching_workflow());
    let spec = NodeSpec::new(NodeKind::Task).with_id("task-first");
    let next = add_child(&tree, "start", spec, Some(0)).unwrap().unwrap();
    assert_eq!(
        next.get("start").unwrap().children,
        vec!["task-first", "task-a", "task-b"]
    );

    let spec = NodeSpec::new(NodeKind::Task).with_id("task-last");
    let next = add_child(&next, "start", spec, Some(99)).unwrap().unwrap();
    assert_eq!(next.get("start").unwrap().children.last().unwrap(), "task-last");
}

#[test]
fn test_add_child_generates_unique_ids() {
    let tree = build(&create_simple_workflow());
    let once = add_child(&tree, "task-1", NodeSpec::new(NodeKind::Task), None)
        .unwrap()
        .unwrap();
    let twice = add_child(&once, "task-1", NodeSpec::new(NodeKind::Task), None)
        .unwrap()
        .unwrap();

    let children = &twice.get("task-1").unwrap().children;
    assert_eq!(children.len(), 2);
    assert_ne!(children[0], children[1]);

    let ids: Vec<&str> = twice.depth_first().map(|e| e.id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
}

#[test]
fn test_add_child_missing_parent_is_noop() {
    let tree = build(&create_simple_workflow());
    let result = add_child(&tree, "nonexistent", NodeSpec::new(NodeKind::Task), None);
    assert_eq!(result, Ok(None));
}

#[test]
fn test_add_child_violations() {
    let tree = build(&create_branching_workflow());

    let duplicate = add_child(&tree, "start", NodeSpec::new(NodeKind::Task).with_id("task-a"), None);
    assert_eq!(duplicate, Err(StructuralViolation::DuplicateId("task-a".to_string())));

    let under_end = add_child(&tree, "end-1", NodeSpec::new(NodeKind::Task), None);
    assert_eq!(under_end, Err(StructuralViolation::TerminalParent("end-1".to_string())));

    let ghost = add_child(&tree, "start", NodeSpec::new(NodeKind::Ghost).with_id("g"), None);
    assert_eq!(ghost, Err(StructuralViolation::GhostInTree("g".to_string())));

    let reserved = add_child(&tree, "start", NodeSpec::new(NodeKind::Task).with_id("ghost-start"), None);
    assert_eq!(reserved, Err(StructuralViolation::ReservedId("ghost-start".to_string())));
}

#[test]
fn test_deep_tree_exports_record() {
    const DEPTH: usize = 20_000;
    let mut chain = WorkflowNode::new(format!("step-{}", DEPTH - 1), NodeKind::Task);
    for i in (1..DEPTH - 1).rev() {
        chain = WorkflowNode::new(format!("step-{}", i), NodeKind::Task).with_child(chain);
    }
    let seed = WorkflowNode::new("start", NodeKind::Start).with_child(chain);

    let tree = build(&seed);
    assert_eq!(tree.len(), DEPTH);
    assert!(tree.validate().is_ok());

    let record = tree.to_record();
    assert_eq!(record.count(), DEPTH);
    let rebuilt = build(&record);
    assert_eq!(rebuilt.get("step-19999").unwrap().depth, DEPTH - 1);
}

#[test]
fn test_depth_invariant_holds_after_many_additions() {
    let mut tree = build(&create_simple_workflow());
    let mut parent = "task-1".to_string();
    for i in 0..10 {
        let id = format!("chain-{}", i);
        tree = add_child(&tree, &parent, NodeSpec::new(NodeKind::Task).with_id(&id), None)
            .unwrap()
            .unwrap();
        parent = id;
    }
    for entry in tree.depth_first() {
        if let Some(parent_id) = &entry.parent_id {
            assert_eq!(entry.depth, tree.get(parent_id).unwrap().depth + 1);
        }
    }
    assert_eq!(tree.get("chain-9").unwrap().depth, 11);
    assert!(tree.validate().is_ok());
}

#[test]
fn test_remove_subtree_removes_descendants() {
    let tree = build(&create_branching_workflow());
    let next = remove_subtree(&tree, "task-a").unwrap().unwrap();

    for id in ["task-a", "task-c", "end-1"] {
        assert!(!next.contains(id), "{} should be gone", id);
    }
    assert_eq!(next.get("start").unwrap().children, vec!["task-b"]);
    assert_eq!(next.len(), 3);
    assert!(next.validate().is_ok());
    assert_eq!(tree.len(), 6);
}

#[test]
fn test_remove_subtree_missing_and_root() {
    let tree = build(&create_simple_workflow());
    assert_eq!(remove_subtree(&tree, "ghost-of-nothing"), Ok(None));
    assert_eq!(
        remove_subtree(&tree, "start"),
        Err(StructuralViolation::RootRemoval("start".to_string()))
    );
}

#[test]
fn test_subtree_ids_in_pre_order() {
    let tree = build(&create_branching_workflow());
    assert_eq!(tree.subtree_ids("task-a"), vec!["task-a", "task-c", "end-1"]);
    assert!(tree.subtree_ids("unknown").is_empty());
}

#[test]
fn test_update_data_merges_payload() {
    let tree = build(&create_branching_workflow());
    let mut patch = Payload::new();
    patch.insert("status".to_string(), serde_json::json!("done"));
    patch.insert("assignee".to_string(), serde_json::json!("Grace"));

    let next = update_data(&tree, "task-b", &patch).unwrap();
    let data = &next.get("task-b").unwrap().data;
    assert_eq!(data["status"], "done");
    assert_eq!(data["assignee"], "Grace");
    assert_eq!(data["label"], "Department");

    assert!(update_data(&tree, "missing", &patch).is_none());
}
