//! Tests for snapshots: JSON persistence and conversion back into a tree.
mod common;
use common::*;
use flowtree::prelude::*;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flowtree-{}-{}.json", name, std::process::id()))
}

fn node(id: &str, kind: NodeKind, parent_id: Option<&str>) -> FlowNode {
    FlowNode {
        id: id.to_string(),
        kind,
        position: Position::ORIGIN,
        data: Payload::new(),
        parent_id: parent_id.map(str::to_string),
        depth: 0,
        selected: false,
    }
}

#[test]
fn test_round_trip_reproduces_layout() {
    let mut original = create_store(&create_branching_workflow());
    original.set_layout_direction(LayoutDirection::Vertical);
    let snapshot = original.to_snapshot();

    let mut restored = WorkflowStore::new(*original.options());
    restored.load_snapshot(snapshot.clone()).unwrap();

    assert_eq!(restored.to_snapshot(), snapshot);
    assert_eq!(node_ids(restored.nodes()), node_ids(original.nodes()));
    assert_eq!(edge_ids(restored.edges()), edge_ids(original.edges()));
}

#[test]
fn test_conversion_preserves_order_and_payload() {
    let store = create_store(&create_branching_workflow());
    let seed = from_snapshot(store.to_snapshot()).unwrap();

    assert_eq!(seed.id, "start");
    assert_eq!(seed.count(), 6);
    let first_level: Vec<&str> = seed.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(first_level, vec!["task-a", "task-b"]);
    assert_eq!(seed.children[1].data["assignee"], "Ada");
    assert_eq!(seed.children[1].kind, NodeKind::Department);
}

#[test]
fn test_conversion_skips_ghosts() {
    let tree = WorkflowTree::from_record(&create_simple_workflow()).unwrap();
    let projection = generate_layout(&tree, &LayoutOptions::default().with_ghost_nodes(true));
    let snapshot = Snapshot::from(projection);
    assert_eq!(snapshot.nodes.len(), 4);

    let seed = snapshot.into_workflow().unwrap();
    assert_eq!(seed.count(), 2);
}

#[test]
fn test_store_snapshot_leaves_out_ghosts() {
    let mut store = create_store(&create_branching_workflow());
    store.toggle_affordances();
    assert!(store.nodes().iter().any(|n| n.kind == NodeKind::Ghost));

    let snapshot = store.to_snapshot();
    assert!(snapshot.nodes.iter().all(|n| n.kind != NodeKind::Ghost));
    assert!(snapshot.edges.iter().all(FlowEdge::is_structural));
    assert_eq!(
        node_ids(&snapshot.nodes),
        set_of(&["start", "task-a", "task-c", "end-1", "task-b", "end-2"])
    );

    let mut restored = WorkflowStore::new(*store.options());
    restored.load_snapshot(snapshot.clone()).unwrap();
    assert_eq!(restored.to_snapshot(), snapshot);
    assert_eq!(node_ids(restored.nodes()), node_ids(store.nodes()));
    assert_eq!(edge_ids(restored.edges()), edge_ids(store.edges()));
}

#[test]
fn test_conversion_rejects_dangling_edges() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("task-1", NodeKind::Task, Some("start")),
        ],
        edges: vec![
            FlowEdge::structural("start", "task-1"),
            FlowEdge::structural("task-1", "vanished"),
        ],
    };
    assert_eq!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::DanglingEdge {
            edge_id: "task-1-vanished".to_string(),
            node_id: "vanished".to_string(),
        }))
    );
}

#[test]
fn test_conversion_rejects_reserved_ids() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("ghost-start", NodeKind::Task, Some("start")),
        ],
        edges: Vec::new(),
    };
    assert!(matches!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::ReservedId(id))) if id == "ghost-start"
    ));
}

#[test]
fn test_deep_chain_converts_without_recursion() {
    const DEPTH: usize = 20_000;
    let mut nodes = vec![node("start", NodeKind::Start, None)];
    for i in 1..DEPTH {
        let parent = if i == 1 {
            "start".to_string()
        } else {
            format!("step-{}", i - 1)
        };
        nodes.push(node(&format!("step-{}", i), NodeKind::Task, Some(&parent)));
    }
    let snapshot = Snapshot {
        nodes,
        edges: Vec::new(),
    };

    let seed = from_snapshot(snapshot.clone()).unwrap();
    assert_eq!(seed.count(), DEPTH);

    let mut store = WorkflowStore::default();
    store.load_snapshot(snapshot).unwrap();
    assert_eq!(store.nodes().len(), DEPTH);
    assert_eq!(store.edges().len(), DEPTH - 1);
    assert_eq!(store.node("step-19999").unwrap().depth, DEPTH - 1);

    let exported = store.workflow().unwrap();
    assert_eq!(exported.count(), DEPTH);
}

#[test]
fn test_conversion_falls_back_to_edges() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("task-1", NodeKind::Task, None),
        ],
        edges: vec![FlowEdge::structural("start", "task-1")],
    };
    let seed = snapshot.into_workflow().unwrap();
    assert_eq!(seed.children.len(), 1);
    assert_eq!(seed.children[0].id, "task-1");
}

#[test]
fn test_conversion_ignores_advisory_edges() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("task-1", NodeKind::Task, None),
        ],
        edges: vec![FlowEdge::advisory("start", "task-1")],
    };
    assert_eq!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::MultipleRoots {
            first: "start".to_string(),
            second: "task-1".to_string(),
        }))
    );
}

#[test]
fn test_conversion_rejects_empty_snapshot() {
    let only_ghosts = Snapshot {
        nodes: vec![node("ghost-start", NodeKind::Ghost, Some("start"))],
        edges: Vec::new(),
    };
    assert!(matches!(
        only_ghosts.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::EmptySnapshot))
    ));
}

#[test]
fn test_conversion_rejects_duplicates() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("task-1", NodeKind::Task, Some("start")),
            node("task-1", NodeKind::Task, Some("start")),
        ],
        edges: Vec::new(),
    };
    assert!(matches!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::DuplicateId(id))) if id == "task-1"
    ));
}

#[test]
fn test_conversion_rejects_missing_parent() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("task-1", NodeKind::Task, Some("gone")),
        ],
        edges: Vec::new(),
    };
    assert!(matches!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::MissingParent { parent_id, .. }))
            if parent_id == "gone"
    ));
}

#[test]
fn test_conversion_rejects_cycles() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("a", NodeKind::Task, Some("b")),
            node("b", NodeKind::Task, Some("a")),
        ],
        edges: Vec::new(),
    };
    assert!(matches!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::Unreachable(_)))
    ));
}

#[test]
fn test_conversion_rejects_children_under_end() {
    let snapshot = Snapshot {
        nodes: vec![
            node("start", NodeKind::Start, None),
            node("end", NodeKind::End, Some("start")),
            node("task-1", NodeKind::Task, Some("end")),
        ],
        edges: Vec::new(),
    };
    assert!(matches!(
        snapshot.into_workflow(),
        Err(ConversionError::Structure(StructuralViolation::TerminalParent(id))) if id == "end"
    ));
}

#[test]
fn test_failed_load_keeps_store() {
    let mut store = create_store(&create_simple_workflow());
    let before = store.to_snapshot();
    assert!(store.load_snapshot(Snapshot::default()).is_err());
    assert_eq!(store.to_snapshot(), before);
}

#[test]
fn test_json_wire_format() {
    let store = create_store(&create_simple_workflow());
    let json = store.to_snapshot().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let task = &value["nodes"][1];
    assert_eq!(task["type"], "task");
    assert_eq!(task["parentId"], "start");
    assert_eq!(task["depth"], 1);
    assert_eq!(task["data"]["label"], "Task 1");
    assert_eq!(value["edges"][0]["id"], "start-task-1");
    assert_eq!(value["edges"][0]["type"], "workflow");

    assert_eq!(Snapshot::from_json(&json).unwrap(), store.to_snapshot());
}

#[test]
fn test_from_json_defaults_missing_edges() {
    let snapshot = Snapshot::from_json(
        r#"{ "nodes": [ { "id": "start", "type": "start", "position": { "x": 0, "y": 0 } } ] }"#,
    )
    .unwrap();
    assert!(snapshot.edges.is_empty());
    assert_eq!(snapshot.into_workflow().unwrap().id, "start");
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(matches!(
        Snapshot::from_json("{ not json"),
        Err(PersistenceError::Json(_))
    ));
}

#[test]
fn test_save_and_load_file() {
    let store = create_store(&create_branching_workflow());
    let snapshot = store.to_snapshot();
    let path = temp_path("save-load");
    let path_str = path.to_str().unwrap();

    snapshot.save(path_str).unwrap();
    let loaded = Snapshot::from_file(path_str).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_missing_file_reports_path() {
    let path = temp_path("does-not-exist");
    let err = Snapshot::from_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, PersistenceError::Io { .. }));
    assert!(err.to_string().contains("does-not-exist"));
}
