use super::Position;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Domain fields attached to a node (label, assignee, due date, tags, ...).
///
/// The engine never interprets these; they are carried through every
/// mutation and projection unchanged.
pub type Payload = serde_json::Map<String, Value>;

/// The closed set of node types a workflow can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    Task,
    Condition,
    End,
    Ghost,
    Department,
    Loop,
    Api,
    Transform,
}

impl NodeKind {
    /// `end` nodes close a branch and never own children.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::End)
    }

    /// Ghost nodes are "add here" affordances and never part of the logical workflow.
    pub fn is_ghost(&self) -> bool {
        matches!(self, NodeKind::Ghost)
    }

    /// Human-readable name, used for default labels.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Task => "Task",
            NodeKind::Condition => "Condition",
            NodeKind::End => "End",
            NodeKind::Ghost => "Ghost",
            NodeKind::Department => "Department",
            NodeKind::Loop => "Loop",
            NodeKind::Api => "API Call",
            NodeKind::Transform => "Transform",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::Task => "task",
            NodeKind::Condition => "condition",
            NodeKind::End => "end",
            NodeKind::Ghost => "ghost",
            NodeKind::Department => "department",
            NodeKind::Loop => "loop",
            NodeKind::Api => "api",
            NodeKind::Transform => "transform",
        };
        f.write_str(name)
    }
}

/// Id segment reserved for ghost affordances and their advisory edges.
pub const GHOST_SEGMENT: &str = "ghost";

/// Whether `id` contains the reserved `ghost` segment between hyphens.
///
/// Ghost ids (`ghost-<owner>`) and advisory edge ids (`<owner>-ghost-<owner>`)
/// are derived from the owner's id. Workflow ids without that segment can never
/// produce a node or edge id equal to one of them.
pub fn is_reserved_id(id: &str) -> bool {
    id.split('-').any(|segment| segment == GHOST_SEGMENT)
}

/// Builds a payload holding only a `label` field.
pub fn label_payload(label: impl Into<String>) -> Payload {
    let mut data = Payload::new();
    data.insert("label".to_string(), Value::String(label.into()));
    data
}

/// A node of the nested workflow record, the shape seeds are supplied in.
///
/// `parent_id` and `depth` may be omitted; they are derived from the nesting
/// when the record is installed. When present they must agree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WorkflowNode>,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::ORIGIN,
            data: Payload::new(),
            parent_id: None,
            depth: None,
            children: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data
            .insert("label".to_string(), Value::String(label.into()));
        self
    }

    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_child(mut self, child: WorkflowNode) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of records in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += 1;
            stack.extend(&node.children);
        }
        total
    }
}

impl Drop for WorkflowNode {
    // Flattens the subtree first so long chains do not recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Describes a node to be inserted by an add operation.
///
/// When `id` is `None`, a random UUID is assigned on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: Payload,
}

impl NodeSpec {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: None,
            kind,
            position: Position::ORIGIN,
            data: Payload::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.data
            .insert("label".to_string(), Value::String(label.into()));
        self
    }

    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = data;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

/// A node of the flat projection handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    #[serde(default)]
    pub data: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub selected: bool,
}

impl FlowNode {
    pub fn label(&self) -> Option<&str> {
        self.data.get("label").and_then(Value::as_str)
    }
}
