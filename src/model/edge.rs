use serde::{Deserialize, Serialize};

/// Distinguishes real parent/child links from "add here" affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// A parent → child relation of the canonical tree.
    Workflow,
    /// Connects a node to its ghost affordance. Never persisted.
    Ghost,
}

/// An edge of the flat projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    #[serde(default)]
    pub selected: bool,
}

impl FlowEdge {
    /// Edge ids are derived from their endpoints, so regenerating the same
    /// relation always yields the same id.
    pub fn edge_id(source: &str, target: &str) -> String {
        format!("{}-{}", source, target)
    }

    pub fn structural(source: &str, target: &str) -> Self {
        Self {
            id: Self::edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            kind: EdgeKind::Workflow,
            selected: false,
        }
    }

    pub fn advisory(source: &str, ghost_id: &str) -> Self {
        Self {
            id: Self::edge_id(source, ghost_id),
            source: source.to_string(),
            target: ghost_id.to_string(),
            kind: EdgeKind::Ghost,
            selected: false,
        }
    }

    pub fn is_structural(&self) -> bool {
        self.kind == EdgeKind::Workflow
    }

    /// Whether either endpoint is `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
