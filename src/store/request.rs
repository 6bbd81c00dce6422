use super::WorkflowStore;
use crate::error::StructuralViolation;
use crate::model::{NodeKind, NodeSpec, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A request from the rendering layer to add a node.
///
/// It comes either from a ghost affordance (`ghost_id` set; the owner of the
/// ghost becomes the parent) or from a menu opened on a node's handle
/// (`parent_id` set). An explicit `parent_id` wins over the ghost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNodeRequest {
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub ghost_id: Option<String>,
    #[serde(default = "default_kind", rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Option<Position>,
}

fn default_kind() -> NodeKind {
    NodeKind::Task
}

impl AddNodeRequest {
    pub fn from_ghost(ghost_id: impl Into<String>) -> Self {
        Self {
            parent_id: None,
            ghost_id: Some(ghost_id.into()),
            kind: NodeKind::Task,
            position: None,
        }
    }

    pub fn under(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ghost_id: None,
            kind: NodeKind::Task,
            position: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// The node to insert: a fresh id, the requested kind and a "New <Kind>" label.
    pub fn to_spec(&self) -> NodeSpec {
        NodeSpec::new(self.kind)
            .with_label(format!("New {}", self.kind.label()))
            .with_position(self.position.unwrap_or_default().sanitized())
    }
}

impl WorkflowStore {
    /// Decodes an add request and performs the corresponding `add_node`.
    ///
    /// Returns `Ok(None)` when the parent cannot be resolved.
    pub fn request_add(
        &mut self,
        request: &AddNodeRequest,
    ) -> Result<Option<String>, StructuralViolation> {
        let parent_id = match (&request.parent_id, &request.ghost_id) {
            (Some(parent_id), _) => Some(parent_id.clone()),
            (None, Some(ghost_id)) => self
                .node(ghost_id)
                .filter(|ghost| ghost.kind.is_ghost())
                .and_then(|ghost| ghost.parent_id.clone()),
            (None, None) => None,
        };
        let Some(parent_id) = parent_id else {
            debug!(ghost_id = ?request.ghost_id, "add request ignored: parent unresolved");
            return Ok(None);
        };
        self.add_node(&parent_id, request.to_spec())
    }
}
