use super::WorkflowStore;
use crate::error::StructuralViolation;
use crate::model::Position;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An incremental change to a node, as emitted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeChange {
    Position { id: String, position: Position },
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl NodeChange {
    pub fn id(&self) -> &str {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => id,
        }
    }
}

/// An incremental change to an edge, as emitted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeChange {
    Select { id: String, selected: bool },
    Remove { id: String },
}

impl WorkflowStore {
    /// Applies a batch of node changes in order; later changes win.
    ///
    /// Unknown ids are ignored. Removing a node also removes its subtree from
    /// the canonical tree. The batch is atomic: if any change is rejected
    /// (removing the root), the store is restored to its state before the batch.
    pub fn apply_node_changes<I>(&mut self, changes: I) -> Result<(), StructuralViolation>
    where
        I: IntoIterator<Item = NodeChange>,
    {
        let changes: Vec<NodeChange> = changes.into_iter().collect();
        let backup = changes
            .iter()
            .any(|c| matches!(c, NodeChange::Remove { .. }))
            .then(|| self.clone());

        for change in changes {
            let outcome = match change {
                NodeChange::Position { id, position } => {
                    self.apply_node_drag(&id, position);
                    Ok(())
                }
                NodeChange::Select { id, selected } => {
                    self.apply_node_selection(&id, selected);
                    Ok(())
                }
                NodeChange::Remove { id } => self.apply_node_removal(&id).map(|_| ()),
            };

            if let Err(violation) = outcome {
                if let Some(previous) = backup {
                    *self = previous;
                }
                return Err(violation);
            }
        }
        Ok(())
    }

    /// Applies a batch of edge changes in order; later changes win.
    pub fn apply_edge_changes<I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = EdgeChange>,
    {
        for change in changes {
            match change {
                EdgeChange::Select { id, selected } => {
                    self.apply_edge_selection(&id, selected);
                }
                EdgeChange::Remove { id } => {
                    self.apply_edge_removal(&id);
                }
            }
        }
    }

    /// Moves a node of the projection. The canonical tree is not touched.
    ///
    /// Non-finite coordinates are replaced by the node's previous ones. The
    /// position is kept until the next structural change or re-layout.
    pub fn apply_node_drag(&mut self, node_id: &str, position: Position) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) else {
            debug!(node_id, "drag ignored: node not found");
            return false;
        };
        let corrected = position.sanitized_against(node.position);
        if !position.is_finite() {
            warn!(node_id, requested = %position, applied = %corrected, "non-finite position corrected");
        }
        node.position = corrected;
        self.manual_positions.insert(node_id.to_string(), corrected);
        true
    }

    pub fn apply_node_selection(&mut self, node_id: &str, selected: bool) -> bool {
        match self.nodes.iter_mut().find(|n| n.id == node_id) {
            Some(node) => {
                node.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn apply_edge_selection(&mut self, edge_id: &str, selected: bool) -> bool {
        match self.edges.iter_mut().find(|e| e.id == edge_id) {
            Some(edge) => {
                edge.selected = selected;
                true
            }
            None => false,
        }
    }

    /// Drops an edge from the projection only.
    ///
    /// Structural edges come back with the next re-projection, since the
    /// parent/child relation they stand for still exists in the tree.
    pub fn apply_edge_removal(&mut self, edge_id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != edge_id);
        let removed = self.edges.len() != before;
        if removed {
            debug!(edge_id, "edge removed from projection");
        }
        removed
    }

    /// Removes a node requested by the rendering layer's delete affordance.
    ///
    /// Workflow nodes are removed from the tree together with their subtree.
    /// Nodes that only exist in the projection (ghosts) are dropped from the
    /// flat collections along with their edges.
    pub fn apply_node_removal(&mut self, node_id: &str) -> Result<bool, StructuralViolation> {
        if self.tree.as_ref().is_some_and(|t| t.contains(node_id)) {
            return self.remove_node(node_id);
        }

        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != node_id);
        if self.nodes.len() == before {
            debug!(node_id, "removal ignored: node not found");
            return Ok(false);
        }
        self.edges.retain(|e| !e.touches(node_id));
        self.manual_positions.remove(node_id);
        debug!(node_id, "projection-only node removed");
        Ok(true)
    }
}
