//! The stateful coordinator of the engine.
//!
//! A [`WorkflowStore`] owns the canonical tree, the layout options and the flat
//! projection derived from them. All mutation goes through its command methods;
//! every command runs to completion and either fully replaces the previous
//! consistent state or leaves it untouched.

use crate::error::{ConversionError, StructuralViolation};
use crate::layout::{LayoutDirection, LayoutOptions, generate_layout};
use crate::model::{FlowEdge, FlowNode, NodeSpec, Payload, Position, WorkflowNode};
use crate::snapshot::{IntoWorkflow, Snapshot};
use crate::tree::WorkflowTree;
use ahash::{AHashMap, AHashSet};
use tracing::debug;

mod changes;
mod request;

pub use changes::*;
pub use request::*;

/// Holds the canonical workflow tree and its flat projection.
///
/// The tree decides topology. The projection decides on-screen coordinates
/// once a node has been dragged: a manual position survives re-projections
/// triggered by toggling ghost affordances, and is discarded by the next
/// structural change, `initialize`, direction change or `update_layout`.
#[derive(Debug, Clone, Default)]
pub struct WorkflowStore {
    tree: Option<WorkflowTree>,
    options: LayoutOptions,
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    manual_positions: AHashMap<String, Position>,
}

impl WorkflowStore {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Installs `seed` as the canonical tree and computes a fresh projection.
    ///
    /// Replaces any previous state. On a structural violation the store is left as it was.
    pub fn initialize(&mut self, seed: &WorkflowNode) -> Result<(), StructuralViolation> {
        let tree = WorkflowTree::from_record(seed)?;
        debug!(root = %tree.root_id(), nodes = tree.len(), "workflow initialized");
        self.commit(tree);
        Ok(())
    }

    /// Restores a saved snapshot, replacing the current workflow.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Result<(), ConversionError> {
        let seed = snapshot.into_workflow()?;
        self.initialize(&seed)?;
        Ok(())
    }

    /// Appends a new node under `parent_id`. See [`WorkflowStore::insert_node`].
    pub fn add_node(
        &mut self,
        parent_id: &str,
        spec: NodeSpec,
    ) -> Result<Option<String>, StructuralViolation> {
        self.insert_node(parent_id, spec, None)
    }

    /// Inserts a new node under `parent_id` at `index` among its children.
    ///
    /// Returns the id of the new node, or `Ok(None)` when there is no workflow
    /// or the parent does not exist; in that case nothing changes.
    pub fn insert_node(
        &mut self,
        parent_id: &str,
        spec: NodeSpec,
        index: Option<usize>,
    ) -> Result<Option<String>, StructuralViolation> {
        let Some(tree) = self.tree.as_mut() else {
            debug!(parent_id, "add ignored: no workflow installed");
            return Ok(None);
        };
        let Some(node_id) = tree.insert_child(parent_id, spec, index)? else {
            debug!(parent_id, "add ignored: parent not found");
            return Ok(None);
        };
        debug!(parent_id, %node_id, "node added");
        self.refresh();
        Ok(Some(node_id))
    }

    /// Removes `node_id` and its whole subtree.
    ///
    /// Returns `Ok(false)` when the node does not exist. Removing the root is
    /// rejected and leaves the store unchanged.
    pub fn remove_node(&mut self, node_id: &str) -> Result<bool, StructuralViolation> {
        let Some(tree) = self.tree.as_mut() else {
            return Ok(false);
        };
        let Some(doomed) = tree.detach_subtree(node_id)? else {
            debug!(node_id, "remove ignored: node not found");
            return Ok(false);
        };
        debug!(node_id, removed = doomed.len(), "subtree removed");
        self.refresh();

        // The fresh projection never mentions removed ids, but the flat
        // collections must not hold them under any circumstance.
        let removed: AHashSet<String> = doomed.into_iter().collect();
        self.nodes.retain(|n| !removed.contains(&n.id));
        self.edges
            .retain(|e| !removed.contains(&e.source) && !removed.contains(&e.target));
        Ok(true)
    }

    /// Switches the layout direction and re-projects the tree.
    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        debug!(?direction, "layout direction changed");
        self.options.direction = direction;
        self.refresh();
    }

    /// Shows or hides ghost affordances. Manually dragged positions are kept.
    pub fn toggle_affordances(&mut self) -> bool {
        self.options.show_ghost_nodes = !self.options.show_ghost_nodes;
        debug!(show = self.options.show_ghost_nodes, "ghost affordances toggled");
        self.project();
        self.options.show_ghost_nodes
    }

    /// Replaces all layout options and re-projects the tree from scratch.
    pub fn set_options(&mut self, options: LayoutOptions) {
        self.options = options;
        self.refresh();
    }

    /// Recomputes the projection from the canonical tree, discarding manual positions.
    pub fn update_layout(&mut self) {
        self.refresh();
    }

    /// Merges `patch` into a node's payload, in the tree and in the projection.
    ///
    /// Positions are left alone. Returns `false` when the node does not exist.
    pub fn update_node_data(&mut self, node_id: &str, patch: &Payload) -> bool {
        if !self
            .tree
            .as_mut()
            .is_some_and(|tree| tree.merge_data(node_id, patch))
        {
            debug!(node_id, "data update ignored: node not found");
            return false;
        }
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == node_id) {
            for (key, value) in patch {
                node.data.insert(key.clone(), value.clone());
            }
        }
        debug!(node_id, fields = patch.len(), "node data updated");
        true
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&FlowEdge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    pub fn tree(&self) -> Option<&WorkflowTree> {
        self.tree.as_ref()
    }

    /// The canonical tree as a nested record, if a workflow is installed.
    pub fn workflow(&self) -> Option<WorkflowNode> {
        self.tree.as_ref().map(WorkflowTree::to_record)
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn direction(&self) -> LayoutDirection {
        self.options.direction
    }

    pub fn shows_affordances(&self) -> bool {
        self.options.show_ghost_nodes
    }

    /// The workflow as a save record. Ghost affordances are left out.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            nodes: self
                .nodes
                .iter()
                .filter(|n| !n.kind.is_ghost())
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| e.is_structural())
                .cloned()
                .collect(),
        }
    }

    fn commit(&mut self, tree: WorkflowTree) {
        self.tree = Some(tree);
        self.refresh();
    }

    /// Re-projects after a change to the tree. Manual positions are discarded.
    fn refresh(&mut self) {
        self.manual_positions.clear();
        self.project();
    }

    fn project(&mut self) {
        let Some(tree) = &self.tree else {
            return;
        };
        let projection = generate_layout(tree, &self.options);
        self.nodes = projection.nodes;
        self.edges = projection.edges;

        if self.manual_positions.is_empty() {
            return;
        }
        for node in &mut self.nodes {
            if let Some(position) = self.manual_positions.get(&node.id) {
                node.position = *position;
            }
        }
    }
}
