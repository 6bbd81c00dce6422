use super::{TreeEntry, WorkflowTree};
use crate::error::StructuralViolation;
use crate::model::{NodeSpec, Payload, is_reserved_id};
use uuid::Uuid;

/// Inserts a new node under `parent_id`.
///
/// The node lands at `index` among the parent's children (clamped to the
/// child count; `None` appends). Returns `Ok(None)` and leaves everything as
/// it was when the parent does not exist.
pub fn add_child(
    tree: &WorkflowTree,
    parent_id: &str,
    spec: NodeSpec,
    index: Option<usize>,
) -> Result<Option<WorkflowTree>, StructuralViolation> {
    if !tree.contains(parent_id) {
        return Ok(None);
    }
    let mut next = tree.clone();
    Ok(next.insert_child(parent_id, spec, index)?.map(|_| next))
}

/// Removes `node_id` together with all of its descendants.
///
/// Returns `Ok(None)` when the node does not exist. The root can never be removed.
pub fn remove_subtree(
    tree: &WorkflowTree,
    node_id: &str,
) -> Result<Option<WorkflowTree>, StructuralViolation> {
    if !tree.contains(node_id) {
        return Ok(None);
    }
    let mut next = tree.clone();
    Ok(next.detach_subtree(node_id)?.map(|_| next))
}

pub fn find_node<'a>(tree: &'a WorkflowTree, node_id: &str) -> Option<&'a TreeEntry> {
    tree.get(node_id)
}

/// Merges `patch` into the payload of `node_id`, overwriting keys it shares.
pub fn update_data(tree: &WorkflowTree, node_id: &str, patch: &Payload) -> Option<WorkflowTree> {
    if !tree.contains(node_id) {
        return None;
    }
    let mut next = tree.clone();
    next.merge_data(node_id, patch);
    Some(next)
}

impl WorkflowTree {
    /// In-place form of [`add_child`]. Returns the id of the inserted node.
    ///
    /// Every check runs before the first write, so on error the tree is unchanged.
    pub(crate) fn insert_child(
        &mut self,
        parent_id: &str,
        spec: NodeSpec,
        index: Option<usize>,
    ) -> Result<Option<String>, StructuralViolation> {
        let Some(parent) = self.get(parent_id) else {
            return Ok(None);
        };
        if parent.kind.is_terminal() {
            return Err(StructuralViolation::TerminalParent(parent_id.to_string()));
        }
        let depth = parent.depth + 1;

        let id = spec.id.unwrap_or_else(|| Uuid::new_v4().to_string());
        if spec.kind.is_ghost() {
            return Err(StructuralViolation::GhostInTree(id));
        }
        if is_reserved_id(&id) {
            return Err(StructuralViolation::ReservedId(id));
        }
        if self.contains(&id) {
            return Err(StructuralViolation::DuplicateId(id));
        }

        let entry = TreeEntry {
            id: id.clone(),
            kind: spec.kind,
            position: spec.position.sanitized(),
            data: spec.data,
            parent_id: Some(parent_id.to_string()),
            depth,
            children: Vec::new(),
        };

        let entries = self.entries_mut();
        if let Some(parent) = entries.get_mut(parent_id) {
            let at = index
                .unwrap_or(parent.children.len())
                .min(parent.children.len());
            parent.children.insert(at, id.clone());
        }
        entries.insert(id.clone(), entry);
        Ok(Some(id))
    }

    /// In-place form of [`remove_subtree`]. Returns the removed ids in pre-order.
    pub(crate) fn detach_subtree(
        &mut self,
        node_id: &str,
    ) -> Result<Option<Vec<String>>, StructuralViolation> {
        let Some(entry) = self.get(node_id) else {
            return Ok(None);
        };
        let Some(parent_id) = entry.parent_id.clone() else {
            return Err(StructuralViolation::RootRemoval(node_id.to_string()));
        };

        let doomed = self.subtree_ids(node_id);
        let entries = self.entries_mut();
        for id in &doomed {
            entries.remove(id);
        }
        if let Some(parent) = entries.get_mut(&parent_id) {
            parent.children.retain(|child| child != node_id);
        }
        Ok(Some(doomed))
    }

    pub(crate) fn merge_data(&mut self, node_id: &str, patch: &Payload) -> bool {
        let Some(entry) = self.entries_mut().get_mut(node_id) else {
            return false;
        };
        for (key, value) in patch {
            entry.data.insert(key.clone(), value.clone());
        }
        true
    }
}
