//! The canonical workflow tree.
//!
//! Nodes live in a flat table keyed by id; parent and children are expressed as
//! id references. Every operation that changes the tree returns a new
//! `WorkflowTree`, so a previously obtained tree value is never modified.

use crate::error::StructuralViolation;
use crate::model::{NodeKind, Payload, Position, WorkflowNode, is_reserved_id, validate_record};
use ahash::AHashMap;

mod mutate;

pub use mutate::*;

/// One node of the canonical tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub data: Payload,
    pub parent_id: Option<String>,
    pub depth: usize,
    /// Child ids in insertion order. The order drives layout order.
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowTree {
    root: String,
    entries: AHashMap<String, TreeEntry>,
}

impl WorkflowTree {
    /// Builds a tree from a nested record, validating it first.
    ///
    /// Missing `parentId`/`depth` fields are derived from the nesting and
    /// non-finite positions are reset to the origin.
    pub fn from_record(record: &WorkflowNode) -> Result<Self, StructuralViolation> {
        validate_record(record)?;

        let mut entries = AHashMap::with_capacity(record.count());
        let mut stack: Vec<(&WorkflowNode, Option<&str>, usize)> = vec![(record, None, 0)];
        while let Some((node, parent, depth)) = stack.pop() {
            entries.insert(
                node.id.clone(),
                TreeEntry {
                    id: node.id.clone(),
                    kind: node.kind,
                    position: node.position.sanitized(),
                    data: node.data.clone(),
                    parent_id: parent.map(str::to_string),
                    depth,
                    children: node.children.iter().map(|c| c.id.clone()).collect(),
                },
            );
            for child in &node.children {
                stack.push((child, Some(node.id.as_str()), depth + 1));
            }
        }

        Ok(Self {
            root: record.id.clone(),
            entries,
        })
    }

    /// Exports the tree as a nested record with `parentId` and `depth` filled in.
    pub fn to_record(&self) -> WorkflowNode {
        // Reverse pre-order visits every child before its parent, so each
        // record can take its finished children off the pending map.
        let order: Vec<&TreeEntry> = self.depth_first().collect();
        let mut built: AHashMap<&str, WorkflowNode> = AHashMap::with_capacity(order.len());
        for entry in order.into_iter().rev() {
            let children = entry
                .children
                .iter()
                .filter_map(|child| built.remove(child.as_str()))
                .collect();
            built.insert(
                entry.id.as_str(),
                WorkflowNode {
                    id: entry.id.clone(),
                    kind: entry.kind,
                    position: entry.position,
                    data: entry.data.clone(),
                    parent_id: entry.parent_id.clone(),
                    depth: Some(entry.depth),
                    children,
                },
            );
        }
        built
            .remove(self.root.as_str())
            .unwrap_or_else(|| WorkflowNode::new(self.root.clone(), self.root().kind))
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> &TreeEntry {
        &self.entries[&self.root]
    }

    pub fn get(&self, id: &str) -> Option<&TreeEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks the tree depth-first in pre-order, children in insertion order.
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst {
            tree: self,
            stack: vec![self.root.as_str()],
        }
    }

    /// Ids of `id` and all of its descendants, in pre-order. Empty if `id` is unknown.
    pub fn subtree_ids(&self, id: &str) -> Vec<String> {
        let mut ids = Vec::new();
        if !self.contains(id) {
            return ids;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            ids.push(current.to_string());
            let entry = &self.entries[current];
            stack.extend(entry.children.iter().rev().map(String::as_str));
        }
        ids
    }

    /// Re-checks every structural invariant of the tree.
    pub fn validate(&self) -> Result<(), StructuralViolation> {
        let root = self
            .entries
            .get(&self.root)
            .ok_or_else(|| StructuralViolation::Unreachable(self.root.clone()))?;
        if let Some(parent_id) = &root.parent_id {
            return Err(StructuralViolation::RootHasParent {
                node_id: root.id.clone(),
                parent_id: parent_id.clone(),
            });
        }
        if root.depth != 0 {
            return Err(StructuralViolation::DepthMismatch {
                node_id: root.id.clone(),
                declared: root.depth,
                expected: 0,
            });
        }

        let mut visited = 0usize;
        let mut seen = ahash::AHashSet::with_capacity(self.entries.len());
        let mut stack = vec![self.root.as_str()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(StructuralViolation::DuplicateId(id.to_string()));
            }
            visited += 1;
            let entry = &self.entries[id];
            if entry.kind.is_ghost() {
                return Err(StructuralViolation::GhostInTree(id.to_string()));
            }
            if is_reserved_id(id) {
                return Err(StructuralViolation::ReservedId(id.to_string()));
            }
            if entry.kind.is_terminal() && !entry.children.is_empty() {
                return Err(StructuralViolation::TerminalParent(id.to_string()));
            }
            for child_id in &entry.children {
                let child = self.entries.get(child_id).ok_or_else(|| {
                    StructuralViolation::MissingParent {
                        node_id: child_id.clone(),
                        parent_id: id.to_string(),
                    }
                })?;
                if child.parent_id.as_deref() != Some(id) {
                    return Err(StructuralViolation::MissingParent {
                        node_id: child_id.clone(),
                        parent_id: child.parent_id.clone().unwrap_or_default(),
                    });
                }
                if child.depth != entry.depth + 1 {
                    return Err(StructuralViolation::DepthMismatch {
                        node_id: child_id.clone(),
                        declared: child.depth,
                        expected: entry.depth + 1,
                    });
                }
                stack.push(child_id);
            }
        }

        if visited != self.entries.len() {
            let mut orphans: Vec<&String> = self
                .entries
                .keys()
                .filter(|id| !seen.contains(id.as_str()))
                .collect();
            orphans.sort();
            if let Some(orphan) = orphans.first() {
                return Err(StructuralViolation::Unreachable((*orphan).clone()));
            }
        }
        Ok(())
    }

    pub(crate) fn entries_mut(&mut self) -> &mut AHashMap<String, TreeEntry> {
        &mut self.entries
    }
}

/// Pre-order iterator over a [`WorkflowTree`].
pub struct DepthFirst<'a> {
    tree: &'a WorkflowTree,
    stack: Vec<&'a str>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a TreeEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let entry = self.tree.entries.get(id)?;
        self.stack
            .extend(entry.children.iter().rev().map(String::as_str));
        Some(entry)
    }
}
