use super::Snapshot;
use crate::error::{ConversionError, StructuralViolation};
use crate::model::{FlowNode, WorkflowNode, validate_edges, validate_record};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

/// A trait for data models that can be turned into a workflow seed.
///
/// This is the extension point for loading workflows stored in foreign
/// formats: convert your structures into a nested [`WorkflowNode`] and hand
/// the result to `WorkflowStore::initialize`.
///
/// # Example
///
/// ```rust
/// use flowtree::prelude::*;
///
/// struct Checklist {
///     steps: Vec<String>,
/// }
///
/// impl IntoWorkflow for Checklist {
///     fn into_workflow(self) -> std::result::Result<WorkflowNode, ConversionError> {
///         let mut root = WorkflowNode::new("start", NodeKind::Start);
///         let mut tail = &mut root;
///         for (i, step) in self.steps.into_iter().enumerate() {
///             tail.children
///                 .push(WorkflowNode::new(format!("step-{}", i), NodeKind::Task).with_label(step));
///             tail = &mut tail.children[0];
///         }
///         Ok(root)
///     }
/// }
///
/// let seed = Checklist { steps: vec!["Draft".into(), "Review".into()] }.into_workflow().unwrap();
/// assert_eq!(seed.count(), 3);
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into a nested workflow record.
    fn into_workflow(self) -> Result<WorkflowNode, ConversionError>;
}

impl IntoWorkflow for Snapshot {
    /// Rebuilds the nested record from a flat snapshot.
    ///
    /// Every edge must connect two nodes of the snapshot. Ghost nodes are
    /// skipped. A node's parent is its `parentId`, or the source of a
    /// structural edge pointing at it when `parentId` is absent. Sibling order
    /// follows the order of the snapshot's node list.
    fn into_workflow(self) -> Result<WorkflowNode, ConversionError> {
        let Snapshot { nodes, edges } = self;
        validate_edges(&nodes, &edges)?;
        let nodes: Vec<FlowNode> = nodes.into_iter().filter(|n| !n.kind.is_ghost()).collect();
        if nodes.is_empty() {
            return Err(StructuralViolation::EmptySnapshot.into());
        }
        if let Some(duplicate) = nodes.iter().map(|n| n.id.as_str()).duplicates().next() {
            return Err(StructuralViolation::DuplicateId(duplicate.to_string()).into());
        }

        let edge_parents: AHashMap<&str, &str> = edges
            .iter()
            .filter(|e| e.is_structural())
            .map(|e| (e.target.as_str(), e.source.as_str()))
            .collect();
        let known: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        let mut roots = Vec::new();
        let mut children: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (index, node) in nodes.iter().enumerate() {
            let parent = node
                .parent_id
                .as_deref()
                .or_else(|| edge_parents.get(node.id.as_str()).copied());
            match parent {
                None => roots.push(index),
                Some(parent_id) if known.contains(parent_id) => {
                    children.entry(parent_id.to_string()).or_default().push(index)
                }
                Some(parent_id) => {
                    return Err(StructuralViolation::MissingParent {
                        node_id: node.id.clone(),
                        parent_id: parent_id.to_string(),
                    }
                    .into());
                }
            }
        }

        let root_index = match roots.as_slice() {
            [] => return Err(StructuralViolation::Unreachable(nodes[0].id.clone()).into()),
            [root] => *root,
            [first, second, ..] => {
                return Err(StructuralViolation::MultipleRoots {
                    first: nodes[*first].id.clone(),
                    second: nodes[*second].id.clone(),
                }
                .into());
            }
        };

        let mut slots: Vec<Option<FlowNode>> = nodes.into_iter().map(Some).collect();
        let root = assemble(root_index, &mut slots, &children).ok_or_else(|| {
            ConversionError::Invalid("snapshot root could not be assembled".to_string())
        })?;

        // Anything left over hangs off a parent chain that never reaches the root.
        if let Some(orphan) = slots.iter().flatten().next() {
            return Err(StructuralViolation::Unreachable(orphan.id.clone()).into());
        }

        validate_record(&root)?;
        Ok(root)
    }
}

/// Nests every node reachable from `root_index`, taking it out of `slots`.
fn assemble(
    root_index: usize,
    slots: &mut [Option<FlowNode>],
    children: &AHashMap<String, Vec<usize>>,
) -> Option<WorkflowNode> {
    let mut order = Vec::new();
    let mut stack = vec![root_index];
    while let Some(index) = stack.pop() {
        order.push(index);
        if let Some(indices) = slots.get(index)?.as_ref().and_then(|n| children.get(&n.id)) {
            stack.extend(indices.iter().rev());
        }
    }

    // Children come after their parent in pre-order; build from the back.
    let mut built: AHashMap<usize, WorkflowNode> = AHashMap::with_capacity(order.len());
    for index in order.into_iter().rev() {
        let Some(node) = slots.get_mut(index).and_then(Option::take) else {
            continue;
        };
        let nested = children
            .get(&node.id)
            .map(|indices| indices.iter().filter_map(|i| built.remove(i)).collect())
            .unwrap_or_default();
        built.insert(
            index,
            WorkflowNode {
                id: node.id,
                kind: node.kind,
                position: node.position,
                data: node.data,
                parent_id: None,
                depth: None,
                children: nested,
            },
        );
    }
    built.remove(&root_index)
}

/// Converts a snapshot back into a nested workflow record.
pub fn from_snapshot(snapshot: Snapshot) -> Result<WorkflowNode, ConversionError> {
    snapshot.into_workflow()
}
