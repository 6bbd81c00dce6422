use super::{FlowEdge, FlowNode, WorkflowNode, is_reserved_id};
use crate::error::StructuralViolation;
use ahash::AHashSet;

/// Checks a nested workflow record before it is installed as a tree.
///
/// Fails on duplicate ids, ghost nodes, ids using the reserved `ghost`
/// segment, children under an `end` node, and on declared `parentId`/`depth`
/// values that disagree with the nesting.
pub fn validate_record(root: &WorkflowNode) -> Result<(), StructuralViolation> {
    if let Some(parent_id) = &root.parent_id {
        return Err(StructuralViolation::RootHasParent {
            node_id: root.id.clone(),
            parent_id: parent_id.clone(),
        });
    }

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut stack: Vec<(&WorkflowNode, Option<&str>, usize)> = vec![(root, None, 0)];

    while let Some((node, parent, depth)) = stack.pop() {
        if !seen.insert(node.id.as_str()) {
            return Err(StructuralViolation::DuplicateId(node.id.clone()));
        }
        if node.kind.is_ghost() {
            return Err(StructuralViolation::GhostInTree(node.id.clone()));
        }
        if is_reserved_id(&node.id) {
            return Err(StructuralViolation::ReservedId(node.id.clone()));
        }
        if node.kind.is_terminal() && !node.children.is_empty() {
            return Err(StructuralViolation::TerminalParent(node.id.clone()));
        }
        if let (Some(declared), Some(actual)) = (node.parent_id.as_deref(), parent) {
            if declared != actual {
                return Err(StructuralViolation::MissingParent {
                    node_id: node.id.clone(),
                    parent_id: declared.to_string(),
                });
            }
        }
        if let Some(declared) = node.depth {
            if declared != depth {
                return Err(StructuralViolation::DepthMismatch {
                    node_id: node.id.clone(),
                    declared,
                    expected: depth,
                });
            }
        }

        // Reversed so children are visited in insertion order.
        for child in node.children.iter().rev() {
            stack.push((child, Some(node.id.as_str()), depth + 1));
        }
    }

    Ok(())
}

/// Checks that every edge of a projection connects two existing nodes.
pub fn validate_edges(nodes: &[FlowNode], edges: &[FlowEdge]) -> Result<(), StructuralViolation> {
    let ids: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint.as_str()) {
                return Err(StructuralViolation::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
    }
    Ok(())
}
