//! Projects the canonical tree onto a flat, positioned graph.
//!
//! The projection only depends on the tree and the options: running the
//! layout twice on the same input yields the same nodes and edges.

use crate::model::{FlowEdge, FlowNode, GHOST_SEGMENT, NodeKind, Payload};
use crate::tree::WorkflowTree;
use serde::{Deserialize, Serialize};

pub mod options;
pub mod placement;

pub use options::*;
use placement::{Slot, placement_for};

/// The flat node/edge view consumed by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

/// Id of the ghost affordance attached to `owner_id`.
pub fn ghost_id_for(owner_id: &str) -> String {
    format!("{}-{}", GHOST_SEGMENT, owner_id)
}

/// Lays out `tree` according to `options`.
///
/// Nodes are visited depth-first, children in insertion order. A node's
/// primary-axis offset comes from its depth, its secondary-axis offset from
/// its ordinal among the nodes already placed at that depth. One structural
/// edge is emitted per parent/child relation and, when ghost nodes are
/// enabled, every non-`end` node gets a ghost node plus an advisory edge.
pub fn generate_layout(tree: &WorkflowTree, options: &LayoutOptions) -> Projection {
    let placement = placement_for(options);

    let mut per_depth: Vec<usize> = Vec::new();
    let mut slots = Vec::with_capacity(tree.len());
    for entry in tree.depth_first() {
        if per_depth.len() <= entry.depth {
            per_depth.resize(entry.depth + 1, 0);
        }
        let index = per_depth[entry.depth];
        per_depth[entry.depth] += 1;
        slots.push((entry, index));
    }

    let capacity = if options.show_ghost_nodes {
        slots.len() * 2
    } else {
        slots.len()
    };
    let mut nodes = Vec::with_capacity(capacity);
    let mut edges = Vec::with_capacity(capacity);

    for (entry, index) in slots {
        let slot = Slot {
            depth: entry.depth,
            index,
            count: per_depth[entry.depth],
        };
        let position = placement.place(slot);

        nodes.push(FlowNode {
            id: entry.id.clone(),
            kind: entry.kind,
            position,
            data: entry.data.clone(),
            parent_id: entry.parent_id.clone(),
            depth: entry.depth,
            selected: false,
        });

        if let Some(parent_id) = &entry.parent_id {
            edges.push(FlowEdge::structural(parent_id, &entry.id));
        }

        if options.show_ghost_nodes && !entry.kind.is_terminal() {
            let ghost_id = ghost_id_for(&entry.id);
            nodes.push(FlowNode {
                id: ghost_id.clone(),
                kind: NodeKind::Ghost,
                position: placement.ghost(slot, position),
                data: Payload::new(),
                parent_id: Some(entry.id.clone()),
                depth: entry.depth + 1,
                selected: false,
            });
            edges.push(FlowEdge::advisory(&entry.id, &ghost_id));
        }
    }

    Projection { nodes, edges }
}
