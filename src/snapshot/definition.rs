use crate::layout::Projection;
use crate::model::{FlowEdge, FlowNode};
use serde::{Deserialize, Serialize};

/// A plain record of a rendered workflow, used for save and load.
///
/// Snapshots carry no behavior. Those taken from a store never hold ghost
/// nodes or advisory edges. A snapshot built from a raw [`Projection`] may;
/// they are dropped when the snapshot is turned back into a tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl From<Projection> for Snapshot {
    fn from(projection: Projection) -> Self {
        Self {
            nodes: projection.nodes,
            edges: projection.edges,
        }
    }
}
