//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowtree crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowtree::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let options = LayoutOptions::from_file("path/to/layout.json")?;
//! let snapshot = Snapshot::from_file("path/to/workflow.json")?;
//!
//! let mut store = WorkflowStore::new(options);
//! store.load_snapshot(snapshot)?;
//! store.set_layout_direction(LayoutDirection::Vertical);
//!
//! for node in store.nodes() {
//!     println!("{} at {}", node.id, node.position);
//! }
//! # Ok(())
//! # }
//! ```

// State container and UI deltas
pub use crate::store::{AddNodeRequest, EdgeChange, NodeChange, WorkflowStore};

// Layout
pub use crate::layout::{LayoutDirection, LayoutOptions, Projection, generate_layout};

// Model
pub use crate::model::{
    EdgeKind, FlowEdge, FlowNode, NodeKind, NodeSpec, Payload, Position, WorkflowNode,
};
pub use crate::tree::WorkflowTree;

// Serialization boundary
pub use crate::snapshot::{IntoWorkflow, Snapshot, from_snapshot};

// Error types
pub use crate::error::{ConversionError, PersistenceError, StructuralViolation};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
