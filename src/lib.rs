//! # flowtree - Workflow Tree & Layout Engine
//!
//! **flowtree** is the state engine behind a node-based workflow builder. It keeps
//! the canonical, tree-shaped model of a workflow (start → branching tasks → end),
//! projects it onto a flat, positioned graph of nodes and edges for a diagramming
//! widget to render, and folds the widget's edits (drag, select, delete, add) back
//! into the model without ever breaking the tree's invariants.
//!
//! ## Core Workflow
//!
//! 1.  **Seed**: Describe the initial workflow as a nested [`model::WorkflowNode`], or
//!     convert your own format with the [`snapshot::IntoWorkflow`] trait.
//! 2.  **Initialize**: Hand the seed to a [`store::WorkflowStore`]. The store validates it
//!     and computes the first projection with the layout engine.
//! 3.  **Render**: Read [`store::WorkflowStore::nodes`] and [`store::WorkflowStore::edges`].
//! 4.  **Edit**: Feed commands (`add_node`, `remove_node`, `set_layout_direction`, ...)
//!     and batches of UI changes (`apply_node_changes`, `apply_edge_changes`) back in.
//! 5.  **Save**: Take a [`snapshot::Snapshot`] and store it wherever you like.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowtree::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let seed = WorkflowNode::new("start", NodeKind::Start)
//!         .with_label("Start")
//!         .with_child(WorkflowNode::new("task-1", NodeKind::Task).with_label("Review"));
//!
//!     let mut store = WorkflowStore::new(LayoutOptions::default());
//!     store.initialize(&seed)?;
//!
//!     // A ghost "+" button or a menu asks for a new node under task-1.
//!     store.add_node("task-1", NodeSpec::new(NodeKind::Task).with_id("task-2"))?;
//!     assert_eq!(store.nodes().len(), 3);
//!     assert!(store.edge("task-1-task-2").is_some());
//!
//!     // The user drags a node; the tree is untouched.
//!     store.apply_node_changes([NodeChange::Position {
//!         id: "task-2".to_string(),
//!         position: Position::new(640.0, 80.0),
//!     }])?;
//!
//!     // Removing a node takes its subtree and every edge touching it along.
//!     store.remove_node("task-1")?;
//!     assert_eq!(store.nodes().len(), 1);
//!     assert!(store.edges().is_empty());
//!
//!     let snapshot = store.to_snapshot();
//!     println!("{}", snapshot.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod prelude;
pub mod snapshot;
pub mod store;
pub mod tree;
