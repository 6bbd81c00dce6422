use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::fs;

/// How the tree is laid out on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Depth grows to the right, siblings stack downwards.
    #[default]
    Horizontal,
    /// Depth grows downwards, siblings spread to the right.
    Vertical,
    /// Depth grows outwards on concentric rings around the root.
    Radial,
}

/// Distance between neighbouring slots on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

pub const DEFAULT_SPACING: Spacing = Spacing {
    horizontal: 200.0,
    vertical: 100.0,
};

impl Default for Spacing {
    fn default() -> Self {
        DEFAULT_SPACING
    }
}

/// Size of a rendered node box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDimensions {
    pub width: f64,
    pub height: f64,
}

pub const DEFAULT_NODE_DIMENSIONS: NodeDimensions = NodeDimensions {
    width: 150.0,
    height: 50.0,
};

impl Default for NodeDimensions {
    fn default() -> Self {
        DEFAULT_NODE_DIMENSIONS
    }
}

/// Everything the layout engine needs besides the tree itself.
///
/// Options can be built in code or read from a JSON file; any field missing
/// from the file keeps its default.
///
/// ```json
/// { "direction": "vertical", "spacing": { "horizontal": 240 }, "showGhostNodes": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub direction: LayoutDirection,
    pub spacing: Spacing,
    pub node_dimensions: NodeDimensions,
    pub show_ghost_nodes: bool,
}

impl LayoutOptions {
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.spacing = Spacing {
            horizontal,
            vertical,
        };
        self
    }

    pub fn with_node_dimensions(mut self, width: f64, height: f64) -> Self {
        self.node_dimensions = NodeDimensions { width, height };
        self
    }

    pub fn with_ghost_nodes(mut self, show: bool) -> Self {
        self.show_ghost_nodes = show;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load layout options from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
