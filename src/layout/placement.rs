use super::options::{LayoutDirection, LayoutOptions, NodeDimensions, Spacing};
use crate::model::Position;
use std::f64::consts::TAU;

/// Space left between a node and its ghost affordance.
pub const GHOST_GAP: f64 = 20.0;

/// Where a node sits in the traversal: its depth, its ordinal among all nodes
/// at that depth, and how many nodes share that depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub depth: usize,
    pub index: usize,
    pub count: usize,
}

/// A coordinate-assignment strategy. All strategies share the same traversal
/// and only differ in how a slot maps onto the canvas.
pub trait Placement {
    fn place(&self, slot: Slot) -> Position;

    /// Position of the ghost affordance belonging to the node at `anchor`.
    fn ghost(&self, slot: Slot, anchor: Position) -> Position;
}

pub struct Horizontal {
    spacing: Spacing,
    dimensions: NodeDimensions,
}

impl Placement for Horizontal {
    fn place(&self, slot: Slot) -> Position {
        Position::new(
            slot.depth as f64 * self.spacing.horizontal,
            slot.index as f64 * self.spacing.vertical,
        )
    }

    fn ghost(&self, _slot: Slot, anchor: Position) -> Position {
        anchor.offset(
            self.dimensions.width + GHOST_GAP,
            self.spacing.vertical / 2.0,
        )
    }
}

pub struct Vertical {
    spacing: Spacing,
    dimensions: NodeDimensions,
}

impl Placement for Vertical {
    fn place(&self, slot: Slot) -> Position {
        Position::new(
            slot.index as f64 * self.spacing.horizontal,
            slot.depth as f64 * self.spacing.vertical,
        )
    }

    fn ghost(&self, _slot: Slot, anchor: Position) -> Position {
        anchor.offset(
            self.spacing.horizontal / 2.0,
            self.dimensions.height + GHOST_GAP,
        )
    }
}

pub struct Radial {
    spacing: Spacing,
    dimensions: NodeDimensions,
}

impl Radial {
    fn angle(slot: Slot) -> f64 {
        if slot.count == 0 {
            return 0.0;
        }
        TAU * slot.index as f64 / slot.count as f64
    }
}

impl Placement for Radial {
    fn place(&self, slot: Slot) -> Position {
        let radius = slot.depth as f64 * self.spacing.horizontal;
        let angle = Self::angle(slot);
        Position::new(radius * angle.cos(), radius * angle.sin())
    }

    fn ghost(&self, slot: Slot, anchor: Position) -> Position {
        let reach = self.dimensions.width + GHOST_GAP;
        let angle = Self::angle(slot);
        anchor.offset(reach * angle.cos(), reach * angle.sin())
    }
}

/// Picks the strategy for the configured direction.
pub fn placement_for(options: &LayoutOptions) -> Box<dyn Placement> {
    let spacing = options.spacing;
    let dimensions = options.node_dimensions;
    match options.direction {
        LayoutDirection::Horizontal => Box::new(Horizontal {
            spacing,
            dimensions,
        }),
        LayoutDirection::Vertical => Box::new(Vertical {
            spacing,
            dimensions,
        }),
        LayoutDirection::Radial => Box::new(Radial {
            spacing,
            dimensions,
        }),
    }
}
