use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Replaces every non-finite coordinate with the matching coordinate of `previous`.
    ///
    /// If `previous` is itself corrupted on that axis, the axis falls back to `0`.
    pub fn sanitized_against(self, previous: Position) -> Position {
        let pick = |value: f64, fallback: f64| {
            if value.is_finite() {
                value
            } else if fallback.is_finite() {
                fallback
            } else {
                0.0
            }
        };
        Position {
            x: pick(self.x, previous.x),
            y: pick(self.y, previous.y),
        }
    }

    pub fn sanitized(self) -> Position {
        self.sanitized_against(Position::ORIGIN)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
