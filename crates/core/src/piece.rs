//! Active piece - the falling, player-controlled shape.

use crate::geometry;
use crate::types::{ShapeId, FIELD_WIDTH};

/// Column a freshly spawned piece's bounding box starts at
pub const SPAWN_X: i32 = (FIELD_WIDTH / 2) as i32;

/// Row a freshly spawned piece's bounding box starts at
pub const SPAWN_Y: i32 = 0;

/// Active falling piece
///
/// `x`/`y` locate the top-left of the 4x4 bounding box in field coordinates.
/// `rotation` counts clockwise quarter turns and is read modulo 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: ShapeId,
    pub rotation: i32,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Create a piece at the spawn position with no rotation
    pub fn new(shape: ShapeId) -> Self {
        Self {
            shape,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Field coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        geometry::cells(self.shape, self.rotation).map(|(px, py)| (self.x + px, self.y + py))
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece turned one quarter clockwise
    pub fn rotated(&self) -> Self {
        Self {
            rotation: (self.rotation + 1).rem_euclid(4),
            ..*self
        }
    }
}
