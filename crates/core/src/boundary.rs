//! Boundary monitor - playfield extents around the origin.

use crate::types::{Position, BOUND_X, BOUND_Y};

/// Inclusive extents: the head is alive while `|x| <= half_width` and
/// `|y| <= half_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playfield {
    half_width: i32,
    half_height: i32,
}

impl Playfield {
    pub const DEFAULT: Playfield = Playfield {
        half_width: BOUND_X,
        half_height: BOUND_Y,
    };

    pub fn new(half_width: i32, half_height: i32) -> Self {
        Self {
            half_width: half_width.abs(),
            half_height: half_height.abs(),
        }
    }

    pub fn half_width(&self) -> i32 {
        self.half_width
    }

    pub fn half_height(&self) -> i32 {
        self.half_height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x.abs() <= self.half_width && pos.y.abs() <= self.half_height
    }

    /// Number of whole tiles from the origin to each horizontal edge.
    pub fn tile_columns(&self, tile_size: i32) -> i32 {
        self.half_width / tile_size.max(1)
    }

    /// Number of whole tiles from the origin to each vertical edge.
    pub fn tile_rows(&self, tile_size: i32) -> i32 {
        self.half_height / tile_size.max(1)
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::DEFAULT
    }
}
