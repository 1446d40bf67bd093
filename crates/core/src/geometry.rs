//! Geometry module - shape masks and rotation
//!
//! Each shape is a 4x4 mask addressed by a linear index 0..16. Rotation never
//! transforms the stored mask; instead [`rotate`] remaps a (px, py) coordinate
//! to the mask index that lands there after 0, 90, 180 or 270 degrees.
//!
//! ```text
//!   0 deg         90 deg        180 deg       270 deg
//!  0  1  2  3   12  8  4  0   15 14 13 12    3  7 11 15
//!  4  5  6  7   13  9  5  1   11 10  9  8    2  6 10 14
//!  8  9 10 11   14 10  6  2    7  6  5  4    1  5  9 13
//! 12 13 14 15   15 11  7  3    3  2  1  0    0  4  8 12
//! ```
//!
//! Collision, locking and drawing all go through [`cells`], so the mapping
//! lives in exactly one place.

use crate::types::{ShapeId, MASK_SIZE};

/// Shape masks, row-major, `X` marks an occupied cell
const MASKS: [&[u8; 16]; 7] = [
    b"..X...X...X...X.", // I
    b"..X..XX...X.....", // T
    b".....XX..XX.....", // O
    b"..X..XX..X......", // Z
    b".X...XX...X.....", // S
    b".X...X...XX.....", // L
    b"..X...X..XX.....", // J
];

/// Map a mask coordinate to its linear index under rotation `r`.
///
/// `r` is taken modulo 4, negative values included. For `px, py` in `0..4`
/// the result is always in `0..16`.
#[inline]
pub fn rotate(px: i32, py: i32, r: i32) -> usize {
    let index = match r.rem_euclid(4) {
        0 => py * 4 + px,
        1 => 12 + py - px * 4,
        2 => 15 - py * 4 - px,
        _ => 3 - py + px * 4,
    };
    index as usize
}

/// Whether the mask cell at `index` is occupied for `shape`
#[inline]
pub fn is_solid(shape: ShapeId, index: usize) -> bool {
    MASKS[shape.index()][index] == b'X'
}

/// Occupied `(px, py)` offsets of `shape` at rotation `r`, relative to the
/// piece's bounding-box top-left.
pub fn cells(shape: ShapeId, r: i32) -> impl Iterator<Item = (i32, i32)> {
    (0..MASK_SIZE).flat_map(move |py| {
        (0..MASK_SIZE).filter_map(move |px| is_solid(shape, rotate(px, py, r)).then_some((px, py)))
    })
}
