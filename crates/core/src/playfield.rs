//! Playfield module - owns the grid of locked cells
//!
//! The field is a 12x21 grid stored as a flat row-major array. Columns 0 and
//! 11 and the bottom row are permanent border cells, so the interior is 10x20.
//! Coordinates: (x, y) with x growing right and y growing down.
//!
//! All index arithmetic goes through [`Playfield::index`]; nothing else in the
//! crate flattens coordinates.

use arrayvec::ArrayVec;

use crate::geometry;
use crate::piece::ActivePiece;
use crate::types::{CellValue, ShapeId, FIELD_HEIGHT, FIELD_WIDTH, MASK_SIZE};

/// Total number of cells on the field
const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// Rows found full by a single detection pass (a piece spans at most 4 rows)
pub type FullRows = ArrayVec<usize, 4>;

/// The playfield grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [CellValue; FIELD_SIZE],
}

impl Playfield {
    /// Create an empty field framed by border cells
    pub fn new() -> Self {
        let mut cells = [CellValue::Empty; FIELD_SIZE];
        for y in 0..FIELD_HEIGHT {
            for x in 0..FIELD_WIDTH {
                if x == 0 || x == FIELD_WIDTH - 1 || y == FIELD_HEIGHT - 1 {
                    cells[y * FIELD_WIDTH + x] = CellValue::Border;
                }
            }
        }
        Self { cells }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i32 || y < 0 || y >= FIELD_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * FIELD_WIDTH + x as usize)
    }

    pub fn width(&self) -> usize {
        FIELD_WIDTH
    }

    pub fn height(&self) -> usize {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y), `None` if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<CellValue> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y). Border cells and out-of-bounds positions
    /// are left untouched; returns whether the write happened.
    pub fn set(&mut self, x: i32, y: i32, value: CellValue) -> bool {
        match Self::index(x, y) {
            Some(idx) if self.cells[idx] != CellValue::Border => {
                self.cells[idx] = value;
                true
            }
            _ => false,
        }
    }

    /// Whether `shape` at rotation `r` with its top-left at (x, y) may occupy
    /// the field. `true` means no collision, i.e. the move is allowed.
    ///
    /// Mask cells that fall outside the grid are ignored; the border columns
    /// and floor catch any piece long before it could leave the sides or
    /// bottom, and cells above the top are allowed so pieces can rotate there.
    pub fn fits(&self, shape: ShapeId, r: i32, x: i32, y: i32) -> bool {
        geometry::cells(shape, r).all(|(px, py)| {
            self.get(x + px, y + py).map_or(true, |cell| cell.is_empty())
        })
    }

    /// Write the piece's color into every cell it covers.
    ///
    /// Callers check [`fits`](Self::fits) first; locking over occupied cells
    /// overwrites them, except border cells which are never written.
    pub fn lock(&mut self, piece: &ActivePiece) {
        let value = CellValue::Piece(piece.shape);
        for (x, y) in piece.cells() {
            self.set(x, y, value);
        }
    }

    /// Whether every interior cell of row `y` is filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= FIELD_HEIGHT - 1 {
            return false;
        }
        self.interior(y).iter().all(|cell| !cell.is_empty())
    }

    /// Scan the 4 rows starting at `from_y`, mark full rows as
    /// [`CellValue::Clearing`] and return them top to bottom.
    ///
    /// Rows already marked by an earlier pass are not reported again.
    pub fn detect_full_rows(&mut self, from_y: i32) -> FullRows {
        let mut rows = FullRows::new();
        for y in from_y..from_y + MASK_SIZE {
            let Ok(row) = usize::try_from(y) else {
                continue;
            };
            if !self.is_row_full(row) || self.is_row_marked(row) {
                continue;
            }
            self.interior_mut(row).fill(CellValue::Clearing);
            rows.push(row);
        }
        rows
    }

    /// Remove each marked row in the given order, shifting every interior
    /// column above it down by one and emptying that column's top cell.
    pub fn collapse_rows(&mut self, rows: &[usize]) {
        for &row in rows {
            if row >= FIELD_HEIGHT - 1 {
                continue;
            }
            for x in 1..FIELD_WIDTH - 1 {
                for y in (1..=row).rev() {
                    self.cells[y * FIELD_WIDTH + x] = self.cells[(y - 1) * FIELD_WIDTH + x];
                }
                self.cells[x] = CellValue::Empty;
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// One full row, border cells included
    pub fn row(&self, y: usize) -> &[CellValue] {
        let start = y * FIELD_WIDTH;
        &self.cells[start..start + FIELD_WIDTH]
    }

    fn interior(&self, y: usize) -> &[CellValue] {
        let start = y * FIELD_WIDTH;
        &self.cells[start + 1..start + FIELD_WIDTH - 1]
    }

    fn interior_mut(&mut self, y: usize) -> &mut [CellValue] {
        let start = y * FIELD_WIDTH;
        &mut self.cells[start + 1..start + FIELD_WIDTH - 1]
    }

    fn is_row_marked(&self, y: usize) -> bool {
        self.interior(y).iter().all(|&cell| cell == CellValue::Clearing)
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(field: &mut Playfield, y: i32) {
        for x in 1..FIELD_WIDTH as i32 - 1 {
            field.set(x, y, CellValue::Piece(ShapeId::T));
        }
    }

    #[test]
    fn test_field_index_calculation() {
        assert_eq!(Playfield::index(0, 0), Some(0));
        assert_eq!(Playfield::index(11, 0), Some(11));
        assert_eq!(Playfield::index(0, 1), Some(12));
        assert_eq!(Playfield::index(11, 20), Some(251));
        assert_eq!(Playfield::index(-1, 0), None);
        assert_eq!(Playfield::index(12, 0), None);
        assert_eq!(Playfield::index(0, 21), None);
    }

    #[test]
    fn test_new_field_has_border_frame() {
        let field = Playfield::new();
        for y in 0..FIELD_HEIGHT as i32 {
            assert_eq!(field.get(0, y), Some(CellValue::Border));
            assert_eq!(field.get(11, y), Some(CellValue::Border));
        }
        for x in 0..FIELD_WIDTH as i32 {
            assert_eq!(field.get(x, 20), Some(CellValue::Border));
        }
        assert_eq!(field.get(5, 10), Some(CellValue::Empty));
    }

    #[test]
    fn test_border_cells_are_never_written() {
        let mut field = Playfield::new();
        assert!(!field.set(0, 5, CellValue::Piece(ShapeId::I)));
        assert!(!field.set(4, 20, CellValue::Empty));
        assert_eq!(field.get(0, 5), Some(CellValue::Border));
        assert_eq!(field.get(4, 20), Some(CellValue::Border));
    }

    #[test]
    fn test_marked_rows_are_not_reported_twice() {
        let mut field = Playfield::new();
        fill_row(&mut field, 19);

        assert_eq!(field.detect_full_rows(16).as_slice(), &[19]);
        assert!(field.detect_full_rows(16).is_empty());
    }

    #[test]
    fn test_detection_ignores_rows_above_the_top() {
        let mut field = Playfield::new();
        fill_row(&mut field, 0);
        assert_eq!(field.detect_full_rows(-2).as_slice(), &[0]);
    }

    #[test]
    fn test_collapse_handles_two_rows_in_detection_order() {
        let mut field = Playfield::new();
        fill_row(&mut field, 18);
        fill_row(&mut field, 19);
        field.set(3, 17, CellValue::Piece(ShapeId::O));

        let rows = field.detect_full_rows(17);
        assert_eq!(rows.as_slice(), &[18, 19]);
        field.collapse_rows(&rows);

        assert_eq!(field.get(3, 19), Some(CellValue::Piece(ShapeId::O)));
        for y in 0..19 {
            for x in 1..11 {
                assert_eq!(field.get(x, y), Some(CellValue::Empty), "({x}, {y})");
            }
        }
    }
}
