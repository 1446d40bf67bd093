//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the renderer and the input layer alike.
//!
//! # Field Dimensions
//!
//! The playfield is a fixed 12x21 grid. The leftmost and rightmost columns and
//! the bottom row are permanently [`CellValue::Border`], which leaves a 10x20
//! interior for play.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed tick period |
//! | `INITIAL_SPEED` | 20 | Ticks per gravity row at game start (1 row/s) |
//! | `SPEED_FLOOR` | 11 | Speed never drops below this many ticks per row |
//! | `SPEEDUP_INTERVAL` | 10 | Speed-up is considered every 10th spawned piece |
//! | `LINE_CLEAR_PAUSE_MS` | 400 | Cleared rows stay visible this long |
//!
//! # Examples
//!
//! ```
//! use console_tetris_types::{CellValue, ShapeId, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let shape = ShapeId::from_index(2).unwrap();
//! assert_eq!(shape, ShapeId::O);
//! assert_eq!(CellValue::Piece(shape).glyph(), 'C');
//!
//! assert_eq!(FIELD_WIDTH, 12);
//! assert_eq!(FIELD_HEIGHT, 21);
//! ```

/// Field width in cells, border columns included
pub const FIELD_WIDTH: usize = 12;

/// Field height in cells, border row included
pub const FIELD_HEIGHT: usize = 21;

/// Edge length of a shape mask (masks are 4x4)
pub const MASK_SIZE: i32 = 4;

/// Fixed tick period in milliseconds
pub const TICK_MS: u64 = 50;

/// Gravity threshold at game start, in ticks per row
pub const INITIAL_SPEED: u32 = 20;

/// Lowest gravity threshold difficulty scaling may reach
pub const SPEED_FLOOR: u32 = 11;

/// Every Nth spawned piece may tighten the gravity threshold
pub const SPEEDUP_INTERVAL: u32 = 10;

/// Points awarded for every lock, whether or not rows were cleared
pub const LOCK_BONUS: u32 = 25;

/// Base of the line clear bonus: `2^rows * LINE_CLEAR_BASE`
pub const LINE_CLEAR_BASE: u32 = 100;

/// How long cleared rows stay on screen before collapsing
pub const LINE_CLEAR_PAUSE_MS: u64 = 400;

/// Glyph table indexed by [`CellValue::code`]
const GLYPHS: [char; 10] = [' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', '=', '#'];


/// The seven tetromino shapes, in mask table order
///
/// The discriminant is the shape id used by the mask table and by the
/// field's color codes (`code = id + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    I = 0,
    T = 1,
    O = 2,
    Z = 3,
    S = 4,
    L = 5,
    J = 6,
}

impl ShapeId {
    /// All shapes in id order
    pub const ALL: [ShapeId; 7] = [
        ShapeId::I,
        ShapeId::T,
        ShapeId::O,
        ShapeId::Z,
        ShapeId::S,
        ShapeId::L,
        ShapeId::J,
    ];

    /// Look up a shape by its numeric id (0-6)
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Letter used when drawing this shape (`'A'` for id 0)
    pub fn glyph(self) -> char {
        GLYPHS[self.index() + 1]
    }
}

/// Contents of one field cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Empty,
    /// Locked cell of the given shape's color
    Piece(ShapeId),
    /// Part of a full row waiting to collapse
    Clearing,
    /// Permanent play boundary
    Border,
}

impl CellValue {
    /// Numeric cell code: 0 empty, 1-7 piece colors, 8 clearing, 9 border
    pub fn code(self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Piece(shape) => shape as u8 + 1,
            CellValue::Clearing => 8,
            CellValue::Border => 9,
        }
    }

    pub fn is_empty(self) -> bool {
        self == CellValue::Empty
    }

    pub fn glyph(self) -> char {
        GLYPHS[self.code() as usize]
    }
}

/// The five logical buttons the game reads each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Down,
    Rotate,
    Pause,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Right,
        Button::Down,
        Button::Rotate,
        Button::Pause,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Held state of all five buttons at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ButtonState {
    bits: u8,
}

impl ButtonState {
    pub fn is_held(&self, button: Button) -> bool {
        self.bits & button.bit() != 0
    }

    pub fn set(&mut self, button: Button, held: bool) {
        if held {
            self.bits |= button.bit();
        } else {
            self.bits &= !button.bit();
        }
    }

    /// Builder-style helper, mostly for tests and scripted input
    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn any(&self) -> bool {
        self.bits != 0
    }
}
