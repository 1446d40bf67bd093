//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains every game rule and no I/O. Given the same shape
//! source and the same button samples, a game plays out identically.
//!
//! # Module Structure
//!
//! - [`geometry`]: 4x4 shape masks and the rotation index remap
//! - [`playfield`]: 12x21 bordered grid with collision, locking and row clearing
//! - [`piece`]: the active falling piece
//! - [`spawner`]: piece spawning over an injectable [`ShapeSource`]
//! - [`edge`]: press/release edge detection for one-shot controls
//! - [`scoring`]: lock scoring and difficulty scaling
//! - [`game`]: the per-tick state machine tying it all together
//! - [`snapshot`]: read-only frame data for renderers
//!
//! # Example
//!
//! ```
//! use console_tetris_core::{Game, Phase, SequenceShapes};
//! use console_tetris_types::{Button, ButtonState, ShapeId};
//!
//! let mut game = Game::new(SequenceShapes::repeat(ShapeId::O));
//! let x = game.active().x;
//!
//! game.tick(ButtonState::default().with(Button::Left));
//! assert_eq!(game.active().x, x - 1);
//!
//! game.tick(ButtonState::default().with(Button::Pause));
//! assert_eq!(game.phase(), Phase::Paused);
//! ```
//!
//! # Timing
//!
//! The engine counts ticks, not milliseconds. The frontend calls
//! [`Game::tick`] once per fixed period and, when rows are pending, shows them
//! briefly before calling [`Game::collapse_pending`].

pub mod edge;
pub mod game;
pub mod geometry;
pub mod piece;
pub mod playfield;
pub mod scoring;
pub mod snapshot;
pub mod spawner;

pub use console_tetris_types as types;

pub use edge::{Edge, EdgeDetector};
pub use game::{Game, PendingClears, Phase, TickReport};
pub use geometry::{cells, rotate};
pub use piece::{ActivePiece, SPAWN_X, SPAWN_Y};
pub use playfield::{FullRows, Playfield};
pub use scoring::{score_for_lock, speed_after_spawn};
pub use snapshot::GameSnapshot;
pub use spawner::{RandomShapes, SequenceShapes, ShapeSource, Spawner};
