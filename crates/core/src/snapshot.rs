//! Snapshot module - a detached copy of the state a frame is drawn from
//!
//! Renderers only ever see a [`GameSnapshot`], never the live [`Game`].
//!
//! [`Game`]: crate::game::Game

use crate::piece::ActivePiece;
use crate::playfield::Playfield;

/// Everything the display needs for one frame, detached from the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub field: Playfield,
    pub active: ActivePiece,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub speed: u32,
    pub paused: bool,
    pub game_over: bool,
}
