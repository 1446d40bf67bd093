//! Terminal display module.
//!
//! A small, game-oriented rendering layer: the game view draws a snapshot into
//! a monochrome character framebuffer, and a [`DisplaySurface`] presents that
//! framebuffer. The crossterm-backed [`TerminalRenderer`] is the production
//! surface; tests substitute their own.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use console_tetris_core as core;
pub use console_tetris_types as types;

pub use fb::FrameBuffer;
pub use game_view::{GameView, Layout};
pub use renderer::{encode_full_into, DisplaySurface, TerminalRenderer};
