//! Terminal input module (engine-facing).
//!
//! This crate is independent of any rendering code. It maps `crossterm` key
//! events onto the game's five logical buttons and exposes them through the
//! [`InputSource`] trait as one held-state sample per tick.

pub mod map;
pub mod source;

pub use console_tetris_types as types;

pub use map::{button_for_key, should_quit};
pub use source::{
    wait_for_key, InputSample, InputSource, KeyTracker, KeyboardInput,
    DEFAULT_KEY_RELEASE_TIMEOUT_MS, DEFAULT_KEY_REPEAT_DELAY_MS,
};
