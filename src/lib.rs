//! Console Tetris (workspace facade crate).
//!
//! The game rules live in `crates/core`, terminal input in `crates/input` and
//! drawing in `crates/term`. This package re-exports them under
//! `console_tetris::{core,input,term,types}` and adds the runtime pieces that
//! tie them together: configuration and the tick loop.

pub use console_tetris_core as core;
pub use console_tetris_input as input;
pub use console_tetris_term as term;
pub use console_tetris_types as types;

pub mod config;
pub mod runner;

pub use config::GameConfig;
pub use runner::{run, Ending};
