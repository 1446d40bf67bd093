//! Runtime configuration read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `TETRIS_TICK_MS` | 50 | Tick period |
//! | `TETRIS_CLEAR_PAUSE_MS` | 400 | How long cleared rows stay visible |
//! | `TETRIS_SEED` | random | Seed for the shape sequence |
//! | `TETRIS_KEY_RELEASE_MS` | 150 | Held-key timeout when the terminal has no release events |
//! | `TETRIS_KEY_REPEAT_MS` | 600 | Auto-repeat delay bridged by Rotate and Pause on such terminals |
//! | `TETRIS_LOG_PATH` | unset | Write logs to this file (filtered by `RUST_LOG`) |
//!
//! Missing or unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::RandomShapes;
use crate::input::{DEFAULT_KEY_RELEASE_TIMEOUT_MS, DEFAULT_KEY_REPEAT_DELAY_MS};
use crate::types::{LINE_CLEAR_PAUSE_MS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub tick: Duration,
    pub clear_pause: Duration,
    pub seed: Option<u64>,
    pub key_release_timeout: Duration,
    pub key_repeat_delay: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(TICK_MS),
            clear_pause: Duration::from_millis(LINE_CLEAR_PAUSE_MS),
            seed: None,
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            key_repeat_delay: Duration::from_millis(DEFAULT_KEY_REPEAT_DELAY_MS),
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key/value lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        let tick = millis("TETRIS_TICK_MS", defaults.tick);
        let clear_pause = millis("TETRIS_CLEAR_PAUSE_MS", defaults.clear_pause);
        let key_release_timeout = millis("TETRIS_KEY_RELEASE_MS", defaults.key_release_timeout);
        let key_repeat_delay = millis("TETRIS_KEY_REPEAT_MS", defaults.key_repeat_delay);

        let seed = lookup("TETRIS_SEED").and_then(|s| s.trim().parse().ok());

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            tick,
            clear_pause,
            seed,
            key_release_timeout,
            key_repeat_delay,
            log_path,
        }
    }

    /// Shape source for a new game, seeded if a seed was configured
    pub fn shape_source(&self) -> RandomShapes {
        match self.seed {
            Some(seed) => RandomShapes::new(seed),
            None => RandomShapes::from_entropy(),
        }
    }
}
