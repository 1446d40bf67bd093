//! Scoring and difficulty rules.
//!
//! - Every lock earns a flat [`LOCK_BONUS`].
//! - A lock that completes `n > 0` rows additionally earns `2^n * 100`.
//! - Every [`SPEEDUP_INTERVAL`]th spawned piece lowers the gravity threshold by
//!   one tick per row, never below [`SPEED_FLOOR`].

use crate::types::{LINE_CLEAR_BASE, LOCK_BONUS, SPEEDUP_INTERVAL, SPEED_FLOOR};

/// Points for one lock that completed `rows` rows
pub fn score_for_lock(rows: usize) -> u32 {
    if rows == 0 {
        return LOCK_BONUS;
    }
    LOCK_BONUS + (1u32 << rows) * LINE_CLEAR_BASE
}

/// Gravity threshold after the `piece_count`th piece has spawned
pub fn speed_after_spawn(speed: u32, piece_count: u32) -> u32 {
    if piece_count % SPEEDUP_INTERVAL == 0 && speed > SPEED_FLOOR {
        speed - 1
    } else {
        speed
    }
}
