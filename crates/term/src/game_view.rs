//! GameView: maps a `core::GameSnapshot` into a character framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Screen layout, relative to the field's top-left corner on screen. The HUD
//! column holds a legend of 8 rows (rule, heading, the 5 game controls and the
//! quit key), 6 stats rows (heading, Speed, Lines, Pieces, Score, rule) and a
//! 3-row pause banner:
//!
//! ```text
//! #..........#      ===============      row 0
//! #..........#      KEY CONTROLS:        legend, rows 0-7 (8 rows)
//! ...                ...
//! #..........#      INFO TABLE:          stats, rows 8-13 (6 rows)
//! ...
//! #..........#      ===============      pause banner, rows 16/18/20
//! ############
//! ```

use crate::core::GameSnapshot;
use crate::fb::FrameBuffer;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH, INITIAL_SPEED};

/// Gap between the field's right edge and the HUD column
const HUD_GAP: u16 = 6;

const RULE: &str = "===============";
const BLANK: &str = "               ";

const LEGEND: [&str; 8] = [
    RULE,
    "KEY CONTROLS:  ",
    "Rotate        ^",
    "Move left     <",
    "Move right    >",
    "Move down     v",
    "Pause         P",
    "Quit          Q",
];

const STATS_ROW: u16 = 8;
const BANNER_ROWS: [u16; 3] = [16, 18, 20];

/// Screen position of the field, fixed once the screen size is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub field_x: u16,
    pub field_y: u16,
}

impl Layout {
    /// Place the field left of center and vertically centered
    pub fn for_screen(width: u16, height: u16) -> Self {
        let field_w = FIELD_WIDTH as u16;
        let field_h = FIELD_HEIGHT as u16;
        Self {
            width,
            height,
            field_x: (width / 2).saturating_sub(field_w + 4),
            field_y: height.saturating_sub(field_h) / 2,
        }
    }

    /// First column of the HUD text
    pub fn hud_x(&self) -> u16 {
        self.field_x + FIELD_WIDTH as u16 + HUD_GAP
    }
}

/// Draws the field, the active piece and the HUD
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    layout: Layout,
}

impl GameView {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can keep one framebuffer for the whole session.
    pub fn render_into(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        fb.resize(self.layout.width, self.layout.height);
        fb.clear();

        self.draw_field(fb, snap);
        self.draw_piece(fb, snap);
        self.draw_hud(fb, snap);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot) -> FrameBuffer {
        let mut fb = FrameBuffer::new(self.layout.width, self.layout.height);
        self.render_into(snap, &mut fb);
        fb
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        for y in 0..FIELD_HEIGHT {
            for (x, cell) in snap.field.row(y).iter().enumerate() {
                fb.put_char(
                    self.layout.field_x + x as u16,
                    self.layout.field_y + y as u16,
                    cell.glyph(),
                );
            }
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let glyph = snap.active.shape.glyph();
        for (x, y) in snap.active.cells() {
            let sx = i32::from(self.layout.field_x) + x;
            let sy = i32::from(self.layout.field_y) + y;
            if let (Ok(sx), Ok(sy)) = (u16::try_from(sx), u16::try_from(sy)) {
                fb.put_char(sx, sy, glyph);
            }
        }
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let x = self.layout.hud_x();
        let top = self.layout.field_y;

        for (row, text) in LEGEND.iter().enumerate() {
            fb.put_str(x, top + row as u16, text);
        }

        let level = INITIAL_SPEED.saturating_sub(snap.speed) + 1;
        let stats = [
            "INFO TABLE:    ".to_string(),
            format!("Speed  {:>8}", level),
            format!("Lines  {:>8}", snap.lines),
            format!("Pieces {:>8}", snap.pieces),
            format!("Score  {:>8}", snap.score),
            RULE.to_string(),
        ];
        for (row, text) in stats.iter().enumerate() {
            fb.put_str(x, top + STATS_ROW + row as u16, text);
        }

        let banner = if snap.paused {
            [RULE, "  GAME PAUSED  ", RULE]
        } else {
            [BLANK; 3]
        };
        for (row, text) in BANNER_ROWS.iter().zip(banner) {
            fb.put_str(x, top + row, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_reference_offsets() {
        let layout = Layout::for_screen(80, 25);
        assert_eq!(layout.field_x, 24);
        assert_eq!(layout.field_y, 2);
        assert_eq!(layout.hud_x(), 42);
    }

    #[test]
    fn hud_blocks_do_not_overlap() {
        assert_eq!(LEGEND.len(), 8);
        assert_eq!(LEGEND[LEGEND.len() - 1], "Quit          Q");
        assert_eq!(STATS_ROW as usize, LEGEND.len());
        // Stats take 6 rows, so the banner starts below them.
        assert!(BANNER_ROWS[0] >= STATS_ROW + 6);
    }

    #[test]
    fn layout_saturates_on_tiny_screens() {
        let layout = Layout::for_screen(10, 5);
        assert_eq!(layout.field_x, 0);
        assert_eq!(layout.field_y, 0);
    }
}
