//! Game module - the tick state machine
//!
//! One call to [`Game::tick`] advances the game by one fixed tick:
//!
//! 1. Rotation and pause buttons are fed through their edge detectors.
//! 2. While running, held Left/Right/Down each try a one-cell move and a fresh
//!    rotate press tries a quarter turn. Each attempt is checked against the
//!    position committed so far and only committed if it fits.
//! 3. A pause press toggles between running and paused, even while paused.
//! 4. While running, the gravity counter advances; when it reaches the speed
//!    threshold the piece falls one row, or locks if it cannot.
//!
//! Locking scores the piece, marks full rows for clearing, spawns the next
//! piece, applies difficulty scaling and ends the game if the new piece has
//! no room. Marked rows stay on the field as [`CellValue::Clearing`] until the
//! caller invokes [`Game::collapse_pending`], which lets the frontend show
//! them for a moment first.
//!
//! [`CellValue::Clearing`]: crate::types::CellValue::Clearing

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::edge::{Edge, EdgeDetector};
use crate::piece::ActivePiece;
use crate::playfield::Playfield;
use crate::scoring::{score_for_lock, speed_after_spawn};
use crate::snapshot::GameSnapshot;
use crate::spawner::{RandomShapes, ShapeSource, Spawner};
use crate::types::{Button, ButtonState, FIELD_HEIGHT, INITIAL_SPEED};

/// Rows marked for clearing and not yet collapsed, in detection order
pub type PendingClears = ArrayVec<usize, { FIELD_HEIGHT - 1 }>;

/// Coarse game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The active piece locked into the field
    pub locked: bool,
    /// Rows completed by that lock
    pub rows_cleared: u32,
    /// Points awarded this tick
    pub points: u32,
    /// The pause state flipped
    pub pause_toggled: bool,
    /// The game ended this tick
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S = RandomShapes> {
    field: Playfield,
    spawner: Spawner<S>,
    active: ActivePiece,
    pending: PendingClears,
    score: u32,
    lines: u32,
    /// Gravity threshold in ticks per row; lower is faster
    speed: u32,
    speed_count: u32,
    paused: bool,
    game_over: bool,
    rotate_edge: EdgeDetector,
    pause_edge: EdgeDetector,
}

impl<S: ShapeSource> Game<S> {
    /// Start a game on an empty field with the first piece spawned
    pub fn new(source: S) -> Self {
        let mut spawner = Spawner::new(source);
        let active = spawner.spawn_initial();

        Self {
            field: Playfield::new(),
            spawner,
            active,
            pending: PendingClears::new(),
            score: 0,
            lines: 0,
            speed: INITIAL_SPEED,
            speed_count: 0,
            paused: false,
            game_over: false,
            rotate_edge: EdgeDetector::new(),
            pause_edge: EdgeDetector::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces spawned by locks so far; the opening piece is not counted
    pub fn pieces(&self) -> u32 {
        self.spawner.count()
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    pub fn field(&self) -> &Playfield {
        &self.field
    }

    /// Direct field access for setting up positions
    pub fn field_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub fn pending_clears(&self) -> &[usize] {
        &self.pending
    }

    pub fn has_pending_clears(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn shape_source(&self) -> &S {
        self.spawner.source()
    }

    /// Replace the active piece if the new placement fits
    pub fn try_place(&mut self, piece: ActivePiece) -> bool {
        if self.fits(&piece) {
            self.active = piece;
            true
        } else {
            false
        }
    }

    /// Advance the game by one tick using the sampled buttons
    pub fn tick(&mut self, buttons: ButtonState) -> TickReport {
        let mut report = TickReport::default();
        if self.game_over {
            return report;
        }

        let rotate = self.rotate_edge.update(buttons.is_held(Button::Rotate));
        let pause = self.pause_edge.update(buttons.is_held(Button::Pause));

        if !self.paused {
            self.apply_movement(buttons, rotate == Edge::Pressed);
        }

        if pause == Edge::Pressed {
            self.paused = !self.paused;
            report.pause_toggled = true;
            debug!("paused={}", self.paused);
        }

        if !self.paused {
            self.apply_gravity(&mut report);
        }

        report
    }

    /// Collapse every row marked since the last call
    pub fn collapse_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        self.field.collapse_rows(&self.pending);
        self.pending.clear();
    }

    /// Read-only copy of everything a renderer needs
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            field: self.field.clone(),
            active: self.active,
            score: self.score,
            lines: self.lines,
            pieces: self.spawner.count(),
            speed: self.speed,
            paused: self.paused,
            game_over: self.game_over,
        }
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.field.fits(piece.shape, piece.rotation, piece.x, piece.y)
    }

    fn apply_movement(&mut self, buttons: ButtonState, rotate_pressed: bool) {
        if buttons.is_held(Button::Left) {
            self.try_place(self.active.shifted(-1, 0));
        }
        if buttons.is_held(Button::Right) {
            self.try_place(self.active.shifted(1, 0));
        }
        if buttons.is_held(Button::Down) {
            self.try_place(self.active.shifted(0, 1));
        }
        if rotate_pressed {
            self.try_place(self.active.rotated());
        }
    }

    fn apply_gravity(&mut self, report: &mut TickReport) {
        self.speed_count += 1;
        if self.speed_count < self.speed {
            return;
        }
        self.speed_count = 0;

        if !self.try_place(self.active.shifted(0, 1)) {
            self.lock_active(report);
        }
    }

    fn lock_active(&mut self, report: &mut TickReport) {
        self.field.lock(&self.active);

        let rows = self.field.detect_full_rows(self.active.y);
        // Bonus counts only the rows this lock completed, never older pending ones.
        let points = score_for_lock(rows.len());
        self.score = self.score.saturating_add(points);
        self.lines += rows.len() as u32;
        self.pending.extend(rows.iter().copied());

        report.locked = true;
        report.rows_cleared = rows.len() as u32;
        report.points = points;
        debug!(
            "locked {:?} at ({}, {}), rows={:?}, score={}",
            self.active.shape, self.active.x, self.active.y, rows, self.score
        );

        self.active = self.spawner.spawn();

        let speed = speed_after_spawn(self.speed, self.spawner.count());
        if speed != self.speed {
            info!("speed up: {} -> {} ticks per row", self.speed, speed);
            self.speed = speed;
        }

        if !self.fits(&self.active) {
            self.game_over = true;
            report.game_over = true;
            info!(
                "game over: score={} lines={} pieces={}",
                self.score,
                self.lines,
                self.spawner.count()
            );
        }
    }
}
