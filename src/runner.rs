//! The tick loop.
//!
//! One iteration per tick: sleep, sample input, advance the game, render,
//! present. When a lock completed rows, the frame showing them is presented
//! first and held for the clear pause, then the rows collapse.

use std::thread;

use anyhow::Result;
use log::info;

use crate::config::GameConfig;
use crate::core::{Game, ShapeSource};
use crate::input::InputSource;
use crate::term::{DisplaySurface, FrameBuffer, GameView, Layout};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    GameOver,
    Quit,
}

/// Drive `game` until it ends or the player quits.
pub fn run<S, D, I>(
    game: &mut Game<S>,
    display: &mut D,
    input: &mut I,
    config: &GameConfig,
) -> Result<Ending>
where
    S: ShapeSource,
    D: DisplaySurface,
    I: InputSource,
{
    let (width, height) = display.size();
    let view = GameView::new(Layout::for_screen(width, height));
    let mut fb = FrameBuffer::new(width, height);

    loop {
        thread::sleep(config.tick);

        let sample = input.poll()?;
        if sample.quit {
            info!("player quit with score {}", game.score());
            return Ok(Ending::Quit);
        }

        let report = game.tick(sample.buttons);
        if report.rows_cleared > 0 {
            info!(
                "cleared {} row(s) for {} points",
                report.rows_cleared, report.points
            );
        }

        view.render_into(&game.snapshot(), &mut fb);

        if game.has_pending_clears() {
            display.present(&fb)?;
            thread::sleep(config.clear_pause);
            game.collapse_pending();
        }

        display.present(&fb)?;

        if game.game_over() {
            return Ok(Ending::GameOver);
        }
    }
}
