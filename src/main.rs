//! Terminal Tetris runner (default binary).
//!
//! Takes over the terminal, plays one game, then restores the terminal,
//! prints the final score and waits for a key before exiting.

use std::fs::File;

use anyhow::{Context, Result};
use log::info;

use console_tetris::core::{Game, RandomShapes};
use console_tetris::input::{wait_for_key, KeyboardInput};
use console_tetris::term::TerminalRenderer;
use console_tetris::{run, Ending, GameConfig};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    let mut game = Game::new(config.shape_source());
    info!("starting game with seed {}", game.shape_source().seed());

    let mut term = TerminalRenderer::new();
    let result = play(&mut term, &mut game, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    let ending = result?;
    info!("session ended: {:?}", ending);

    println!("Game Over! Score:{}", game.score());
    println!("Press any key to continue . . .");
    wait_for_key()
}

fn play(
    term: &mut TerminalRenderer,
    game: &mut Game<RandomShapes>,
    config: &GameConfig,
) -> Result<Ending> {
    term.enter().context("acquiring terminal display")?;
    let mut keyboard = KeyboardInput::open(config.key_release_timeout, config.key_repeat_delay)
        .context("acquiring keyboard input")?;

    let result = run(game, term, &mut keyboard, config);
    let closed = keyboard.close();
    let ending = result?;
    closed?;
    Ok(ending)
}

fn init_logging(config: &GameConfig) -> Result<()> {
    // The terminal belongs to the game while it runs, so logs only go to a file.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
