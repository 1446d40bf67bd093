//! Game engine tests - scoring, difficulty, game over and the reference scenarios

use console_tetris::core::{ActivePiece, Game, Phase, SequenceShapes, TickReport, SPAWN_X};
use console_tetris::types::{
    Button, ButtonState, CellValue, ShapeId, FIELD_WIDTH, INITIAL_SPEED, SPEED_FLOOR,
};

fn o_game() -> Game<SequenceShapes> {
    Game::new(SequenceShapes::repeat(ShapeId::O))
}

/// Tick with no input until the active piece locks
fn drop_until_lock(game: &mut Game<SequenceShapes>) -> TickReport {
    for _ in 0..10_000 {
        let report = game.tick(ButtonState::default());
        if report.locked {
            return report;
        }
    }
    panic!("piece never locked");
}

/// Move the active piece's bounding box to column `x` before it starts falling
fn move_to_column(game: &mut Game<SequenceShapes>, x: i32) {
    let piece = game.active();
    assert!(game.try_place(ActivePiece { x, ..piece }), "cannot move to x={x}");
}

/// Fill interior row `y` except the given columns
fn fill_row_except(game: &mut Game<SequenceShapes>, y: i32, gaps: &[i32]) {
    for x in 1..FIELD_WIDTH as i32 - 1 {
        if !gaps.contains(&x) {
            game.field_mut().set(x, y, CellValue::Piece(ShapeId::Z));
        }
    }
}

#[test]
fn test_o_piece_falls_to_the_floor_and_locks() {
    let mut game = o_game();
    let piece = game.active();
    assert_eq!(piece.shape, ShapeId::O);
    assert_eq!((piece.x, piece.y), (SPAWN_X, 0));
    assert!(game.field().fits(piece.shape, piece.rotation, piece.x, piece.y));

    let report = drop_until_lock(&mut game);
    assert!(report.locked);
    assert_eq!(report.rows_cleared, 0);

    // O occupies mask columns 1-2 and rows 1-2: field columns 7-8, rows 18-19.
    for y in [18, 19] {
        for x in 1..FIELD_WIDTH as i32 - 1 {
            let expected = if x == 7 || x == 8 {
                CellValue::Piece(ShapeId::O)
            } else {
                CellValue::Empty
            };
            assert_eq!(game.field().get(x, y), Some(expected), "({x}, {y})");
        }
    }
    assert_eq!(CellValue::Piece(ShapeId::O).code(), 3);
    assert_eq!(game.score(), 25);
}

#[test]
fn test_single_row_clear_scores_225() {
    let mut game = o_game();
    fill_row_except(&mut game, 19, &[5, 6]);
    move_to_column(&mut game, 4);

    let report = drop_until_lock(&mut game);
    assert_eq!(report.rows_cleared, 1);
    assert_eq!(report.points, 25 + 200);
    assert_eq!(game.score(), 225);
    assert_eq!(game.lines(), 1);
    assert_eq!(game.pending_clears(), &[19]);
    assert!(game.field().row(19)[1..11]
        .iter()
        .all(|&c| c == CellValue::Clearing));

    game.collapse_pending();
    assert!(!game.has_pending_clears());
    for x in 1..FIELD_WIDTH as i32 - 1 {
        let expected = if x == 5 || x == 6 {
            CellValue::Piece(ShapeId::O)
        } else {
            CellValue::Empty
        };
        assert_eq!(game.field().get(x, 19), Some(expected));
        assert_eq!(game.field().get(x, 18), Some(CellValue::Empty));
    }
}

#[test]
fn test_double_row_clear_scores_425() {
    let mut game = o_game();
    fill_row_except(&mut game, 18, &[5, 6]);
    fill_row_except(&mut game, 19, &[5, 6]);
    move_to_column(&mut game, 4);

    let report = drop_until_lock(&mut game);
    assert_eq!(report.rows_cleared, 2);
    assert_eq!(game.score(), 25 + 400);
    assert_eq!(game.pending_clears(), &[18, 19]);

    game.collapse_pending();
    for y in 0..20 {
        for x in 1..FIELD_WIDTH as i32 - 1 {
            assert_eq!(game.field().get(x, y), Some(CellValue::Empty));
        }
    }
}

#[test]
fn test_prefilled_row_is_reported_when_piece_lands_above_it() {
    let mut game = o_game();
    fill_row_except(&mut game, 19, &[]);

    let report = drop_until_lock(&mut game);
    // O rests on the full row, occupying rows 17-18, and never touches row 19.
    assert_eq!(game.field().get(7, 18), Some(CellValue::Piece(ShapeId::O)));
    assert_eq!(report.rows_cleared, 1);
    assert_eq!(game.pending_clears(), &[19]);
}

#[test]
fn test_line_bonus_counts_only_rows_from_the_current_lock() {
    // Two clearing locks without a collapse in between. The runner collapses
    // every tick, so this only happens when the engine is driven directly.
    let mut game = o_game();
    fill_row_except(&mut game, 16, &[5, 6]);
    fill_row_except(&mut game, 17, &[5, 6]);
    fill_row_except(&mut game, 19, &[5, 6]);

    move_to_column(&mut game, 4);
    let first = drop_until_lock(&mut game);
    assert_eq!(first.rows_cleared, 1);
    assert_eq!(game.score(), 225);

    move_to_column(&mut game, 4);
    let second = drop_until_lock(&mut game);
    assert_eq!(second.rows_cleared, 2);
    assert_eq!(second.points, 25 + 400, "bonus must not include row 19");
    assert_eq!(game.score(), 225 + 425);
    assert_eq!(game.lines(), 3);
    assert_eq!(game.pending_clears(), &[19, 16, 17]);
}

#[test]
fn test_speed_steps_down_every_tenth_piece_to_the_floor() {
    let mut game = o_game();
    let mut last_speed = game.speed();

    // Five O pieces side by side fill two rows, so the field never tops out.
    for i in 0..120 {
        move_to_column(&mut game, [0, 2, 4, 6, 8][i % 5]);
        drop_until_lock(&mut game);
        game.collapse_pending();
        assert!(!game.game_over());

        let speed = game.speed();
        assert!(speed <= last_speed, "speed never increases");
        assert!(speed >= SPEED_FLOOR);
        if speed != last_speed {
            assert_eq!(game.pieces() % 10, 0, "changed after piece {}", game.pieces());
        }
        last_speed = speed;
    }

    assert_eq!(game.speed(), SPEED_FLOOR);
    assert_eq!(game.pieces(), 120);
    assert_eq!(game.lines(), 48);
}

#[test]
fn test_opening_piece_is_not_counted() {
    let mut game = o_game();
    assert_eq!(game.pieces(), 0);

    drop_until_lock(&mut game);
    assert_eq!(game.pieces(), 1);
}

#[test]
fn test_first_speed_up_happens_at_the_tenth_lock() {
    let mut game = o_game();
    for i in 0..9 {
        move_to_column(&mut game, [0, 2, 4, 6, 8][i % 5]);
        drop_until_lock(&mut game);
        game.collapse_pending();
    }
    assert_eq!(game.pieces(), 9);
    assert_eq!(game.speed(), INITIAL_SPEED);

    move_to_column(&mut game, 8);
    drop_until_lock(&mut game);
    assert_eq!(game.pieces(), 10);
    assert_eq!(game.speed(), INITIAL_SPEED - 1);
}

#[test]
fn test_stacking_in_one_column_ends_the_game() {
    let mut game = o_game();
    let mut last = TickReport::default();
    for _ in 0..10_000 {
        last = game.tick(ButtonState::default());
        if last.game_over {
            break;
        }
    }

    assert!(last.game_over);
    assert!(last.locked);
    assert_eq!(game.phase(), Phase::GameOver);
    // Nine O pieces fill rows 2-19; the one spawned by the ninth lock has no room.
    assert_eq!(game.pieces(), 9);
    assert_eq!(game.score(), 9 * 25);

    // Terminal state: further ticks change nothing.
    let score = game.score();
    let report = game.tick(ButtonState::default().with(Button::Pause));
    assert_eq!(report, TickReport::default());
    assert_eq!(game.score(), score);
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn test_rotation_is_refused_against_the_wall() {
    let mut game = Game::new(SequenceShapes::repeat(ShapeId::I));
    let left = ButtonState::default().with(Button::Left);
    for _ in 0..10 {
        game.tick(left);
    }
    // Upright I in mask column 2 against the left border.
    assert_eq!(game.active().x, -1);

    game.tick(ButtonState::default().with(Button::Rotate));
    assert_eq!(game.active().rotation, 0);

    // Away from the wall the same press works.
    let right = ButtonState::default().with(Button::Right);
    game.tick(right);
    game.tick(right);
    game.tick(ButtonState::default().with(Button::Rotate));
    assert_eq!(game.active().rotation, 1);
}

#[test]
fn test_soft_drop_moves_one_row_per_tick() {
    let mut game = o_game();
    let down = ButtonState::default().with(Button::Down);
    for _ in 0..5 {
        game.tick(down);
    }
    assert_eq!(game.active().y, 5);
}

#[test]
fn test_same_script_same_game() {
    let script = [ShapeId::T, ShapeId::L, ShapeId::I, ShapeId::S];
    let mut a = Game::new(SequenceShapes::new(script));
    let mut b = Game::new(SequenceShapes::new(script));
    let inputs = [
        ButtonState::default(),
        ButtonState::default().with(Button::Left),
        ButtonState::default().with(Button::Rotate),
        ButtonState::default().with(Button::Down),
    ];

    for i in 0..2_000 {
        let buttons = inputs[i % inputs.len()];
        assert_eq!(a.tick(buttons), b.tick(buttons));
        a.collapse_pending();
        b.collapse_pending();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
