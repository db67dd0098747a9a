use blockfall::core::{GameState, Grid, LockTable};
use blockfall::term::{changed_runs, GameView, Viewport};
use blockfall::types::{EndReason, GameAction, GameStatus, PieceKind, TICK_MS};

fn screen_text(fb: &blockfall::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide, 20 rows + border = 22 tall.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let table = LockTable::from_rows(&["#........."], PieceKind::J.color());
    let mut snap = GameState::new(1).snapshot();
    snap.grid = Grid::project(&table, None);
    snap.active = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside the border the well starts at (1, 1).
    for x in [1, 2] {
        let cell = fb.get(x, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, PieceKind::J.color());
    }
    assert_ne!(fb.get(3, 20).unwrap().ch, '█');
}

#[test]
fn term_view_shows_active_piece_once_visible() {
    let mut game = GameState::new(1);
    // Spawn is above the well; fall far enough for every kind to show.
    for _ in 0..6 {
        game.tick(300, &[]);
    }
    let fb = GameView::default().render(&game.snapshot(), Viewport::new(22, 22));
    let blocks = screen_text(&fb).chars().filter(|&c| c == '█').count();
    assert_eq!(blocks, 8);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.lines = 10;

    let view = GameView::default();
    let text = screen_text(&view.render(&snap, Viewport::new(60, 24)));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("LINES"));
    assert!(text.contains("NEXT"));

    let narrow = screen_text(&view.render(&snap, Viewport::new(22, 22)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn term_view_overlays_pause_and_game_over() {
    let mut game = GameState::new(1);
    game.tick(TICK_MS, &[GameAction::Pause]);
    let view = GameView::default();
    let text = screen_text(&view.render(&game.snapshot(), Viewport::new(40, 24)));
    assert!(text.contains("PAUSED"));

    let mut snap = game.snapshot();
    snap.paused = false;
    snap.status = GameStatus::Terminated(EndReason::ToppedOut);
    let text = screen_text(&view.render(&snap, Viewport::new(40, 24)));
    assert!(text.contains("GAME OVER"));
}

#[test]
fn moving_the_piece_dirties_few_runs() {
    let mut game = GameState::new(1);
    for _ in 0..6 {
        game.tick(300, &[]);
    }
    let view = GameView::default();
    let vp = Viewport::new(60, 24);
    let before = view.render(&game.snapshot(), vp);
    game.tick(TICK_MS, &[GameAction::MoveLeft]);
    let after = view.render(&game.snapshot(), vp);

    let runs = changed_runs(&before, &after);
    assert!(!runs.is_empty());
    // Only rows of the well can change; the panel text stays put.
    assert!(runs.iter().all(|&(_, y, _)| (1..=22).contains(&y)));
}
