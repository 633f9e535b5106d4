use blockfall::core::{ActiveSnapshot, FixedSequence, GameSession, GameSnapshot, SessionConfig};
use blockfall::term::{GameView, Viewport};
use blockfall::types::{PieceKind, Rotation, SessionStatus};

fn started(kind: PieceKind) -> GameSnapshot {
    let source = FixedSequence::new(vec![kind]);
    let mut game = GameSession::with_source(SessionConfig::default(), source);
    game.start();
    game.snapshot()
}

fn idle() -> GameSnapshot {
    let source = FixedSequence::new(PieceKind::ALL);
    GameSession::with_source(SessionConfig::default(), source).snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide, 20 rows + border = 22 high.
    let fb = view.render(&idle(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = idle();
    snap.board[19 * 10] = PieceKind::I.color_id();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_and_ghost() {
    let snap = started(PieceKind::O);
    assert_eq!(snap.ghost_row, Some(17));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // O covers board columns 4-5; board column 4 starts at x = 1 + 4 * 2.
    assert_eq!(fb.get(9, 2).unwrap().ch, '█');
    assert_eq!(fb.get(12, 3).unwrap().ch, '█');
    assert_eq!(fb.get(9, 19).unwrap().ch, '░');
    assert_eq!(fb.get(12, 20).unwrap().ch, '░');
}

#[test]
fn term_view_without_ghost() {
    let snap = started(PieceKind::O);
    let fb = GameView::default()
        .with_ghost(false)
        .render(&snap, Viewport::new(22, 22));
    assert!(!fb.contains_text("░"));
}

#[test]
fn term_view_clips_rows_above_field() {
    let mut snap = started(PieceKind::I);
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::I,
        rotation: Rotation::North,
        col: 3,
        row: -2,
    });
    snap.ghost_row = None;

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(!fb.contains_text("█"));
    assert_eq!(fb.get(7, 0).unwrap().ch, '─');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = started(PieceKind::T);
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(60, 22));

    assert!(fb.contains_text("SCORE"));
    assert!(fb.contains_text("1234"));
    assert!(fb.contains_text("LEVEL"));
    assert!(fb.contains_text("LINES"));

    let narrow = view.render(&snap, Viewport::new(22, 22));
    assert!(!narrow.contains_text("SCORE"));
}

#[test]
fn term_view_status_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(40, 22);

    let mut snap = started(PieceKind::T);
    assert!(!view.render(&snap, vp).contains_text("PAUSED"));

    snap.status = SessionStatus::Paused;
    snap.paused = true;
    let fb = view.render(&snap, vp);
    assert!(fb.contains_text("PAUSED"));
    assert!(fb.contains_text("R restart"));

    snap.status = SessionStatus::GameOver;
    snap.paused = false;
    snap.game_over = true;
    let fb = view.render(&snap, vp);
    assert!(fb.contains_text("GAME OVER"));
    assert!(fb.contains_text("R to restart"));

    assert!(view.render(&idle(), vp).contains_text("ENTER to start"));
}

#[test]
fn term_view_follows_board_size() {
    let config = SessionConfig {
        cols: 6,
        rows: 8,
        seed: Some(1),
    };
    let mut game = GameSession::new(config);
    game.start();

    let fb = GameView::default().render(&game.snapshot(), Viewport::new(14, 10));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(13, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_side_panel_shows_active_piece() {
    let view = GameView::default();
    let vp = Viewport::new(60, 22);

    // Panel rows: SCORE, LEVEL and LINES take three rows each, then PIECE.
    let mut snap = started(PieceKind::T);
    let fb = view.render(&snap, vp);
    assert!(fb.row_text(9).contains("PIECE"));
    assert!(fb.row_text(10).contains('T'));

    snap.active = None;
    snap.ghost_row = None;
    let fb = view.render(&snap, vp);
    assert!(fb.row_text(10).contains('-'));
    assert!(!fb.row_text(10).contains('T'));
}

#[test]
fn term_view_oversized_board_is_clipped() {
    let view = GameView::default();
    let vp = Viewport::new(22, 22);

    let frame = view.layout(40_000, u16::MAX, vp);
    assert_eq!((frame.x, frame.y), (0, 0));
    assert_eq!((frame.w, frame.h), (u16::MAX, u16::MAX));

    let snap = GameSnapshot {
        cols: 255,
        rows: 255,
        board: vec![PieceKind::S.color_id(); 255 * 255],
        ..GameSnapshot::default()
    };
    let fb = view.render(&snap, vp);
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 21).unwrap().ch, '█');
    assert!(!fb.contains_text("SCORE"));
}
