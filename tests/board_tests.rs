//! Board tests - grid storage and line clearing

use blockfall::core::Board;
use blockfall::types::{DEFAULT_COLS, DEFAULT_ROWS, EMPTY_CELL, MAX_BOARD_EDGE};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.cols(), DEFAULT_COLS);
    assert_eq!(board.rows(), DEFAULT_ROWS);

    for row in 0..DEFAULT_ROWS as i32 {
        for col in 0..DEFAULT_COLS as i32 {
            assert_eq!(board.get(col, row), Some(EMPTY_CELL), "({}, {})", col, row);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(10, 0), None);
    assert_eq!(board.get(0, 20), None);
    assert!(!board.is_occupied(-1, 5));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, 3));
    assert_eq!(board.get(5, 10), Some(3));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, EMPTY_CELL));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(10, 0, 1));
    assert!(!board.set(0, -1, 1));
}

#[test]
fn test_custom_dimensions() {
    let board = Board::empty(6, 8);
    assert_eq!((board.cols(), board.rows()), (6, 8));
    assert_eq!(board.cells().len(), 48);

    let tiny = Board::empty(1, 2);
    assert_eq!((tiny.cols(), tiny.rows()), (4, 4));

    let huge = Board::empty(40_000, u16::MAX);
    assert_eq!((huge.cols(), huge.rows()), (MAX_BOARD_EDGE, MAX_BOARD_EDGE));
    assert_eq!(huge.cells().len(), 255 * 255);
}

#[test]
fn test_from_rows_rejects_bad_input() {
    assert!(Board::from_rows(&[]).is_none());
    assert!(Board::from_rows(&["....", "...", "....", "...."]).is_none());
    assert!(Board::from_rows(&["...", "...", "...", "..."]).is_none());

    let wide = ".".repeat(256);
    assert!(Board::from_rows(&[wide.as_str(); 4]).is_none());
}

#[test]
fn test_clear_nothing_when_no_row_full() {
    let mut board = Board::from_rows(&["....", "....", "#.##", "##.#"]).unwrap();
    let before = board.clone();
    assert_eq!(board.clear_full_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_single_row_shifts_rows_above() {
    let mut board = Board::from_rows(&["....", "3...", "..5.", "7777"]).unwrap();

    assert_eq!(board.clear_full_lines(), 1);
    assert_eq!(board.row(0), Some(&[0, 0, 0, 0][..]));
    assert_eq!(board.row(1), Some(&[0, 0, 0, 0][..]));
    assert_eq!(board.row(2), Some(&[3, 0, 0, 0][..]));
    assert_eq!(board.row(3), Some(&[0, 0, 5, 0][..]));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::from_rows(&["2...", "1111", ".4..", "6666", "...5"]).unwrap();

    assert_eq!(board.clear_full_lines(), 2);
    assert_eq!(board.row(2), Some(&[2, 0, 0, 0][..]));
    assert_eq!(board.row(3), Some(&[0, 4, 0, 0][..]));
    assert_eq!(board.row(4), Some(&[0, 0, 0, 5][..]));
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_clear_whole_board() {
    let mut board = Board::from_rows(&["1111", "2222", "3333", "4444"]).unwrap();
    assert_eq!(board.clear_full_lines(), 4);
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_lock_writes_color() {
    let mut board = Board::new();
    board.lock(&[(0, 19), (1, 19), (1, 18), (2, 18)], 4);

    assert_eq!(board.get(0, 19), Some(4));
    assert_eq!(board.get(2, 18), Some(4));
    assert_eq!(board.filled_count(), 4);
}
