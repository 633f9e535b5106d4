//! Collision module - pure placement predicates
//!
//! A shape collides when any filled cell lands outside `[0, cols)`, at or
//! below the floor, or on a locked cell. Rows above the field (`row < 0`)
//! never count as occupied but still obey the column bounds.

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::shapes::occupancy;
use crate::types::{PieceKind, Rotation};

/// Would `kind` at `rotation`, with its box at `(origin_col, origin_row)`
/// shifted by `(d_col, d_row)`, overlap a wall, the floor or a locked cell?
///
/// Scans cells row-major and stops at the first violation.
pub fn collides(
    board: &Board,
    kind: PieceKind,
    rotation: Rotation,
    origin_col: i32,
    origin_row: i32,
    d_col: i32,
    d_row: i32,
) -> bool {
    let cols = board.cols() as i32;
    let rows = board.rows() as i32;

    occupancy(kind, rotation).offsets().any(|(c, r)| {
        let col = origin_col + c + d_col;
        let row = origin_row + r + d_row;
        col < 0 || col >= cols || row >= rows || (row >= 0 && board.is_occupied(col, row))
    })
}

/// [`collides`] for a piece in its current rotation
pub fn piece_collides(board: &Board, piece: &ActivePiece, d_col: i32, d_row: i32) -> bool {
    collides(
        board,
        piece.kind,
        piece.rotation,
        piece.col,
        piece.row,
        d_col,
        d_row,
    )
}

/// [`collides`] for a piece turned once clockwise in place
pub fn rotation_collides(board: &Board, piece: &ActivePiece) -> bool {
    collides(
        board,
        piece.kind,
        piece.rotation.rotate_cw(),
        piece.col,
        piece.row,
        0,
        0,
    )
}

/// Rows the piece can fall before the next step down would collide
pub fn drop_distance(board: &Board, piece: &ActivePiece) -> i32 {
    let mut distance = 0;
    while !piece_collides(board, piece, 0, distance + 1) {
        distance += 1;
    }
    distance
}
