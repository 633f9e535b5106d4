//! Render-sink snapshot of a session
//!
//! Everything a renderer needs to redraw the field from scratch. No diffing
//! contract: consumers repaint the whole frame from each snapshot.

use serde::Serialize;

use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, Rotation, SessionStatus, EMPTY_CELL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i32,
    pub row: i32,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            col: value.col,
            row: value.row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct GameSnapshot {
    pub cols: u16,
    pub rows: u16,
    /// Row-major cells, `rows * cols` long
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    /// Box row the active piece would rest at after a hard drop
    pub ghost_row: Option<i32>,
    pub status: SessionStatus,
    pub playing: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub round: u32,
}

impl GameSnapshot {
    /// Cell at `(col, row)`; empty when out of bounds
    pub fn cell(&self, col: i32, row: i32) -> Cell {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return EMPTY_CELL;
        }
        self.board[row as usize * self.cols as usize + col as usize]
    }

    pub fn playable(&self) -> bool {
        self.playing && !self.game_over && !self.paused
    }
}
