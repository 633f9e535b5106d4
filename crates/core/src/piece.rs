//! Active piece module - the currently falling tetromino
//!
//! An [`ActivePiece`] is just `(kind, rotation, origin)`. Its occupied board
//! cells are derived on demand from the shape library, translated by the
//! origin. Probing operations (`translated`, `rotated_cw`) are pure; commits
//! (`move_by`, `apply_rotation`) mutate and are only called after the session
//! has confirmed there is no collision.

use arrayvec::ArrayVec;

use crate::board::CellPos;
use crate::rng::PieceSource;
use crate::shapes::{occupancy, Occupancy};
use crate::types::{PieceKind, Rotation, SHAPE_GRID};

/// Absolute cells covered by a piece (at most a full 4x4 grid).
pub type PieceCells = ArrayVec<CellPos, { SHAPE_GRID * SHAPE_GRID }>;

/// Spawn row of the bounding box top edge
pub const SPAWN_ROW: i32 = 0;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Left edge of the 4x4 bounding box
    pub col: i32,
    /// Top edge of the 4x4 bounding box (may be negative)
    pub row: i32,
}

impl ActivePiece {
    /// Create a piece at the canonical spawn position for a board `cols` wide
    pub fn spawn(kind: PieceKind, cols: u16) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            col: spawn_col(cols),
            row: SPAWN_ROW,
        }
    }

    /// Spawn with the kind drawn from `source`
    pub fn spawn_from<S: PieceSource + ?Sized>(source: &mut S, cols: u16) -> Self {
        Self::spawn(source.next_kind(), cols)
    }

    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Occupancy grid for the current rotation
    pub fn occupancy(&self) -> Occupancy {
        occupancy(self.kind, self.rotation)
    }

    /// Cells the piece covers right now
    pub fn cells(&self) -> PieceCells {
        self.translated(0, 0)
    }

    /// Cells the piece would cover after shifting by `(d_col, d_row)`
    pub fn translated(&self, d_col: i32, d_row: i32) -> PieceCells {
        place(self.occupancy(), self.col + d_col, self.row + d_row)
    }

    /// Cells the piece would cover after one clockwise turn in place
    pub fn rotated_cw(&self) -> PieceCells {
        place(
            occupancy(self.kind, self.rotation.rotate_cw()),
            self.col,
            self.row,
        )
    }

    /// Commit a translation
    pub fn move_by(&mut self, d_col: i32, d_row: i32) {
        self.col += d_col;
        self.row += d_row;
    }

    /// Commit one clockwise turn
    pub fn apply_rotation(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }
}

/// Bounding box column that centers a 4-wide grid; 3 on a 10-wide board.
pub fn spawn_col(cols: u16) -> i32 {
    (cols as i32 - SHAPE_GRID as i32) / 2
}

fn place(shape: Occupancy, col: i32, row: i32) -> PieceCells {
    shape.offsets().map(|(dc, dr)| (col + dc, row + dr)).collect()
}
