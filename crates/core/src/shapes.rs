//! Shapes module - the static tetromino table
//!
//! Every piece kind has four 4x4 occupancy grids, one per rotation, listed in
//! clockwise order. A grid row is stored as a 4-bit mask where bit 3 is grid
//! column 0, so `0b0110` fills columns 1 and 2.
//!
//! The table is built at compile time into a single `static` and handed out by
//! shared reference; nothing mutates it.

use crate::types::{PieceKind, Rotation, SHAPE_GRID};

/// Offset of one filled grid cell, `(col, row)` inside the 4x4 box.
pub type GridOffset = (i32, i32);

/// A 4x4 occupancy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupancy([u8; SHAPE_GRID]);

impl Occupancy {
    const fn from_rows(rows: [u8; SHAPE_GRID]) -> Self {
        Self(rows)
    }

    /// Whether grid cell `(col, row)` is filled. Out-of-grid cells are empty.
    #[inline(always)]
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < SHAPE_GRID && row < SHAPE_GRID && self.0[row] & (0b1000 >> col) != 0
    }

    /// Filled grid offsets in row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = GridOffset> + '_ {
        (0..SHAPE_GRID).flat_map(move |row| {
            (0..SHAPE_GRID)
                .filter(move |&col| self.is_filled(col, row))
                .map(move |col| (col as i32, row as i32))
        })
    }

    /// Number of filled cells.
    pub fn count(&self) -> usize {
        self.0.iter().map(|r| r.count_ones() as usize).sum()
    }

    /// Expand into a boolean grid, indexed `[row][col]`.
    pub fn to_grid(&self) -> [[bool; SHAPE_GRID]; SHAPE_GRID] {
        let mut grid = [[false; SHAPE_GRID]; SHAPE_GRID];
        for (row, line) in grid.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = self.is_filled(col, row);
            }
        }
        grid
    }
}

/// Immutable lookup of shape grids and color ids for all seven kinds.
#[derive(Debug)]
pub struct ShapeLibrary {
    shapes: [[Occupancy; 4]; 7],
}

static LIBRARY: ShapeLibrary = ShapeLibrary::standard();

impl ShapeLibrary {
    /// The process-wide table.
    pub fn global() -> &'static ShapeLibrary {
        &LIBRARY
    }

    /// Occupancy of `kind` at `rotation`.
    pub fn occupancy(&self, kind: PieceKind, rotation: Rotation) -> Occupancy {
        self.shapes[(kind.color_id() - 1) as usize][rotation.index() as usize]
    }

    /// Color id written into the board for `kind`.
    pub fn color_id(&self, kind: PieceKind) -> u8 {
        kind.color_id()
    }

    const fn standard() -> Self {
        const fn grid(rows: [u8; SHAPE_GRID]) -> Occupancy {
            Occupancy::from_rows(rows)
        }

        Self {
            shapes: [
                // I
                [
                    grid([0b0000, 0b1111, 0b0000, 0b0000]),
                    grid([0b0010, 0b0010, 0b0010, 0b0010]),
                    grid([0b0000, 0b0000, 0b1111, 0b0000]),
                    grid([0b0100, 0b0100, 0b0100, 0b0100]),
                ],
                // O
                [
                    grid([0b0000, 0b0110, 0b0110, 0b0000]),
                    grid([0b0000, 0b0110, 0b0110, 0b0000]),
                    grid([0b0000, 0b0110, 0b0110, 0b0000]),
                    grid([0b0000, 0b0110, 0b0110, 0b0000]),
                ],
                // T
                [
                    grid([0b0000, 0b0100, 0b1110, 0b0000]),
                    grid([0b0000, 0b0100, 0b0110, 0b0100]),
                    grid([0b0000, 0b0000, 0b1110, 0b0100]),
                    grid([0b0000, 0b0100, 0b1100, 0b0100]),
                ],
                // S
                [
                    grid([0b0000, 0b0011, 0b0110, 0b0000]),
                    grid([0b0000, 0b0100, 0b0110, 0b0010]),
                    grid([0b0000, 0b0000, 0b0011, 0b0110]),
                    grid([0b0000, 0b0100, 0b0110, 0b0010]),
                ],
                // Z
                [
                    grid([0b0000, 0b0110, 0b0011, 0b0000]),
                    grid([0b0000, 0b0010, 0b0110, 0b0100]),
                    grid([0b0000, 0b0000, 0b0110, 0b0011]),
                    grid([0b0000, 0b0010, 0b0110, 0b0100]),
                ],
                // J
                [
                    grid([0b0000, 0b0100, 0b0111, 0b0000]),
                    grid([0b0000, 0b0010, 0b0010, 0b0110]),
                    grid([0b0000, 0b0000, 0b0111, 0b0001]),
                    grid([0b0000, 0b0110, 0b0100, 0b0100]),
                ],
                // L
                [
                    grid([0b0000, 0b0001, 0b0111, 0b0000]),
                    grid([0b0000, 0b0110, 0b0010, 0b0010]),
                    grid([0b0000, 0b0000, 0b0111, 0b0100]),
                    grid([0b0000, 0b0100, 0b0100, 0b0110]),
                ],
            ],
        }
    }
}

/// Occupancy lookup against the global table.
pub fn occupancy(kind: PieceKind, rotation: Rotation) -> Occupancy {
    ShapeLibrary::global().occupancy(kind, rotation)
}
