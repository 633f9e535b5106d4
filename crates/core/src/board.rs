//! Board module - manages the game grid
//!
//! The board is a `cols x rows` grid (10x20 by default) where each cell holds
//! `0` for empty or the color id (1..=7) of a locked piece.
//! Storage is a flat row-major vector sized once at construction.
//! Coordinates: (col, row) where col runs left to right and row 0 is the top.

use crate::types::{Cell, DEFAULT_COLS, DEFAULT_ROWS, EMPTY_CELL, MAX_BOARD_EDGE, MIN_BOARD_EDGE};

/// Absolute board position `(col, row)`.
pub type CellPos = (i32, i32);

/// The playfield grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cols: u16,
    rows: u16,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the default 10x20 size
    pub fn new() -> Self {
        Self::empty(DEFAULT_COLS, DEFAULT_ROWS)
    }

    /// Create a board with every cell empty
    ///
    /// Each edge is clamped to `MIN_BOARD_EDGE..=MAX_BOARD_EDGE` so any shape
    /// grid fits.
    pub fn empty(cols: u16, rows: u16) -> Self {
        let cols = cols.clamp(MIN_BOARD_EDGE, MAX_BOARD_EDGE);
        let rows = rows.clamp(MIN_BOARD_EDGE, MAX_BOARD_EDGE);
        Self {
            cols,
            rows,
            cells: vec![EMPTY_CELL; cols as usize * rows as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `.` is empty, `1`..=`7` is that color id, any other character is a
    /// filled cell with color id 1. Returns `None` when rows are ragged or the
    /// result would be smaller than 4x4 or larger than 255x255.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["....", "....", "....", "##.#"]).unwrap();
    /// assert!(board.is_occupied(0, 3));
    /// assert!(!board.is_occupied(2, 3));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let cols = rows.first()?.chars().count();
        let edges = MIN_BOARD_EDGE as usize..=MAX_BOARD_EDGE as usize;
        if !edges.contains(&cols) || !edges.contains(&rows.len()) {
            return None;
        }
        if rows.iter().any(|r| r.chars().count() != cols) {
            return None;
        }

        let cells = rows
            .iter()
            .flat_map(|r| r.chars())
            .map(|ch| match ch {
                '.' => EMPTY_CELL,
                '1'..='7' => ch as u8 - b'0',
                _ => 1,
            })
            .collect();

        Some(Self {
            cols: u16::try_from(cols).ok()?,
            rows: u16::try_from(rows.len()).ok()?,
            cells,
        })
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if !self.in_bounds(col, row) {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Check if position lies inside the grid
    #[inline(always)]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.cols as i32 && row >= 0 && row < self.rows as i32
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        self.index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        match self.index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and non-zero)
    ///
    /// Wall and floor checks belong to the collision engine; out-of-bounds
    /// positions simply report `false` here.
    #[inline(always)]
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        matches!(self.get(col, row), Some(c) if c != EMPTY_CELL)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|&c| c != EMPTY_CELL))
            .unwrap_or(false)
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows as usize {
            return None;
        }
        let width = self.cols as usize;
        let start = row * width;
        Some(&self.cells[start..start + width])
    }

    /// Write `color_id` into every listed cell.
    ///
    /// Callers guarantee every position is in bounds. Out-of-bounds cells trip
    /// a debug assertion and are skipped in release builds.
    pub fn lock(&mut self, cells: &[CellPos], color_id: u8) {
        for &(col, row) in cells {
            let written = self.set(col, row, color_id);
            debug_assert!(written, "lock outside board at ({}, {})", col, row);
        }
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows above a removed row shift down, the same number of empty rows
    /// appear at the top, and the remaining rows keep their relative order.
    /// Two-pointer compaction from the bottom, no allocation.
    pub fn clear_full_lines(&mut self) -> u32 {
        let width = self.cols as usize;
        let mut cleared = 0u32;
        let mut write_row = self.rows as usize;

        for read_row in (0..self.rows as usize).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        self.cells[..write_row * width].fill(EMPTY_CELL);
        cleared
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }

    /// Copy the grid into `out`, reusing its allocation
    pub fn write_cells_into(&self, out: &mut Vec<Cell>) {
        out.clear();
        out.extend_from_slice(&self.cells);
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.cols as usize)
            .map(|r| r.to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
