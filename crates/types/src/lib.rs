//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the engine, the input adapter
//! and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows, row 0 at the top.
//! Pieces spawn with their 4x4 bounding box at column `(cols - 4) / 2`
//! (column 3 on the default board) and row 0.
//!
//! # Cell Values
//!
//! | Value | Meaning |
//! |-------|---------|
//! | 0 | empty |
//! | 1..=7 | locked cell, color id of I, O, T, S, Z, J, L |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 800ms |
//! | 3 | 650ms |
//! | 4 | 500ms |
//! | 5 | 400ms |
//! | 6 | 320ms |
//! | 7 | 250ms |
//! | 8 | 200ms |
//! | 9 | 160ms |
//! | 10+ | 120ms floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameCommand, PieceKind, Rotation, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.color_id(), 3);
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//!
//! assert_eq!(DEFAULT_COLS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

use serde::Serialize;

/// Default board width in cells
pub const DEFAULT_COLS: u16 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Smallest board edge that still fits a whole 4x4 shape grid
pub const MIN_BOARD_EDGE: u16 = 4;

/// Largest accepted board edge
pub const MAX_BOARD_EDGE: u16 = 255;

/// Edge length of every shape occupancy grid
pub const SHAPE_GRID: usize = 4;

/// Default clock driver cadence in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 1, Index 8 = Level 9
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Drop interval once the table above is exhausted
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Lines needed per level increase
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (classic rules)
///
/// Base points for clearing N lines in one lock, multiplied by the level:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per line beyond four in a single lock (only reachable on prepared boards)
pub const EXTRA_LINE_SCORE: u32 = 300;

/// Empty board cell
pub const EMPTY_CELL: u8 = 0;

/// A board cell: `0` when empty, otherwise the color id of the locked piece.
pub type Cell = u8;


/// The seven tetromino piece kinds
///
/// Each piece maps to exactly one color id:
/// - **I**: 1, cyan bar
/// - **O**: 2, yellow square
/// - **T**: 3, purple T
/// - **S**: 4, green S
/// - **Z**: 5, red Z
/// - **J**: 6, blue J
/// - **L**: 7, orange L
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in color id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Color id written into the board when this kind locks (1..=7).
    pub const fn color_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]; `None` for empty or unknown values.
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the side panel.
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states, in clockwise order
///
/// - **North**: spawn orientation, index 0
/// - **East**: one clockwise turn, index 1
/// - **South**: two turns, index 2
/// - **West**: three turns, index 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::East.rotate_cw(), Rotation::South);
    /// assert_eq!(Rotation::South.rotate_cw(), Rotation::West);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotation index 0..=3
    pub const fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any index; taken mod 4.
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete commands the input adapter may send to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, or lock it if it is resting
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece to its resting row and lock it
    HardDrop,
    /// Halt gravity and movement
    Pause,
    /// Continue a paused round
    Resume,
    /// Begin a fresh round from any state
    Restart,
}

impl GameCommand {
    /// Parse command from a camelCase or lowercase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("rotate"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "rotate" => Some(GameCommand::Rotate),
            "harddrop" => Some(GameCommand::HardDrop),
            "pause" => Some(GameCommand::Pause),
            "resume" => Some(GameCommand::Resume),
            "restart" => Some(GameCommand::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::Restart => "restart",
        }
    }
}

/// Session lifecycle
///
/// `Idle → Playing ⇄ Paused`, `Playing → GameOver`. Only a restart leaves
/// `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    GameOver,
}

impl SessionStatus {
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionStatus::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, SessionStatus::Paused)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, SessionStatus::GameOver)
    }
}
