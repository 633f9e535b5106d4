//! Core game logic module - pure, deterministic, and testable
//!
//! All the rules of the falling-block game live here: the field, shapes,
//! collision, scoring and the session state machine. Nothing in this crate
//! touches a terminal, a clock or a socket; callers feed it elapsed time and
//! discrete commands and read back snapshots.
//!
//! # Module Structure
//!
//! - [`board`]: rectangular field of color ids with row clearing
//! - [`shapes`]: the seven kinds in four rotations as 4x4 occupancy grids
//! - [`piece`]: the active piece and its spawn position
//! - [`collision`]: pure placement predicates
//! - [`rng`]: piece sources (uniform random, fixed sequence)
//! - [`scoring`]: line scores, levels and drop intervals
//! - [`session`]: round lifecycle, gravity and command handling
//! - [`snapshot`]: render-sink view of a session
//!
//! # Example
//!
//! ```
//! use blockfall_core::{FixedSequence, GameSession, SessionConfig};
//! use blockfall_types::{GameCommand, PieceKind};
//!
//! let mut game = GameSession::with_source(
//!     SessionConfig::default(),
//!     FixedSequence::new(vec![PieceKind::O]),
//! );
//! game.start();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::HardDrop);
//!
//! assert_eq!(game.board().filled_count(), 4);
//! assert!(game.playing());
//! ```
//!
//! # Timing
//!
//! Gravity is driven by [`GameSession::advance_time`](session::GameSession::advance_time).
//! The driver calls it once per frame (16ms by default) with the elapsed
//! milliseconds; a row drop fires once the accumulated time exceeds the
//! level's interval (1000ms at level 1).

pub mod board;
pub mod collision;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, CellPos};
pub use collision::{collides, drop_distance, piece_collides, rotation_collides};
pub use piece::{spawn_col, ActivePiece, PieceCells};
pub use rng::{FixedSequence, PieceSource, UniformRandom};
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
pub use session::{ActionOutcome, GameSession, LockEvent, SessionConfig};
pub use shapes::{occupancy, Occupancy, ShapeLibrary};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
