//! Game session module - the engine state machine
//!
//! A [`GameSession`] owns the board, the active piece and the piece source,
//! and sequences spawn → fall → lock → clear → respawn. The clock driver feeds
//! it elapsed time through [`GameSession::advance_time`]; the input adapter
//! feeds it [`GameCommand`]s. Every call runs to completion synchronously and
//! nothing here touches I/O or wall-clock time.

use log::{debug, info, trace};

use crate::board::Board;
use crate::collision::{drop_distance, piece_collides, rotation_collides};
use crate::piece::{ActivePiece, PieceCells};
use crate::rng::{PieceSource, UniformRandom};
use crate::scoring::{calculate_level, calculate_line_score, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameCommand, SessionStatus, BASE_DROP_MS, DEFAULT_COLS, DEFAULT_ROWS};

/// Board size and randomness for new rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub cols: u16,
    pub rows: u16,
    /// Seed for the default uniform piece source; `None` uses OS entropy
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            seed: None,
        }
    }
}

/// Emitted when a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_awarded: u32,
    pub level_up: bool,
    /// The replacement piece could not spawn
    pub game_over: bool,
}

/// Result of a command or gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The piece moved or rotated, or the state transition happened
    Applied,
    /// A collision rejected the move; nothing changed
    Blocked,
    /// The piece locked into the board
    Locked(LockEvent),
    /// Not applicable in the current state; nothing changed
    Ignored,
}

impl ActionOutcome {
    /// Whether the board or active piece moved, i.e. a redraw is due
    pub fn changed_state(&self) -> bool {
        matches!(self, ActionOutcome::Applied | ActionOutcome::Locked(_))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession<S = UniformRandom> {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    source: S,
    status: SessionStatus,
    score: u32,
    lines: u32,
    level: u32,
    drop_accumulator_ms: u32,
    drop_interval_ms: u32,
    /// Monotonic round counter (increments on every start)
    round: u32,
    /// Pieces successfully spawned this round
    pieces_spawned: u32,
}

impl GameSession<UniformRandom> {
    /// Idle session drawing kinds uniformly at random
    pub fn new(config: SessionConfig) -> Self {
        Self::with_source(config, UniformRandom::new(config.seed))
    }
}

impl Default for GameSession<UniformRandom> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<S: PieceSource> GameSession<S> {
    /// Idle session drawing kinds from `source`
    pub fn with_source(config: SessionConfig, source: S) -> Self {
        Self {
            config,
            board: Board::empty(config.cols, config.rows),
            active: None,
            source,
            status: SessionStatus::Idle,
            score: 0,
            lines: 0,
            level: 1,
            drop_accumulator_ms: 0,
            drop_interval_ms: BASE_DROP_MS,
            round: 0,
            pieces_spawned: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn playing(&self) -> bool {
        self.status.is_playing()
    }

    pub fn paused(&self) -> bool {
        self.status.is_paused()
    }

    pub fn game_over(&self) -> bool {
        self.status.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_accumulator_ms(&self) -> u32 {
        self.drop_accumulator_ms
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Begin a round on an empty board of the configured size
    pub fn start(&mut self) {
        self.start_on(Board::empty(self.config.cols, self.config.rows));
    }

    /// Begin a round on a prepared board
    ///
    /// If the first piece already collides the session goes straight to
    /// `GameOver` without ever entering `Playing`.
    pub fn start_on(&mut self, board: Board) {
        self.board = board;
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = get_drop_interval_ms(self.level);
        self.drop_accumulator_ms = 0;
        self.pieces_spawned = 0;
        self.round = self.round.wrapping_add(1);

        info!(
            "round {} started on {}x{} board",
            self.round,
            self.board.cols(),
            self.board.rows()
        );

        if self.spawn_piece() {
            self.status = SessionStatus::Playing;
        }
    }

    /// Any state → fresh round
    pub fn reset(&mut self) {
        info!("round {} reset at score {}", self.round, self.score);
        self.start();
    }

    pub fn pause(&mut self) -> ActionOutcome {
        if !self.playing() {
            return ActionOutcome::Ignored;
        }
        self.status = SessionStatus::Paused;
        debug!("paused");
        ActionOutcome::Applied
    }

    pub fn resume(&mut self) -> ActionOutcome {
        if !self.paused() {
            return ActionOutcome::Ignored;
        }
        self.status = SessionStatus::Playing;
        debug!("resumed");
        ActionOutcome::Applied
    }

    /// Feed elapsed time; returns the gravity step outcome if one fired
    ///
    /// A step fires once the accumulator strictly exceeds the drop interval,
    /// after which the accumulator restarts from zero. At most one step runs
    /// per call however large `dt_ms` is.
    pub fn advance_time(&mut self, dt_ms: u32) -> Option<ActionOutcome> {
        if !self.playing() {
            return None;
        }

        self.drop_accumulator_ms = self.drop_accumulator_ms.saturating_add(dt_ms);
        if self.drop_accumulator_ms <= self.drop_interval_ms {
            return None;
        }

        self.drop_accumulator_ms = 0;
        trace!("gravity step");
        Some(self.step_down())
    }

    pub fn move_left(&mut self) -> ActionOutcome {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> ActionOutcome {
        self.try_shift(1)
    }

    /// One row down, or lock if resting; restarts the gravity accumulator
    pub fn soft_drop(&mut self) -> ActionOutcome {
        if !self.playing() {
            return ActionOutcome::Ignored;
        }
        let outcome = self.step_down();
        self.drop_accumulator_ms = 0;
        outcome
    }

    /// Fall to the resting row and lock exactly once
    pub fn hard_drop(&mut self) -> ActionOutcome {
        if !self.playing() {
            return ActionOutcome::Ignored;
        }
        let Some(piece) = self.active.as_mut() else {
            return ActionOutcome::Ignored;
        };

        let distance = drop_distance(&self.board, piece);
        piece.move_by(0, distance);
        trace!("hard drop {} rows", distance);

        ActionOutcome::Locked(self.lock_piece())
    }

    /// Turn clockwise in place; no kick offsets are tried
    pub fn rotate_cw(&mut self) -> ActionOutcome {
        if !self.playing() {
            return ActionOutcome::Ignored;
        }
        let Some(piece) = self.active.as_mut() else {
            return ActionOutcome::Ignored;
        };

        if rotation_collides(&self.board, piece) {
            return ActionOutcome::Blocked;
        }
        piece.apply_rotation();
        ActionOutcome::Applied
    }

    /// Route a discrete input command
    pub fn apply(&mut self, command: GameCommand) -> ActionOutcome {
        trace!("command {}", command.as_str());
        match command {
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::Rotate => self.rotate_cw(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::Pause => self.pause(),
            GameCommand::Resume => self.resume(),
            GameCommand::Restart => {
                self.reset();
                ActionOutcome::Applied
            }
        }
    }

    /// Box row the active piece would rest at after a hard drop
    pub fn ghost_row(&self) -> Option<i32> {
        let active = self.active?;
        Some(active.row + drop_distance(&self.board, &active))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cols = self.board.cols();
        out.rows = self.board.rows();
        self.board.write_cells_into(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.status = self.status;
        out.playing = self.playing();
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.round = self.round;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn try_shift(&mut self, d_col: i32) -> ActionOutcome {
        if !self.playing() {
            return ActionOutcome::Ignored;
        }
        let Some(piece) = self.active.as_mut() else {
            return ActionOutcome::Ignored;
        };

        if piece_collides(&self.board, piece, d_col, 0) {
            return ActionOutcome::Blocked;
        }
        piece.move_by(d_col, 0);
        ActionOutcome::Applied
    }

    /// Shared by gravity and soft drop
    fn step_down(&mut self) -> ActionOutcome {
        let Some(piece) = self.active.as_mut() else {
            return ActionOutcome::Ignored;
        };

        if piece_collides(&self.board, piece, 0, 1) {
            return ActionOutcome::Locked(self.lock_piece());
        }
        piece.move_by(0, 1);
        ActionOutcome::Applied
    }

    /// Draw the next kind and place it; game over if it collides on arrival
    fn spawn_piece(&mut self) -> bool {
        let piece = ActivePiece::spawn_from(&mut self.source, self.board.cols());
        self.drop_accumulator_ms = 0;

        if piece_collides(&self.board, &piece, 0, 0) {
            self.active = None;
            self.status = SessionStatus::GameOver;
            info!(
                "game over: round {} score {} lines {} level {}",
                self.round, self.score, self.lines, self.level
            );
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    /// Write the active piece into the board, clear lines, score, respawn
    fn lock_piece(&mut self) -> LockEvent {
        let Some(piece) = self.active.take() else {
            return LockEvent::default();
        };

        let cells: PieceCells = piece
            .cells()
            .into_iter()
            .filter(|&(col, row)| self.board.in_bounds(col, row))
            .collect();
        self.board.lock(&cells, piece.color_id());

        let lines_cleared = self.board.clear_full_lines();
        let mut score_awarded = 0;
        let mut level_up = false;

        if lines_cleared > 0 {
            self.lines = self.lines.saturating_add(lines_cleared);
            let level = calculate_level(self.lines);
            if level > self.level {
                self.level = level;
                self.drop_interval_ms = get_drop_interval_ms(level);
                level_up = true;
            }

            score_awarded = calculate_line_score(lines_cleared, self.level);
            self.score = self.score.saturating_add(score_awarded);

            debug!(
                "cleared {} lines (+{}), total lines {} level {}",
                lines_cleared, score_awarded, self.lines, self.level
            );
        }

        debug!(
            "locked {:?} at ({}, {}) rotation {}",
            piece.kind,
            piece.col,
            piece.row,
            piece.rotation.index()
        );

        let spawned = self.spawn_piece();
        LockEvent {
            lines_cleared,
            score_awarded,
            level_up,
            game_over: !spawned,
        }
    }

    /// Mutable board access for unit tests
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSequence;
    use crate::types::{PieceKind, Rotation};

    fn session(kinds: &[PieceKind]) -> GameSession<FixedSequence> {
        GameSession::with_source(SessionConfig::default(), FixedSequence::new(kinds.to_vec()))
    }

    #[test]
    fn test_new_session_is_idle() {
        let state = session(&[PieceKind::T]);

        assert_eq!(state.status(), SessionStatus::Idle);
        assert!(!state.playing());
        assert!(!state.paused());
        assert!(!state.game_over());
        assert!(state.active().is_none());
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.round(), 0);
    }

    #[test]
    fn test_start_resets_counters_and_spawns() {
        let mut state = session(&[PieceKind::T]);
        state.start();

        assert!(state.playing());
        assert_eq!(state.round(), 1);
        assert_eq!(state.pieces_spawned(), 1);
        assert_eq!(state.drop_interval_ms(), 1000);

        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.col, active.row), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn test_commands_are_ignored_when_idle() {
        let mut state = session(&[PieceKind::T]);

        assert_eq!(state.move_left(), ActionOutcome::Ignored);
        assert_eq!(state.move_right(), ActionOutcome::Ignored);
        assert_eq!(state.soft_drop(), ActionOutcome::Ignored);
        assert_eq!(state.hard_drop(), ActionOutcome::Ignored);
        assert_eq!(state.rotate_cw(), ActionOutcome::Ignored);
        assert_eq!(state.pause(), ActionOutcome::Ignored);
        assert_eq!(state.resume(), ActionOutcome::Ignored);
        assert_eq!(state.advance_time(5000), None);
        assert_eq!(state.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_move_commits_and_blocks() {
        let mut state = session(&[PieceKind::O]);
        state.start();

        assert_eq!(state.move_right(), ActionOutcome::Applied);
        assert_eq!(state.active().unwrap().col, 4);

        // O occupies box columns 1-2, so the box reaches col 7 at the right wall.
        for _ in 0..3 {
            assert_eq!(state.move_right(), ActionOutcome::Applied);
        }
        assert_eq!(state.active().unwrap().col, 7);
        assert_eq!(state.move_right(), ActionOutcome::Blocked);
        assert_eq!(state.active().unwrap().col, 7);
    }

    #[test]
    fn test_gravity_requires_exceeding_interval() {
        let mut state = session(&[PieceKind::T]);
        state.start();

        assert_eq!(state.advance_time(600), None);
        assert_eq!(state.advance_time(400), None);
        assert_eq!(state.drop_accumulator_ms(), 1000);
        assert_eq!(state.active().unwrap().row, 0);

        assert_eq!(state.advance_time(1), Some(ActionOutcome::Applied));
        assert_eq!(state.active().unwrap().row, 1);
        assert_eq!(state.drop_accumulator_ms(), 0);
    }

    #[test]
    fn test_large_delta_runs_one_step() {
        let mut state = session(&[PieceKind::T]);
        state.start();

        assert_eq!(state.advance_time(10_000), Some(ActionOutcome::Applied));
        assert_eq!(state.active().unwrap().row, 1);
    }

    #[test]
    fn test_soft_drop_resets_accumulator() {
        let mut state = session(&[PieceKind::T]);
        state.start();

        state.advance_time(900);
        assert_eq!(state.soft_drop(), ActionOutcome::Applied);
        assert_eq!(state.drop_accumulator_ms(), 0);
        assert_eq!(state.active().unwrap().row, 1);
    }

    #[test]
    fn test_soft_drop_locks_when_resting() {
        let mut state = session(&[PieceKind::I]);
        state.start();

        let mut locked = None;
        for _ in 0..30 {
            if let ActionOutcome::Locked(ev) = state.soft_drop() {
                locked = Some(ev);
                break;
            }
        }

        let ev = locked.expect("soft drop never locked");
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.game_over);
        assert_eq!(state.board().get(3, 19), Some(PieceKind::I.color_id()));
        assert_eq!(state.board().filled_count(), 4);
        assert_eq!(state.active().unwrap().row, 0);
    }

    #[test]
    fn test_gravity_locks_on_floor() {
        let mut state = session(&[PieceKind::O]);
        state.start();

        let mut outcome = None;
        for _ in 0..40 {
            if let Some(o @ ActionOutcome::Locked(_)) = state.advance_time(1001) {
                outcome = Some(o);
                break;
            }
        }
        assert!(outcome.is_some());
        assert_eq!(state.board().get(4, 19), Some(PieceKind::O.color_id()));
        assert_eq!(state.pieces_spawned(), 2);
    }

    #[test]
    fn test_rotate_blocked_by_stack() {
        let mut state = session(&[PieceKind::I]);
        state.start();
        state.board_mut().set(5, 2, 1);

        assert_eq!(state.rotate_cw(), ActionOutcome::Blocked);
        assert_eq!(state.active().unwrap().rotation, Rotation::North);
    }

    #[test]
    fn test_pause_resume_cycle() {
        let mut state = session(&[PieceKind::T]);
        state.start();
        state.advance_time(700);

        assert_eq!(state.pause(), ActionOutcome::Applied);
        assert_eq!(state.pause(), ActionOutcome::Ignored);
        assert_eq!(state.advance_time(5000), None);
        assert_eq!(state.move_left(), ActionOutcome::Ignored);
        assert_eq!(state.drop_accumulator_ms(), 700);

        assert_eq!(state.resume(), ActionOutcome::Applied);
        assert_eq!(state.resume(), ActionOutcome::Ignored);
        assert_eq!(state.advance_time(301), Some(ActionOutcome::Applied));
    }

    #[test]
    fn test_restart_from_pause() {
        let mut state = session(&[PieceKind::T]);
        state.start();
        state.hard_drop();
        state.pause();

        assert_eq!(state.apply(GameCommand::Restart), ActionOutcome::Applied);
        assert!(state.playing());
        assert_eq!(state.board().filled_count(), 0);
        assert_eq!(state.round(), 2);
    }

    #[test]
    fn test_spawn_resets_accumulator() {
        let mut state = session(&[PieceKind::T]);
        state.start();
        state.advance_time(800);

        state.hard_drop();
        assert_eq!(state.drop_accumulator_ms(), 0);
    }

    #[test]
    fn test_level_up_speeds_gravity() {
        let mut state = session(&[PieceKind::I]);
        state.start();
        state.lines = 9;

        // Fill row 19 except columns 3-6 so a flat I completes it.
        for col in [0, 1, 2, 7, 8, 9] {
            state.board_mut().set(col, 19, 6);
        }

        let ActionOutcome::Locked(ev) = state.hard_drop() else {
            panic!("hard drop must lock");
        };
        assert_eq!(ev.lines_cleared, 1);
        assert!(ev.level_up);
        assert_eq!(state.level(), 2);
        assert_eq!(state.lines(), 10);
        assert_eq!(state.drop_interval_ms(), 800);
        assert_eq!(ev.score_awarded, 80);
        assert_eq!(state.score(), 80);
    }

    #[test]
    fn test_changed_state_per_outcome() {
        let mut state = session(&[PieceKind::T]);
        let idle = state.move_left();
        assert!(matches!(idle, ActionOutcome::Ignored));
        assert!(!idle.changed_state());

        state.start();
        assert!(state.move_left().changed_state());

        let mut last = state.move_left();
        while matches!(last, ActionOutcome::Applied) {
            last = state.move_left();
        }
        assert!(matches!(last, ActionOutcome::Blocked));
        assert!(!last.changed_state());

        let locked = state.hard_drop();
        assert!(matches!(locked, ActionOutcome::Locked(_)));
        assert!(locked.changed_state());
    }

    #[test]
    fn test_ghost_row_tracks_landing() {
        let mut state = session(&[PieceKind::T]);
        state.start();
        // T North fills box rows 1-2.
        assert_eq!(state.ghost_row(), Some(17));

        state.board_mut().set(4, 10, 1);
        assert_eq!(state.ghost_row(), Some(7));
    }
}
