//! Game state module - the session state machine
//!
//! This module ties together the lock table, the active piece, the lookahead queue and
//! scoring. It owns all of them exclusively; renderers only ever see [`GameSnapshot`]s.
//!
//! Within one tick, gravity is resolved before player input. A down command in the same
//! frame as a gravity step therefore moves the piece a second row.

use log::{debug, info};

use crate::collision::{can_move_down, is_valid_placement, occupied_cells};
use crate::grid::Grid;
use crate::lock_table::LockTable;
use crate::piece::Piece;
use crate::rng::PieceQueue;
use crate::scoring::line_clear_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Tunables of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Gravity threshold; the fall timer must exceed it
    pub fall_interval_ms: u32,
    /// Length of the lookahead queue (clamped to 1..=MAX_QUEUE_LEN)
    pub queue_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fall_interval_ms: FALL_INTERVAL_MS,
            queue_len: DEFAULT_QUEUE_LEN,
        }
    }
}

/// What happened during one [`GameState::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The fall timer fired (whether or not the piece moved)
    pub gravity_step: bool,
    pub lock: Option<LockEvent>,
    pub terminated: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: SessionConfig,
    lock_table: LockTable,
    active: Piece,
    queue: PieceQueue,
    score: u32,
    lines: u32,
    /// Pieces that became active, including the first one
    pieces: u32,
    fall_timer_ms: u32,
    ready_to_lock: bool,
    paused: bool,
    status: GameStatus,
}

impl GameState {
    /// Create a new session with default tunables and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(SessionConfig::default(), seed)
    }

    pub fn with_config(config: SessionConfig, seed: u32) -> Self {
        Self::with_board(config, seed, LockTable::new())
    }

    /// Start a session on a prepared lock table
    pub fn with_board(config: SessionConfig, seed: u32, lock_table: LockTable) -> Self {
        let config = SessionConfig {
            queue_len: config.queue_len.clamp(1, MAX_QUEUE_LEN),
            ..config
        };
        let mut queue = PieceQueue::new(seed, config.queue_len);
        let active = queue.pop();
        debug!("session start: seed={} first={:?}", seed, active.kind);

        Self {
            config,
            lock_table,
            active,
            queue,
            score: 0,
            lines: 0,
            pieces: 1,
            fall_timer_ms: 0,
            ready_to_lock: false,
            paused: false,
            status: GameStatus::Running,
        }
    }

    /// Replace this session with a fresh one seeded from the current RNG state
    pub fn restart(&mut self) {
        let seed = self.queue.seed();
        info!("restart after score={} lines={}", self.score, self.lines);
        *self = Self::with_config(self.config, seed);
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminated(&self) -> bool {
        self.status.is_terminated()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn ready_to_lock(&self) -> bool {
        self.ready_to_lock
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn lock_table(&self) -> &LockTable {
        &self.lock_table
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    /// Upcoming kinds, front first
    pub fn next_queue(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.queue.kinds()
    }

    /// Color projection of the playfield with the active piece overlaid
    pub fn grid(&self) -> Grid {
        let active = (!self.is_terminated()).then_some(&self.active);
        Grid::project(&self.lock_table, active)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid = self.grid();
        out.active = (!self.is_terminated()).then(|| ActiveSnapshot::from(self.active));
        out.next_queue.clear();
        out.next_queue.extend(self.queue.kinds().take(MAX_QUEUE_LEN));
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.paused = self.paused;
        out.status = self.status;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a tentative mutation and revert it with `undo` if the result does not fit
    fn try_step(&mut self, step: fn(&mut Piece), undo: fn(&mut Piece)) -> bool {
        step(&mut self.active);
        if is_valid_placement(&self.active, &self.lock_table) {
            return true;
        }
        undo(&mut self.active);
        false
    }

    /// Apply a single player action; returns whether anything changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.is_terminated() {
            return false;
        }

        match action {
            GameAction::Pause => {
                self.paused = !self.paused;
                true
            }
            GameAction::Quit => {
                info!("quit: score={} lines={}", self.score, self.lines);
                self.status = GameStatus::Terminated(EndReason::Quit);
                true
            }
            _ if self.paused => false,
            GameAction::MoveLeft => self.try_step(Piece::move_left, Piece::move_right),
            GameAction::MoveRight => self.try_step(Piece::move_right, Piece::move_left),
            GameAction::MoveDown => self.try_step(Piece::move_down, Piece::move_up),
            GameAction::RotateCw => self.try_step(Piece::rotate_cw, Piece::rotate_ccw),
            GameAction::RotateCcw => self.try_step(Piece::rotate_ccw, Piece::rotate_cw),
        }
    }

    /// Lock the active piece, clear rows, score, and promote the next queued piece
    ///
    /// The active piece must be resting: calling this while it could still fall is a bug.
    pub fn lock_piece(&mut self) -> LockEvent {
        debug_assert!(
            !can_move_down(&self.active, &self.lock_table),
            "lock_piece called while {:?} can still fall",
            self.active
        );

        let piece = self.active;
        self.lock_table.lock(&occupied_cells(&piece), piece.color());

        let cleared = self.lock_table.clear_full_rows();
        let score_delta = line_clear_score(cleared.len());
        self.score = self.score.saturating_add(score_delta);
        self.lines += cleared.len() as u32;

        self.active = self.queue.pop();
        self.pieces = self.pieces.wrapping_add(1);
        self.ready_to_lock = false;

        let event = LockEvent {
            kind: piece.kind,
            lines_cleared: cleared.len() as u32,
            score_delta,
        };
        debug!(
            "locked {:?} at ({}, {}) rot {}: cleared {:?}, +{}",
            piece.kind,
            piece.x,
            piece.y,
            piece.rotation,
            cleared.as_slice(),
            score_delta
        );
        event
    }

    /// Advance the session by one frame
    ///
    /// Order: fall timer, gravity step, player actions, lock, loss check.
    pub fn tick(&mut self, elapsed_ms: u32, actions: &[GameAction]) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.is_terminated() {
            outcome.terminated = true;
            return outcome;
        }

        if self.paused {
            for &action in actions {
                if matches!(action, GameAction::Pause | GameAction::Quit) {
                    self.apply_action(action);
                }
            }
            outcome.terminated = self.is_terminated();
            return outcome;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms > self.config.fall_interval_ms {
            self.fall_timer_ms = 0;
            outcome.gravity_step = true;
            if !self.try_step(Piece::move_down, Piece::move_up) {
                self.ready_to_lock = true;
            }
        }

        for &action in actions {
            self.apply_action(action);
        }
        if self.is_terminated() {
            outcome.terminated = true;
            return outcome;
        }

        if self.ready_to_lock {
            if can_move_down(&self.active, &self.lock_table) {
                // Slid off its support after the gravity check; keep falling.
                debug!("lock cancelled for {:?}", self.active.kind);
                self.ready_to_lock = false;
            } else {
                outcome.lock = Some(self.lock_piece());
            }
        }

        if self.lock_table.is_topped_out() {
            info!(
                "game over: score={} lines={} pieces={}",
                self.score, self.lines, self.pieces
            );
            self.status = GameStatus::Terminated(EndReason::ToppedOut);
        }

        outcome.terminated = self.is_terminated();
        outcome
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Piece) {
        self.active = piece;
    }

    #[cfg(test)]
    pub(crate) fn lock_table_mut(&mut self) -> &mut LockTable {
        &mut self.lock_table
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
