//! Engine module - session state and the gravity loop
//!
//! The engine owns the board, the falling piece, the shape generator and
//! the score counters. Callers drive it with wall-clock ticks and player
//! commands; assisted sessions also consult a move source whenever a new
//! piece spawns and then walk the piece toward the advised placement.

use arrayvec::ArrayVec;

use crate::core::scoring;
use crate::core::{Board, Pattern, Piece, PieceRng};
use crate::net::client::RemoteAdvisor;
use crate::net::protocol::GameSnapshot;
use crate::solver::{self, Move};
use crate::types::{Command, GameConfig, GamePhase, MovePacing, ShapeKind};

/// Where a session's moves come from
#[derive(Debug)]
pub enum MoveSource {
    /// Keyboard-driven play, no assistance
    Human,
    /// Built-in heuristic solver
    Heuristic,
    /// Advice fetched from a remote solver over TCP
    Remote(RemoteAdvisor),
}

impl MoveSource {
    /// Whether moves are decided by software rather than the player
    pub fn is_assisted(&self) -> bool {
        !matches!(self, MoveSource::Human)
    }
}

/// Advised placement still being carried out
#[derive(Debug, Clone, Copy)]
struct PendingMove {
    target: Move,
    rotations_done: u32,
}

/// What the most recent piece lock produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
}

/// A single game session
#[derive(Debug)]
pub struct GameEngine {
    board: Board,
    current: Option<Piece>,
    next_kind: Option<ShapeKind>,
    rng: PieceRng,
    phase: GamePhase,
    start_level: u32,
    pacing: MovePacing,
    control: MoveSource,
    score: u32,
    level: u32,
    lines: u32,
    fast_drop: bool,
    last_drop_ms: u64,
    smooth_y: f64,
    pending: Option<PendingMove>,
    last_event: Option<LockEvent>,
}

impl GameEngine {
    /// Create a session. Two engines given the same seed draw the same
    /// shape sequence, which keeps head-to-head games fair.
    pub fn new(config: GameConfig, control: MoveSource, seed: u32) -> Self {
        Self {
            board: Board::new(config.width, config.height),
            current: None,
            next_kind: None,
            rng: PieceRng::new(seed),
            phase: GamePhase::NotStarted,
            start_level: config.start_level,
            pacing: config.pacing,
            control,
            score: 0,
            level: config.start_level,
            lines: 0,
            fast_drop: false,
            last_drop_ms: 0,
            smooth_y: 0.0,
            pending: None,
            last_event: None,
        }
    }

    /// Start (or restart) the session at the given wall-clock time.
    pub fn start_game(&mut self, now_ms: u64) {
        self.phase = GamePhase::Running;
        self.board.clear();
        self.score = 0;
        self.level = self.start_level;
        self.lines = 0;
        self.fast_drop = false;
        self.last_drop_ms = now_ms;
        self.next_kind = None;
        self.pending = None;
        self.last_event = None;
        self.spawn_piece();
    }

    /// End the session. Safe to call in any phase.
    pub fn stop_game(&mut self) {
        self.phase = GamePhase::GameOver;
    }

    /// Draw the next piece and put it in the spawn position, one row above
    /// the visible field. A blocked spawn ends the game with the piece
    /// left in place so callers can still render it.
    fn spawn_piece(&mut self) {
        let kind = self.next_kind.take().unwrap_or_else(|| self.rng.next_kind());
        self.next_kind = Some(self.rng.next_kind());

        let mut piece = Piece::new(kind);
        piece.x = (self.board.width().saturating_sub(piece.width()) / 2) as i32;
        piece.y = -1;
        self.smooth_y = piece.y as f64;

        let blocked = !self.board.is_valid_position(&piece, piece.x, piece.y);
        self.current = Some(piece);
        if blocked {
            self.phase = GamePhase::GameOver;
            return;
        }
        self.request_advice();
    }

    /// Ask the session's move source where the new piece should go.
    fn request_advice(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let Some(piece) = self.current.as_ref() else {
            return;
        };

        let advice = match &self.control {
            MoveSource::Human => None,
            MoveSource::Heuristic => solver::find_best_move(&self.board, piece.kind),
            MoveSource::Remote(advisor) => {
                let snapshot = GameSnapshot::from_parts(&self.board, piece, self.next_kind);
                Some(advisor.request_move(&snapshot).to_move())
            }
        };

        self.pending = advice.map(|target| PendingMove {
            target,
            rotations_done: 0,
        });
        if self.pacing == MovePacing::Immediate {
            self.resolve_pending_now();
        }
    }

    /// Carry out one step of the pending advised move: rotations first,
    /// then horizontal steps toward the target column. Returns whether any
    /// progress was made.
    fn step_pending_action(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        let Some(piece) = self.current else {
            self.pending = None;
            return false;
        };

        if pending.rotations_done < pending.target.rotations {
            // The attempt counts even when the rotation is blocked, so a
            // jammed rotation cannot stall the slide phase forever.
            self.rotate_piece();
            if let Some(p) = self.pending.as_mut() {
                p.rotations_done += 1;
            }
            return true;
        }

        if piece.x < pending.target.column {
            return self.move_piece_right();
        }
        if piece.x > pending.target.column {
            return self.move_piece_left();
        }

        self.pending = None;
        true
    }

    /// Run the pending move to completion in a single burst.
    fn resolve_pending_now(&mut self) {
        // Every rotation step advances a counter and every slide step moves
        // one column, so this bound covers a full move with slack even when
        // remote advice asks for nonsense rotation counts.
        let budget = 4 + self.board.width() + 1;
        for _ in 0..budget {
            if self.pending.is_none() {
                return;
            }
            if !self.step_pending_action() {
                return;
            }
        }
    }

    /// Apply a player command. Returns whether it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_piece_left(),
            Command::MoveRight => self.move_piece_right(),
            Command::Rotate => self.rotate_piece(),
            Command::MoveDown => self.move_piece_down(),
            Command::FastDrop(enabled) => {
                self.set_fast_drop(enabled);
                true
            }
        }
    }

    /// Move the falling piece one column left.
    pub fn move_piece_left(&mut self) -> bool {
        self.shift_piece(-1, 0)
    }

    /// Move the falling piece one column right.
    pub fn move_piece_right(&mut self) -> bool {
        self.shift_piece(1, 0)
    }

    fn shift_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        let new_x = piece.x + dx;
        let new_y = piece.y + dy;
        if !self.board.is_valid_position(piece, new_x, new_y) {
            return false;
        }
        piece.x = new_x;
        piece.y = new_y;
        self.smooth_y = new_y as f64;
        true
    }

    /// Rotate the falling piece clockwise, nudging it off the walls when
    /// the turned pattern does not fit in place. I pieces get the wider
    /// two-column nudge their 4x1 pattern needs.
    pub fn rotate_piece(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        let rotated = Piece::with_pattern(piece.kind, piece.rotated_pattern(), piece.x, piece.y);

        let mut kicks: ArrayVec<i32, 5> = ArrayVec::new();
        kicks.extend([0, -1, 1]);
        if piece.kind == ShapeKind::I {
            kicks.extend([-2, 2]);
        }

        for dx in kicks {
            let new_x = piece.x + dx;
            if self.board.is_valid_position(&rotated, new_x, piece.y) {
                piece.pattern = rotated.pattern;
                piece.x = new_x;
                return true;
            }
        }
        false
    }

    /// Move the piece one row down. Returns false when the piece could not
    /// move and was locked into the board instead.
    pub fn move_piece_down(&mut self) -> bool {
        if self.phase != GamePhase::Running || self.current.is_none() {
            return false;
        }
        if self.shift_piece(0, 1) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Fix the piece into the grid, settle cleared rows, update counters
    /// and spawn the successor.
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        self.board.place(&piece);
        let cleared = self.board.clear_full_rows();
        let points = scoring::points_for_rows(cleared);
        self.score += points;
        self.lines += cleared as u32;
        self.level = scoring::level_for_lines(self.start_level, self.lines);
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            points,
        });
        self.pending = None;
        self.spawn_piece();
    }

    /// Engage or release fast drop. Takes effect on the next tick.
    pub fn set_fast_drop(&mut self, enabled: bool) {
        self.fast_drop = enabled;
    }

    /// Advance the session to the given wall-clock time.
    ///
    /// One tick performs at most one assisted action, updates the smooth
    /// fall position and applies gravity once the drop interval has
    /// elapsed. Returns false when there is nothing to advance.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Running || self.current.is_none() {
            return false;
        }

        // Assisted steering waits until the piece has fully entered the
        // visible field.
        if self.pending.is_some() {
            if let Some(piece) = self.current {
                if piece.y >= 0 {
                    self.step_pending_action();
                }
            }
        }

        let fast = self.fast_drop || self.control.is_assisted();
        let interval = scoring::drop_interval_ms(self.level, fast);
        let elapsed = now_ms.saturating_sub(self.last_drop_ms);

        if let Some(piece) = self.current {
            if self.board.is_valid_position(&piece, piece.x, piece.y + 1) {
                let progress = (elapsed as f64 / interval as f64).min(1.0);
                self.smooth_y = piece.y as f64 + progress;
            } else {
                self.smooth_y = piece.y as f64;
            }
        }

        if elapsed >= interval {
            self.move_piece_down();
            self.last_drop_ms = now_ms;
        }
        true
    }

    /// Board state with locked pieces only.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece, if one is active.
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    /// Kind of the upcoming piece.
    pub fn next_kind(&self) -> Option<ShapeKind> {
        self.next_kind
    }

    /// Spawn-orientation pattern of the upcoming piece, for previews.
    pub fn next_pattern(&self) -> Option<Pattern> {
        self.next_kind.map(Pattern::base)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    /// Fractional fall position for rendering between gravity steps.
    pub fn smooth_y(&self) -> f64 {
        self.smooth_y
    }

    pub fn is_fast_drop(&self) -> bool {
        self.fast_drop
    }

    /// Wire snapshot of the live position, if a piece is active.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        let piece = self.current.as_ref()?;
        Some(GameSnapshot::from_parts(&self.board, piece, self.next_kind))
    }

    /// Take the result of the most recent lock, clearing it.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }
}
