//! Game state module - manages one complete play session
//!
//! This module ties together all core components: board, pieces, randomizer,
//! collision, rotation and scoring. It owns the lifecycle state machine and
//! advances gravity from host-provided elapsed time.

use tracing::{debug, info, trace, warn};

use crate::board::Board;
use crate::collision::{collides, drop_distance};
use crate::config::EngineConfig;
use crate::rng::Randomizer;
use crate::rotation::try_rotate;
use crate::scoring::{calculate_drop_score, calculate_score, drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::stats::GameOverReport;
use crate::tetromino::Tetromino;
use crate::types::{GameAction, LockEvent, Phase, PieceKind};

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    current: Option<Tetromino>,
    next: PieceKind,
    randomizer: Randomizer,
    phase: Phase,
    /// Monotonic session id (increments on reset/restart).
    episode_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    max_combo: u32,
    pieces_locked: u32,
    drop_interval_ms: u32,
    drop_timer_ms: u32,
    play_time_ms: u64,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    game_over_report: Option<GameOverReport>,
    /// Set on entering game over, cleared by `take_game_over`.
    game_over_pending: bool,
}

impl GameState {
    /// Create a session in the ready state with its first piece spawned
    pub fn new(config: EngineConfig) -> Self {
        let config = config.sanitized();
        let randomizer = Randomizer::new(config.randomizer, config.seed);
        Self::from_parts(config, Board::new(config.width, config.height), randomizer)
    }

    /// Default dimensions and gravity with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(EngineConfig::with_seed(seed))
    }

    /// Create a session drawing pieces from an explicit randomizer
    pub fn with_randomizer(config: EngineConfig, randomizer: Randomizer) -> Self {
        let config = config.sanitized();
        Self::from_parts(config, Board::new(config.width, config.height), randomizer)
    }

    /// Create a session on a prepared board.
    ///
    /// The board's dimensions replace those in `config`. A board smaller than
    /// `MIN_BOARD_DIM` on a side is grown to the minimum with its cells kept at
    /// the same coordinates. The first piece is spawned immediately, so a
    /// board that blocks the spawn area yields a session that is already over.
    pub fn from_board(config: EngineConfig, board: Board, randomizer: Randomizer) -> Self {
        let config = EngineConfig {
            width: board.width(),
            height: board.height(),
            ..config
        }
        .sanitized();
        if board.width() == config.width && board.height() == config.height {
            return Self::from_parts(config, board, randomizer);
        }

        warn!(
            width = board.width(),
            height = board.height(),
            new_width = config.width,
            new_height = config.height,
            "board size outside supported range, resizing"
        );
        let mut resized = Board::new(config.width, config.height);
        for y in 0..board.height() as i8 {
            for x in 0..board.width() as i8 {
                if let Some(cell) = board.get(x, y) {
                    resized.set(x, y, cell);
                }
            }
        }
        Self::from_parts(config, resized, randomizer)
    }

    fn from_parts(config: EngineConfig, board: Board, mut randomizer: Randomizer) -> Self {
        let next = randomizer.draw();
        let mut state = Self {
            config,
            board,
            current: None,
            next,
            randomizer,
            phase: Phase::Ready,
            episode_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            max_combo: 0,
            pieces_locked: 0,
            drop_interval_ms: drop_interval_ms(1, &config.gravity),
            drop_timer_ms: 0,
            play_time_ms: 0,
            last_event: None,
            game_over_report: None,
            game_over_pending: false,
        };
        state.spawn_piece();
        state
    }

    /// Leave the ready state and start the clock
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Running;
        debug!(episode = self.episode_id, "session started");
        true
    }

    /// Toggle between running and paused
    pub fn pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                debug!(episode = self.episode_id, "session paused");
                true
            }
            Phase::Paused => self.resume(),
            Phase::Ready | Phase::GameOver => false,
        }
    }

    /// Resume a paused session
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        debug!(episode = self.episode_id, "session resumed");
        true
    }

    /// Reinitialize the board and every counter, returning to ready.
    ///
    /// The randomizer keeps its sequence, so consecutive sessions differ.
    pub fn reset(&mut self) {
        self.board.clear();
        self.current = None;
        self.phase = Phase::Ready;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.pieces_locked = 0;
        self.drop_interval_ms = drop_interval_ms(1, &self.config.gravity);
        self.drop_timer_ms = 0;
        self.play_time_ms = 0;
        self.last_event = None;
        self.game_over_report = None;
        self.game_over_pending = false;

        self.next = self.randomizer.draw();
        self.spawn_piece();
        debug!(episode = self.episode_id, "session reset");
    }

    /// Reset and immediately start a new session
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row for 1 point, or lock the piece if it is blocked
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != Phase::Running || self.current.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            self.score = self
                .score
                .saturating_add(calculate_drop_score(1, false));
        } else {
            self.lock_piece();
        }
        true
    }

    /// Drop the piece to its resting row and lock it.
    ///
    /// Returns the drop bonus awarded (2 points per row fallen).
    pub fn hard_drop(&mut self) -> u32 {
        if self.phase != Phase::Running {
            return 0;
        }
        let Some(piece) = self.current else {
            return 0;
        };

        let distance = drop_distance(&self.board, &piece);
        self.current = Some(piece.shifted(0, distance as i8));

        let bonus = calculate_drop_score(distance as u32, true);
        self.score = self.score.saturating_add(bonus);

        self.lock_piece();
        bonus
    }

    /// Rotate clockwise, trying wall kicks; unchanged when nothing fits
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        match try_rotate(&self.board, &piece) {
            Some((rotated, kick)) => {
                if kick != (0, 0) {
                    trace!(kind = piece.kind.as_str(), ?kick, "wall kick");
                }
                self.current = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Advance the clock by `elapsed_ms`.
    ///
    /// Returns true when a gravity step ran. Only running sessions advance.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        self.play_time_ms = self.play_time_ms.saturating_add(elapsed_ms as u64);
        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);

        if self.drop_timer_ms < self.drop_interval_ms {
            return false;
        }

        // One step per interval; leftover time is discarded.
        self.drop_timer_ms = 0;
        self.gravity_step();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                let running = self.phase == Phase::Running && self.current.is_some();
                self.hard_drop();
                running
            }
            GameAction::Rotate => self.rotate(),
            GameAction::Start => self.start(),
            GameAction::Pause => self.pause(),
            GameAction::Restart => self.restart(),
        }
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        if collides(&self.board, &piece, dx, dy) {
            return false;
        }
        self.current = Some(piece.shifted(dx, dy));
        true
    }

    fn gravity_step(&mut self) {
        if !self.try_move(0, 1) && self.current.is_some() {
            self.lock_piece();
        }
    }

    /// Write the current piece into the board, clear lines, score, and spawn
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let cells = piece.cells();
        if !self.board.lock_cells(&cells, piece.kind) {
            warn!(
                kind = piece.kind.as_str(),
                x = piece.x,
                y = piece.y,
                "piece overlaps the board at lock"
            );
            self.enter_game_over();
            return;
        }
        self.pieces_locked = self.pieces_locked.saturating_add(1);

        let cleared = self.board.clear_full_rows();
        let result = calculate_score(cleared as usize, self.level, self.lines);

        self.score = self.score.saturating_add(result.points);
        self.lines = result.total_lines;
        if result.level_up {
            self.level = result.level;
            self.drop_interval_ms = drop_interval_ms(self.level, &self.config.gravity);
            debug!(
                level = self.level,
                interval_ms = self.drop_interval_ms,
                "level up"
            );
        }
        self.combo = cleared;
        self.max_combo = self.max_combo.max(cleared);

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            lines_cleared: cleared,
            points: result.points,
            combo: self.combo,
            level_up: result.level_up,
        });
        trace!(
            kind = piece.kind.as_str(),
            lines = cleared,
            points = result.points,
            score = self.score,
            "piece locked"
        );

        self.spawn_piece();
    }

    /// Promote the queued piece to current and draw a new one.
    ///
    /// A spawn that collides ends the session; the board is left untouched.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::spawn(self.next, self.board.width());
        self.next = self.randomizer.draw();

        if collides(&self.board, &piece, 0, 0) {
            self.enter_game_over();
            return false;
        }

        self.current = Some(piece);
        true
    }

    fn enter_game_over(&mut self) {
        self.current = None;
        self.phase = Phase::GameOver;

        let report = GameOverReport::new(
            self.score,
            self.level,
            self.lines,
            self.max_combo,
            self.play_time_ms,
            self.pieces_locked,
        );
        self.game_over_report = Some(report);
        self.game_over_pending = true;

        info!(
            episode = self.episode_id,
            score = report.score,
            level = report.level,
            lines = report.lines,
            max_combo = report.max_combo,
            play_time_ms = report.play_time_ms,
            "game over"
        );
    }

    /// Final report, yielded exactly once per game over
    pub fn take_game_over(&mut self) -> Option<GameOverReport> {
        if !self.game_over_pending {
            return None;
        }
        self.game_over_pending = false;
        self.game_over_report
    }

    /// Final report of the ended session, if any (does not consume it)
    pub fn game_over_report(&self) -> Option<GameOverReport> {
        self.game_over_report
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());

        out.active = self.current.map(ActiveSnapshot::from);
        out.next = Some(NextSnapshot::from(self.next));
        out.phase = self.phase;
        out.episode_id = self.episode_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.max_combo = self.max_combo;
        out.pieces_locked = self.pieces_locked;
        out.play_time_ms = self.play_time_ms;
        out.drop_interval_ms = self.drop_interval_ms;
        out.drop_timer_ms = self.drop_timer_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Tetromino> {
        self.current
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn play_time_ms(&self) -> u64 {
        self.play_time_ms
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
