//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It handles the lock & spawn state machine (gravity, lock delay, ARE, clear
//! animation), hold, spin classification, and the event feed.
//!
//! Time only moves when the caller passes elapsed milliseconds to
//! [`GameState::tick`]; there is no wall clock in here.

use std::collections::VecDeque;

use crate::board::{Board, RowList};
use crate::config::EngineConfig;
use crate::effects::{Effect, Effects};
use crate::mode::GameMode;
use crate::pieces::{count_t_corners, get_shape, t_front_offset, try_rotate, PieceShape};
use crate::rng::PieceQueue;
use crate::scoring::{calculate_drop_score, calculate_score, level_for_lines};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::*;

/// Undrained events beyond this are dropped oldest-first
pub const EVENT_CAPACITY: usize = 1024;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells
    pub fn cells(&self) -> PieceShape {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape(), self.x, self.y)
    }

    /// Check if the piece is grounded (resting on something)
    pub fn is_grounded(&self, board: &Board) -> bool {
        board.collides(&self.shape(), self.x, self.y + 1)
    }
}

/// Contents of the hold slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeldPiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
}

/// Bookkeeping for the most recent successful rotation of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RotationRecord {
    kick_index: u8,
    offset: (i8, i8),
    corners_before: u8,
    age_ms: u32,
}

/// Where the lock & spawn state machine is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not started
    Idle,
    /// Pre-game countdown; no piece yet
    Countdown { remaining_ms: u32 },
    /// A piece is under control (lock delay runs inside this phase)
    Falling,
    /// Entry delay after a lock without clears
    Entry { remaining_ms: u32 },
    /// Clear animation; `rows` collapse when it ends
    Clearing { remaining_ms: u32, rows: RowList },
    /// Terminal
    Over,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    mode: GameMode,
    board: Board,
    active: Option<Tetromino>,
    hold: Option<HeldPiece>,
    can_hold: bool,
    queue: PieceQueue,
    phase: Phase,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    back_to_back: bool,
    gravity_timer_ms: u32,
    lock_timer_ms: u32,
    lock_resets: u32,
    last_rotation: Option<RotationRecord>,
    /// Drop points earned by the active piece so far
    drop_points: u32,
    last_tspin: TSpinKind,
    last_clear_lines: u32,
    since_last_clear_ms: u32,
    /// Play time, excluding pause and countdown
    elapsed_ms: u32,
    paused: bool,
    end: Option<GameEnd>,
    events: VecDeque<GameEvent>,
    effects: Effects,
}

impl GameState {
    /// Create a new Marathon game with default timing and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, EngineConfig::default(), GameMode::Marathon)
    }

    pub fn with_config(seed: u32, config: EngineConfig, mode: GameMode) -> Self {
        let config = config.sanitized();
        Self {
            config,
            mode,
            board: Board::new(),
            active: None,
            hold: None,
            can_hold: true,
            queue: PieceQueue::new(seed, config.preview_depth),
            phase: Phase::Idle,
            episode_id: 0,
            piece_id: 0,
            score: 0,
            level: level_for_lines(0),
            lines: 0,
            combo: 0,
            back_to_back: false,
            gravity_timer_ms: 0,
            lock_timer_ms: 0,
            lock_resets: 0,
            last_rotation: None,
            drop_points: 0,
            last_tspin: TSpinKind::None,
            last_clear_lines: 0,
            since_last_clear_ms: 0,
            elapsed_ms: 0,
            paused: false,
            end: None,
            events: VecDeque::new(),
            effects: Effects::new(),
        }
    }

    /// Start the game: run the mode's countdown, or spawn the first piece
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        match self.mode.countdown_ms() {
            0 => {
                self.spawn_piece();
            }
            remaining_ms => self.phase = Phase::Countdown { remaining_ms },
        }
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.end.is_some()
    }

    /// Why the game stopped, if it has
    pub fn end(&self) -> Option<GameEnd> {
        self.end
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
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

    /// Consecutive clearing locks (0 after a lock without clears)
    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn hold_piece(&self) -> Option<HeldPiece> {
        self.hold
    }

    /// Upcoming pieces, front first
    pub fn preview(&self) -> &[PieceKind] {
        self.queue.preview()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for puzzle setups and fixtures
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Spin classification of the most recent lock
    pub fn last_tspin(&self) -> TSpinKind {
        self.last_tspin
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn lock_resets(&self) -> u32 {
        self.lock_resets
    }

    /// Play time, excluding pause and countdown
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Time left in a timed mode
    pub fn remaining_ms(&self) -> Option<u32> {
        self.mode
            .time_limit_ms()
            .map(|limit| limit.saturating_sub(self.elapsed_ms))
    }

    /// Live UI effects, oldest first
    pub fn effects(&self) -> &[Effect] {
        self.effects.as_slice()
    }

    /// Take every event emitted since the last drain, in order
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Current gravity interval for the level
    pub fn gravity_interval_ms(&self) -> u32 {
        self.config.gravity_interval_ms(self.level)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold.map(|h| h.kind);
        out.preview.clear();
        out.preview.extend(self.queue.preview().iter().copied());
        out.can_hold = self.can_hold;
        out.paused = self.paused;
        out.game_over = self.game_over();
        out.end = self.end;
        out.episode_id = self.episode_id;
        out.seed = self.queue.seed();
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.back_to_back = self.back_to_back;
        out.last_clear_lines = self.last_clear_lines;
        out.since_last_clear_ms = self.since_last_clear_ms;
        out.clearing_rows.clear();
        if let Phase::Clearing { rows, .. } = &self.phase {
            out.clearing_rows.extend(rows.iter().copied());
        }
        out.elapsed_ms = self.elapsed_ms;
        out.remaining_ms = self.remaining_ms();
        out.timers = TimersSnapshot {
            gravity_ms: self.gravity_timer_ms,
            lock_ms: self.lock_timer_ms,
            lock_resets: self.lock_resets,
            phase_ms: self.phase_remaining_ms(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn phase_remaining_ms(&self) -> u32 {
        match self.phase {
            Phase::Countdown { remaining_ms }
            | Phase::Entry { remaining_ms }
            | Phase::Clearing { remaining_ms, .. } => remaining_ms,
            _ => 0,
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= EVENT_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn reset_piece_state(&mut self) {
        self.gravity_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.last_rotation = None;
        self.drop_points = 0;
    }

    fn finish(&mut self, end: GameEnd) {
        if self.end.is_some() {
            return;
        }
        self.end = Some(end);
        self.active = None;
        self.phase = Phase::Over;
        self.push_event(GameEvent::GameEnded { end });
    }

    /// Spawn the next piece from the preview queue
    ///
    /// Returns false (and ends the game) if the piece collides at the spawn origin.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.queue.draw();
        self.enter_piece(Tetromino::new(kind))
    }

    /// Replace the active piece with a fresh `kind` at the spawn origin.
    ///
    /// Intended for puzzle setups and fixtures; the preview queue is untouched.
    pub fn replace_active(&mut self, kind: PieceKind) -> bool {
        if self.end.is_some() || self.phase == Phase::Idle {
            return false;
        }
        self.enter_piece(Tetromino::new(kind))
    }

    fn enter_piece(&mut self, piece: Tetromino) -> bool {
        self.piece_id = self.piece_id.wrapping_add(1);
        self.reset_piece_state();
        self.can_hold = true;
        self.phase = Phase::Falling;

        if piece.collides(&self.board) {
            self.finish(GameEnd::ToppedOut);
            return false;
        }

        self.active = Some(piece);
        self.push_event(GameEvent::Spawned { kind: piece.kind });
        true
    }

    /// True when player actions may move the active piece
    fn controllable(&self) -> bool {
        !self.paused && self.phase == Phase::Falling && self.active.is_some()
    }

    /// Move the active piece without any lock-delay or spin bookkeeping
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if self.board.collides(&active.shape(), active.x + dx, active.y + dy) {
            return false;
        }
        self.active = Some(Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    /// Try to move the active piece horizontally
    pub(crate) fn try_move(&mut self, dx: i8) -> bool {
        if !self.controllable() {
            return false;
        }
        let grounded = self.is_grounded();
        if !self.try_shift(dx, 0) {
            return false;
        }
        self.last_rotation = None;
        if grounded {
            self.reset_lock_timer();
        }
        true
    }

    /// Try to rotate the active piece with SRS wall kicks
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        if !self.controllable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let corners_before = if active.kind == PieceKind::T {
            count_t_corners(active.x, active.y, |x, y| !self.board.is_valid(x, y))
        } else {
            0
        };
        let grounded = active.is_grounded(&self.board);

        let board = &self.board;
        let Some(outcome) = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| board.is_open(x, y),
        ) else {
            return false;
        };

        let (dx, dy) = outcome.offset;
        self.active = Some(Tetromino {
            rotation: outcome.rotation,
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        self.last_rotation = Some(RotationRecord {
            kick_index: outcome.kick_index,
            offset: outcome.offset,
            corners_before,
            age_ms: 0,
        });
        if grounded {
            self.reset_lock_timer();
        }
        true
    }

    /// Reset the lock timer (with reset limit)
    fn reset_lock_timer(&mut self) {
        if self.lock_resets < self.config.max_lock_resets {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }
    }

    /// One soft-drop step; locks immediately when the piece cannot move down
    pub(crate) fn soft_drop(&mut self) -> bool {
        if !self.controllable() {
            return false;
        }
        if self.try_shift(0, 1) {
            let points = calculate_drop_score(1, false);
            self.score = self.score.saturating_add(points);
            self.drop_points = self.drop_points.saturating_add(points);
            self.gravity_timer_ms = 0;
            self.last_rotation = None;
        } else {
            self.lock_piece();
        }
        true
    }

    /// Hard drop the active piece to the bottom and lock it
    ///
    /// Returns the drop points awarded.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        if !self.controllable() {
            return 0;
        }
        let distance = self.drop_distance();
        if distance > 0 {
            self.try_shift(0, distance);
            self.last_rotation = None;
        }

        let points = calculate_drop_score(distance as u32, true);
        self.score = self.score.saturating_add(points);
        self.drop_points = self.drop_points.saturating_add(points);

        self.lock_piece();
        points
    }

    /// Move the active piece to the hold slot (or swap with it)
    ///
    /// Allowed once per spawn; a second call before the next spawn is a no-op.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || !self.controllable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let stored = HeldPiece {
            kind: active.kind,
            rotation: active.rotation,
        };
        // Drop points stay with the turn across the swap
        let drop_points = self.drop_points;

        match self.hold.replace(stored) {
            None => {
                self.active = None;
                self.push_event(GameEvent::Held {
                    kind: active.kind,
                    swapped_in: None,
                });
                self.spawn_piece();
            }
            Some(previous) => {
                self.push_event(GameEvent::Held {
                    kind: active.kind,
                    swapped_in: Some(previous.kind),
                });
                let piece = Tetromino {
                    rotation: previous.rotation,
                    ..Tetromino::new(previous.kind)
                };
                self.reset_piece_state();
                if piece.collides(&self.board) {
                    self.finish(GameEnd::ToppedOut);
                } else {
                    self.active = Some(piece);
                }
            }
        }

        self.drop_points = drop_points;
        self.can_hold = false;
        true
    }

    /// Lock the active piece onto the board and handle line clears
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let inside = self
            .board
            .lock(&piece.shape(), piece.x, piece.y, piece.kind);
        self.push_event(GameEvent::Locked {
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            drop_points: self.drop_points,
        });

        let tspin = self.classify_tspin(&piece);
        let recent_rotation = self
            .last_rotation
            .is_some_and(|r| r.age_ms <= self.config.spin_window_ms);
        self.last_tspin = tspin;
        self.last_rotation = None;

        let lock_out = !inside || !self.board.is_row_empty(0);
        let rows = self.board.detect_full_rows();
        let cleared = rows.len();

        if tspin != TSpinKind::None {
            self.push_event(GameEvent::Spin {
                kind: piece.kind,
                tspin,
            });
        }

        if cleared > 0 {
            self.combo += 1;
            let result = calculate_score(cleared, self.level, tspin, self.combo, self.back_to_back);
            self.score = self.score.saturating_add(result.total);
            self.back_to_back = result.qualifies_for_b2b;
            self.lines = self.lines.saturating_add(cleared as u32);
            self.push_event(GameEvent::LinesCleared {
                count: cleared as u32,
                score: result.total,
                combo: self.combo,
                back_to_back: result.b2b_applied,
            });

            let level = level_for_lines(self.lines);
            if level != self.level {
                self.level = level;
                self.push_event(GameEvent::LevelUp { level });
            }

            if let Some(label) = EffectKind::for_lines(cleared) {
                self.effects.push(label);
            }
            self.last_clear_lines = cleared as u32;
            self.since_last_clear_ms = 0;
        } else {
            self.combo = 0;
            match tspin {
                TSpinKind::Full => self.effects.push(EffectKind::TSpin),
                TSpinKind::Mini => self.effects.push(EffectKind::TSpinMini),
                TSpinKind::None if recent_rotation => {
                    self.effects.push(EffectKind::PieceSpin(piece.kind))
                }
                TSpinKind::None => {}
            }
        }

        if lock_out {
            self.finish(GameEnd::ToppedOut);
            return;
        }

        if cleared > 0 {
            self.phase = Phase::Clearing {
                remaining_ms: self.config.line_clear_ms,
                rows,
            };
            if self.config.line_clear_ms == 0 {
                self.finish_clear();
            }
        } else if self.config.are_ms == 0 {
            self.spawn_piece();
        } else {
            self.phase = Phase::Entry {
                remaining_ms: self.config.are_ms,
            };
        }
    }

    /// Collapse the rows of a finished clear animation and bring in the next piece
    fn finish_clear(&mut self) {
        if !matches!(self.phase, Phase::Clearing { .. }) {
            return;
        }
        let Phase::Clearing { rows, .. } = std::mem::replace(&mut self.phase, Phase::Falling)
        else {
            return;
        };

        self.board.collapse(&rows);
        if self.board.is_empty() {
            self.push_event(GameEvent::AllClear);
            self.effects.push(EffectKind::AllClear);
        }

        if let Some(goal) = self.mode.win_lines() {
            if self.lines >= goal {
                self.finish(GameEnd::Completed);
                return;
            }
        }

        self.spawn_piece();
    }

    /// Classify the lock of `piece` as a T-spin
    fn classify_tspin(&self, piece: &Tetromino) -> TSpinKind {
        if piece.kind != PieceKind::T {
            return TSpinKind::None;
        }
        let Some(rotation) = self.last_rotation else {
            return TSpinKind::None;
        };
        if rotation.age_ms > self.config.spin_window_ms {
            return TSpinKind::None;
        }

        let corners = count_t_corners(piece.x, piece.y, |x, y| !self.board.is_valid(x, y));
        if corners < 3 {
            return TSpinKind::None;
        }

        if rotation.kick_index > 0 {
            let (fx, fy) = t_front_offset(piece.rotation);
            if self.board.is_valid(piece.x + fx, piece.y + fy) {
                TSpinKind::Mini
            } else {
                TSpinKind::Full
            }
        } else if rotation.corners_before >= 3 {
            TSpinKind::None
        } else {
            TSpinKind::Full
        }
    }

    /// Offset applied by the last successful rotation, if it is still the last action
    pub fn last_kick(&self) -> Option<(u8, (i8, i8))> {
        self.last_rotation.map(|r| (r.kick_index, r.offset))
    }

    /// Check if the active piece is on the ground
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(ref piece) => piece.is_grounded(&self.board),
            None => false,
        }
    }

    /// Rows the active piece can fall before landing
    fn drop_distance(&self) -> i8 {
        let Some(active) = self.active else {
            return 0;
        };
        let shape = active.shape();
        let mut distance: i8 = 0;
        while !self
            .board
            .collides(&shape, active.x, active.y + distance + 1)
        {
            distance += 1;
        }
        distance
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|active| active.y + self.drop_distance())
    }

    /// Count down the current phase timer; true when it reached zero
    fn advance_phase_timer(&mut self, elapsed_ms: u32) -> bool {
        match &mut self.phase {
            Phase::Countdown { remaining_ms }
            | Phase::Entry { remaining_ms }
            | Phase::Clearing { remaining_ms, .. } => {
                *remaining_ms = remaining_ms.saturating_sub(elapsed_ms);
                *remaining_ms == 0
            }
            _ => false,
        }
    }

    /// Main game tick - advance timers, gravity and lock delay
    ///
    /// Returns true when the piece moved, locked, or a new phase began.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused || self.end.is_some() || self.phase == Phase::Idle {
            return false;
        }

        self.effects.age(elapsed_ms);
        self.since_last_clear_ms = self.since_last_clear_ms.saturating_add(elapsed_ms);

        if let Phase::Countdown { .. } = self.phase {
            if self.advance_phase_timer(elapsed_ms) {
                self.spawn_piece();
                return true;
            }
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if let Some(limit) = self.mode.time_limit_ms() {
            if self.elapsed_ms >= limit {
                self.finish(GameEnd::Completed);
                return true;
            }
        }

        match self.phase {
            Phase::Entry { .. } => {
                if self.advance_phase_timer(elapsed_ms) {
                    self.spawn_piece();
                    return true;
                }
                false
            }
            Phase::Clearing { .. } => {
                if self.advance_phase_timer(elapsed_ms) {
                    self.finish_clear();
                    return true;
                }
                false
            }
            Phase::Falling => self.tick_falling(elapsed_ms),
            _ => false,
        }
    }

    fn tick_falling(&mut self, elapsed_ms: u32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if let Some(rotation) = self.last_rotation.as_mut() {
            rotation.age_ms = rotation.age_ms.saturating_add(elapsed_ms);
        }

        if active.is_grounded(&self.board) {
            self.gravity_timer_ms = 0;
            self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);

            if self.lock_timer_ms >= self.config.lock_delay_ms
                || self.lock_resets >= self.config.max_lock_resets
            {
                self.lock_piece();
                return true;
            }
            return false;
        }

        // Off the ground: the timer stops, the reset budget does not refill.
        self.lock_timer_ms = 0;
        self.gravity_timer_ms = self.gravity_timer_ms.saturating_add(elapsed_ms);
        if self.gravity_timer_ms >= self.gravity_interval_ms() {
            self.gravity_timer_ms = 0;
            return self.try_shift(0, 1);
        }
        false
    }

    /// Toggle pause; a no-op before start or after the game ended
    pub fn toggle_pause(&mut self) -> bool {
        if self.end.is_some() || self.phase == Phase::Idle {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Start over with the same seed, configuration and mode
    pub fn restart(&mut self) {
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::with_config(self.queue.seed(), self.config, self.mode);
        self.episode_id = next_episode;
        self.start();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                let was_controllable = self.controllable();
                self.hard_drop();
                was_controllable
            }
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    fn events(state: &mut GameState) -> Vec<GameEvent> {
        state.drain_events().collect()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started());
        assert!(!state.game_over());
        assert!(!state.paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.combo, 0);
        assert!(!state.back_to_back);
        assert_eq!(state.episode_id, 0);
        assert!(state.active.is_none());
        assert!(state.hold.is_none());
        assert_eq!(state.preview().len(), 5);
    }

    #[test]
    fn test_spawn_takes_preview_front() {
        let mut state = GameState::new(12345);
        let expected = state.preview()[0];
        state.start();

        let active = state.active.unwrap();
        assert_eq!(active.kind, expected);
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(state.piece_id, 1);
        assert_eq!(state.preview().len(), 5);
        assert_eq!(events(&mut state), vec![GameEvent::Spawned { kind: expected }]);
    }

    #[test]
    fn test_restart_increments_episode_id() {
        let mut state = started(12345);
        let first = state.active.unwrap().kind;
        state.apply_action(GameAction::HardDrop);
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.active.unwrap().kind, first);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_gravity_moves_piece_on_interval() {
        let mut state = started(7);
        let y0 = state.active.unwrap().y;

        assert!(!state.tick(799));
        assert_eq!(state.active.unwrap().y, y0);
        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, y0 + 1);
    }

    #[test]
    fn test_hard_drop_awards_two_per_row_and_locks() {
        let mut state = started(3);
        state.replace_active(PieceKind::O);
        events(&mut state);

        // O occupies rows 0-1 of its box; it lands with its bottom on row 19.
        let points = state.hard_drop();
        assert_eq!(points, 36);
        assert_eq!(state.score, 36);
        assert!(state.active.is_none());
        assert_eq!(state.phase, Phase::Entry { remaining_ms: 100 });

        let evs = events(&mut state);
        assert!(matches!(
            evs[0],
            GameEvent::Locked {
                kind: PieceKind::O,
                drop_points: 36,
                ..
            }
        ));
    }

    #[test]
    fn test_are_delays_next_spawn() {
        let mut state = started(3);
        state.hard_drop();
        assert!(state.active.is_none());
        assert!(!state.tick(99));
        assert!(state.active.is_none());
        assert!(state.tick(1));
        assert!(state.active.is_some());
    }

    #[test]
    fn test_soft_drop_blocked_locks_immediately() {
        let mut state = started(11);
        state.replace_active(PieceKind::O);
        while state.active.map_or(false, |p| !p.is_grounded(&state.board)) {
            assert!(state.soft_drop());
        }
        assert_eq!(state.score, 18);
        assert!(state.soft_drop());
        assert!(state.active.is_none());
        assert_eq!(state.board.occupied_count(), 4);
    }

    #[test]
    fn test_lock_delay_expires() {
        let mut state = started(5);
        state.replace_active(PieceKind::O);
        state.try_shift(0, 18);
        assert!(state.is_grounded());

        assert!(!state.tick(449));
        assert!(state.active.is_some());
        assert!(state.tick(1));
        assert!(state.active.is_none());
    }

    #[test]
    fn test_lock_reset_budget_forces_lock() {
        let mut state = started(5);
        state.replace_active(PieceKind::T);
        state.try_shift(0, 18);
        assert!(state.is_grounded());

        let mut steps = 0;
        while state.active.is_some() {
            let action = if steps % 2 == 0 {
                GameAction::MoveLeft
            } else {
                GameAction::MoveRight
            };
            state.apply_action(action);
            state.tick(16);
            steps += 1;
            assert!(steps <= 15, "piece never locked");
        }
        assert_eq!(steps, 15);
    }

    #[test]
    fn test_leaving_ground_keeps_reset_count() {
        let mut state = started(5);
        state.replace_active(PieceKind::O);
        state.board.set(0, 19, Some(PieceKind::I));
        // O covers columns x+1..=x+2; stand it on a one-cell ledge.
        state.try_shift(-4, 17);
        assert!(state.is_grounded());
        state.tick(100);
        assert_eq!(state.lock_timer_ms, 100);

        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.lock_resets, 1);
        state.tick(16);
        assert!(!state.is_grounded());
        assert_eq!(state.lock_timer_ms, 0);
        assert_eq!(state.lock_resets, 1);
    }

    #[test]
    fn test_hold_once_per_spawn() {
        let mut state = started(12345);
        let first = state.active.unwrap().kind;
        let next = state.preview()[0];

        assert!(state.hold());
        assert_eq!(state.hold.unwrap().kind, first);
        let after_hold = state.active.unwrap();
        assert_eq!(after_hold.kind, next);

        assert!(!state.hold());
        assert_eq!(state.active.unwrap(), after_hold);
        assert_eq!(state.hold.unwrap().kind, first);
    }

    #[test]
    fn test_hold_swap_keeps_orientation() {
        let mut state = started(12345);
        state.replace_active(PieceKind::J);
        assert!(state.try_rotate(true));
        assert!(state.hold());

        state.hard_drop();
        state.tick(100);
        let current = state.active.unwrap().kind;
        assert!(state.hold());

        let swapped = state.active.unwrap();
        assert_eq!(swapped.kind, PieceKind::J);
        assert_eq!(swapped.rotation, Rotation::East);
        assert_eq!((swapped.x, swapped.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(state.hold.unwrap().kind, current);
        assert!(!state.can_hold());
    }

    #[test]
    fn test_hold_carries_drop_points_to_next_lock() {
        let mut state = started(21);
        state.replace_active(PieceKind::O);
        for _ in 0..3 {
            assert!(state.soft_drop());
        }
        assert!(state.hold());
        events(&mut state);

        let active = state.active.unwrap();
        let distance = (state.ghost_y().unwrap() - active.y) as u32;
        state.hard_drop();

        let locked = events(&mut state)
            .into_iter()
            .find_map(|e| match e {
                GameEvent::Locked { drop_points, .. } => Some(drop_points),
                _ => None,
            })
            .unwrap();
        assert_eq!(locked, 3 + 2 * distance);
        assert_eq!(state.score, locked);
    }

    #[test]
    fn test_zero_line_lock_keeps_score_state() {
        let mut state = started(9);
        state.score = 500;
        state.combo = 3;
        state.back_to_back = true;
        state.replace_active(PieceKind::O);
        state.try_shift(0, 18);
        let score_before = state.score;

        state.lock_piece();
        assert_eq!(state.score, score_before);
        assert_eq!(state.level, 1);
        assert!(state.back_to_back);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_lock_out_on_top_row() {
        let mut state = started(2);
        for y in 2..20 {
            state.board.set(4, y, Some(PieceKind::I));
        }
        state.replace_active(PieceKind::O);
        // O sits on column 4 and 5 at rows 0-1.
        assert!(state.is_grounded());
        state.lock_piece();
        assert_eq!(state.end(), Some(GameEnd::ToppedOut));
        assert!(events(&mut state)
            .iter()
            .any(|e| *e == GameEvent::GameEnded { end: GameEnd::ToppedOut }));
    }

    #[test]
    fn test_block_out_on_spawn() {
        let mut state = started(2);
        for x in 0..10 {
            state.board.set(x, 1, Some(PieceKind::I));
        }
        assert!(!state.spawn_piece());
        assert_eq!(state.end(), Some(GameEnd::ToppedOut));
        assert!(state.active.is_none());
        assert!(!state.tick(16));
    }

    #[test]
    fn test_tspin_no_kick_full_and_repeat_none() {
        let mut state = started(4);
        let piece = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 3,
            y: 17,
        };
        for (x, y) in [(3, 17), (5, 17), (3, 19)] {
            state.board.set(x, y, Some(PieceKind::I));
        }

        state.last_rotation = Some(RotationRecord {
            kick_index: 0,
            offset: (0, 0),
            corners_before: 2,
            age_ms: 16,
        });
        assert_eq!(state.classify_tspin(&piece), TSpinKind::Full);

        state.last_rotation = Some(RotationRecord {
            corners_before: 3,
            ..state.last_rotation.unwrap()
        });
        assert_eq!(state.classify_tspin(&piece), TSpinKind::None);
    }

    #[test]
    fn test_tspin_requires_recent_rotation() {
        let mut state = started(4);
        let piece = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::South,
            x: 3,
            y: 17,
        };
        for (x, y) in [(3, 17), (5, 17), (3, 19)] {
            state.board.set(x, y, Some(PieceKind::I));
        }
        state.last_rotation = Some(RotationRecord {
            kick_index: 0,
            offset: (0, 0),
            corners_before: 0,
            age_ms: 401,
        });
        assert_eq!(state.classify_tspin(&piece), TSpinKind::None);

        state.last_rotation = None;
        assert_eq!(state.classify_tspin(&piece), TSpinKind::None);
    }

    #[test]
    fn test_generic_spin_effect() {
        let mut state = started(6);
        state.replace_active(PieceKind::L);
        state.try_shift(0, 17);
        assert!(state.try_rotate(true));
        state.lock_piece();
        assert_eq!(state.last_tspin, TSpinKind::None);
        assert!(state
            .effects()
            .iter()
            .any(|e| e.kind == EffectKind::PieceSpin(PieceKind::L) && e.label == "L spin"));
    }

    #[test]
    fn test_pause_freezes_timers_and_input() {
        let mut state = started(8);
        let y0 = state.active.unwrap().y;
        assert!(state.toggle_pause());
        assert!(!state.tick(5000));
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.unwrap().y, y0);
        assert_eq!(state.elapsed_ms(), 0);

        assert!(state.toggle_pause());
        state.tick(16);
        assert_eq!(state.elapsed_ms(), 16);
    }

    #[test]
    fn test_countdown_defers_first_spawn() {
        let mode = GameMode::Classic {
            countdown_ms: 300,
            win_lines: 0,
        };
        let mut state = GameState::with_config(1, EngineConfig::default(), mode);
        state.start();
        assert!(state.active.is_none());
        assert!(!state.tick(200));
        assert!(state.active.is_none());
        assert!(state.tick(100));
        assert!(state.active.is_some());
        assert_eq!(state.elapsed_ms(), 0);
    }

    #[test]
    fn test_blitz_time_limit() {
        let mode = GameMode::Blitz { duration_ms: 1000 };
        let mut state = GameState::with_config(1, EngineConfig::default(), mode);
        state.start();
        state.tick(600);
        assert_eq!(state.remaining_ms(), Some(400));
        state.tick(400);
        assert_eq!(state.end(), Some(GameEnd::Completed));
    }

    #[test]
    fn test_snapshot_reports_board_and_active() {
        let mut state = started(12345);
        state.board.set(0, 19, Some(PieceKind::S));
        let snap = state.snapshot();
        assert_eq!(snap.board[19][0], PieceKind::S.cell_code());
        assert_eq!(snap.active.unwrap().kind, state.active.unwrap().kind);
        assert_eq!(snap.preview.as_slice(), state.preview());
        assert_eq!(snap.level, 1);
        assert!(snap.ghost_y.unwrap() >= snap.active.unwrap().y);
    }
}
