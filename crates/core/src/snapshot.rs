//! Read-only snapshots for the render/UI collaborator
//!
//! A snapshot is plain data copied out of [`crate::GameState`]; reuse one
//! value with `snapshot_into` to avoid re-initialising it every frame.

use arrayvec::ArrayVec;

use crate::board::{RowList, U8Grid};
use crate::game_state::Tetromino;
use crate::pieces::PieceShape;
use crate::types::{GameEnd, PieceKind, Rgb, Rotation, MAX_PREVIEW_DEPTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute board cells (rows may be negative in the spawn buffer)
    pub cells: PieceShape,
    pub color: Rgb,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
            color: value.kind.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub gravity_ms: u32,
    pub lock_ms: u32,
    pub lock_resets: u32,
    /// Time left in the countdown, entry delay or clear animation
    pub phase_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub board: U8Grid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub preview: ArrayVec<PieceKind, MAX_PREVIEW_DEPTH>,
    pub can_hold: bool,
    pub paused: bool,
    pub game_over: bool,
    pub end: Option<GameEnd>,
    pub episode_id: u32,
    pub seed: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub back_to_back: bool,
    /// Size of the most recent clear, for combo display
    pub last_clear_lines: u32,
    pub since_last_clear_ms: u32,
    /// Rows currently playing the clear animation
    pub clearing_rows: RowList,
    pub elapsed_ms: u32,
    pub remaining_ms: Option<u32>,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}
