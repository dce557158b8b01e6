//! Game modes - how a game ends besides topping out

use serde::{Deserialize, Serialize};

use crate::types::BLITZ_DURATION_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GameMode {
    /// Endless play
    #[default]
    Marathon,
    /// Optional countdown before the first spawn, optional line goal (0 = none)
    Classic { countdown_ms: u32, win_lines: u32 },
    /// Fixed amount of play time
    Blitz { duration_ms: u32 },
}

impl GameMode {
    /// Two minutes of Blitz
    pub fn blitz() -> Self {
        GameMode::Blitz {
            duration_ms: BLITZ_DURATION_MS,
        }
    }

    pub fn countdown_ms(&self) -> u32 {
        match self {
            GameMode::Classic { countdown_ms, .. } => *countdown_ms,
            _ => 0,
        }
    }

    /// Cleared-line goal that completes the game
    pub fn win_lines(&self) -> Option<u32> {
        match self {
            GameMode::Classic { win_lines, .. } if *win_lines > 0 => Some(*win_lines),
            _ => None,
        }
    }

    /// Play-time budget that completes the game
    pub fn time_limit_ms(&self) -> Option<u32> {
        match self {
            GameMode::Blitz { duration_ms } => Some(*duration_ms),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Marathon => "marathon",
            GameMode::Classic { .. } => "classic",
            GameMode::Blitz { .. } => "blitz",
        }
    }
}
