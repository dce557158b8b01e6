//! Input log - deterministic replay from a seed and per-frame inputs
//!
//! The engine is a pure function of (seed, config, mode, frames), so a log
//! of those is enough to rebuild any game exactly. The log serializes to a
//! versioned JSON document; where it is stored is up to the caller.

use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, GameMode};
use crate::engine::Engine;
use crate::types::InputSnapshot;

/// Current log format version
pub const LOG_VERSION: u32 = 1;

/// One recorded `Engine::step` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub elapsed_ms: u32,
    #[serde(flatten)]
    pub input: InputSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputLog {
    pub version: u32,
    pub seed: u32,
    pub config: EngineConfig,
    pub mode: GameMode,
    pub frames: Vec<InputFrame>,
}

#[derive(Debug)]
pub enum ReplayError {
    Json(serde_json::Error),
    UnsupportedVersion(u32),
}

impl ReplayError {
    pub fn code(&self) -> &'static str {
        match self {
            ReplayError::Json(_) => "invalid_log",
            ReplayError::UnsupportedVersion(_) => "unsupported_version",
        }
    }
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Json(err) => write!(f, "malformed input log: {err}"),
            ReplayError::UnsupportedVersion(v) => {
                write!(f, "input log version {v} is not supported (expected {LOG_VERSION})")
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Json(err) => Some(err),
            ReplayError::UnsupportedVersion(_) => None,
        }
    }
}

impl From<serde_json::Error> for ReplayError {
    fn from(err: serde_json::Error) -> Self {
        ReplayError::Json(err)
    }
}

impl InputLog {
    pub fn new(seed: u32, config: EngineConfig, mode: GameMode) -> Self {
        Self {
            version: LOG_VERSION,
            seed,
            config,
            mode,
            frames: Vec::new(),
        }
    }

    /// Append one frame
    pub fn record(&mut self, elapsed_ms: u32, input: InputSnapshot) {
        self.frames.push(InputFrame { elapsed_ms, input });
    }

    /// Step `engine` with a frame, recording it only if the engine consumes it.
    ///
    /// Paused and finished engines ignore frames, so those are left out of
    /// the log and replay stays in lockstep.
    pub fn step(&mut self, engine: &mut Engine, elapsed_ms: u32, input: InputSnapshot) -> bool {
        if engine.state().paused() || engine.state().game_over() {
            return false;
        }
        self.record(elapsed_ms, input);
        engine.step(elapsed_ms, &input)
    }

    /// Fresh engine matching this log's starting conditions
    pub fn engine(&self) -> Engine {
        Engine::new(self.seed, self.config, self.mode)
    }

    /// Rebuild the engine by stepping through every recorded frame
    pub fn replay(&self) -> Engine {
        let mut engine = self.engine();
        for frame in &self.frames {
            engine.step(frame.elapsed_ms, &frame.input);
        }
        engine
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let log: Self = serde_json::from_str(json)?;
        if log.version != LOG_VERSION {
            return Err(ReplayError::UnsupportedVersion(log.version));
        }
        Ok(log)
    }
}
