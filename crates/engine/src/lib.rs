//! Engine driver crate
//!
//! Glues the input timing crate to the core state machine and hosts the
//! observers that sit on the event feed:
//!
//! - [`Engine`]: `step(elapsed_ms, &InputSnapshot)` once per frame
//! - [`InputLog`]: records frames and replays them deterministically
//! - [`SessionStats`]: clear/spin counters built from [`types::GameEvent`]s

pub mod engine;
pub mod replay;
pub mod stats;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use engine::Engine;
pub use replay::{InputFrame, InputLog, ReplayError, LOG_VERSION};
pub use stats::SessionStats;
