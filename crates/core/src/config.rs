//! Engine configuration - timing knobs consumed at construction
//!
//! All values are milliseconds unless noted. Construction always goes
//! through [`EngineConfig::sanitized`], so a bad knob is clamped to a safe
//! minimum instead of failing mid-game.

use serde::{Deserialize, Serialize};

use crate::types::{
    ARE_MS, DEFAULT_ARR_MS, DEFAULT_DAS_MS, GRAVITY_BASE_MS, GRAVITY_FLOOR_MS, GRAVITY_STEP_MS,
    LINE_CLEAR_MS, LOCK_DELAY_MS, LOCK_RESET_LIMIT, MAX_PREVIEW_DEPTH, PREVIEW_DEPTH,
    SOFT_DROP_ARR_MS, SPIN_WINDOW_MS,
};

/// Prefix for environment overrides, e.g. `BLOCKFALL_DAS_MS`
pub const ENV_PREFIX: &str = "BLOCKFALL_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub gravity_base_ms: u32,
    pub gravity_step_ms: u32,
    pub gravity_floor_ms: u32,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub soft_drop_ms: u32,
    pub lock_delay_ms: u32,
    pub max_lock_resets: u32,
    /// Entry delay after a lock without clears; 0 spawns in the same step
    pub are_ms: u32,
    pub line_clear_ms: u32,
    pub spin_window_ms: u32,
    /// Number of preview pieces (1..=6)
    pub preview_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity_base_ms: GRAVITY_BASE_MS,
            gravity_step_ms: GRAVITY_STEP_MS,
            gravity_floor_ms: GRAVITY_FLOOR_MS,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_ms: SOFT_DROP_ARR_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            max_lock_resets: LOCK_RESET_LIMIT,
            are_ms: ARE_MS,
            line_clear_ms: LINE_CLEAR_MS,
            spin_window_ms: SPIN_WINDOW_MS,
            preview_depth: PREVIEW_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `BLOCKFALL_*` environment variables.
    ///
    /// Missing or unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn read<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            name: &str,
            default: T,
        ) -> T {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let d = Self::default();
        Self {
            gravity_base_ms: read(&lookup, "GRAVITY_BASE_MS", d.gravity_base_ms),
            gravity_step_ms: read(&lookup, "GRAVITY_STEP_MS", d.gravity_step_ms),
            gravity_floor_ms: read(&lookup, "GRAVITY_FLOOR_MS", d.gravity_floor_ms),
            das_ms: read(&lookup, "DAS_MS", d.das_ms),
            arr_ms: read(&lookup, "ARR_MS", d.arr_ms),
            soft_drop_ms: read(&lookup, "SOFT_DROP_MS", d.soft_drop_ms),
            lock_delay_ms: read(&lookup, "LOCK_DELAY_MS", d.lock_delay_ms),
            max_lock_resets: read(&lookup, "MAX_LOCK_RESETS", d.max_lock_resets),
            are_ms: read(&lookup, "ARE_MS", d.are_ms),
            line_clear_ms: read(&lookup, "LINE_CLEAR_MS", d.line_clear_ms),
            spin_window_ms: read(&lookup, "SPIN_WINDOW_MS", d.spin_window_ms),
            preview_depth: read(&lookup, "PREVIEW_DEPTH", d.preview_depth),
        }
        .sanitized()
    }

    /// Parse a (possibly partial) JSON document; missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp every knob into its safe range
    pub fn sanitized(self) -> Self {
        let gravity_floor_ms = self.gravity_floor_ms.max(1);
        Self {
            gravity_floor_ms,
            gravity_base_ms: self.gravity_base_ms.max(gravity_floor_ms),
            arr_ms: self.arr_ms.max(1),
            soft_drop_ms: self.soft_drop_ms.max(1),
            lock_delay_ms: self.lock_delay_ms.max(1),
            max_lock_resets: self.max_lock_resets.max(1),
            preview_depth: self.preview_depth.clamp(1, MAX_PREVIEW_DEPTH),
            ..self
        }
    }

    /// Gravity interval for `level` (levels start at 1)
    pub fn gravity_interval_ms(&self, level: u32) -> u32 {
        let speedup = level.saturating_sub(1).saturating_mul(self.gravity_step_ms);
        self.gravity_base_ms
            .saturating_sub(speedup)
            .max(self.gravity_floor_ms)
    }
}
