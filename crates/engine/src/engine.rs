//! Engine driver - one `step` per frame
//!
//! Feeds the per-tick [`InputSnapshot`] through the DAS/ARR handler, applies
//! the resulting actions to the [`GameState`], then advances its timers.

use crate::core::{EngineConfig, GameMode, GameSnapshot, GameState};
use crate::input::InputHandler;
use crate::types::{GameAction, GameEvent, InputSnapshot};

#[derive(Debug, Clone)]
pub struct Engine {
    state: GameState,
    input: InputHandler,
    /// Steps taken while running (paused steps are not counted)
    frames: u64,
}

impl Engine {
    /// Build and start a game
    pub fn new(seed: u32, config: EngineConfig, mode: GameMode) -> Self {
        let mut state = GameState::with_config(seed, config, mode);
        state.start();
        let config = state.config();
        let input = InputHandler::with_config(config.das_ms, config.arr_ms, config.soft_drop_ms);
        Self {
            state,
            input,
            frames: 0,
        }
    }

    /// Marathon with default timing
    pub fn with_seed(seed: u32) -> Self {
        Self::new(seed, EngineConfig::default(), GameMode::Marathon)
    }

    /// Advance one frame.
    ///
    /// Returns true if any action took effect or the state machine moved.
    /// Paused or finished games ignore both time and input.
    pub fn step(&mut self, elapsed_ms: u32, input: &InputSnapshot) -> bool {
        if self.state.paused() || self.state.game_over() {
            return false;
        }
        self.frames += 1;

        let mut changed = false;
        for action in self.input.update(input, elapsed_ms) {
            changed |= self.state.apply_action(action);
        }
        changed | self.state.tick(elapsed_ms)
    }

    /// Apply a single action outside the per-tick input path
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.restart();
                true
            }
            other => self.state.apply_action(other),
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.toggle_pause()
    }

    /// Same seed, next episode; held keys must be pressed again
    pub fn restart(&mut self) {
        self.state.restart();
        self.input.reset();
        self.frames = 0;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for setups that bypass input timing
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.state.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, TICK_MS};

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_step_applies_gravity() {
        let mut engine = Engine::with_seed(1);
        let y0 = engine.state().active().unwrap().y;
        for _ in 0..50 {
            engine.step(TICK_MS, &idle());
        }
        assert_eq!(engine.state().active().unwrap().y, y0 + 1);
        assert_eq!(engine.frames(), 50);
    }

    #[test]
    fn test_held_left_reaches_wall() {
        let mut engine = Engine::with_seed(1);
        engine.state_mut().replace_active(PieceKind::O);
        let left = InputSnapshot {
            left_held: true,
            ..idle()
        };
        for _ in 0..30 {
            engine.step(TICK_MS, &left);
        }
        // O occupies columns x+1..=x+2, so the wall stops it at x = -1.
        assert_eq!(engine.state().active().unwrap().x, -1);
    }

    #[test]
    fn test_hard_drop_edge_locks() {
        let mut engine = Engine::with_seed(1);
        let drop = InputSnapshot {
            hard_drop_edge: true,
            ..idle()
        };
        assert!(engine.step(TICK_MS, &drop));
        assert!(engine.state().active().is_none());
        assert!(engine.state().score() > 0);
    }

    #[test]
    fn test_hard_drop_survives_fast_auto_shift() {
        let config = EngineConfig {
            arr_ms: 1,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(1, config, GameMode::Marathon);
        engine.state_mut().replace_active(PieceKind::O);
        let left = InputSnapshot {
            left_held: true,
            ..idle()
        };
        for _ in 0..20 {
            engine.step(TICK_MS, &left);
        }
        assert_eq!(engine.state().active().unwrap().x, -1);

        let drop = InputSnapshot {
            hard_drop_edge: true,
            ..left
        };
        engine.step(40, &drop);
        assert!(engine.state().active().is_none());
        assert_eq!(engine.state().score(), 36);
        assert!(engine
            .drain_events()
            .any(|e| matches!(e, GameEvent::Locked { x: -1, y: 18, .. })));
    }

    #[test]
    fn test_paused_engine_ignores_time_and_input() {
        let mut engine = Engine::with_seed(1);
        let before = engine.state().active().unwrap();
        assert!(engine.apply(GameAction::Pause));

        let drop = InputSnapshot {
            hard_drop_edge: true,
            ..idle()
        };
        assert!(!engine.step(5000, &drop));
        assert_eq!(engine.state().active().unwrap(), before);
        assert_eq!(engine.frames(), 0);

        assert!(engine.toggle_pause());
        assert!(!engine.state().paused());
    }

    #[test]
    fn test_restart_keeps_seed() {
        let mut engine = Engine::with_seed(77);
        let first = engine.state().active().unwrap().kind;
        engine.apply(GameAction::HardDrop);
        engine.restart();
        assert_eq!(engine.state().active().unwrap().kind, first);
        assert_eq!(engine.state().episode_id(), 1);
        assert_eq!(engine.state().seed(), 77);
    }
}
