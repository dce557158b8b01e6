//! DAS/ARR input handler driven by per-tick input snapshots.
//!
//! The polling collaborator reports held levels and press edges each tick;
//! this turns them into discrete [`GameAction`]s. Press edges for left, right
//! and soft drop are derived from held-level transitions.

use arrayvec::ArrayVec;

use crate::types::{
    GameAction, InputSnapshot, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_ARR_MS, DEFAULT_DAS_MS,
    SOFT_DROP_ARR_MS,
};

/// Most auto-shift repeats emitted by one update; more cannot move a piece further
pub const MAX_SHIFT_REPEATS: u32 = BOARD_WIDTH as u32;

/// Most soft-drop repeats emitted by one update
pub const MAX_SOFT_DROP_REPEATS: u32 = BOARD_HEIGHT as u32;

/// Room for every edge action, the DAS shift, and both capped repeat runs
pub const ACTION_CAPACITY: usize =
    4 + 1 + MAX_SHIFT_REPEATS as usize + 1 + MAX_SOFT_DROP_REPEATS as usize;

/// Actions produced by one update
pub type ActionBuffer = ArrayVec<GameAction, ACTION_CAPACITY>;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

impl HorizontalDirection {
    fn action(self) -> Option<GameAction> {
        match self {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    left_held: bool,
    right_held: bool,
    down_held: bool,
    horizontal_das_timer: u32,
    horizontal_arr_accumulator: u32,
    down_arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
    soft_drop_rate: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS, SOFT_DROP_ARR_MS)
    }

    /// Repeat rates below 1ms are raised to 1ms.
    pub fn with_config(das_delay: u32, arr_rate: u32, soft_drop_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            left_held: false,
            right_held: false,
            down_held: false,
            horizontal_das_timer: 0,
            horizontal_arr_accumulator: 0,
            down_arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
            soft_drop_rate: soft_drop_rate.max(1),
        }
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Consume one tick of input.
    ///
    /// Actions come out in application order: hold, rotate ccw, rotate cw,
    /// horizontal moves, soft drops, hard drop. Repeats are capped per update
    /// so edge actions always fit.
    pub fn update(&mut self, input: &InputSnapshot, elapsed_ms: u32) -> ActionBuffer {
        let mut actions = ActionBuffer::new();

        if input.hold_edge {
            actions.push(GameAction::Hold);
        }
        if input.rotate_ccw_edge {
            actions.push(GameAction::RotateCcw);
        }
        if input.rotate_cw_edge {
            actions.push(GameAction::RotateCw);
        }

        self.update_horizontal(input, elapsed_ms, &mut actions);
        self.update_soft_drop(input, elapsed_ms, &mut actions);

        if input.hard_drop_edge {
            actions.push(GameAction::HardDrop);
        }

        actions
    }

    fn update_horizontal(
        &mut self,
        input: &InputSnapshot,
        elapsed_ms: u32,
        actions: &mut ActionBuffer,
    ) {
        let left_pressed = input.left_held && !self.left_held;
        let right_pressed = input.right_held && !self.right_held;
        self.left_held = input.left_held;
        self.right_held = input.right_held;

        // The most recent press wins; releasing it falls back to the other key.
        let direction = if right_pressed {
            HorizontalDirection::Right
        } else if left_pressed {
            HorizontalDirection::Left
        } else {
            match self.horizontal {
                HorizontalDirection::Left if input.left_held => HorizontalDirection::Left,
                HorizontalDirection::Right if input.right_held => HorizontalDirection::Right,
                _ if input.left_held => HorizontalDirection::Left,
                _ if input.right_held => HorizontalDirection::Right,
                _ => HorizontalDirection::None,
            }
        };

        if direction != self.horizontal || left_pressed || right_pressed {
            self.horizontal = direction;
            self.horizontal_das_timer = 0;
            self.horizontal_arr_accumulator = 0;
            if let Some(action) = direction.action() {
                actions.push(action);
            }
            return;
        }

        let Some(action) = self.horizontal.action() else {
            return;
        };

        let prev_das = self.horizontal_das_timer;
        self.horizontal_das_timer = self.horizontal_das_timer.saturating_add(elapsed_ms);
        if self.horizontal_das_timer < self.das_delay {
            return;
        }

        if prev_das < self.das_delay {
            // DAS just charged: shift once, carry the excess into ARR.
            actions.push(action);
            self.horizontal_arr_accumulator = self.horizontal_das_timer - self.das_delay;
        } else {
            self.horizontal_arr_accumulator =
                self.horizontal_arr_accumulator.saturating_add(elapsed_ms);
        }

        let repeats = self.horizontal_arr_accumulator / self.arr_rate;
        self.horizontal_arr_accumulator %= self.arr_rate;
        for _ in 0..repeats.min(MAX_SHIFT_REPEATS) {
            actions.push(action);
        }
    }

    fn update_soft_drop(
        &mut self,
        input: &InputSnapshot,
        elapsed_ms: u32,
        actions: &mut ActionBuffer,
    ) {
        if !input.soft_held {
            self.down_held = false;
            self.down_arr_accumulator = 0;
            return;
        }

        if !self.down_held {
            self.down_held = true;
            self.down_arr_accumulator = 0;
            actions.push(GameAction::SoftDrop);
            return;
        }

        self.down_arr_accumulator = self.down_arr_accumulator.saturating_add(elapsed_ms);
        let repeats = self.down_arr_accumulator / self.soft_drop_rate;
        self.down_arr_accumulator %= self.soft_drop_rate;
        for _ in 0..repeats.min(MAX_SOFT_DROP_REPEATS) {
            actions.push(GameAction::SoftDrop);
        }
    }

    /// Forget held keys; the next held level counts as a fresh press
    pub fn reset(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.left_held = false;
        self.right_held = false;
        self.down_held = false;
        self.horizontal_das_timer = 0;
        self.horizontal_arr_accumulator = 0;
        self.down_arr_accumulator = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
