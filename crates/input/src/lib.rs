//! Input timing module (engine-facing).
//!
//! This crate is independent of any UI framework or input device. It consumes
//! the per-tick [`types::InputSnapshot`] reported by the polling collaborator
//! and applies DAS/ARR horizontal repeat and soft-drop repeat, turning held
//! levels and press edges into [`types::GameAction`]s.

pub mod handler;

pub use blockfall_types as types;

pub use handler::{
    ActionBuffer, HorizontalDirection, InputHandler, ACTION_CAPACITY, MAX_SHIFT_REPEATS,
    MAX_SOFT_DROP_REPEATS,
};
