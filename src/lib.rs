//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine crates under one roof so consumers can write
//! `blockfall::{core,engine,input,types}` without naming each member.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;
