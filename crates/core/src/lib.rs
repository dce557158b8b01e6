//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed and the same elapsed-time steps produce identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Fast**: Zero-allocation hot paths for game tick processing
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and row collapse
//! - [`pieces`]: Piece catalog and SRS rotation with wall kicks
//! - [`rng`]: 7-bag random piece generation and the preview queue
//! - [`scoring`]: Score calculation with T-spins, combos, and back-to-back bonuses
//! - [`config`]: Timing knobs with defaults, env/JSON overrides and clamping
//! - [`mode`]: Marathon, Classic and Blitz end conditions
//! - [`effects`]: Advisory UI labels with display lifetimes
//! - [`game_state`]: The lock & spawn state machine tying everything together
//! - [`snapshot`]: Read-only copies for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameEvent};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert!(game
//!     .drain_events()
//!     .any(|e| matches!(e, GameEvent::Locked { .. })));
//! ```
//!
//! # Timing
//!
//! - **Gravity**: 800ms at level 1, 50ms faster per level, never below 100ms
//! - **Lock Delay**: 450ms when grounded, at most 15 resets per piece
//! - **ARE**: 100ms after a lock without clears
//! - **Clear animation**: 80ms before full rows collapse
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod board;
pub mod config;
pub mod effects;
pub mod game_state;
pub mod mode;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use effects::Effect;
pub use game_state::{GameState, HeldPiece, Phase, Tetromino};
pub use mode::GameMode;
pub use pieces::{get_shape, try_rotate, RotationOutcome};
pub use rng::{seed_from_clock, PieceQueue, SevenBag, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
