//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data: the rules live in `blockfall-core`, the
//! per-tick input handling in `blockfall-input`.
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn origin**: (3, 0); rows above 0 form an unbounded spawn buffer
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested step interval (~60 FPS) |
//! | `GRAVITY_BASE_MS` | 800 | Gravity interval at level 1 |
//! | `GRAVITY_STEP_MS` | 50 | Interval shaved off per level |
//! | `GRAVITY_FLOOR_MS` | 100 | Fastest gravity interval |
//! | `LOCK_DELAY_MS` | 450 | Time before a grounded piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//! | `ARE_MS` | 100 | Entry delay between a lock and the next spawn |
//! | `LINE_CLEAR_MS` | 80 | Clear animation before rows collapse |
//! | `SPIN_WINDOW_MS` | 400 | Rotation recency window for spin detection |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, GameAction, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.index(), 5);
//! assert_eq!(PieceKind::from_index(5), Some(PieceKind::T));
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn origin (top-left of the piece's bounding box)
pub const SPAWN_X: i8 = 3;

/// Row of the spawn origin
pub const SPAWN_Y: i8 = 0;

/// Suggested fixed step interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const GRAVITY_BASE_MS: u32 = 800;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u32 = 50;

/// Fastest gravity interval
pub const GRAVITY_FLOOR_MS: u32 = 100;

/// Lock delay when piece is grounded
pub const LOCK_DELAY_MS: u32 = 450;

/// Maximum number of lock timer resets per piece
pub const LOCK_RESET_LIMIT: u32 = 15;

/// Entry delay (ARE) between a lock without clears and the next spawn
pub const ARE_MS: u32 = 100;

/// Clear animation length; rows collapse when it elapses
pub const LINE_CLEAR_MS: u32 = 80;

/// A rotation this recent counts towards spin detection at lock time
pub const SPIN_WINDOW_MS: u32 = 400;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop repeat interval in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Default number of pieces shown in the preview queue
pub const PREVIEW_DEPTH: usize = 5;

/// Largest supported preview queue
pub const MAX_PREVIEW_DEPTH: usize = 6;

/// Default Blitz duration (two minutes)
pub const BLITZ_DURATION_MS: u32 = 120_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_defaults() {
        assert_eq!(GRAVITY_BASE_MS, 800);
        assert_eq!(GRAVITY_STEP_MS, 50);
        assert_eq!(GRAVITY_FLOOR_MS, 100);
        assert_eq!(LOCK_DELAY_MS, 450);
        assert_eq!(LOCK_RESET_LIMIT, 15);
        assert_eq!(LINE_CLEAR_MS, 80);
        assert_eq!(SPIN_WINDOW_MS, 400);

        assert_eq!(DEFAULT_DAS_MS, 150);
        assert_eq!(DEFAULT_ARR_MS, 50);
        assert_eq!(SOFT_DROP_ARR_MS, 50);
        assert!(PREVIEW_DEPTH <= MAX_PREVIEW_DEPTH);
    }

    #[test]
    fn test_piece_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index() as usize, i);
            assert_eq!(PieceKind::from_index(i as u8), Some(*kind));
            assert_eq!(kind.cell_code(), i as u8 + 1);
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn test_rotation_index_wraps() {
        assert_eq!(Rotation::from_index(4), Rotation::North);
        assert_eq!(Rotation::from_index(7), Rotation::West);
        assert_eq!(Rotation::West.index(), 3);
    }

    #[test]
    fn test_effect_labels() {
        assert_eq!(EffectKind::Quad.label(), "Quad");
        assert_eq!(EffectKind::AllClear.lifetime_ms(), 1200);
        assert_eq!(EffectKind::PieceSpin(PieceKind::S).label(), "S spin");
        assert_eq!(EffectKind::for_lines(2), Some(EffectKind::Double));
        assert_eq!(EffectKind::for_lines(6), Some(EffectKind::Quad));
        assert_eq!(EffectKind::for_lines(0), None);
    }

    #[test]
    fn test_input_snapshot_serde() {
        let input = InputSnapshot {
            left_held: true,
            hard_drop_edge: true,
            ..InputSnapshot::default()
        };
        let json = serde_json::to_string(&input).unwrap();
        let back: InputSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
        assert!(!back.is_idle());
        assert!(InputSnapshot::default().is_idle());
    }
}

/// 24-bit display color, opaque to the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino piece kinds, in identifier order 0..6
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green, S-shaped
/// - **T**: Purple, T-shaped (the only spin-sensitive piece)
/// - **Z**: Red, Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in identifier order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Identifier 0..6
    pub const fn index(self) -> u8 {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Inverse of [`PieceKind::index`]; `None` for anything outside 0..6.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PieceKind::I),
            1 => Some(PieceKind::J),
            2 => Some(PieceKind::L),
            3 => Some(PieceKind::O),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::T),
            6 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Value stored for this piece in numeric grid exports (0 is reserved for empty).
    pub const fn cell_code(self) -> u8 {
        self.index() + 1
    }

    /// Display color
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 165, 0),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::T => Rgb::new(128, 0, 128),
            PieceKind::Z => Rgb::new(255, 0, 0),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Orientation states, indexed 0..3
///
/// - **North**: Spawn orientation (0° rotation)
/// - **East**: Rotated 90° clockwise
/// - **South**: Rotated 180°
/// - **West**: Rotated 90° counter-clockwise (270° clockwise)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Orientation index 0..3
    pub const fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Orientation for `index mod 4`
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// The input repeater turns per-tick [`InputSnapshot`]s into these; tests and
/// scripted drivers may apply them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (locks if it cannot)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
    /// Toggle pause state
    Pause,
    /// Restart the game with the same seed
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// T-Spin classification of a lock
///
/// - **None**: Not a T-spin
/// - **Mini**: kicked rotation into a slot whose front cell is open
/// - **Full**: kicked rotation with the front cell blocked, or an unkicked
///   rotation that brought the corner count from below 3 to 3+
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TSpinKind {
    None,
    Mini,
    Full,
}

impl TSpinKind {
    /// Convert to optional string representation
    ///
    /// Returns `None` for `TSpinKind::None`, `Some("mini")` for Mini,
    /// and `Some("full")` for Full.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            TSpinKind::None => None,
            TSpinKind::Mini => Some("mini"),
            TSpinKind::Full => Some("full"),
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Line clear base points at level 0, indexed by lines cleared (0..=4)
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Per-line base points for clears larger than four rows
pub const LINE_SCORE_PER_EXTRA_LINE: u32 = 100;

/// Full T-spin base points indexed by lines cleared (1..=3)
pub const TSPIN_SCORES: [u32; 4] = [0, 800, 1200, 1600];

/// Combo scoring base value (50 points per combo step)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Points per row moved by a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row moved by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Per-tick input sample supplied by the input-polling collaborator
///
/// `*_held` fields are levels; `*_edge` fields are true only on the tick of
/// the physical press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub left_held: bool,
    pub right_held: bool,
    pub soft_held: bool,
    pub hard_drop_edge: bool,
    pub rotate_cw_edge: bool,
    pub rotate_ccw_edge: bool,
    pub hold_edge: bool,
}

impl InputSnapshot {
    /// True when nothing is pressed or held.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEnd {
    /// The stack reached the top row, or a piece could not enter
    ToppedOut,
    /// The mode's goal (line target, time limit) was reached
    Completed,
}

/// Transient, display-only labels surfaced to the UI collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Single,
    Double,
    Triple,
    Quad,
    AllClear,
    TSpin,
    TSpinMini,
    /// Advisory "<piece> spin" shown for a late rotation that was not a T-spin
    PieceSpin(PieceKind),
}

impl EffectKind {
    /// Clear-count label for `lines` rows (`None` for zero).
    pub fn for_lines(lines: usize) -> Option<Self> {
        match lines {
            0 => None,
            1 => Some(EffectKind::Single),
            2 => Some(EffectKind::Double),
            3 => Some(EffectKind::Triple),
            _ => Some(EffectKind::Quad),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Single => "Single",
            EffectKind::Double => "Double",
            EffectKind::Triple => "Triple",
            EffectKind::Quad => "Quad",
            EffectKind::AllClear => "ALL CLEAR.",
            EffectKind::TSpin => "T-Spin",
            EffectKind::TSpinMini => "T-Spin Mini",
            EffectKind::PieceSpin(kind) => match kind {
                PieceKind::I => "I spin",
                PieceKind::J => "J spin",
                PieceKind::L => "L spin",
                PieceKind::O => "O spin",
                PieceKind::S => "S spin",
                PieceKind::T => "T spin",
                PieceKind::Z => "Z spin",
            },
        }
    }

    /// How long the UI should keep the label on screen
    pub fn lifetime_ms(&self) -> u32 {
        match self {
            EffectKind::AllClear => 1200,
            EffectKind::TSpin | EffectKind::TSpinMini => 1000,
            _ => 900,
        }
    }
}

/// Coarse gameplay events, in the order they happened
///
/// This is the feed a recorder or replay collaborator subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A piece entered the field from the preview queue
    Spawned { kind: PieceKind },
    /// The active piece went to the hold slot; `swapped_in` came out of it
    Held {
        kind: PieceKind,
        swapped_in: Option<PieceKind>,
    },
    /// A piece merged into the board; `drop_points` is what its soft/hard drops earned
    Locked {
        kind: PieceKind,
        rotation: Rotation,
        x: i8,
        y: i8,
        drop_points: u32,
    },
    /// Rows cleared by the last lock and the points they scored
    LinesCleared {
        count: u32,
        score: u32,
        combo: u32,
        back_to_back: bool,
    },
    /// Spin classification of the last lock (never `TSpinKind::None`)
    Spin { kind: PieceKind, tspin: TSpinKind },
    /// The board is empty after a collapse
    AllClear,
    /// Level changed after a clear
    LevelUp { level: u32 },
    /// The game reached a terminal state
    GameEnded { end: GameEnd },
}
