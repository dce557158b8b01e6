//! Pieces module - Tetromino shapes and SRS rotation system
//!
//! Shapes live in a fixed bounding box (3x3 for J, L, S, T, Z; 4x4 for I;
//! O sits in the top middle of a 4-wide box), so rotating never moves the
//! box centre. Wall kicks use one table per family with one row per `from`
//! orientation, tried in order for both rotation directions. Offsets are in
//! screen coordinates (y grows downward).
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceKind, Rgb, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Static catalog entry for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDef {
    pub kind: PieceKind,
    /// Spawn (North) shape
    pub shape: PieceShape,
    pub color: Rgb,
    /// Side of the square bounding box
    pub box_size: u8,
}

/// Catalog lookup by kind
pub fn definition(kind: PieceKind) -> PieceDef {
    PieceDef {
        kind,
        shape: get_spawn_shape(kind),
        color: kind.color(),
        box_size: if kind == PieceKind::I { 4 } else { 3 },
    }
}

/// Catalog lookup by identifier 0..6
pub fn definition_by_index(index: u8) -> Option<PieceDef> {
    PieceKind::from_index(index).map(definition)
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // N: horizontal, centered on row 1
        Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // E: vertical, right-aligned
        Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
        // S: horizontal, centered on row 2
        Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
        // W: vertical, left-aligned
        Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
        Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// SRS wall kick data
/// Each entry is (dx, dy) offset to try; entry 0 is always "no kick"
pub type KickTable = [[(i8, i8); 5]; 4];

/// Get kick table for a piece kind, indexed by `from` orientation
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// O piece has no kicks (always returns 0,0)
const O_KICKS: KickTable = [[(0, 0); 5]; 4];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // from N
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // from E
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // from S
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // from W
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
];

/// I piece kick table (different from JLSTZ)
const I_KICKS: KickTable = [
    // from N
    [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
    // from E
    [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    // from S
    [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
    // from W
    [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
];

/// Result of a successful rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationOutcome {
    pub shape: PieceShape,
    pub rotation: Rotation,
    /// Offset applied to the piece origin
    pub offset: (i8, i8),
    /// Position of the offset in the kick row (0 = no kick)
    pub kick_index: u8,
}

/// Try to rotate a piece with wall kicks
///
/// `is_open` answers whether a single mino may occupy an absolute cell.
/// Returns `None` (and nothing should change) if all kicks fail.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    is_open: impl Fn(i8, i8) -> bool,
) -> Option<RotationOutcome> {
    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    let new_shape = get_shape(kind, new_rotation);
    let kicks = &get_kick_table(kind)[rotation.index() as usize];

    kicks.iter().enumerate().find_map(|(i, &(dx, dy))| {
        let fits = new_shape
            .iter()
            .all(|&(mx, my)| is_open(x + dx + mx, y + dy + my));
        fits.then_some(RotationOutcome {
            shape: new_shape,
            rotation: new_rotation,
            offset: (dx, dy),
            kick_index: i as u8,
        })
    })
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Get initial shape for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

/// Diagonal neighbours of the 3x3 box centre (1, 1), relative to the origin
pub const T_CORNERS: [MinoOffset; 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// The centre's orthogonal neighbour not covered by the T in `rotation`
pub fn t_front_offset(rotation: Rotation) -> MinoOffset {
    match rotation {
        Rotation::North => (1, 2),
        Rotation::East => (0, 1),
        Rotation::South => (1, 0),
        Rotation::West => (2, 1),
    }
}

/// Count blocked box corners for a T whose origin is at (x, y).
///
/// `is_blocked` must treat every out-of-bounds cell (including rows above
/// the top) as blocked.
pub fn count_t_corners(x: i8, y: i8, is_blocked: impl Fn(i8, i8) -> bool) -> u8 {
    T_CORNERS
        .iter()
        .filter(|&&(cx, cy)| is_blocked(x + cx, y + cy))
        .count() as u8
}
