//! Board tests - grid storage, collision and row clearing

use blockfall::core::pieces::get_shape;
use blockfall::core::Board;
use blockfall::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
    assert!(board.is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));

    assert!(!board.set(-1, 3, Some(PieceKind::I)));
    assert!(!board.set(3, 20, Some(PieceKind::I)));
}

#[test]
fn test_from_rows_letters_and_fill() {
    let board = Board::from_rows(&["z.", "#L"]);
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::Z)));
    assert_eq!(board.get(1, 18), Some(None));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::I)));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::L)));
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_walls_and_floor_collide() {
    let board = Board::new();
    let o = get_shape(PieceKind::O, Rotation::North);

    // O occupies box columns 1..=2
    assert!(!board.collides(&o, -1, 0));
    assert!(board.collides(&o, -2, 0));
    assert!(!board.collides(&o, 7, 0));
    assert!(board.collides(&o, 8, 0));
    assert!(!board.collides(&o, 3, 18));
    assert!(board.collides(&o, 3, 19));
}

#[test]
fn test_spawn_buffer_never_collides() {
    let board = Board::from_rows(&["##########"]);
    let i = get_shape(PieceKind::I, Rotation::East);
    assert!(!board.collides(&i, 3, -3));
    assert!(board.is_open(0, -5));
    assert!(!board.is_open(-1, -5));
}

#[test]
fn test_clear_collapses_non_adjacent_rows_in_order() {
    let mut board = Board::from_rows(&[
        "J.........",
        "##########",
        "L.........",
        "##########",
        "##########",
        "S.........",
    ]);

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[15, 17, 18]);

    assert_eq!(board.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::L)));
    assert_eq!(board.get(0, 17), Some(Some(PieceKind::J)));
    for y in 0..17 {
        assert!(board.is_row_empty(y), "row {} should be empty", y);
    }
    assert_eq!(board.occupied_count(), 3);
}

#[test]
fn test_clear_four_rows_empties_board() {
    let mut board = Board::from_rows(&["##########"; 4]);
    assert_eq!(board.detect_full_rows().len(), 4);
    board.clear_full_rows();
    assert!(board.is_empty());
}

#[test]
fn test_lock_reports_cells_above_top() {
    let mut board = Board::new();
    let i = get_shape(PieceKind::I, Rotation::East);

    assert!(!board.lock(&i, 0, -2, PieceKind::I));
    assert_eq!(board.occupied_count(), 2);
    assert!(board.lock(&i, 4, 16, PieceKind::I));
    assert_eq!(board.occupied_count(), 6);
}
