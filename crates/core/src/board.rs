//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! Rows above the top (negative y) form the spawn buffer: they are never stored,
//! always read as empty, and never collide.

use arrayvec::ArrayVec;

use crate::pieces::PieceShape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Number of rows, as a `usize` capacity
pub const BOARD_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices returned by [`Board::detect_full_rows`], top to bottom
pub type RowList = ArrayVec<usize, BOARD_ROWS>;

/// Numeric grid export: 0 = empty, otherwise `PieceKind::cell_code()`
pub type U8Grid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from ASCII rows aligned to the bottom of the grid.
    ///
    /// The last string is row 19. `.` or a space is empty; a piece letter
    /// (`IJLOSTZ`, any case) stores that kind; any other character stores `I`.
    /// Missing columns are empty and extra columns are ignored.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&["T...", "####"]);
    /// assert!(board.is_occupied(0, 18));
    /// assert!(board.is_occupied(3, 19));
    /// assert!(!board.is_occupied(4, 19));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let skip = rows.len().saturating_sub(BOARD_ROWS);
        let top = BOARD_ROWS - (rows.len() - skip);

        for (offset, row) in rows.iter().skip(skip).enumerate() {
            let y = (top + offset) as i8;
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => {
                        Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I))
                    }
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Check whether a single mino may sit at (x, y).
    ///
    /// Columns must be in range and rows below the floor are blocked; rows
    /// above the top are open.
    #[inline]
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || self.is_valid(x, y)
    }

    /// Check whether `shape` placed with its origin at (x, y) hits a wall,
    /// the floor, or an occupied cell.
    pub fn collides(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape
            .iter()
            .any(|&(dx, dy)| !self.is_open(x + dx, y + dy))
    }

    /// Write `shape` into the grid as `kind`.
    ///
    /// Cells in the spawn buffer are dropped. Returns false if any cell fell
    /// outside the visible grid.
    pub fn lock(&mut self, shape: &PieceShape, x: i8, y: i8, kind: PieceKind) -> bool {
        let mut all_inside = true;
        for &(dx, dy) in shape {
            if !self.set(x + dx, y + dy, Some(kind)) {
                all_inside = false;
            }
        }
        all_inside
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no blocks
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= BOARD_ROWS {
            return true;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_none())
    }

    /// Indices of all full rows, in top-to-bottom order
    pub fn detect_full_rows(&self) -> RowList {
        (0..BOARD_ROWS).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove `rows` and shift everything above them down in one pass.
    ///
    /// Each removed row inserts an empty row at the top. Out-of-range and
    /// duplicate indices are ignored. Uses a two-pointer compaction from the
    /// bottom up with zero allocation.
    pub fn collapse(&mut self, rows: &[usize]) {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_ROWS;

        for read_y in (0..BOARD_ROWS).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                let dst_start = write_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }
    }

    /// Detect and collapse all full rows, returning the removed indices
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.detect_full_rows();
        self.collapse(&rows);
        rows
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Export the numeric grid (0 empty, `index + 1` otherwise)
    pub fn write_u8_grid(&self, out: &mut U8Grid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = self.cells[y * width + x].map_or(0, PieceKind::cell_code);
            }
        }
    }

    /// Render one row as ASCII (`.` empty, piece letter otherwise)
    pub fn row_string(&self, y: usize) -> String {
        if y >= BOARD_ROWS {
            return String::new();
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize]
            .iter()
            .map(|cell| cell.map_or(".", |kind| kind.as_str()))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
