//! Board module - the fixed-size playfield shared by both games
//!
//! The board is a 10x20 grid of [`CellLabel`]s stored as a flat array for
//! cache locality and zero allocation. Snake keeps its head, body and food on
//! it; Tetris keeps its locked blocks on it (the falling piece is overlaid
//! only in snapshots).
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{CellLabel, Point, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row-major grid of cell labels, the shape copied into snapshots
pub type BoardGrid = [[CellLabel; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Rows removed by one [`Board::clear_full_rows`] call, bottom to top
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [CellLabel; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [CellLabel::Empty; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<CellLabel> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: CellLabel) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn get_at(&self, p: Point) -> Option<CellLabel> {
        self.get(p.x, p.y)
    }

    pub fn set_at(&mut self, p: Point, cell: CellLabel) -> bool {
        self.set(p.x, p.y, cell)
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(CellLabel::Empty))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| !cell.is_empty())
    }

    /// Remove every full row, shifting the rows above down.
    ///
    /// Returns the original indices of the removed rows, bottom to top.
    /// Two-pointer compaction, no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Rows freed at the top
        self.cells[..write_y * width].fill(CellLabel::Empty);

        cleared_rows
    }

    /// Write `label` into each of `points` that is on the board and empty.
    ///
    /// Returns how many cells were written; the others are left untouched.
    pub fn lock_cells(&mut self, points: &[Point], label: CellLabel) -> usize {
        let mut written = 0;
        for p in points {
            if self.is_valid(p.x, p.y) {
                self.set_at(*p, label);
                written += 1;
            }
        }
        written
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Copy the board into a 2D grid (row-major, `grid[y][x]`)
    pub fn write_grid(&self, grid: &mut BoardGrid) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in grid.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellLabel::Empty);
    }

    /// Fill a whole row with `label`
    pub fn fill_row(&mut self, y: usize, label: CellLabel) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }
        let start = y * BOARD_WIDTH as usize;
        self.cells[start..start + BOARD_WIDTH as usize].fill(label);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
