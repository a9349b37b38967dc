//! Pieces module - the immutable tetromino rotation table
//!
//! Each of the 7 kinds has 4 rotations; each rotation is a 4x4 occupancy
//! grid, stored here as the 4 occupied (x, y) offsets from the top-left
//! corner of that grid. I, S and Z only have two distinct orientations
//! (rotation 2 repeats 0, rotation 3 repeats 1) and O has one.
//!
//! Rotation is a plain `(index + 1) mod 4` step with no wall kicks.

use crate::types::{CellLabel, PieceKind, Rotation, BOARD_WIDTH, PIECE_GRID_SIZE};

/// Offset of a single mino relative to the top-left of the 4x4 grid
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets
pub type PieceShape = [MinoOffset; 4];

/// 4x4 grid of cell labels, `grid[y][x]`
pub type PieceGrid = [[CellLabel; PIECE_GRID_SIZE as usize]; PIECE_GRID_SIZE as usize];

/// Spawn anchor: horizontally centered 4x4 grid on the top row
pub const SPAWN_POSITION: (i8, i8) = ((BOARD_WIDTH as i8) / 2 - (PIECE_GRID_SIZE as i8) / 2, 0);

const I_FLAT: PieceShape = [(0, 1), (1, 1), (2, 1), (3, 1)];
const I_UPRIGHT: PieceShape = [(1, 0), (1, 1), (1, 2), (1, 3)];
const O_SHAPE: PieceShape = [(1, 0), (2, 0), (1, 1), (2, 1)];
const S_FLAT: PieceShape = [(1, 0), (2, 0), (0, 1), (1, 1)];
const S_UPRIGHT: PieceShape = [(1, 0), (1, 1), (2, 1), (2, 2)];
const Z_FLAT: PieceShape = [(0, 0), (1, 0), (1, 1), (2, 1)];
const Z_UPRIGHT: PieceShape = [(2, 0), (1, 1), (2, 1), (1, 2)];

/// Rotation table indexed by `[PieceKind::index()][Rotation::index()]`
pub static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [I_FLAT, I_UPRIGHT, I_FLAT, I_UPRIGHT],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // O
    [O_SHAPE, O_SHAPE, O_SHAPE, O_SHAPE],
    // S
    [S_FLAT, S_UPRIGHT, S_FLAT, S_UPRIGHT],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [Z_FLAT, Z_UPRIGHT, Z_FLAT, Z_UPRIGHT],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Get the 4x4 occupancy grid for a piece kind and rotation
pub fn shape_grid(kind: PieceKind, rotation: Rotation) -> PieceGrid {
    let mut grid = [[CellLabel::Empty; PIECE_GRID_SIZE as usize]; PIECE_GRID_SIZE as usize];
    for (dx, dy) in get_shape(kind, rotation) {
        grid[dy as usize][dx as usize] = CellLabel::Body;
    }
    grid
}

/// Grid shown in the "next" preview (rotation 0)
pub fn preview_grid(kind: PieceKind) -> PieceGrid {
    shape_grid(kind, Rotation::North)
}
