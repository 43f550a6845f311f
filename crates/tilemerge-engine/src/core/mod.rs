pub use self::{board::*, direction::*, tile::*};

pub(crate) mod board;
pub(crate) mod direction;
pub(crate) mod tile;

/// Number of cells along each side of the board.
pub const GRID_SIZE: usize = 4;
/// Number of cells on the board.
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;
