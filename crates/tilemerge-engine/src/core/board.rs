use std::{fmt, iter};

use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidTileError;

use super::{GRID_SIZE, NUM_CELLS, tile::Tile};

/// Cell coordinate on the board.
///
/// `x` is the column (0 = left edge) and `y` is the row (0 = top edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Creates a position.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside the board.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        assert!(x < GRID_SIZE && y < GRID_SIZE, "position out of range");
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    /// Iterates over every position in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE).flat_map(|y| (0..GRID_SIZE).map(move |x| Self::new(x, y)))
    }
}

/// The 4×4 puzzle grid.
///
/// Each cell is either empty (`None`) or holds a [`Tile`]. The board is a small
/// `Copy` value: moves never modify a board in place, they produce a new one
/// (see [`slide`](crate::slide)).
///
/// Two boards are equal when all 16 cells are equal, which is how a caller
/// detects that a move did not change anything.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Board, Position, Tile};
///
/// let board = Board::from_ascii(
///     "
///     2 . . .
///     . . . .
///     . . 4 .
///     . . . .
///     ",
/// );
/// assert_eq!(board.get(Position::new(0, 0)), Some(Tile::TWO));
/// assert_eq!(board.get(Position::new(2, 2)), Some(Tile::FOUR));
/// assert_eq!(board.empty_positions().len(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Tile>; GRID_SIZE]; GRID_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        cells: [[None; GRID_SIZE]; GRID_SIZE],
    };

    /// Builds a board from raw cell values, `0` meaning an empty cell.
    ///
    /// Rows are given top to bottom.
    pub fn from_rows(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Result<Self, InvalidTileError> {
        let mut board = Self::EMPTY;
        for (board_row, row) in iter::zip(&mut board.cells, rows) {
            for (cell, value) in iter::zip(board_row, row) {
                *cell = match value {
                    0 => None,
                    value => Some(Tile::try_from(value)?),
                };
            }
        }
        Ok(board)
    }

    /// Returns raw cell values row by row, `0` meaning an empty cell.
    #[must_use]
    pub fn to_rows(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        self.cells
            .map(|row| row.map(|cell| cell.map_or(0, Tile::value)))
    }

    /// Creates a board from a text grid for tests and fixtures.
    ///
    /// Each non-blank line is a row, top to bottom. Cells are separated by
    /// whitespace; `.` is an empty cell, anything else must be a tile value.
    ///
    /// # Panics
    ///
    /// Panics if the grid is not 4×4 or contains an invalid value.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert_eq!(
            lines.len(),
            GRID_SIZE,
            "Board must have exactly {GRID_SIZE} rows, got {}",
            lines.len()
        );

        let mut board = Self::EMPTY;
        for (y, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(
                tokens.len(),
                GRID_SIZE,
                "Each row must have exactly {GRID_SIZE} cells, got {} at row {y}",
                tokens.len()
            );
            for (x, token) in tokens.iter().enumerate() {
                if *token == "." {
                    continue;
                }
                let tile = token
                    .parse::<u32>()
                    .ok()
                    .and_then(Tile::new)
                    .unwrap_or_else(|| panic!("invalid tile `{token}` at ({x}, {y})"));
                board.cells[y][x] = Some(tile);
            }
        }
        board
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.cells[pos.y][pos.x]
    }

    pub(crate) fn set(&mut self, pos: Position, tile: Option<Tile>) {
        self.cells[pos.y][pos.x] = tile;
    }

    /// Reads the cells at `positions`, in the given order.
    #[must_use]
    pub fn cells_at(&self, positions: [Position; GRID_SIZE]) -> [Option<Tile>; GRID_SIZE] {
        positions.map(|pos| self.get(pos))
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>; GRID_SIZE]> + '_ {
        self.cells.iter()
    }

    /// Iterates over the non-empty cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().flatten().flatten().copied()
    }

    /// Returns the positions of all empty cells in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> ArrayVec<Position, NUM_CELLS> {
        Position::all().filter(|pos| self.get(*pos).is_none()).collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    #[must_use]
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles().any(|t| t == tile)
    }

    #[must_use]
    pub fn max_tile(&self) -> Option<Tile> {
        self.tiles().max()
    }

    /// Sum of all tile values on the board.
    #[must_use]
    pub fn tile_sum(&self) -> u64 {
        self.tiles().map(|tile| u64::from(tile.value())).sum()
    }

    /// Checks whether two horizontally or vertically adjacent cells hold the same tile
    /// that can still merge.
    ///
    /// Empty cells and pairs of [`Tile::MAX`] never count.
    #[must_use]
    pub fn has_adjacent_pair(&self) -> bool {
        let same = |a: &Option<Tile>, b: &Option<Tile>| {
            a.is_some_and(|tile| tile.checked_doubled().is_some()) && a == b
        };
        let horizontal = self
            .cells
            .iter()
            .any(|row| row.windows(2).any(|pair| same(&pair[0], &pair[1])));
        let vertical = self
            .cells
            .windows(2)
            .any(|rows| iter::zip(&rows[0], &rows[1]).any(|(a, b)| same(a, b)));
        horizontal || vertical
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(tile) => write!(f, "{:>5}", tile.value())?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: [[2,0,0,0],[0,4,0,0],...] (0 = empty)
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = <[[u32; GRID_SIZE]; GRID_SIZE]>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
