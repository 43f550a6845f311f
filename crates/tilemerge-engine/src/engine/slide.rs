use std::iter;

use arrayvec::ArrayVec;

use crate::core::{Board, Direction, GRID_SIZE, Tile};

/// Result of sliding a board in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Board after all lines have been compacted.
    pub board: Board,
    /// Sum of the values of all tiles created by merges during this move.
    pub score_gained: u64,
    /// Number of merges performed.
    pub merges: usize,
}

/// Result of compacting a single line toward its near edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineShift {
    pub cells: [Option<Tile>; GRID_SIZE],
    pub score_gained: u64,
    pub merges: usize,
}

/// Compacts one line toward index 0, merging equal neighbours once.
///
/// Empty cells are skipped, then tiles are scanned from the near edge: two
/// equal consecutive tiles become one tile of double value. A tile produced
/// by a merge is never merged again in the same pass, so `[2, 2, 2, 2]`
/// becomes `[4, 4, _, _]` and `[2, 2, 2, _]` becomes `[4, 2, _, _]`.
/// Two [`Tile::MAX`] tiles stay side by side.
#[must_use]
pub fn compact_line(line: [Option<Tile>; GRID_SIZE]) -> LineShift {
    let mut tiles = line.into_iter().flatten().peekable();
    let mut packed = ArrayVec::<Tile, GRID_SIZE>::new();
    let mut score_gained = 0;
    let mut merges = 0;

    while let Some(tile) = tiles.next() {
        if let Some(merged) = tile.checked_doubled()
            && tiles.next_if_eq(&tile).is_some()
        {
            score_gained += u64::from(merged.value());
            merges += 1;
            packed.push(merged);
        } else {
            packed.push(tile);
        }
    }

    let mut cells = [None; GRID_SIZE];
    for (cell, tile) in iter::zip(&mut cells, packed) {
        *cell = Some(tile);
    }
    LineShift {
        cells,
        score_gained,
        merges,
    }
}

/// Slides every tile of `board` toward `direction`, merging equal neighbours.
///
/// Each row (for left/right) or column (for up/down) is read starting from
/// the edge the tiles move toward, compacted with [`compact_line`], and
/// written back in the same order. The input board is left untouched.
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Board, Direction, slide};
///
/// let board = Board::from_ascii(
///     "
///     2 2 2 2
///     . . . .
///     . . . .
///     . . . .
///     ",
/// );
/// let result = slide(&board, Direction::Left);
/// assert_eq!(result.score_gained, 8);
/// assert_eq!(result.board.to_rows()[0], [4, 4, 0, 0]);
/// ```
#[must_use]
pub fn slide(board: &Board, direction: Direction) -> MoveResult {
    let mut next = Board::EMPTY;
    let mut score_gained = 0;
    let mut merges = 0;

    for positions in direction.lines() {
        let shift = compact_line(board.cells_at(positions));
        for (pos, cell) in iter::zip(positions, shift.cells) {
            next.set(pos, cell);
        }
        score_gained += shift.score_gained;
        merges += shift.merges;
    }

    MoveResult {
        board: next,
        score_gained,
        merges,
    }
}

impl Board {
    /// Returns the result of sliding this board toward `direction`.
    #[must_use]
    pub fn slide(&self, direction: Direction) -> MoveResult {
        slide(self, direction)
    }

    /// Checks whether sliding toward `direction` would change the board.
    #[must_use]
    pub fn can_slide(&self, direction: Direction) -> bool {
        slide(self, direction).board != *self
    }
}
