use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParseDirectionError;

use super::{GRID_SIZE, board::Position};

/// Direction in which all tiles slide during a move.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[display("left")]
    Left,
    #[display("right")]
    Right,
    #[display("up")]
    Up,
    #[display("down")]
    Down,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Returns the cell positions of the `index`-th line, starting from the near edge.
    ///
    /// Rows are used for horizontal directions and columns for vertical ones.
    /// The first position is the cell tiles are packed into first.
    ///
    /// ```text
    /// Left:  (0,i) (1,i) (2,i) (3,i)     Up:   (i,0) (i,1) (i,2) (i,3)
    /// Right: (3,i) (2,i) (1,i) (0,i)     Down: (i,3) (i,2) (i,1) (i,0)
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`GRID_SIZE`].
    #[must_use]
    pub fn line(self, index: usize) -> [Position; GRID_SIZE] {
        assert!(index < GRID_SIZE, "line index out of range: {index}");
        let far = GRID_SIZE - 1;
        std::array::from_fn(|step| match self {
            Self::Left => Position::new(step, index),
            Self::Right => Position::new(far - step, index),
            Self::Up => Position::new(index, step),
            Self::Down => Position::new(index, far - step),
        })
    }

    /// Returns all lines of the board for this direction.
    pub fn lines(self) -> impl Iterator<Item = [Position; GRID_SIZE]> {
        (0..GRID_SIZE).map(move |index| self.line(index))
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| s.eq_ignore_ascii_case(&direction.to_string()))
            .ok_or_else(|| ParseDirectionError {
                input: s.to_owned(),
            })
    }
}
