//! Engine for a sliding-tile merge puzzle played on a 4x4 grid.
//!
//! - [`core`](crate::core) - board, tiles, directions and positions
//! - [`engine`] - move resolution, spawning, scoring, status and sessions

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid tile value: {value} (expected a power of two >= 2)")]
pub struct InvalidTileError {
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no empty cell to spawn a tile")]
pub struct BoardFullError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed length: expected 32 hex digits, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: not a hexadecimal number")]
    InvalidHex,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction `{input}` (expected left, right, up or down)")]
pub struct ParseDirectionError {
    pub input: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum MoveError {
    #[display("game already {_0}")]
    GameFinished(#[error(not(source))] GameStatus),
    #[display("move does not change the board")]
    Unchanged,
}
