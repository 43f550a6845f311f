use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    BoardFullError, ParseSeedError,
    core::{Board, Position, Tile},
};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// A tile inserted by [`spawn_random_tile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpawnedTile {
    pub position: Position,
    pub tile: Tile,
}

/// Inserts one new tile into a uniformly chosen empty cell.
///
/// The new tile is a 2 with probability [`SPAWN_TWO_PROBABILITY`] and a 4
/// otherwise. Exactly one cell changes; if the board has no empty cell it is
/// left untouched and [`BoardFullError`] is returned.
///
/// The random source is supplied by the caller, so a seeded generator gives
/// reproducible spawns.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use tilemerge_engine::{Board, spawn_random_tile};
///
/// let mut rng = Pcg32::seed_from_u64(7);
/// let mut board = Board::EMPTY;
/// let spawned = spawn_random_tile(&mut board, &mut rng).unwrap();
/// assert_eq!(board.get(spawned.position), Some(spawned.tile));
/// ```
pub fn spawn_random_tile<R>(board: &mut Board, rng: &mut R) -> Result<SpawnedTile, BoardFullError>
where
    R: Rng + ?Sized,
{
    let empty = board.empty_positions();
    let position = *empty.choose(rng).ok_or(BoardFullError)?;
    let tile = if rng.random_bool(SPAWN_TWO_PROBABILITY) {
        Tile::TWO
    } else {
        Tile::FOUR
    };
    board.set(position, Some(tile));
    log::trace!(
        "spawned {tile} at ({}, {})",
        position.x(),
        position.y()
    );
    Ok(SpawnedTile { position, tile })
}

/// Seed for deterministic tile spawning.
///
/// A 128-bit seed initializing the [`Pcg32`] generator a session draws its
/// spawns from. The same seed and the same sequence of moves always produce
/// the same boards.
///
/// Seeds are written as 32 hexadecimal digits, both by [`Display`](fmt::Display)
/// and by serde, and parsed back with [`FromStr`].
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use tilemerge_engine::{GameSession, SpawnSeed};
///
/// let seed: SpawnSeed = rand::rng().random();
/// let text = seed.to_string();
/// assert_eq!(text.parse::<SpawnSeed>().unwrap(), seed);
///
/// let a = GameSession::with_seed(seed);
/// let b = GameSession::with_seed(seed);
/// assert_eq!(a.board(), b.board());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpawnSeed([u8; 16]);

impl SpawnSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates the generator this seed describes.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for SpawnSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SpawnSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidHex)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SpawnSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpawnSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SpawnSeed` values with `rng.random()`.
impl Distribution<SpawnSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SpawnSeed(seed)
    }
}
