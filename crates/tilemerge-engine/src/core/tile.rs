use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::InvalidTileError;

/// Largest exponent a tile may carry.
///
/// A 4×4 board cannot build anything past 2^17, so this leaves plenty of room
/// while keeping [`Tile::value`] inside `u32`.
const MAX_EXPONENT: u8 = 30;

/// A non-empty cell value.
///
/// Tiles are always powers of two starting at 2. The value is stored as its
/// exponent, so a non-power-of-two tile cannot be constructed.
///
/// # Example
///
/// ```
/// use tilemerge_engine::Tile;
///
/// let tile = Tile::new(8).unwrap();
/// assert_eq!(tile.exponent(), 3);
/// assert_eq!(tile.doubled().value(), 16);
///
/// assert!(Tile::new(6).is_none());
/// assert!(Tile::new(1).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    exponent: u8,
}

impl Tile {
    /// The tile spawned most of the time.
    pub const TWO: Self = Self { exponent: 1 };
    /// The tile spawned the rest of the time.
    pub const FOUR: Self = Self { exponent: 2 };
    /// The tile that wins the game.
    pub const WIN: Self = Self { exponent: 11 };
    /// The largest representable tile. It never merges.
    pub const MAX: Self = Self {
        exponent: MAX_EXPONENT,
    };

    /// Creates a tile from its value, or `None` if the value is not a power of two ≥ 2.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value < 2 || !value.is_power_of_two() {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let exponent = value.trailing_zeros() as u8;
        Self::from_exponent(exponent)
    }

    /// Creates a tile from its base-2 exponent (`1` is the tile `2`).
    #[must_use]
    pub const fn from_exponent(exponent: u8) -> Option<Self> {
        if exponent == 0 || exponent > MAX_EXPONENT {
            return None;
        }
        Some(Self { exponent })
    }

    #[must_use]
    pub const fn exponent(self) -> u8 {
        self.exponent
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        1 << self.exponent
    }

    /// Returns the tile produced by merging two copies of `self`, or `None`
    /// for [`Tile::MAX`].
    #[must_use]
    pub const fn checked_doubled(self) -> Option<Self> {
        Self::from_exponent(self.exponent + 1)
    }

    /// Returns the tile produced by merging two copies of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is [`Tile::MAX`].
    #[must_use]
    pub const fn doubled(self) -> Self {
        match self.checked_doubled() {
            Some(tile) => tile,
            None => panic!("tile value overflow"),
        }
    }
}

impl TryFrom<u32> for Tile {
    type Error = InvalidTileError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidTileError { value })
    }
}

impl From<Tile> for u32 {
    fn from(tile: Tile) -> Self {
        tile.value()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.value())
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
