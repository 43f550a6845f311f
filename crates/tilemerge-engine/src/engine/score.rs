use serde::{Deserialize, Serialize};

/// Running score of a game.
///
/// Each merge adds the value of the tile it creates. The score never
/// decreases; it only goes back to zero when a new game starts.
///
/// # Example
///
/// ```
/// use tilemerge_engine::Score;
///
/// let score = Score::ZERO.add(8).add(4);
/// assert_eq!(score.value(), 12);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct Score(u64);

impl Score {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the score after gaining `delta` points.
    #[must_use]
    pub fn add(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let score = [4, 8, 0, 16].into_iter().fold(Score::ZERO, Score::add);
        assert_eq!(score.value(), 28);
    }

    #[test]
    fn test_add_zero_is_identity() {
        let score = Score::ZERO.add(32);
        assert_eq!(score.add(0), score);
    }

    #[test]
    fn test_add_is_monotonic() {
        let mut score = Score::ZERO;
        for delta in [2, 0, 4, 2048, 0, u64::from(u32::MAX)] {
            let next = score.add(delta);
            assert!(next >= score);
            score = next;
        }
        assert_eq!(score.value(), 2 + 4 + 2048 + u64::from(u32::MAX));
    }

    #[test]
    fn test_display_and_serde() {
        let score = Score::ZERO.add(1234);
        assert_eq!(score.to_string(), "1234");
        assert_eq!(serde_json::to_string(&score).unwrap(), "1234");
    }
}
