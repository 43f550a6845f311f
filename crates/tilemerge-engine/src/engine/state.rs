use rand::Rng;
use serde::Serialize;

use crate::core::{Board, Direction};

use super::{
    score::Score,
    slide::slide,
    spawner::{SpawnedTile, spawn_random_tile},
    status::{GameStatus, evaluate},
};

/// Number of tiles placed on the board when a game starts.
pub const INITIAL_TILES: usize = 2;

/// Snapshot of a game: board, score and status.
///
/// `GameState` is a small `Copy` value. Applying a move never modifies a state;
/// it returns the next one, so any earlier state stays valid for inspection or
/// replay.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use tilemerge_engine::{Direction, GameState, GameStatus};
///
/// let mut rng = Pcg32::seed_from_u64(42);
/// let state = GameState::new_game(&mut rng);
/// assert_eq!(state.board().tiles().count(), 2);
/// assert_eq!(state.status(), GameStatus::Playing);
///
/// let outcome = state.apply_move(Direction::Left, &mut rng);
/// if outcome.changed {
///     assert!(outcome.state.score() >= state.score());
/// } else {
///     assert_eq!(outcome.state, state);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    score: Score,
    status: GameStatus,
}

/// What happened when a move was applied to a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// State after the move (identical to the input when `changed` is false).
    pub state: GameState,
    /// Whether the move altered the board.
    pub changed: bool,
    /// Points gained by merges during the move.
    pub score_gained: u64,
    /// Tile inserted after the move, if any.
    pub spawned: Option<SpawnedTile>,
}

impl GameState {
    /// Starts a new game: an empty board with two spawned tiles, zero score.
    pub fn new_game<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut board = Board::EMPTY;
        for _ in 0..INITIAL_TILES {
            spawn_random_tile(&mut board, rng)
                .expect("empty board has room for opening tiles");
        }
        Self {
            board,
            score: Score::ZERO,
            status: GameStatus::Playing,
        }
    }

    /// Builds a state from an existing board and score.
    ///
    /// The status is derived from the board.
    #[must_use]
    pub fn from_parts(board: Board, score: Score) -> Self {
        Self {
            board,
            score,
            status: evaluate(&board),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applies one move.
    ///
    /// Nothing happens (`changed == false`) if the game is already won or
    /// lost, or if sliding toward `direction` leaves the board as it is.
    /// Otherwise the slid board gets one random tile, the merge score is
    /// added, and the status is evaluated again on the resulting board.
    pub fn apply_move<R>(&self, direction: Direction, rng: &mut R) -> MoveOutcome
    where
        R: Rng + ?Sized,
    {
        let unchanged = MoveOutcome {
            state: *self,
            changed: false,
            score_gained: 0,
            spawned: None,
        };
        if self.status.is_finished() {
            return unchanged;
        }

        let result = slide(&self.board, direction);
        if result.board == self.board {
            return unchanged;
        }

        let mut board = result.board;
        // A board that changed always has at least one empty cell
        let spawned = spawn_random_tile(&mut board, rng).ok();
        let state = Self {
            board,
            score: self.score.add(result.score_gained),
            status: evaluate(&board),
        };
        MoveOutcome {
            state,
            changed: true,
            score_gained: result.score_gained,
            spawned,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::core::Tile;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x2048)
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new_game(&mut rng());
        assert_eq!(state.board().tiles().count(), INITIAL_TILES);
        assert!(
            state
                .board()
                .tiles()
                .all(|tile| tile == Tile::TWO || tile == Tile::FOUR)
        );
        assert_eq!(state.score(), Score::ZERO);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_new_game_is_reproducible() {
        assert_eq!(
            GameState::new_game(&mut rng()),
            GameState::new_game(&mut rng())
        );
    }

    #[test]
    fn test_no_op_move_does_not_spawn_or_score() {
        let board = Board::from_ascii(
            r"
            2 . . .
            4 . . .
            . . . .
            . . . .
            ",
        );
        let state = GameState::from_parts(board, Score::ZERO.add(100));
        let outcome = state.apply_move(Direction::Left, &mut rng());
        assert!(!outcome.changed);
        assert_eq!(outcome.state, state);
        assert_eq!(outcome.score_gained, 0);
        assert_eq!(outcome.spawned, None);
    }

    #[test]
    fn test_changed_move_spawns_and_scores() {
        let board = Board::from_ascii(
            r"
            2 2 2 2
            . . . .
            . . . .
            . . . .
            ",
        );
        let state = GameState::from_parts(board, Score::ZERO);
        let outcome = state.apply_move(Direction::Left, &mut rng());

        assert!(outcome.changed);
        assert_eq!(outcome.score_gained, 8);
        assert_eq!(outcome.state.score().value(), 8);

        let spawned = outcome.spawned.unwrap();
        assert_eq!(board.get(spawned.position), None);
        assert_eq!(outcome.state.board().get(spawned.position), Some(spawned.tile));
        assert_eq!(outcome.state.board().tiles().count(), 3);
    }

    #[test]
    fn test_value_conservation() {
        let mut rng = rng();
        let mut state = GameState::new_game(&mut rng);
        let mut moves = 0;
        while state.status().is_playing() && moves < 2_000 {
            let direction = Direction::ALL[moves % Direction::ALL.len()];
            let before_sum = state.board().tile_sum();
            let outcome = state.apply_move(direction, &mut rng);
            if outcome.changed {
                let spawned = outcome.spawned.unwrap();
                assert_eq!(
                    outcome.state.board().tile_sum(),
                    before_sum + u64::from(spawned.tile.value())
                );
                assert_eq!(
                    outcome.state.score().value(),
                    state.score().value() + outcome.score_gained
                );
            } else {
                assert_eq!(outcome.state, state);
            }
            state = outcome.state;
            moves += 1;
        }
    }

    #[test]
    fn test_move_can_win() {
        let board = Board::from_ascii(
            r"
            1024 1024 . .
            . . . .
            . . . .
            . . . .
            ",
        );
        let state = GameState::from_parts(board, Score::ZERO);
        let outcome = state.apply_move(Direction::Left, &mut rng());
        assert!(outcome.changed);
        assert_eq!(outcome.score_gained, 2048);
        assert_eq!(outcome.state.status(), GameStatus::Won);
    }

    #[test]
    fn test_move_can_lose() {
        // Sliding right merges the 2s; the spawn lands in the single freed
        // cell at the left edge and nothing can merge afterwards.
        let board = Board::from_ascii(
            r"
            32 64 2 2
            8 16 8 16
            16 8 16 8
            8 16 8 16
            ",
        );
        let state = GameState::from_parts(board, Score::ZERO);
        let outcome = state.apply_move(Direction::Right, &mut rng());
        assert!(outcome.changed);
        assert_eq!(outcome.score_gained, 4);
        let spawned = outcome.spawned.unwrap();
        assert_eq!(spawned.position.x(), 0);
        assert_eq!(spawned.position.y(), 0);
        assert!(outcome.state.board().is_full());
        assert_eq!(outcome.state.status(), GameStatus::Lost);
    }

    #[test]
    fn test_finished_game_ignores_moves() {
        let won = GameState::from_parts(
            Board::from_ascii(
                r"
                2048 2 . .
                . . . .
                . . . .
                . . . .
                ",
            ),
            Score::ZERO,
        );
        let lost = GameState::from_parts(
            Board::from_ascii(
                r"
                2 4 2 4
                4 2 4 2
                2 4 2 4
                4 2 4 2
                ",
            ),
            Score::ZERO,
        );
        assert_eq!(won.status(), GameStatus::Won);
        assert_eq!(lost.status(), GameStatus::Lost);

        for state in [won, lost] {
            for direction in Direction::ALL {
                let outcome = state.apply_move(direction, &mut rng());
                assert!(!outcome.changed);
                assert_eq!(outcome.state, state);
            }
        }
    }
}
