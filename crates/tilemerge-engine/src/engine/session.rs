use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{
    MoveError,
    core::{Board, Direction},
};

use super::{
    score::Score,
    spawner::{SpawnSeed, SpawnedTile},
    state::GameState,
    status::GameStatus,
};

/// Summary of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSummary {
    pub direction: Direction,
    pub score_gained: u64,
    pub spawned: Option<SpawnedTile>,
    pub status: GameStatus,
}

/// An interactive game owning its random source.
///
/// `GameSession` wraps a [`GameState`] together with the seeded generator
/// spawns are drawn from, and counts accepted moves. Front ends hold one
/// session and feed it directional input through [`Self::try_move`].
///
/// # Example
///
/// ```
/// use tilemerge_engine::{Direction, GameSession, MoveError};
///
/// let mut session = GameSession::new();
/// match session.try_move(Direction::Up) {
///     Ok(summary) => println!("gained {} points", summary.score_gained),
///     Err(MoveError::Unchanged) => println!("nothing moved"),
///     Err(MoveError::GameFinished(status)) => println!("game is {status}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    seed: SpawnSeed,
    rng: Pcg32,
    state: GameState,
    moves: usize,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a session with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible spawns.
    #[must_use]
    pub fn with_seed(seed: SpawnSeed) -> Self {
        let mut rng = seed.rng();
        let state = GameState::new_game(&mut rng);
        log::debug!("new game with seed {seed}");
        Self {
            seed,
            rng,
            state,
            moves: 0,
        }
    }

    /// Resumes play from an existing state, drawing future spawns from `seed`.
    #[must_use]
    pub fn from_state(seed: SpawnSeed, state: GameState) -> Self {
        Self {
            seed,
            rng: seed.rng(),
            state,
            moves: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> SpawnSeed {
        self.seed
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.state.score()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Returns the number of moves that changed the board.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Slides the board toward `direction`.
    ///
    /// On success the board has changed, one tile has spawned, the score
    /// includes the merge points, and the status has been re-evaluated.
    /// A finished game or a move that changes nothing leaves the session
    /// untouched and returns an error.
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveSummary, MoveError> {
        let status = self.state.status();
        if status.is_finished() {
            return Err(MoveError::GameFinished(status));
        }

        let outcome = self.state.apply_move(direction, &mut self.rng);
        if !outcome.changed {
            return Err(MoveError::Unchanged);
        }

        self.state = outcome.state;
        self.moves += 1;

        let status = self.state.status();
        if status.is_finished() {
            log::debug!(
                "game {status} after {} moves with score {}",
                self.moves,
                self.state.score()
            );
        }
        Ok(MoveSummary {
            direction,
            score_gained: outcome.score_gained,
            spawned: outcome.spawned,
            status,
        })
    }

    /// Discards the current game and starts a new one with a random seed.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Discards the current game and starts a new one with `seed`.
    pub fn restart_with_seed(&mut self, seed: SpawnSeed) {
        *self = Self::with_seed(seed);
    }
}
