//! Game rules and state management.
//!
//! This module builds the rules of the game on top of the core board types:
//!
//! - [`slide()`] - compacts and merges every line toward a direction
//! - [`spawn_random_tile`] - inserts a 2 (90%) or a 4 into a random empty cell
//! - [`evaluate`] - decides whether a board is playing, won or lost
//! - [`Score`] - running score, increased by the value of each merged tile
//! - [`GameState`] - immutable snapshot advanced by [`GameState::apply_move`]
//! - [`GameSession`] - mutable game owning its seeded random source
//!
//! # Game Flow
//!
//! 1. Start from an empty board and spawn two tiles
//! 2. Slide the board toward a direction chosen by the player
//! 3. If the board changed, spawn one tile and add the merge score
//! 4. Evaluate the status and repeat while the game is playing
//!
//! # Example
//!
//! ```
//! use tilemerge_engine::{Direction, GameSession, SpawnSeed};
//!
//! let mut session = GameSession::with_seed(SpawnSeed::from_bytes([1; 16]));
//!
//! for direction in Direction::ALL.repeat(10) {
//!     if session.try_move(direction).is_err() && session.status().is_finished() {
//!         break;
//!     }
//! }
//!
//! println!("score: {}", session.score());
//! ```

pub use self::{score::*, session::*, slide::*, spawner::*, state::*, status::*};

mod score;
mod session;
mod slide;
mod spawner;
mod state;
mod status;
