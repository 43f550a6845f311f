use std::{collections::BTreeMap, path::PathBuf};

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tilemerge_engine::{Board, Direction, GameSession, GameStatus, Score, SpawnSeed, Tile};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    num_games: usize,
    /// Master seed, as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<SpawnSeed>,
    /// How moves are chosen
    #[arg(long, value_enum, default_value_t = Policy::Corner)]
    policy: Policy,
    /// Stop a game after this many accepted moves
    #[arg(long, default_value_t = 100_000)]
    max_moves: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Move selection strategy for simulated games.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
enum Policy {
    /// Try directions in a random order
    #[display("random")]
    Random,
    /// Keep tiles in the bottom-left corner: down, left, right, then up
    #[display("corner")]
    Corner,
}

impl Policy {
    const CORNER_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Returns the directions to try, most preferred first.
    fn candidates<R>(self, rng: &mut R) -> [Direction; 4]
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Random => {
                let mut directions = Direction::ALL;
                directions.shuffle(rng);
                directions
            }
            Self::Corner => Self::CORNER_ORDER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct GameRecord {
    seed: SpawnSeed,
    status: GameStatus,
    score: Score,
    moves: usize,
    max_tile: Option<Tile>,
    board: Board,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct SimulationSummary {
    games: usize,
    wins: usize,
    losses: usize,
    unfinished: usize,
    mean_score: f64,
    max_score: Score,
    /// Number of games per highest tile reached
    max_tile_histogram: BTreeMap<u32, usize>,
}

#[derive(Debug, Clone, Serialize)]
struct SimulationReport {
    generated_at: DateTime<Utc>,
    master_seed: SpawnSeed,
    policy: Policy,
    max_moves: usize,
    summary: SimulationSummary,
    games: Vec<GameRecord>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        num_games,
        seed,
        policy,
        max_moves,
        output,
    } = arg;

    let master_seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("simulating {num_games} games with policy {policy} (seed {master_seed})");

    let games = play_games(master_seed, *policy, *num_games, *max_moves);
    let summary = summarize(&games);
    log::info!(
        "{} wins, {} losses, {} unfinished; mean score {:.1}, max score {}",
        summary.wins,
        summary.losses,
        summary.unfinished,
        summary.mean_score,
        summary.max_score
    );

    let report = SimulationReport {
        generated_at: Utc::now(),
        master_seed,
        policy: *policy,
        max_moves: *max_moves,
        summary,
        games,
    };
    util::save_json(&report, output.as_deref())?;
    Ok(())
}

/// Plays `num_games` games whose seeds are drawn from `master_seed`.
fn play_games(
    master_seed: SpawnSeed,
    policy: Policy,
    num_games: usize,
    max_moves: usize,
) -> Vec<GameRecord> {
    let mut master = master_seed.rng();
    (0..num_games)
        .map(|index| {
            let seed: SpawnSeed = master.random();
            let policy_rng = Pcg32::from_rng(&mut master);
            let record = play_game(seed, policy, max_moves, policy_rng);
            log::debug!(
                "game {index}: {} with score {} in {} moves",
                record.status,
                record.score,
                record.moves
            );
            record
        })
        .collect()
}

fn play_game(seed: SpawnSeed, policy: Policy, max_moves: usize, mut rng: Pcg32) -> GameRecord {
    let mut session = GameSession::with_seed(seed);
    while session.status().is_playing() && session.moves() < max_moves {
        let moved = policy
            .candidates(&mut rng)
            .into_iter()
            .any(|direction| session.try_move(direction).is_ok());
        if !moved {
            break;
        }
    }

    GameRecord {
        seed,
        status: session.status(),
        score: session.score(),
        moves: session.moves(),
        max_tile: session.board().max_tile(),
        board: *session.board(),
    }
}

fn summarize(games: &[GameRecord]) -> SimulationSummary {
    let count_status =
        |status: GameStatus| games.iter().filter(|game| game.status == status).count();

    let total_score: u64 = games.iter().map(|game| game.score.value()).sum();
    #[expect(clippy::cast_precision_loss)]
    let mean_score = if games.is_empty() {
        0.0
    } else {
        total_score as f64 / games.len() as f64
    };

    let mut max_tile_histogram = BTreeMap::new();
    for tile in games.iter().filter_map(|game| game.max_tile) {
        *max_tile_histogram.entry(tile.value()).or_insert(0) += 1;
    }

    SimulationSummary {
        games: games.len(),
        wins: count_status(GameStatus::Won),
        losses: count_status(GameStatus::Lost),
        unfinished: count_status(GameStatus::Playing),
        mean_score,
        max_score: games
            .iter()
            .map(|game| game.score)
            .max()
            .unwrap_or(Score::ZERO),
        max_tile_histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: SpawnSeed = SpawnSeed::from_bytes([0x20; 16]);

    #[test]
    fn test_fixed_seed_is_deterministic() {
        for policy in [Policy::Random, Policy::Corner] {
            let a = play_games(SEED, policy, 5, 10_000);
            let b = play_games(SEED, policy, 5, 10_000);
            assert_eq!(a, b);
            assert_eq!(summarize(&a), summarize(&b));
        }
    }

    #[test]
    fn test_games_use_distinct_seeds() {
        let games = play_games(SEED, Policy::Corner, 4, 10);
        for (i, a) in games.iter().enumerate() {
            for b in &games[i + 1..] {
                assert_ne!(a.seed, b.seed);
            }
        }
    }

    #[test]
    fn test_games_run_to_completion() {
        for game in play_games(SEED, Policy::Random, 3, 100_000) {
            assert!(game.status.is_finished());
            assert_eq!(game.max_tile, game.board.max_tile());
        }
    }

    #[test]
    fn test_max_moves_stops_game() {
        for game in play_games(SEED, Policy::Corner, 3, 5) {
            assert_eq!(game.moves, 5);
            assert_eq!(game.status, GameStatus::Playing);
        }
    }

    #[test]
    fn test_corner_policy_order() {
        let mut rng = SEED.rng();
        assert_eq!(
            Policy::Corner.candidates(&mut rng),
            [
                Direction::Down,
                Direction::Left,
                Direction::Right,
                Direction::Up
            ]
        );
    }

    #[test]
    fn test_random_policy_is_permutation() {
        let mut rng = SEED.rng();
        for _ in 0..20 {
            let mut directions = Policy::Random.candidates(&mut rng);
            directions.sort_by_key(|direction| Direction::ALL.iter().position(|d| d == direction));
            assert_eq!(directions, Direction::ALL);
        }
    }

    #[test]
    fn test_summarize() {
        let record = |status, score: u64, tile: u32| GameRecord {
            seed: SEED,
            status,
            score: Score::ZERO.add(score),
            moves: 0,
            max_tile: Tile::new(tile),
            board: Board::EMPTY,
        };
        let games = [
            record(GameStatus::Won, 20_000, 2048),
            record(GameStatus::Lost, 3_000, 256),
            record(GameStatus::Lost, 4_000, 256),
            record(GameStatus::Playing, 1_000, 128),
        ];
        let summary = summarize(&games);
        assert_eq!(summary.games, 4);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 2);
        assert_eq!(summary.unfinished, 1);
        assert!((summary.mean_score - 7_000.0).abs() < f64::EPSILON);
        assert_eq!(summary.max_score.value(), 20_000);
        assert_eq!(
            summary.max_tile_histogram,
            BTreeMap::from([(128, 1), (256, 2), (2048, 1)])
        );
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.games, 0);
        assert!(summary.mean_score.abs() < f64::EPSILON);
        assert_eq!(summary.max_score, Score::ZERO);
        assert!(summary.max_tile_histogram.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let games = play_games(SEED, Policy::Corner, 2, 50);
        let report = SimulationReport {
            generated_at: Utc::now(),
            master_seed: SEED,
            policy: Policy::Corner,
            max_moves: 50,
            summary: summarize(&games),
            games,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["policy"], "corner");
        assert_eq!(value["master_seed"], SEED.to_string());
        assert_eq!(value["summary"]["games"], 2);
        assert!(value["games"][0]["status"].is_string());
        assert_eq!(value["games"][0]["board"].as_array().unwrap().len(), 4);
        assert!(value["generated_at"].is_string());
    }
}
