use serde::{Deserialize, Serialize};

use crate::core::{Board, Tile};

/// Terminal state of a game.
///
/// A game only moves forward from `Playing` to either `Won` or `Lost`; both
/// are final.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    #[display("playing")]
    Playing,
    #[display("won")]
    Won,
    #[display("lost")]
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_finished(self) -> bool {
        !self.is_playing()
    }
}

/// Decides the status of `board`.
///
/// - `Won` if any cell holds [`Tile::WIN`], whatever the rest of the board looks like.
/// - `Lost` if the board is full and no two adjacent cells hold the same tile.
/// - `Playing` otherwise.
///
/// The win check comes first, so a full, locked board that contains 2048 is a win.
#[must_use]
pub fn evaluate(board: &Board) -> GameStatus {
    if board.contains(Tile::WIN) {
        return GameStatus::Won;
    }
    if board.is_full() && !board.has_adjacent_pair() {
        return GameStatus::Lost;
    }
    GameStatus::Playing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playing_with_empty_cells() {
        let board = Board::from_ascii(
            r"
            2 4 2 4
            4 2 4 2
            2 4 . 4
            4 2 4 2
            ",
        );
        assert_eq!(evaluate(&board), GameStatus::Playing);
    }

    #[test]
    fn test_playing_when_full_with_horizontal_pair() {
        let board = Board::from_ascii(
            r"
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 8 8
            ",
        );
        assert_eq!(evaluate(&board), GameStatus::Playing);
    }

    #[test]
    fn test_playing_when_full_with_vertical_pair() {
        let board = Board::from_ascii(
            r"
            2 4 2 4
            4 2 4 2
            2 4 2 8
            4 2 4 8
            ",
        );
        assert_eq!(evaluate(&board), GameStatus::Playing);
    }

    #[test]
    fn test_lost_when_full_without_pairs() {
        let board = Board::from_ascii(
            r"
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 4 2
            ",
        );
        assert_eq!(evaluate(&board), GameStatus::Lost);
    }

    #[test]
    fn test_won_with_win_tile_even_if_moves_remain() {
        let board = Board::from_ascii(
            r"
            2048 . . .
            . 2 2 .
            . . . .
            . . . .
            ",
        );
        assert_eq!(evaluate(&board), GameStatus::Won);
    }

    #[test]
    fn test_won_takes_precedence_over_lost() {
        let board = Board::from_ascii(
            r"
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 4 2048
            ",
        );
        assert_eq!(evaluate(&board), GameStatus::Won);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let board = Board::from_ascii(
            r"
            2 4 8 16
            32 64 128 256
            512 1024 2 4
            8 16 32 64
            ",
        );
        let first = evaluate(&board);
        let second = evaluate(&board);
        assert_eq!(first, second);
        assert!(first.is_lost());
    }

    #[test]
    fn test_lost_when_full_of_max_tiles() {
        let board = Board::from_rows([[Tile::MAX.value(); 4]; 4]).unwrap();
        assert_eq!(evaluate(&board), GameStatus::Lost);
    }

    #[test]
    fn test_status_helpers() {
        assert!(!GameStatus::Playing.is_finished());
        assert!(GameStatus::Won.is_finished());
        assert!(GameStatus::Lost.is_finished());
        assert_eq!(GameStatus::default(), GameStatus::Playing);
        assert_eq!(GameStatus::Won.to_string(), "won");
    }
}
