use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tilemerge_engine::{GameSession, GameStatus, MoveSummary};

use crate::ui::widgets::{BoardDisplay, SessionStatsDisplay, color, style};

/// Board, statistics and end-of-game overlay for one session.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    last_move: Option<MoveSummary>,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            last_move: None,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    pub fn last_move(self, last_move: Option<MoveSummary>) -> Self {
        Self { last_move, ..self }
    }

    pub fn height(&self) -> u16 {
        self.board().height() + 1
    }

    fn padding(&self) -> Padding {
        Padding::symmetric(self.horizontal_padding, self.vertical_padding)
    }

    fn border_style(&self) -> Style {
        let border = match self.session.status() {
            GameStatus::Playing => color::WHITE,
            GameStatus::Won => color::YELLOW,
            GameStatus::Lost => color::RED,
        };
        Style::new().fg(border)
    }

    fn board(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(self.session.board()).block(
            Block::bordered()
                .title(Line::from("TILEMERGE").centered())
                .border_style(self.border_style())
                .style(style::DEFAULT),
        )
    }

    fn last_move_text(&self) -> String {
        match self.last_move {
            Some(summary) if summary.score_gained > 0 => {
                format!("{}: +{}", summary.direction, summary.score_gained)
            }
            Some(summary) => summary.direction.to_string(),
            None => String::new(),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game_board = self.board();
        let session_stats = SessionStatsDisplay::new(self.session).block(
            Block::bordered()
                .title(Line::from("STATS").centered())
                .padding(self.padding())
                .border_style(self.border_style())
                .style(style::DEFAULT),
        );

        let [left_column, center_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area, last_move_area] = Layout::vertical([
            Constraint::Length(session_stats.height()),
            Constraint::Length(1),
        ])
        .areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        Line::styled(self.last_move_text(), style::DEFAULT)
            .centered()
            .render(last_move_area, buf);
        game_board.render(board_area, buf);

        let popup = match self.session.status() {
            GameStatus::Playing => None,
            GameStatus::Won => Some(("YOU WIN!", style::WON)),
            GameStatus::Lost => Some(("GAME OVER!!", style::LOST)),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tilemerge_engine::{Board, GameState, Score, SpawnSeed};

    use super::*;

    fn render(session: &GameSession) -> String {
        let display = SessionDisplay::new(session);
        let area = Rect::new(0, 0, 60, display.height());
        let mut buf = Buffer::empty(area);
        display.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn session_with_board(board: Board) -> GameSession {
        GameSession::from_state(
            SpawnSeed::from_bytes([5; 16]),
            GameState::from_parts(board, Score::ZERO.add(1234)),
        )
    }

    #[test]
    fn test_render_playing_board() {
        let session = session_with_board(Board::from_ascii(
            r"
            2 . . .
            . 128 . .
            . . . .
            . . . 16
            ",
        ));
        let screen = render(&session);
        assert!(screen.contains("SCORE:"));
        assert!(screen.contains("1234"));
        assert!(screen.contains("128"));
        assert!(!screen.contains("YOU WIN!"));
        assert!(!screen.contains("GAME OVER!!"));
    }

    #[test]
    fn test_render_win_overlay() {
        let session = session_with_board(Board::from_ascii(
            r"
            2048 . . .
            . . . .
            . . . .
            . . . .
            ",
        ));
        assert!(render(&session).contains("YOU WIN!"));
    }

    #[test]
    fn test_render_game_over_overlay() {
        let session = session_with_board(Board::from_ascii(
            r"
            2 4 2 4
            4 2 4 2
            2 4 2 4
            4 2 4 2
            ",
        ));
        assert!(render(&session).contains("GAME OVER!!"));
    }
}
