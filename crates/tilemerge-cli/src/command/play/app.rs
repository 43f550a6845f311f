use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};
use tilemerge_engine::{Direction, GameSession, GameStatus, MoveSummary};

use crate::{tui::App, ui::widgets::SessionDisplay};

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    last_move: Option<MoveSummary>,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(session: GameSession) -> Self {
        Self {
            session,
            last_move: None,
            is_exiting: false,
        }
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(direction) = direction_for_key(key.code) {
            if !self.session.status().is_playing() {
                return;
            }
            match self.session.try_move(direction) {
                Ok(summary) => self.last_move = Some(summary),
                Err(err) => log::trace!("move {direction} ignored: {err}"),
            }
            return;
        }

        match key.code {
            KeyCode::Char('r') => {
                self.session.restart();
                self.last_move = None;
                log::info!("restarted with seed {}", self.session.seed());
            }
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }
}

/// Maps arrow keys and `h`/`j`/`k`/`l` to slide directions.
pub(crate) fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(key) = event.as_key_event() {
            self.handle_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session).last_move(self.last_move);
        let help_text = match self.session.status() {
            GameStatus::Playing => {
                "Controls: ← → ↑ ↓ or H J K L (Move) | R (Restart) | Q (Quit)"
            }
            GameStatus::Won | GameStatus::Lost => "Controls: R (Restart) | Q (Quit)",
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        let seed_text = Text::from(format!("Seed: {}", self.session.seed()))
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area, seed_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
        frame.render_widget(seed_text, seed_area);
    }
}
