use ratatui::{
    layout::Constraint,
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};
use tilemerge_engine::Tile;

use crate::ui::widgets::style;

/// One board cell, drawn as a colored box with its value centered.
#[derive(Debug)]
pub struct TileDisplay {
    style: Style,
    label: String,
}

impl TileDisplay {
    pub fn new(style: Style, label: String) -> Self {
        Self { style, label }
    }

    pub fn width() -> u16 {
        8
    }

    pub fn height() -> u16 {
        3
    }

    pub fn from_cell(cell: Option<Tile>) -> Self {
        match cell {
            Some(tile) => Self::new(style::tile(tile), tile.to_string()),
            None => Self::new(style::EMPTY, "·".to_owned()),
        }
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Fill the whole cell, then put the label on the middle row
        buf.set_style(area, self.style);
        Paragraph::new(self.label.as_str())
            .style(self.style)
            .centered()
            .render(area.centered_vertically(Constraint::Length(1)), buf);
    }
}
