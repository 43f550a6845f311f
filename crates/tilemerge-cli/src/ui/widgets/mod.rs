use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, session_display::*, session_stats_display::*, tile_display::*};

mod board_display;
mod session_display;
mod session_stats_display;
mod tile_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);

    pub const DARK_TEXT: Color = Color::Rgb(119, 110, 101);
    pub const LIGHT_TEXT: Color = Color::Rgb(249, 246, 242);
    pub const EMPTY_CELL: Color = Color::Rgb(60, 58, 50);

    // Background per tile exponent, from 2 (index 1) to 2048 (index 11)
    pub const TILES: [Color; 12] = [
        EMPTY_CELL,
        Color::Rgb(238, 228, 218),
        Color::Rgb(237, 224, 200),
        Color::Rgb(242, 177, 121),
        Color::Rgb(245, 149, 99),
        Color::Rgb(246, 124, 95),
        Color::Rgb(246, 94, 59),
        Color::Rgb(237, 207, 114),
        Color::Rgb(237, 204, 97),
        Color::Rgb(237, 200, 80),
        Color::Rgb(237, 197, 63),
        Color::Rgb(237, 194, 46),
    ];
    pub const SUPER_TILE: Color = Color::Rgb(62, 57, 51);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};
    use tilemerge_engine::Tile;

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = fg_bg(color::GRAY, color::EMPTY_CELL);
    pub const WON: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const LOST: Style = fg_bg(color::WHITE, color::RED);

    /// Returns the style a tile is drawn with.
    ///
    /// Small tiles use dark text on a light background; from 8 upward the
    /// text turns light. Tiles past 2048 share one dark background.
    pub fn tile(tile: Tile) -> Style {
        let exponent = usize::from(tile.exponent());
        let bg = color::TILES
            .get(exponent)
            .copied()
            .unwrap_or(color::SUPER_TILE);
        let fg = if exponent <= 2 {
            color::DARK_TEXT
        } else {
            color::LIGHT_TEXT
        };
        fg_bg(fg, bg).add_modifier(Modifier::BOLD)
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilemerge_engine::Tile;

    #[test]
    fn test_tile_styles_differ_by_value() {
        let two = style::tile(Tile::TWO);
        let four = style::tile(Tile::FOUR);
        let win = style::tile(Tile::WIN);
        assert_ne!(two.bg, four.bg);
        assert_ne!(four.bg, win.bg);
        assert_eq!(win.bg, Some(color::TILES[11]));
    }

    #[test]
    fn test_tiles_past_win_share_style() {
        let big = Tile::WIN.doubled();
        let bigger = big.doubled();
        assert_eq!(style::tile(big), style::tile(bigger));
        assert_eq!(style::tile(big).bg, Some(color::SUPER_TILE));
    }
}
