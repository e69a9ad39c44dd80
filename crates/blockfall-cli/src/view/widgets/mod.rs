use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub(crate) use self::{
    board_display::*, cell_display::*, key_binding_display::*, stats_display::*,
};

mod board_display;
mod cell_display;
mod key_binding_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const TOMATO: Color = Color::Rgb(255, 99, 71);
    pub const SKY_BLUE: Color = Color::Rgb(135, 206, 235);
    pub const VIOLET: Color = Color::Rgb(238, 130, 238);
    pub const LIME: Color = Color::Rgb(0, 255, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
}

pub(crate) mod style {
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::WHITE, color::BLACK);
    pub const PAUSED: Style = fg_bg(color::YELLOW, color::BLACK).add_modifier(Modifier::BOLD);
    pub const GAME_OVER: Style = fg_bg(color::RED, color::BLACK).add_modifier(Modifier::BOLD);

    /// Colors cycled through by fill value.
    const FILL_PALETTE: [Style; 4] = [
        bg_only(color::TOMATO),
        bg_only(color::SKY_BLUE),
        bg_only(color::VIOLET),
        bg_only(color::LIME),
    ];

    /// Style of a settled or falling cell: fill values `1, 2, 3, ...` walk
    /// the palette in order and wrap around.
    pub fn fill(value: u8) -> Style {
        let index = usize::from(value.saturating_sub(1)) % FILL_PALETTE.len();
        FILL_PALETTE[index]
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
