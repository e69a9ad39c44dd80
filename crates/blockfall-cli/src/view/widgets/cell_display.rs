use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// What a single board cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellKind {
    Empty,
    /// Landing preview of the falling piece.
    Ghost,
    Filled(u8),
}

impl CellKind {
    pub(crate) fn from_fill(value: u8) -> Self {
        if value == 0 {
            Self::Empty
        } else {
            Self::Filled(value)
        }
    }
}

#[derive(Debug)]
pub(crate) struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub(crate) const WIDTH: u16 = 2;
    pub(crate) const HEIGHT: u16 = 1;

    pub(crate) fn new(kind: CellKind) -> Self {
        match kind {
            CellKind::Empty => Self {
                style: style::EMPTY_DOT,
                symbol: ".",
            },
            CellKind::Ghost => Self {
                style: style::GHOST,
                symbol: "[]",
            },
            CellKind::Filled(value) => Self {
                style: style::fill(value),
                symbol: "",
            },
        }
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph paints the whole area, not only the symbol's cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
