use std::{iter, time::Duration};

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::style;

pub(crate) struct StatsDisplay<'a> {
    session: &'a GameSession,
    tick_rate: f64,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub(crate) fn new(session: &'a GameSession, tick_rate: f64) -> Self {
        Self {
            session,
            tick_rate,
            block: None,
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub(crate) fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_vertical_margin(self.block.as_ref())
    }
}

#[derive(Clone, Copy)]
enum Row {
    Empty,
    LabelValue(&'static str, fn(&StatsDisplay<'_>) -> String),
}

const ROWS: &[Row] = &[
    Row::LabelValue("LEVEL:", |stats| stats.session.board().level().to_string()),
    Row::LabelValue("ROWS:", |stats| {
        stats.session.board().cleared_rows().to_string()
    }),
    Row::LabelValue("PIECES:", |stats| {
        stats.session.board().locked_pieces().to_string()
    }),
    Row::Empty,
    Row::LabelValue("TIME:", |stats| {
        format_duration(stats.session.elapsed(stats.tick_rate))
    }),
    Row::LabelValue("GAMES:", |stats| {
        stats.session.finished_games().to_string()
    }),
];

fn format_duration(dur: Duration) -> String {
    format!(
        "{}:{:0>2}.{:0>2}",
        dur.as_secs() / 60,
        dur.as_secs() % 60,
        dur.subsec_millis() / 10
    )
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            let Row::LabelValue(label, value) = row else {
                continue;
            };
            let [label_area, value_area] = area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Fill(1),
            ]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(&self), style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
