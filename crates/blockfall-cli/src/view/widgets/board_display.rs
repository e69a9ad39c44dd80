use std::iter;

use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Grid, Piece, Point};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{CellDisplay, CellKind};

type Cells = [[CellKind; BOARD_WIDTH]; BOARD_HEIGHT];

/// The grid with the falling piece and its landing preview on top.
#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    grid: &'a Grid,
    ghost: Option<Piece>,
    falling_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            ghost: None,
            falling_piece: None,
            block: None,
        }
    }

    pub(crate) fn ghost(self, piece: Piece) -> Self {
        Self {
            ghost: Some(piece),
            ..self
        }
    }

    pub(crate) fn falling_piece(self, piece: Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn width(&self) -> u16 {
        BOARD_WIDTH as u16 * CellDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 * CellDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }

    /// Resolves every cell. The falling piece wins over the ghost, the
    /// ghost only shows on empty cells.
    pub(crate) fn cells(&self) -> Cells {
        let rows = *self.grid.rows();
        let mut cells = rows.map(|row| row.map(CellKind::from_fill));

        if let Some(ghost) = self.ghost {
            for point in ghost.shape().iter() {
                if let Some(cell) = cell_mut(&mut cells, point)
                    && *cell == CellKind::Empty
                {
                    *cell = CellKind::Ghost;
                }
            }
        }
        if let Some(piece) = self.falling_piece {
            let kind = CellKind::Filled(piece.fill_value().get());
            for point in piece.shape().iter() {
                if let Some(cell) = cell_mut(&mut cells, point) {
                    *cell = kind;
                }
            }
        }
        cells
    }
}

fn cell_mut(cells: &mut Cells, point: Point) -> Option<&mut CellKind> {
    let x = usize::try_from(point.x).ok()?;
    let y = usize::try_from(point.y).ok()?;
    cells.get_mut(y)?.get_mut(x)
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..BOARD_WIDTH).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints = (0..BOARD_HEIGHT).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let screen_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (screen_row, row) in iter::zip(screen_cells, self.cells()) {
            for (screen_cell, kind) in iter::zip(screen_row, row) {
                CellDisplay::new(kind).render(screen_cell, buf);
            }
        }
    }
}
