use arrayvec::ArrayVec;

use super::{geometry::Shape, piece::Piece};

/// Number of columns of the grid.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows of the grid.
pub const BOARD_HEIGHT: usize = 20;

/// One row of fill values; `0` is an empty cell.
pub type GridRow = [u8; BOARD_WIDTH];

const EMPTY_ROW: GridRow = [0; BOARD_WIDTH];

/// Fixed-size matrix of fill values.
///
/// Row `0` is the top of the grid. Every cell is either `0` (empty) or the
/// fill value of the piece that settled there. The dimensions never change.
///
/// `Grid` is also the single authority on piece legality: see
/// [`Grid::overlaps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    #[must_use]
    pub fn rows(&self) -> &[GridRow; BOARD_HEIGHT] {
        &self.rows
    }

    /// Returns the value at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<u8> {
        let (x, y) = Self::index(x, y)?;
        Some(self.rows[y][x])
    }

    /// Writes a raw value into a cell.
    ///
    /// Out-of-range coordinates are ignored.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = value;
        }
    }

    fn index(x: i32, y: i32) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)?;
        let y = usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)?;
        Some((x, y))
    }

    /// Returns `true` if any cell of `shape` lies outside the grid or on a
    /// filled cell.
    #[must_use]
    pub fn overlaps(&self, shape: &Shape) -> bool {
        shape
            .iter()
            .any(|p| self.cell(p.x, p.y).is_none_or(|value| value != 0))
    }

    /// Writes the piece's fill value into every cell it occupies.
    ///
    /// Cells outside the grid are skipped; callers only bake pieces that
    /// passed [`Grid::overlaps`].
    pub fn fill_piece(&mut self, piece: &Piece) {
        let value = piece.fill_value().get();
        for p in &piece.shape() {
            if let Some((x, y)) = Self::index(p.x, p.y) {
                self.rows[y][x] = value;
            }
        }
    }

    #[must_use]
    pub fn is_row_filled(&self, y: usize) -> bool {
        self.rows[y].iter().all(|&value| value != 0)
    }

    /// Returns the indices of every filled row, in ascending order.
    #[must_use]
    pub fn filled_row_indices(&self) -> ArrayVec<usize, BOARD_HEIGHT> {
        (0..BOARD_HEIGHT).filter(|&y| self.is_row_filled(y)).collect()
    }

    /// Removes row `y`, shifts every row above it down by one and empties row 0.
    pub fn clear_row(&mut self, y: usize) {
        self.rows.copy_within(0..y, 1);
        self.rows[0] = EMPTY_ROW;
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.rows.iter().flatten().filter(|&&value| value != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use crate::{FillValue, PieceKind, Point};

    use super::*;

    fn fill_row(grid: &mut Grid, y: usize, value: u8) {
        for x in 0..BOARD_WIDTH {
            grid.set_cell(x, y, value);
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::EMPTY;
        assert_eq!(grid.occupied_cells(), 0);
        assert!(grid.filled_row_indices().is_empty());
    }

    #[test]
    fn test_cell_out_of_range() {
        let grid = Grid::EMPTY;
        assert_eq!(grid.cell(-1, 0), None);
        assert_eq!(grid.cell(0, -1), None);
        assert_eq!(grid.cell(10, 0), None);
        assert_eq!(grid.cell(0, 20), None);
        assert_eq!(grid.cell(9, 19), Some(0));
    }

    #[test]
    fn test_overlaps_bounds() {
        let grid = Grid::EMPTY;
        assert!(!grid.overlaps(&Shape::from_coords([(0, 0), (9, 19)])));
        assert!(grid.overlaps(&Shape::from_coords([(-1, 0)])));
        assert!(grid.overlaps(&Shape::from_coords([(10, 0)])));
        assert!(grid.overlaps(&Shape::from_coords([(0, 20)])));
        assert!(grid.overlaps(&Shape::from_coords([(0, -1)])));
    }

    #[test]
    fn test_overlaps_filled_cell() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(3, 7, 5);
        assert!(grid.overlaps(&Shape::from_coords([(0, 0), (3, 7)])));
        assert!(!grid.overlaps(&Shape::from_coords([(3, 6), (4, 7)])));
    }

    #[test]
    fn test_fill_piece() {
        let mut grid = Grid::EMPTY;
        let piece = Piece::new(
            PieceKind::Square,
            FillValue::new(42).unwrap(),
            Point::new(0, 18),
        );
        grid.fill_piece(&piece);
        assert_eq!(grid.occupied_cells(), 4);
        assert_eq!(grid.cell(0, 18), Some(42));
        assert_eq!(grid.cell(1, 19), Some(42));
    }

    #[test]
    fn test_filled_row_indices() {
        let mut grid = Grid::EMPTY;
        for y in [0, 2, 4] {
            fill_row(&mut grid, y, 1);
        }
        // almost full
        for x in 1..BOARD_WIDTH {
            grid.set_cell(x, 6, 1);
        }
        assert_eq!(grid.filled_row_indices().as_slice(), &[0, 2, 4]);
    }

    #[test]
    fn test_clear_row_shifts_rows_above() {
        let mut grid = Grid::EMPTY;
        grid.set_cell(0, 0, 1);
        grid.set_cell(1, 1, 2);
        fill_row(&mut grid, 2, 3);
        grid.set_cell(2, 3, 4);

        grid.clear_row(2);

        assert_eq!(grid.rows()[0], EMPTY_ROW);
        assert_eq!(grid.cell(0, 1), Some(1));
        assert_eq!(grid.cell(1, 2), Some(2));
        assert_eq!(grid.cell(2, 3), Some(4));
        assert_eq!(grid.occupied_cells(), 3);
    }

    #[test]
    fn test_clear_top_row() {
        let mut grid = Grid::EMPTY;
        fill_row(&mut grid, 0, 1);
        grid.clear_row(0);
        assert_eq!(grid, Grid::EMPTY);
    }
}
