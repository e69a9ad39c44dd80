use tracing::{debug, trace};

use crate::{
    PieceCollisionError,
    core::{
        geometry::Point,
        grid::{BOARD_WIDTH, Grid},
        piece::Piece,
    },
};

use super::piece_generator::{PieceGenerator, PieceSeed};

/// Result of a single gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Falling,
    /// The piece could not move down and was baked into the grid.
    Landed {
        /// Number of rows cleared by this landing.
        cleared_rows: usize,
    },
}

/// Game state: the grid, the active piece and the cleared-row counter.
///
/// Every mutating operation follows the same pattern: change one scalar of
/// the active piece, check [`Grid::overlaps`], and either keep the change or
/// revert it. A rejected operation leaves the board untouched.
///
/// Landing is part of [`Board::drop_piece`]; spawning the next piece is left
/// to the caller (see [`GameSession`](super::GameSession)).
///
/// # Example
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board = Board::new();
/// _ = board.move_piece_left();
/// _ = board.rotate_piece_right();
/// let cleared = board.quick_drop_piece();
/// assert_eq!(cleared, 0);
/// if board.spawn_piece().is_err() {
///     board.reset();
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    piece: Piece,
    cleared_rows: usize,
    locked_pieces: usize,
    generator: PieceGenerator,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Anchor of every newly spawned piece: horizontal middle, top row.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN_POINT: Point = Point::new((BOARD_WIDTH / 2) as i32 - 1, 0);

    /// Rows needed per level.
    pub const ROWS_PER_LEVEL: usize = 10;

    /// Creates a board with a randomly seeded piece generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Creates a board whose piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    fn with_generator(mut generator: PieceGenerator) -> Self {
        let piece = Piece::new(
            generator.next_kind(),
            generator.next_fill_value(),
            Self::SPAWN_POINT,
        );
        Self {
            grid: Grid::EMPTY,
            piece,
            cleared_rows: 0,
            locked_pieces: 0,
            generator,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the grid, for setting up test positions.
    ///
    /// Callers must only write `0` or a fill value into cells.
    #[cfg(any(test, feature = "test-util"))]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    /// Total number of rows cleared since the last reset.
    #[must_use]
    pub fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    /// Number of pieces baked into the grid since the last reset.
    #[must_use]
    pub fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Current level: one level per ten cleared rows.
    #[must_use]
    pub fn level(&self) -> usize {
        self.cleared_rows / Self::ROWS_PER_LEVEL
    }

    /// Empties the grid, zeroes the counters and spawns a new piece.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.cleared_rows = 0;
        self.locked_pieces = 0;
        // The grid is empty, so the spawn cannot collide.
        _ = self.spawn_piece();
    }

    /// Replaces the active piece with a random new one at [`Self::SPAWN_POINT`].
    ///
    /// Returns an error if the new piece overlaps filled cells: the board is
    /// full and the game is over. The new piece is installed either way and
    /// the grid is left untouched.
    pub fn spawn_piece(&mut self) -> Result<(), PieceCollisionError> {
        self.piece = Piece::new(
            self.generator.next_kind(),
            self.generator.next_fill_value(),
            Self::SPAWN_POINT,
        );
        trace!(kind = ?self.piece.kind(), "spawned piece");
        if self.piece_overlaps_grid() {
            debug!(
                cleared_rows = self.cleared_rows,
                locked_pieces = self.locked_pieces,
                "spawned piece overlaps the grid"
            );
            return Err(PieceCollisionError);
        }
        Ok(())
    }

    /// Installs `piece` as the active piece if it fits.
    pub fn set_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.grid.overlaps(&piece.shape()) {
            return Err(PieceCollisionError);
        }
        self.piece = piece;
        Ok(())
    }

    /// Installs `piece` as the active piece without checking for overlap.
    #[cfg(any(test, feature = "test-util"))]
    pub fn set_piece_unchecked(&mut self, piece: Piece) {
        self.piece = piece;
    }

    pub fn move_piece_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_update(|piece| piece.moved(-1, 0))
    }

    pub fn move_piece_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_update(|piece| piece.moved(1, 0))
    }

    /// Rotates the piece one state backwards. There are no wall kicks.
    pub fn rotate_piece_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_update(Piece::rotated_left)
    }

    /// Rotates the piece one state forwards. There are no wall kicks.
    pub fn rotate_piece_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_update(Piece::rotated_right)
    }

    /// Moves the piece down one row, or lands it.
    ///
    /// When the row below is blocked, the piece's cells are written into the
    /// grid and filled rows are cleared. The landed piece stays active until
    /// the caller spawns the next one.
    pub fn drop_piece(&mut self) -> DropOutcome {
        if self.try_update(|piece| piece.moved(0, 1)).is_ok() {
            return DropOutcome::Falling;
        }

        self.grid.fill_piece(&self.piece);
        self.locked_pieces += 1;
        let cleared_rows = self.clear_filled_rows();
        debug!(
            kind = ?self.piece.kind(),
            x = self.piece.anchor().x,
            y = self.piece.anchor().y,
            cleared_rows,
            "piece landed"
        );
        DropOutcome::Landed { cleared_rows }
    }

    /// Drops the piece until it lands and returns the number of cleared rows.
    ///
    /// Does not spawn the next piece.
    pub fn quick_drop_piece(&mut self) -> usize {
        loop {
            if let DropOutcome::Landed { cleared_rows } = self.drop_piece() {
                return cleared_rows;
            }
        }
    }

    /// Returns where the active piece would land, without changing the board.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.piece;
        loop {
            let next = ghost.moved(0, 1);
            if self.grid.overlaps(&next.shape()) {
                return ghost;
            }
            ghost = next;
        }
    }

    /// Returns the indices of every filled row, in ascending order.
    #[must_use]
    pub fn filled_row_indices(&self) -> Vec<usize> {
        self.grid.filled_row_indices().to_vec()
    }

    /// Clears every filled row and returns how many were cleared.
    ///
    /// All indices are collected first and then cleared top-down. Clearing a
    /// row only shifts the rows above it, so the indices still to be cleared
    /// stay valid.
    pub fn clear_filled_rows(&mut self) -> usize {
        let rows = self.grid.filled_row_indices();
        for &y in &rows {
            self.grid.clear_row(y);
            self.cleared_rows += 1;
        }
        if !rows.is_empty() {
            debug!(?rows, total = self.cleared_rows, "cleared rows");
        }
        rows.len()
    }

    fn piece_overlaps_grid(&self) -> bool {
        self.grid.overlaps(&self.piece.shape())
    }

    fn try_update<F>(&mut self, f: F) -> Result<(), PieceCollisionError>
    where
        F: FnOnce(&Piece) -> Piece,
    {
        let prev = self.piece;
        self.piece = f(&prev);
        if self.piece_overlaps_grid() {
            self.piece = prev;
            return Err(PieceCollisionError);
        }
        Ok(())
    }
}
