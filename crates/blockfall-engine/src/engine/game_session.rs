use std::time::Duration;

use tracing::{debug, info};

use crate::{ControlError, PieceCollisionError};

use super::{
    board::{Board, DropOutcome},
    drop_schedule::DropSchedule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Outcome of a gravity step, including the spawn of the next piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Falling,
    /// The piece landed and the next piece spawned.
    Landed { cleared_rows: usize },
    /// The piece landed and the next piece overlapped the grid.
    GameOver,
}

/// Drives a [`Board`] one logical tick at a time.
///
/// The session owns the land → spawn → game-over contract: a landing reported
/// by [`Board::drop_piece`] is always followed by a spawn, and a spawn that
/// collides ends the game. With `auto_restart` the board is reset at once
/// and play continues; otherwise the session stays in
/// [`SessionState::GameOver`] until [`GameSession::restart`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, DropSchedule, GameSession, TickOutcome};
///
/// let mut session = GameSession::new(Board::new(), DropSchedule::default(), true);
/// let mut outcomes = Vec::new();
/// for _ in 0..24 {
///     outcomes.extend(session.tick());
/// }
/// assert_eq!(outcomes, [TickOutcome::Falling, TickOutcome::Falling]);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    schedule: DropSchedule,
    state: SessionState,
    auto_restart: bool,
    total_ticks: u64,
    drop_countdown: u64,
    finished_games: usize,
}

impl GameSession {
    #[must_use]
    pub fn new(board: Board, schedule: DropSchedule, auto_restart: bool) -> Self {
        let drop_countdown = schedule.ticks_per_drop(board.level());
        Self {
            board,
            schedule,
            state: SessionState::Playing,
            auto_restart,
            total_ticks: 0,
            drop_countdown,
            finished_games: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn schedule(&self) -> &DropSchedule {
        &self.schedule
    }

    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Number of games that ended with a colliding spawn.
    #[must_use]
    pub fn finished_games(&self) -> usize {
        self.finished_games
    }

    /// Play time at the given logical tick rate (ticks per second).
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn elapsed(&self, tick_rate: f64) -> Duration {
        Duration::try_from_secs_f64(self.total_ticks as f64 / tick_rate).unwrap_or_default()
    }

    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Resets the board and resumes play.
    pub fn restart(&mut self) {
        self.board.reset();
        self.state = SessionState::Playing;
        self.reload_countdown();
    }

    /// Advances one logical tick.
    ///
    /// Returns the outcome of the gravity step when one is due, `None` on
    /// other ticks and while the session is not playing.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.state.is_playing() {
            return None;
        }
        self.total_ticks += 1;
        self.drop_countdown = self.drop_countdown.saturating_sub(1);
        if self.drop_countdown > 0 {
            return None;
        }
        let drop = self.board.drop_piece();
        let outcome = self.settle(drop);
        self.reload_countdown();
        Some(outcome)
    }

    pub fn try_move_left(&mut self) -> Result<(), ControlError> {
        self.ensure_playing()?;
        Ok(self.board.move_piece_left()?)
    }

    pub fn try_move_right(&mut self) -> Result<(), ControlError> {
        self.ensure_playing()?;
        Ok(self.board.move_piece_right()?)
    }

    pub fn try_rotate_left(&mut self) -> Result<(), ControlError> {
        self.ensure_playing()?;
        Ok(self.board.rotate_piece_left()?)
    }

    pub fn try_rotate_right(&mut self) -> Result<(), ControlError> {
        self.ensure_playing()?;
        Ok(self.board.rotate_piece_right()?)
    }

    /// Applies one gravity step immediately.
    pub fn soft_drop(&mut self) -> Result<TickOutcome, ControlError> {
        self.ensure_playing()?;
        let drop = self.board.drop_piece();
        Ok(self.settle(drop))
    }

    /// Drops the piece until it lands, then spawns the next one.
    pub fn hard_drop(&mut self) -> Result<TickOutcome, ControlError> {
        self.ensure_playing()?;
        let cleared_rows = self.board.quick_drop_piece();
        Ok(self.settle(DropOutcome::Landed { cleared_rows }))
    }

    fn ensure_playing(&self) -> Result<(), ControlError> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(ControlError::NotPlaying)
        }
    }

    fn reload_countdown(&mut self) {
        self.drop_countdown = self.schedule.ticks_per_drop(self.board.level());
    }

    /// Spawns the next piece after a landing. The new piece gets a full
    /// gravity interval at the level reached by the landing.
    fn settle(&mut self, drop: DropOutcome) -> TickOutcome {
        let DropOutcome::Landed { cleared_rows } = drop else {
            return TickOutcome::Falling;
        };
        self.reload_countdown();
        match self.board.spawn_piece() {
            Ok(()) => TickOutcome::Landed { cleared_rows },
            Err(PieceCollisionError) => {
                self.finished_games += 1;
                info!(
                    cleared_rows = self.board.cleared_rows(),
                    level = self.board.level(),
                    locked_pieces = self.board.locked_pieces(),
                    "game over"
                );
                if self.auto_restart {
                    debug!("restarting after game over");
                    self.restart();
                } else {
                    self.state = SessionState::GameOver;
                }
                TickOutcome::GameOver
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BOARD_HEIGHT, BOARD_WIDTH, FillValue, Piece, PieceKind, PieceSeed};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([42; 16]);

    fn session(auto_restart: bool) -> GameSession {
        GameSession::new(Board::with_seed(SEED), DropSchedule::default(), auto_restart)
    }

    /// Fills the top rows so that the next spawn collides.
    fn clog_spawn_area(session: &mut GameSession) {
        let grid = session.board.grid_mut();
        for y in 4..8 {
            for x in 0..BOARD_WIDTH - 1 {
                grid.set_cell(x, y, 1);
            }
        }
        // every piece kind has a cell in row 1 at spawn
        for x in 0..BOARD_WIDTH - 1 {
            grid.set_cell(x, 1, 1);
        }
        let piece = Piece::new(
            PieceKind::Square,
            FillValue::new(2).unwrap(),
            crate::Point::new(0, 2),
        );
        session.board.set_piece_unchecked(piece);
    }

    #[test]
    fn test_tick_drops_on_schedule() {
        let mut session = session(true);
        for _ in 0..11 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.tick(), Some(TickOutcome::Falling));
        assert_eq!(session.board().piece().anchor().y, 1);
        assert_eq!(session.total_ticks(), 12);
    }

    #[test]
    fn test_paused_session_does_not_tick() {
        let mut session = session(true);
        session.toggle_pause();
        assert!(session.state().is_paused());
        for _ in 0..100 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.total_ticks(), 0);
        assert_eq!(session.try_move_left(), Err(ControlError::NotPlaying));
        session.toggle_pause();
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_hard_drop_spawns_next_piece() {
        let mut session = session(true);
        let outcome = session.hard_drop().unwrap();
        assert_eq!(outcome, TickOutcome::Landed { cleared_rows: 0 });
        assert_eq!(session.board().piece().anchor(), Board::SPAWN_POINT);
        assert_eq!(session.board().grid().occupied_cells(), 4);
    }

    #[test]
    fn test_soft_drop_moves_piece() {
        let mut session = session(true);
        assert_eq!(session.soft_drop(), Ok(TickOutcome::Falling));
        assert_eq!(session.board().piece().anchor().y, 1);
    }

    #[test]
    fn test_game_over_without_auto_restart() {
        let mut session = session(false);
        clog_spawn_area(&mut session);

        assert_eq!(session.hard_drop(), Ok(TickOutcome::GameOver));
        assert!(session.state().is_game_over());
        assert_eq!(session.finished_games(), 1);
        assert_eq!(session.tick(), None);
        assert_eq!(session.hard_drop(), Err(ControlError::NotPlaying));

        session.restart();
        assert!(session.state().is_playing());
        assert_eq!(session.board().grid().occupied_cells(), 0);
    }

    #[test]
    fn test_game_over_with_auto_restart() {
        let mut session = session(true);
        clog_spawn_area(&mut session);

        assert_eq!(session.hard_drop(), Ok(TickOutcome::GameOver));
        assert!(session.state().is_playing());
        assert_eq!(session.finished_games(), 1);
        assert_eq!(session.board().grid().occupied_cells(), 0);
        assert_eq!(session.board().cleared_rows(), 0);
    }

    #[test]
    fn test_toggle_pause_ignored_after_game_over() {
        let mut session = session(false);
        clog_spawn_area(&mut session);
        session.hard_drop().unwrap();
        session.toggle_pause();
        assert!(session.state().is_game_over());
    }

    #[test]
    fn test_hard_drop_gives_new_piece_a_full_interval() {
        let mut session = session(true);
        for _ in 0..11 {
            session.tick();
        }
        session.hard_drop().unwrap();
        for _ in 0..11 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.tick(), Some(TickOutcome::Falling));
    }

    #[test]
    fn test_level_up_applies_to_next_piece() {
        let mut session = session(true);
        for _ in 0..9 {
            for x in 0..BOARD_WIDTH {
                session.board.grid_mut().set_cell(x, BOARD_HEIGHT - 1, 1);
            }
            session.board.clear_filled_rows();
        }
        assert_eq!(session.board().level(), 0);

        // a vertical line in column 5 completes the bottom row
        let grid = session.board.grid_mut();
        for x in 0..BOARD_WIDTH {
            if x != 5 {
                grid.set_cell(x, BOARD_HEIGHT - 1, 1);
            }
        }
        let line = Piece::new(
            PieceKind::Line,
            FillValue::new(2).unwrap(),
            crate::Point::new(4, 0),
        );
        session.board.set_piece_unchecked(line);
        assert_eq!(session.hard_drop(), Ok(TickOutcome::Landed { cleared_rows: 1 }));
        assert_eq!(session.board().level(), 1);

        for _ in 0..10 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.tick(), Some(TickOutcome::Falling));
    }

    #[test]
    fn test_elapsed() {
        let mut session = session(true);
        for _ in 0..50 {
            session.tick();
        }
        assert_eq!(session.elapsed(25.0), Duration::from_secs(2));
    }
}
