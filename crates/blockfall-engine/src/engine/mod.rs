//! Game rules on top of the core data structures.
//!
//! - [`Board`] - grid, active piece and cleared-row counter, with every move,
//!   rotation, drop and row-clear operation
//! - [`PieceGenerator`] / [`PieceSeed`] - seeded uniform piece source
//! - [`DropSchedule`] - gravity interval by level
//! - [`GameSession`] - tick driver that spawns after landing and handles
//!   game over
//!
//! # Game Flow
//!
//! 1. Create a [`Board`] (random or seeded)
//! 2. Move and rotate the active piece; rejected inputs change nothing
//! 3. Drop the piece one row per tick until [`Board::drop_piece`] reports
//!    [`DropOutcome::Landed`]; the piece is baked into the grid and filled
//!    rows are cleared
//! 4. Spawn the next piece; a colliding spawn means game over
//!
//! [`GameSession`] runs steps 3 and 4 for a tick-based front end.

pub use self::{board::*, drop_schedule::*, game_session::*, piece_generator::*};

mod board;
mod drop_schedule;
mod game_session;
mod piece_generator;
