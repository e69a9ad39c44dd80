pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Returned when a piece would overlap the grid bounds or a filled cell.
///
/// Every rejected move, rotation or spawn reports this error. A rejected
/// move or rotation leaves the board exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding with the grid bounds or a filled cell")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex digits, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0}")]
    InvalidDigit(std::num::ParseIntError),
}

/// Error returned by [`GameSession`] controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ControlError {
    #[display("piece colliding when applying control")]
    PieceCollision(PieceCollisionError),
    #[display("session is not playing")]
    NotPlaying,
}

impl From<PieceCollisionError> for ControlError {
    fn from(err: PieceCollisionError) -> Self {
        ControlError::PieceCollision(err)
    }
}
