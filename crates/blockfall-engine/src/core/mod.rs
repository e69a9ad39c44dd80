pub use self::{geometry::*, grid::*, piece::*};

pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod piece;
