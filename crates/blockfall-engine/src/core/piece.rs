use std::{num::NonZeroU8, sync::LazyLock};

use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::geometry::{
    Point, Rotations, Shape, flip_rotations, identity_rotations, square_rotations,
};

/// Kind of a falling piece.
///
/// The discriminant is the index of the kind's rotation set in the shared
/// rotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// 2×2 square, one orientation.
    Square = 0,
    /// Four in a row, two orientations.
    Line = 1,
    /// T-piece.
    T = 2,
    /// L-piece.
    L = 3,
    /// Mirrored L-piece.
    MirroredL = 4,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (5).
    pub const LEN: usize = 5;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::Square,
        PieceKind::Line,
        PieceKind::T,
        PieceKind::L,
        PieceKind::MirroredL,
    ];

    /// Returns the precomputed rotation states of this kind.
    ///
    /// The table is built on first use and shared by every piece afterwards.
    #[must_use]
    pub fn rotations(self) -> &'static [Shape] {
        &ROTATION_TABLE[self as usize]
    }

    /// Returns the number of distinct orientations of this kind.
    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.rotations().len()
    }
}

static ROTATION_TABLE: LazyLock<[Rotations; PieceKind::LEN]> = LazyLock::new(|| {
    [
        // Square
        identity_rotations(&Shape::from_coords([(0, 0), (0, 1), (1, 0), (1, 1)])),
        // Line
        flip_rotations(&Shape::from_coords([(1, 0), (1, 1), (1, 2), (1, 3)])),
        // T
        square_rotations(&Shape::from_coords([(0, 1), (1, 1), (2, 1), (1, 2)])),
        // L
        square_rotations(&Shape::from_coords([(1, 0), (1, 1), (1, 2), (2, 2)])),
        // Mirrored L
        square_rotations(&Shape::from_coords([(1, 0), (1, 1), (1, 2), (0, 2)])),
    ]
});

/// Non-zero value written into the grid cells a piece occupies.
///
/// Zero marks an empty cell, so it is not a valid fill value. The renderer
/// maps the value to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FillValue(NonZeroU8);

impl FillValue {
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match NonZeroU8::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Distribution<FillValue> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FillValue {
        FillValue(rng.random())
    }
}

impl From<FillValue> for u8 {
    fn from(value: FillValue) -> Self {
        value.get()
    }
}

/// The active piece: a kind, a rotation index, an anchor and a fill value.
///
/// `Piece` knows nothing about the grid. Its helpers return moved or rotated
/// copies; whether the result is legal is decided by the board.
///
/// # Example
///
/// ```
/// use blockfall_engine::{FillValue, Piece, PieceKind, Point};
///
/// let fill = FillValue::new(7).unwrap();
/// let piece = Piece::new(PieceKind::Line, fill, Point::new(4, 0));
/// let cells: Vec<_> = piece.shape().iter().collect();
/// assert_eq!(cells, [Point::new(5, 0), Point::new(5, 1), Point::new(5, 2), Point::new(5, 3)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    fill_value: FillValue,
    anchor: Point,
    rotation_index: usize,
}

impl Piece {
    /// Creates a piece in its first rotation state.
    #[must_use]
    pub fn new(kind: PieceKind, fill_value: FillValue, anchor: Point) -> Self {
        Self {
            kind,
            fill_value,
            anchor,
            rotation_index: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn fill_value(&self) -> FillValue {
        self.fill_value
    }

    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    #[must_use]
    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    /// Returns the cells occupied by the piece in absolute grid coordinates.
    ///
    /// The result is a fresh shape; the shared rotation table is never touched.
    #[must_use]
    pub fn shape(&self) -> Shape {
        let rotations = self.kind.rotations();
        rotations[self.rotation_index % rotations.len()].translated(self.anchor)
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            anchor: self.anchor + Point::new(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            rotation_index: (self.rotation_index + 1) % self.kind.rotation_count(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_left(&self) -> Self {
        let count = self.kind.rotation_count();
        Self {
            rotation_index: (self.rotation_index + count - 1) % count,
            ..*self
        }
    }
}
