use std::ops::Add;

use arrayvec::ArrayVec;

/// Maximum number of cells a shape can hold.
pub const MAX_SHAPE_CELLS: usize = 4;

/// Maximum number of distinct rotation states of a piece kind.
pub const MAX_ROTATIONS: usize = 4;

/// Bounding span used by [`square_rotations`].
///
/// With a span of 2, every three-wide piece rotates in place inside its
/// 3×3 bounding box and its coordinates stay non-negative.
pub const ROTATION_SPAN: i32 = 2;

/// Integer grid offset (column `x`, row `y`).
///
/// Rows grow downward: `y = 0` is the top row of the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point with `x` and `y` swapped (reflection about the diagonal).
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
        }
    }

    /// Rotates the point by 90° inside a square of the given span.
    ///
    /// `new_x = span - old_y`, `new_y = old_x`.
    #[must_use]
    pub const fn rotated(self, span: i32) -> Self {
        Self {
            x: span - self.y,
            y: self.x,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Ordered sequence of cells relative to an implicit origin.
///
/// The order of the points does not change occupancy, but it is kept stable
/// by every transform so that shapes can be compared with `==`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    points: ArrayVec<Point, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Builds a shape from `(x, y)` pairs.
    ///
    /// Passing more than [`MAX_SHAPE_CELLS`] pairs fails to compile:
    ///
    /// ```compile_fail
    /// use blockfall_engine::Shape;
    ///
    /// let _ = Shape::from_coords([(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
    /// ```
    #[must_use]
    pub fn from_coords<const N: usize>(coords: [(i32, i32); N]) -> Self {
        const { assert!(N <= MAX_SHAPE_CELLS, "a shape holds at most 4 cells") };
        Self {
            points: coords.into_iter().map(Point::from).collect(),
        }
    }

    /// Builds a shape from a slice of points, or `None` if it holds more
    /// than [`MAX_SHAPE_CELLS`] points.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let points = ArrayVec::try_from(points).ok()?;
        Some(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a copy of the shape with every point shifted by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Point) -> Self {
        self.map_points(|p| p + offset)
    }

    /// Returns a copy of the shape with every point's coordinates swapped.
    #[must_use]
    pub fn transposed(&self) -> Self {
        self.map_points(Point::transposed)
    }

    /// Returns a copy of the shape rotated 90° inside a square of the given span.
    #[must_use]
    pub fn rotated(&self, span: i32) -> Self {
        self.map_points(|p| p.rotated(span))
    }

    fn map_points(&self, f: impl FnMut(Point) -> Point) -> Self {
        Self {
            points: self.iter().map(f).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Ordered rotation states a piece kind cycles through.
pub type Rotations = ArrayVec<Shape, MAX_ROTATIONS>;

/// Rotation states of a piece that looks the same in every orientation.
#[must_use]
pub fn identity_rotations(shape: &Shape) -> Rotations {
    let mut rotations = Rotations::new();
    rotations.push(shape.clone());
    rotations
}

/// Rotation states of a piece with exactly two orientations.
///
/// The second state is the shape reflected about the diagonal.
#[must_use]
pub fn flip_rotations(shape: &Shape) -> Rotations {
    let mut rotations = Rotations::new();
    rotations.push(shape.clone());
    rotations.push(shape.transposed());
    rotations
}

/// Rotation states at 0°, 90°, 180° and 270°, using [`ROTATION_SPAN`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Shape, square_rotations};
///
/// let rotations = square_rotations(&Shape::from_coords([(1, 0)]));
/// assert_eq!(rotations[1], Shape::from_coords([(2, 1)]));
/// assert_eq!(rotations[2], Shape::from_coords([(1, 2)]));
/// assert_eq!(rotations[3], Shape::from_coords([(0, 1)]));
/// ```
#[must_use]
pub fn square_rotations(shape: &Shape) -> Rotations {
    square_rotations_with_span(shape, ROTATION_SPAN)
}

/// Rotation states produced by applying [`Shape::rotated`] three times in a row.
#[must_use]
pub fn square_rotations_with_span(shape: &Shape, span: i32) -> Rotations {
    let mut rotations = Rotations::new();
    rotations.push(shape.clone());
    for i in 1..MAX_ROTATIONS {
        let next = rotations[i - 1].rotated(span);
        rotations.push(next);
    }
    rotations
}
