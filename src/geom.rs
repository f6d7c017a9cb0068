//! Generic geometry primitives shared by the netlist, placement and wirelength models.
//!
//! Kept deliberately small: a pair-of-scalars [`Point`], an axis-aligned [`Rect`], and the
//! per-axis flip state used by [`Orientation`]. No inheritance, no trait-object hierarchy.

use std::ops::{Add, Mul, Sub};

/// A 2-D point / vector, generic over its scalar type.
///
/// Used both for integer cell sizes (`Point<i32>`) and floating point positions and pin offsets
/// (`Point<f32>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Add<Output = T>> Add for Point<T> {
    type Output = Point<T>;

    fn add(self, rhs: Point<T>) -> Point<T> {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Point<T> {
    type Output = Point<T>;

    fn sub(self, rhs: Point<T>) -> Point<T> {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for Point<T> {
    type Output = Point<T>;

    /// Scale both components by a scalar.
    fn mul(self, rhs: T) -> Point<T> {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Point<f32> {
    /// Component-wise product, used to fold an [`Orientation`] into a pin offset.
    pub fn mul_components(self, rhs: Point<f32>) -> Point<f32> {
        Point::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Point<i32> {
    pub fn cast_f32(self) -> Point<f32> {
        Point::new(self.x as f32, self.y as f32)
    }
}

/// An axis-aligned box, generic over its scalar type. Used for the placement surface and for
/// fixed/macro cell footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect<T> {
    pub x_min: T,
    pub x_max: T,
    pub y_min: T,
    pub y_max: T,
}

impl<T: Copy> Rect<T> {
    pub fn new(x_min: T, x_max: T, y_min: T, y_max: T) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

impl<T: PartialOrd + Copy> Rect<T> {
    pub fn intersects(&self, other: &Rect<T>) -> bool {
        self.x_min < other.x_max
            && self.y_min < other.y_max
            && other.x_min < self.x_max
            && other.y_min < self.y_max
    }
}

/// Per-axis sign used to flip a cell's pin offsets (`XFlippable`/`YFlippable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Pos => 1.0,
            Sign::Neg => -1.0,
        }
    }
}

/// The orientation of a cell: a sign pair applied component-wise to pin offsets before they're
/// translated by the cell's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub x: Sign,
    pub y: Sign,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            x: Sign::Pos,
            y: Sign::Pos,
        }
    }
}

impl Orientation {
    /// Fold the orientation into a pin offset: component-wise multiplication with the sign pair.
    pub fn apply(&self, offset: Point<f32>) -> Point<f32> {
        Point::new(offset.x * self.x.as_f32(), offset.y * self.y.as_f32())
    }
}
