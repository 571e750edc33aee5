//! 3-D Points

use super::Vector3f;
use crate::base::Float;
use std::ops::{Add, AddAssign, Index, Sub};

/// A 3-D point containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Point3f {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Creates the origin.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Returns true if any coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> Float {
        (*self - *other).length()
    }
}

impl Add<Vector3f> for Point3f {
    type Output = Self;

    /// Offsets the point by a vector.
    fn add(self, v: Vector3f) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl AddAssign<Vector3f> for Point3f {
    fn add_assign(&mut self, v: Vector3f) {
        *self = *self + v;
    }
}

impl Sub for Point3f {
    type Output = Vector3f;

    /// Returns the vector from `other` to `self`.
    fn sub(self, other: Self) -> Vector3f {
        Vector3f::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Sub<Vector3f> for Point3f {
    type Output = Self;

    fn sub(self, v: Vector3f) -> Self {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Index<usize> for Point3f {
    type Output = Float;

    /// Returns the coordinate for the given axis (0 = x, 1 = y, 2 = z).
    fn index(&self, axis: usize) -> &Float {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_vector_arithmetic() {
        let p = Point3f::new(1.0, 2.0, 3.0);
        let v = Vector3f::new(1.0, 1.0, 1.0);
        assert_eq!(p + v, Point3f::new(2.0, 3.0, 4.0));
        assert_eq!(p - Point3f::zero(), Vector3f::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn distance() {
        let p = Point3f::new(0.0, 3.0, 4.0);
        assert_eq!(p.distance(&Point3f::zero()), 5.0);
    }
}
