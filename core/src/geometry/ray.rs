//! Rays

use super::{Point3f, Vector3f};
use crate::base::Float;

/// A ray with an origin and a direction.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,
}

impl Ray {
    /// Creates a new ray.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: Point3f, d: Vector3f) -> Self {
        Self { o, d }
    }

    /// Returns the point at parameter `t` along the ray.
    ///
    /// * `t` - Parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_along_ray() {
        let r = Ray::new(Point3f::new(1.0, 0.0, 0.0), Vector3f::new(0.0, 2.0, 0.0));
        assert_eq!(r.at(0.0), r.o);
        assert_eq!(r.at(1.5), Point3f::new(1.0, 3.0, 0.0));
    }
}
