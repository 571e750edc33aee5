//! Cameras

use crate::base::Float;
use crate::geometry::{Point3f, Ray, Vector3f};
use std::sync::Arc;

/// Atomic reference counted `Camera`.
pub type ArcCamera = Arc<dyn Camera + Send + Sync>;

/// Interface for cameras that map normalized image coordinates to primary
/// rays.
pub trait Camera {
    /// Generates the ray through normalized image coordinates `(x, y)` in
    /// `[0, 1]²`, where `(0, 0)` is the bottom-left corner.
    ///
    /// * `x`      - Horizontal coordinate.
    /// * `y`      - Vertical coordinate.
    /// * `aspect` - Image width over height.
    fn generate_ray(&self, x: Float, y: Float, aspect: Float) -> Ray;
}

/// A pinhole camera described by an eye point, a look-at point, an up
/// vector and a vertical field of view.
pub struct PinholeCamera {
    /// Eye position.
    eye: Point3f,

    /// Unit viewing direction.
    look: Vector3f,

    /// Unit vector pointing right in the image plane.
    right: Vector3f,

    /// Unit vector pointing up in the image plane.
    up: Vector3f,

    /// Full height of the image plane at unit distance.
    plane_height: Float,
}

impl PinholeCamera {
    /// Creates a new pinhole camera.
    ///
    /// * `eye`     - Eye position.
    /// * `look_at` - Point the camera looks at.
    /// * `up`      - Approximate up direction.
    /// * `fov`     - Vertical field of view in degrees.
    pub fn new(eye: Point3f, look_at: Point3f, up: Vector3f, fov: Float) -> Self {
        let look = (look_at - eye).normalize();
        let mut right = look.cross(&up);
        if right.is_zero() {
            // Up is parallel to the viewing direction; pick another axis.
            right = look.cross(&Vector3f::new(1.0, 0.0, 0.0));
            if right.is_zero() {
                right = look.cross(&Vector3f::new(0.0, 0.0, 1.0));
            }
        }
        let right = right.normalize();
        let up = right.cross(&look);
        let plane_height = 2.0 * (fov.to_radians() * 0.5).tan();
        Self {
            eye,
            look,
            right,
            up,
            plane_height,
        }
    }
}

impl Camera for PinholeCamera {
    fn generate_ray(&self, x: Float, y: Float, aspect: Float) -> Ray {
        let dx = (x - 0.5) * self.plane_height * aspect;
        let dy = (y - 0.5) * self.plane_height;
        let d = (self.look + self.right * dx + self.up * dy).normalize();
        Ray::new(self.eye, d)
    }
}
