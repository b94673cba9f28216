//! Ray type for picking queries.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A ray in 3D space, used to resolve what the user clicked.
///
/// The direction is normalized on construction. Distance queries only
/// consider points in front of the origin: a point whose projection onto
/// the ray is negative is treated as invisible to the ray.
///
/// # Example
///
/// ```
/// use knot_spline::Ray;
/// use nalgebra::{Point3, Vector3};
///
/// let ray = Ray::new(Point3::origin(), Vector3::x());
///
/// // A point one unit above the ray, two units ahead.
/// let d = ray.perpendicular_distance(Point3::new(2.0, 1.0, 0.0));
/// assert_eq!(d, Some(1.0));
///
/// // Behind the origin: not visible.
/// assert_eq!(ray.perpendicular_distance(Point3::new(-1.0, 0.0, 0.0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Origin of the ray.
    pub origin: Point3<f64>,
    /// Unit direction of the ray.
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a new ray. The direction is normalized; a zero direction
    /// falls back to +X.
    #[must_use]
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        let direction = direction
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::x);
        Self { origin, direction }
    }

    /// Perpendicular distance from the ray to `point`.
    ///
    /// Returns `None` when the point projects behind the ray origin.
    #[must_use]
    pub fn perpendicular_distance(&self, point: Point3<f64>) -> Option<f64> {
        let difference = point - self.origin;
        let dot = difference.dot(&self.direction);

        if dot < 0.0 {
            return None;
        }

        Some((difference - self.direction * dot).norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_on_axis() {
        let ray = Ray::new(Point3::origin(), Vector3::x());
        let d = ray.perpendicular_distance(Point3::new(5.0, 0.0, 0.0));
        assert_relative_eq!(d.unwrap_or(f64::NAN), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn distance_off_axis() {
        let ray = Ray::new(Point3::new(1.0, 0.0, 0.0), Vector3::x());
        let d = ray.perpendicular_distance(Point3::new(4.0, 3.0, 4.0));
        assert_relative_eq!(d.unwrap_or(f64::NAN), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn behind_origin_is_none() {
        let ray = Ray::new(Point3::origin(), Vector3::y());
        assert_eq!(ray.perpendicular_distance(Point3::new(0.0, -0.1, 0.0)), None);
    }

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(ray.direction.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_direction_falls_back() {
        let ray = Ray::new(Point3::origin(), Vector3::zeros());
        assert_relative_eq!(ray.direction, Vector3::x(), epsilon = 1e-12);
    }
}
