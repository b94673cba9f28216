//! Cubic Bezier segments.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ray::Ray;
use crate::DEFAULT_SAMPLE_STEP;

/// A cubic Bezier curve segment defined by 4 control points.
///
/// The curve passes through `p0` and `p3`; `p1` and `p2` shape the interior.
/// Evaluation uses the explicit Bernstein basis:
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
///
/// Parameters are expected in `[0, 1]`; the formula is a plain polynomial
/// and is evaluated as given, without clamping.
///
/// # Example
///
/// ```
/// use knot_spline::CubicBezier;
/// use nalgebra::Point3;
///
/// let segment = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// );
///
/// let start = segment.point_at(0.0);
/// assert!((start.x - 0.0).abs() < 1e-10);
/// let end = segment.point_at(1.0);
/// assert!((end.x - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// First interior control point.
    pub p1: Point3<f64>,
    /// Second interior control point.
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a new cubic Bezier segment.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Create a straight segment between two points.
    ///
    /// The interior control points coincide with the endpoints, so the
    /// segment traces the line `a + t(b - a)` exactly.
    #[must_use]
    pub const fn line(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self::new(a, a, b, b)
    }

    /// Get the control points as an array.
    #[must_use]
    pub fn control_points(&self) -> [Point3<f64>; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    /// Evaluate the curve position at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * t)
                + self.p2.coords * (3.0 * s * t2)
                + self.p3.coords * (t2 * t),
        )
    }

    /// Compute the first derivative at parameter `t`.
    ///
    /// The non-normalized velocity vector. See [`Self::tangent_at`] for the
    /// unit tangent.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let s = 1.0 - t;

        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Compute the unit tangent at parameter `t`.
    ///
    /// When the derivative vanishes (all four control points coincident, or
    /// a doubled endpoint at `t=0`/`t=1`), the chord direction is tried
    /// next; if the segment is degenerate to a single point, the fallback
    /// is the +X axis. The result is never NaN.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vector3<f64> {
        if let Some(tangent) = self.derivative_at(t).try_normalize(1e-10) {
            return tangent;
        }

        // Doubled control points make the derivative vanish at the ends.
        (self.p3 - self.p0)
            .try_normalize(1e-10)
            .unwrap_or_else(Vector3::x)
    }

    /// Arc length approximated by summing chord lengths between samples at
    /// the given parameter `step`.
    ///
    /// A step of [`DEFAULT_SAMPLE_STEP`] (100 samples) matches the
    /// interactive editing tolerance this crate is tuned for.
    #[must_use]
    pub fn chord_length(&self, step: f64) -> f64 {
        let step = step.clamp(1e-6, 1.0);
        let mut length = 0.0;
        let mut previous = self.point_at(0.0);

        let samples = (1.0 / step).round() as usize;
        for i in 1..=samples {
            let t = (i as f64 * step).min(1.0);
            let current = self.point_at(t);
            length += (current - previous).norm();
            previous = current;
        }

        length
    }

    /// Arc length with the default sample step.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.chord_length(DEFAULT_SAMPLE_STEP)
    }

    /// Smallest perpendicular distance from the ray to the segment,
    /// sampled at parameter `step`.
    ///
    /// Only samples in front of the ray origin count; returns `+∞` when no
    /// sample projects forward. This is a fixed-step approximation rather
    /// than a closed-form nearest point, which is adequate at interactive
    /// picking tolerances.
    #[must_use]
    pub fn closest_distance_to_ray(&self, ray: &Ray, step: f64) -> f64 {
        let step = step.clamp(1e-6, 1.0);
        let mut min_distance = f64::INFINITY;

        let samples = (1.0 / step).round() as usize;
        for i in 0..=samples {
            let t = (i as f64 * step).min(1.0);
            if let Some(distance) = ray.perpendicular_distance(self.point_at(t)) {
                if distance < min_distance {
                    min_distance = distance;
                }
            }
        }

        min_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arch() -> CubicBezier {
        CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn endpoints_interpolate() {
        let segment = arch();
        assert_relative_eq!(segment.point_at(0.0).coords, segment.p0.coords, epsilon = 1e-12);
        assert_relative_eq!(segment.point_at(1.0).coords, segment.p3.coords, epsilon = 1e-12);
    }

    #[test]
    fn line_traces_straight() {
        let segment = CubicBezier::line(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let p = segment.point_at(t);
            // K0 + t(K1 - K0) with doubled control points still traces the
            // line, but with cubic (non-uniform) speed; check collinearity.
            assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
            assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
            assert!((0.0..=2.0).contains(&p.x));
        }
        assert_relative_eq!(segment.point_at(0.5).x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tangent_points_toward_first_control() {
        let segment = arch();
        let tangent = segment.tangent_at(0.0);
        let expected = (segment.p1 - segment.p0).normalize();
        assert_relative_eq!(tangent, expected, epsilon = 1e-12);
    }

    #[test]
    fn tangent_of_coincident_points_is_finite() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let segment = CubicBezier::new(p, p, p, p);
        let tangent = segment.tangent_at(0.5);
        assert_relative_eq!(tangent, Vector3::x(), epsilon = 1e-12);
        assert!(tangent.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn doubled_endpoints_fall_back_to_chord() {
        let segment = CubicBezier::line(Point3::origin(), Point3::new(0.0, 5.0, 0.0));
        // Derivative vanishes at t=0 for a doubled start point.
        let tangent = segment.tangent_at(0.0);
        assert_relative_eq!(tangent, Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn straight_length_matches_chord() {
        let segment = CubicBezier::line(Point3::origin(), Point3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(segment.length(), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn curved_length_exceeds_chord() {
        let segment = arch();
        let chord = (segment.p3 - segment.p0).norm();
        assert!(segment.length() > chord);
    }

    #[test]
    fn ray_distance_hits_segment() {
        let segment = CubicBezier::line(Point3::new(0.0, 1.0, 0.0), Point3::new(2.0, 1.0, 0.0));
        let ray = Ray::new(Point3::origin(), Vector3::x());
        let distance = segment.closest_distance_to_ray(&ray, 0.01);
        assert_relative_eq!(distance, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn ray_distance_behind_is_infinite() {
        let segment = CubicBezier::line(Point3::new(-3.0, 0.0, 0.0), Point3::new(-1.0, 0.0, 0.0));
        let ray = Ray::new(Point3::origin(), Vector3::x());
        assert!(segment.closest_distance_to_ray(&ray, 0.01).is_infinite());
    }
}
