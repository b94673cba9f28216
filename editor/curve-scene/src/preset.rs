//! Preset knot layouts for seeding curves.
//!
//! Convenience constructors for common shapes, useful for demos and for
//! exercising the pipeline with non-trivial geometry. Closed shapes
//! repeat the first knot at the end, since the spline interpolates an
//! open knot sequence.

use nalgebra::Point3;

use crate::curve::Curve;

/// A closed circle in the XY plane.
///
/// `knot_count` knots are placed evenly around the circumference, plus a
/// repeated first knot to close the loop.
#[must_use]
pub fn circle(center: Point3<f64>, radius: f64, knot_count: usize) -> Curve {
    let count = knot_count.max(3);
    let mut knots = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let angle = 2.0 * std::f64::consts::PI * (i % count) as f64 / count as f64;
        knots.push(Point3::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
            center.z,
        ));
    }
    Curve::from_knots(knots)
}

/// A helix rising along Y, winding in the XZ plane.
///
/// `pitch` is the height gained per turn; `knots_per_turn` knots are
/// placed on each of `turns` turns, plus the final knot.
#[must_use]
pub fn helix(
    center: Point3<f64>,
    radius: f64,
    pitch: f64,
    turns: usize,
    knots_per_turn: usize,
) -> Curve {
    let per_turn = knots_per_turn.max(3);
    let total = turns.max(1) * per_turn;
    let mut knots = Vec::with_capacity(total + 1);
    for i in 0..=total {
        let t = i as f64 / per_turn as f64;
        let angle = 2.0 * std::f64::consts::PI * t;
        knots.push(Point3::new(
            center.x + radius * angle.cos(),
            center.y + pitch * t,
            center.z + radius * angle.sin(),
        ));
    }
    Curve::from_knots(knots)
}

/// A sine wave along X in the XY plane, starting at `start`.
#[must_use]
pub fn wave(
    start: Point3<f64>,
    amplitude: f64,
    frequency: f64,
    length: f64,
    knot_count: usize,
) -> Curve {
    let count = knot_count.max(2);
    let mut knots = Vec::with_capacity(count + 1);
    for i in 0..=count {
        let t = i as f64 / count as f64;
        knots.push(Point3::new(
            start.x + length * t,
            start.y + amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin(),
            start.z,
        ));
    }
    Curve::from_knots(knots)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circle_is_closed_and_on_radius() {
        let curve = circle(Point3::new(1.0, 2.0, 3.0), 5.0, 12);
        assert_eq!(curve.knot_count(), 13);
        // First and last knots coincide.
        assert_relative_eq!(
            *curve.knot(0).unwrap(),
            *curve.knot(12).unwrap(),
            epsilon = 1e-12
        );
        for knot in curve.knots() {
            let dx = knot.x - 1.0;
            let dy = knot.y - 2.0;
            assert_relative_eq!((dx * dx + dy * dy).sqrt(), 5.0, epsilon = 1e-9);
            assert_relative_eq!(knot.z, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn helix_climbs_by_pitch_per_turn() {
        let curve = helix(Point3::origin(), 3.0, 2.0, 4, 12);
        assert_eq!(curve.knot_count(), 4 * 12 + 1);
        // One full turn later, the knot sits a pitch higher.
        let first = curve.knot(0).unwrap();
        let one_turn = curve.knot(12).unwrap();
        assert_relative_eq!(one_turn.y - first.y, 2.0, epsilon = 1e-9);
        assert_relative_eq!(one_turn.x, first.x, epsilon = 1e-9);
        assert_relative_eq!(one_turn.z, first.z, epsilon = 1e-9);
    }

    #[test]
    fn wave_spans_the_requested_length() {
        let curve = wave(Point3::new(-10.0, 0.0, 0.0), 2.0, 2.0, 20.0, 32);
        let first = curve.knot(0).unwrap();
        let last = curve.knot(curve.knot_count() - 1).unwrap();
        assert_relative_eq!(last.x - first.x, 20.0, epsilon = 1e-9);
        assert!(curve.path().num_segments() > 0);
    }
}
