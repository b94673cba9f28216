//! Piecewise curve assembled from Bezier segments.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bezier::CubicBezier;
use crate::ray::Ray;
use crate::solve::segments_through_knots;
use crate::{Result, DEFAULT_SAMPLE_STEP};

/// A piecewise cubic curve built from an ordered list of Bezier segments.
///
/// The path parameter runs over `[0, num_segments]`: the integer part picks
/// the segment and the fraction is the segment-local parameter, matching
/// how an editor walks the curve segment by segment. Per-segment and total
/// chord lengths are computed once at construction; the path itself is
/// immutable, so the cache can never go stale. Rebuild the path when the
/// knots change.
///
/// # Example
///
/// ```
/// use knot_spline::SplinePath;
/// use nalgebra::Point3;
///
/// let knots = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// ];
/// let path = SplinePath::through_knots(&knots).unwrap();
///
/// assert_eq!(path.num_segments(), 3);
/// assert!((path.total_length() - 3.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplinePath {
    segments: Vec<CubicBezier>,
    segment_lengths: Vec<f64>,
    total_length: f64,
}

impl SplinePath {
    /// Assemble a path from pre-built segments.
    #[must_use]
    pub fn from_segments(segments: Vec<CubicBezier>) -> Self {
        let segment_lengths: Vec<f64> = segments.iter().map(CubicBezier::length).collect();
        let total_length = segment_lengths.iter().sum();
        Self {
            segments,
            segment_lengths,
            total_length,
        }
    }

    /// Interpolate a path through the given knots.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::InsufficientKnots`](crate::SplineError) for
    /// fewer than 2 knots.
    pub fn through_knots(knots: &[Point3<f64>]) -> Result<Self> {
        Ok(Self::from_segments(segments_through_knots(knots)?))
    }

    /// Number of segments in the path.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of the path, in order.
    #[must_use]
    pub fn segments(&self) -> &[CubicBezier] {
        &self.segments
    }

    /// A single segment by index.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&CubicBezier> {
        self.segments.get(index)
    }

    /// Split the piecewise parameter into a segment index and local `t`.
    ///
    /// Parameters at or beyond the last segment boundary clamp into the
    /// final segment so `point_at(num_segments as f64)` lands on the end
    /// knot.
    fn locate(&self, t: f64) -> (usize, f64) {
        debug_assert!(!self.segments.is_empty(), "locate on an empty path");
        let last = self.segments.len() - 1;
        let index = (t.floor().max(0.0) as usize).min(last);
        (index, t - index as f64)
    }

    /// Evaluate the path position at piecewise parameter `t`.
    ///
    /// `t` runs over `[0, num_segments]`. On an empty path, returns the
    /// origin (a curve with fewer than 2 knots has nothing to evaluate —
    /// callers gate on [`Self::is_empty`]).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        if self.segments.is_empty() {
            return Point3::origin();
        }
        let (index, local) = self.locate(t);
        self.segments[index].point_at(local)
    }

    /// Unit tangent at piecewise parameter `t`.
    ///
    /// Falls back to +X on an empty path, mirroring the degenerate-tangent
    /// behavior of [`CubicBezier::tangent_at`].
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vector3<f64> {
        if self.segments.is_empty() {
            return Vector3::x();
        }
        let (index, local) = self.locate(t);
        self.segments[index].tangent_at(local)
    }

    /// Total chord length of the path.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Chord length of a single segment.
    #[must_use]
    pub fn segment_length(&self, index: usize) -> Option<f64> {
        self.segment_lengths.get(index).copied()
    }

    /// Smallest sampled perpendicular distance from the ray to any segment.
    ///
    /// Returns `+∞` for an empty path or when no sample projects forward
    /// of the ray origin.
    #[must_use]
    pub fn closest_distance_to_ray(&self, ray: &Ray, step: f64) -> f64 {
        self.segments
            .iter()
            .map(|segment| segment.closest_distance_to_ray(ray, step))
            .fold(f64::INFINITY, f64::min)
    }

    /// Ray distance with the default sample step.
    #[must_use]
    pub fn distance_to_ray(&self, ray: &Ray) -> f64 {
        self.closest_distance_to_ray(ray, DEFAULT_SAMPLE_STEP)
    }
}
