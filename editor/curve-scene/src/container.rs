//! Scene-level curve ownership and cross-curve picking.

use knot_spline::Ray;
use tracing::debug;

use crate::curve::Curve;
use crate::error::{SceneError, SceneResult};

/// Owns every curve in the scene.
///
/// Curves are addressed by their index in insertion order; removing a
/// curve shifts later indices down, matching `Vec` semantics. Picking
/// queries aggregate the per-curve ray distances from
/// [`Curve::closest_distance_to_ray`] and [`Curve::closest_knot_to_ray`].
#[derive(Debug, Default)]
pub struct CurveContainer {
    curves: Vec<Curve>,
}

impl CurveContainer {
    /// An empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a curve, returning its index.
    pub fn add_curve(&mut self, curve: Curve) -> usize {
        self.curves.push(curve);
        self.curves.len() - 1
    }

    /// Remove and return the curve at `index`.
    ///
    /// # Errors
    ///
    /// Returns an out-of-bounds error when `index >= len`.
    pub fn remove_curve(&mut self, index: usize) -> SceneResult<Curve> {
        if index >= self.curves.len() {
            return Err(SceneError::curve_index_out_of_bounds(
                index,
                self.curves.len(),
            ));
        }
        Ok(self.curves.remove(index))
    }

    /// Remove every curve.
    pub fn clear(&mut self) {
        debug!(curves = self.curves.len(), "clearing curve container");
        self.curves.clear();
    }

    /// The curve at `index`.
    #[must_use]
    pub fn curve(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    /// Mutable access to the curve at `index`.
    pub fn curve_mut(&mut self, index: usize) -> Option<&mut Curve> {
        self.curves.get_mut(index)
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the container holds no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterate over the curves in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter()
    }

    /// Iterate mutably over the curves.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Curve> {
        self.curves.iter_mut()
    }

    /// Drive every curve's mesh lifecycle one step.
    ///
    /// Generations for different curves run in parallel with each other;
    /// each curve still has at most one task in flight.
    pub fn update_all(&mut self) {
        for curve in &mut self.curves {
            curve.update();
        }
    }

    /// Index of the curve nearest the ray, within `max_distance`.
    ///
    /// The per-curve distance is the sampled minimum over its segments;
    /// ties break to the first curve in insertion order.
    #[must_use]
    pub fn closest_curve_to_ray(&self, ray: &Ray, max_distance: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, curve) in self.curves.iter().enumerate() {
            let distance = curve.closest_distance_to_ray(ray);
            if distance > max_distance {
                continue;
            }
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        best.map(|(index, _)| index)
    }

    /// The nearest knot across every curve, within `max_distance`.
    ///
    /// Returns `(curve index, knot index)`. Ties break to the earliest
    /// curve, then the earliest knot within it.
    #[must_use]
    pub fn closest_knot_to_ray(&self, ray: &Ray, max_distance: f64) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for (curve_index, curve) in self.curves.iter().enumerate() {
            for (knot_index, knot) in curve.knots().iter().enumerate() {
                let Some(distance) = ray.perpendicular_distance(*knot) else {
                    continue;
                };
                if distance > max_distance {
                    continue;
                }
                if best.is_none_or(|(_, _, d)| distance < d) {
                    best = Some((curve_index, knot_index, distance));
                }
            }
        }
        best.map(|(curve_index, knot_index, _)| (curve_index, knot_index))
    }
}
