//! Sweeping a circular cross-section along Bezier segments.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use knot_spline::CubicBezier;

use crate::error::{PipeError, PipeResult};
use crate::mesh::PipeMesh;

/// Angle tolerance below which the reference axis and the tangent are
/// treated as parallel and the rotation axis degenerates.
const PARALLEL_TOLERANCE: f64 = 1e-5;

/// Configuration for pipe mesh generation.
///
/// # Example
///
/// ```
/// use pipe_sweep::PipeConfig;
///
/// let config = PipeConfig::default()
///     .with_radius(0.5)
///     .with_sectors(32)
///     .with_ticks(50);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipeConfig {
    /// Radius of the circular cross-section.
    pub radius: f64,
    /// Number of sectors around the circumference.
    pub sectors: usize,
    /// Number of longitudinal steps per segment.
    pub ticks: usize,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            radius: 0.25,
            sectors: 128,
            ticks: 100,
        }
    }
}

impl PipeConfig {
    /// Set the cross-section radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the number of circumferential sectors.
    #[must_use]
    pub const fn with_sectors(mut self, sectors: usize) -> Self {
        self.sectors = sectors;
        self
    }

    /// Set the number of longitudinal ticks per segment.
    #[must_use]
    pub const fn with_ticks(mut self, ticks: usize) -> Self {
        self.ticks = ticks;
        self
    }

    /// Check the configuration for degenerate values.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive and finite, fewer
    /// than 3 sectors are requested, or the tick count is zero.
    pub fn validate(&self) -> PipeResult<()> {
        if self.radius <= 0.0 || !self.radius.is_finite() {
            return Err(PipeError::InvalidRadius(self.radius));
        }
        if self.sectors < 3 {
            return Err(PipeError::TooFewSectors {
                min: 3,
                actual: self.sectors,
            });
        }
        if self.ticks < 1 {
            return Err(PipeError::TooFewTicks {
                min: 1,
                actual: self.ticks,
            });
        }
        Ok(())
    }

    /// Number of vertices a single swept segment will emit.
    #[must_use]
    pub const fn vertices_per_segment(&self) -> usize {
        4 * self.sectors * self.ticks
    }
}

/// Project `subject` onto the plane through `point` with unit `normal`.
#[must_use]
pub fn project_onto_plane(
    normal: Vector3<f64>,
    point: Point3<f64>,
    subject: Point3<f64>,
) -> Point3<f64> {
    subject - normal * (subject - point).dot(&normal)
}

/// Rotation carrying the world X axis onto `tangent`.
///
/// The rotation axis is `X × tangent`; when the tangent is parallel or
/// antiparallel to X that cross product vanishes, and the world Y axis is
/// substituted so the rotation stays well defined.
fn frame_rotation(tangent: Vector3<f64>) -> UnitQuaternion<f64> {
    let reference = Vector3::x();
    let angle = reference.dot(&tangent).clamp(-1.0, 1.0).acos();

    let axis = if angle.abs() < PARALLEL_TOLERANCE
        || (angle - std::f64::consts::PI).abs() < PARALLEL_TOLERANCE
    {
        Vector3::y()
    } else {
        reference.cross(&tangent)
    };

    UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle)
}

/// Sweep the cross-section along one Bezier segment.
///
/// Emits exactly `4 * sectors * ticks` vertices and as many normals. Per
/// longitudinal tick, the ring at `t0` is placed with the reference-axis
/// rotation frame and the ring at `t1` is obtained by projecting the first
/// ring onto the plane at `t1` (see the crate docs for why projection,
/// not a second frame). Each sector contributes one flat-shaded quad.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn sweep_segment(segment: &CubicBezier, config: &PipeConfig) -> PipeResult<PipeMesh> {
    config.validate()?;

    let mut mesh = PipeMesh::with_quad_capacity(config.sectors * config.ticks);
    sweep_segment_into(segment, config, &mut mesh);
    Ok(mesh)
}

fn sweep_segment_into(segment: &CubicBezier, config: &PipeConfig, mesh: &mut PipeMesh) {
    let r = config.radius;
    let dt = 1.0 / config.ticks as f64;

    for tick in 0..config.ticks {
        let t0 = tick as f64 * dt;
        let t1 = t0 + dt;

        let value0 = segment.point_at(t0);
        let value1 = segment.point_at(t1);
        let tangent0 = segment.tangent_at(t0);
        let tangent1 = segment.tangent_at(t1);

        let rotation = frame_rotation(tangent0);

        for sector in 0..config.sectors {
            let a0 = 2.0 * std::f64::consts::PI * sector as f64 / config.sectors as f64;
            let a1 = 2.0 * std::f64::consts::PI * (sector + 1) as f64 / config.sectors as f64;

            // Cross-section points in the ring at t0. The local circle
            // lives in the YZ plane of the reference frame.
            let p00 = value0 + rotation * Vector3::new(0.0, r * a0.cos(), r * a0.sin());
            let p01 = value0 + rotation * Vector3::new(0.0, r * a1.cos(), r * a1.sin());

            // Parallel-transport step: carry the ring forward by projecting
            // onto the plane at t1 instead of building a second frame.
            let p10 = project_onto_plane(tangent1, value1, p00);
            let p11 = project_onto_plane(tangent1, value1, p01);

            let normal = quad_normal(p00, p10, p11, tangent0);
            mesh.push_quad([p10, p00, p11, p01], normal);
        }
    }
}

/// Flat normal for one quad from its two forward-projected edges.
///
/// Falls back to a radial-ish direction when the quad collapses (coincident
/// curve samples), so normals never contain NaN.
fn quad_normal(
    p00: Point3<f64>,
    p10: Point3<f64>,
    p11: Point3<f64>,
    tangent: Vector3<f64>,
) -> Vector3<f64> {
    let along = (p10 - p00).try_normalize(f64::EPSILON);
    let across = (p11 - p00).try_normalize(f64::EPSILON);

    match (along, across) {
        (Some(a), Some(b)) => {
            let normal = a.cross(&b);
            normal.try_normalize(f64::EPSILON).unwrap_or(tangent)
        }
        // Collapsed quad: any unit vector keeps the buffer well formed.
        _ => tangent,
    }
}

/// Sweep the cross-section along an ordered list of segments.
///
/// The per-segment meshes are concatenated in order. An empty segment list
/// yields an empty mesh: a curve with fewer than 2 knots has no pipe, and
/// that is not an error.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn sweep_path(segments: &[CubicBezier], config: &PipeConfig) -> PipeResult<PipeMesh> {
    config.validate()?;

    let mut mesh =
        PipeMesh::with_quad_capacity(segments.len() * config.sectors * config.ticks);
    for segment in segments {
        sweep_segment_into(segment, config, &mut mesh);
    }

    debug!(
        segments = segments.len(),
        vertices = mesh.vertex_count(),
        radius = config.radius,
        "swept pipe mesh"
    );

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use approx::assert_relative_eq;

    fn x_axis_segment() -> CubicBezier {
        CubicBezier::line(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0))
    }

    fn small_config() -> PipeConfig {
        PipeConfig::default()
            .with_radius(0.5)
            .with_sectors(8)
            .with_ticks(10)
    }

    #[test]
    fn vertex_count_contract() {
        let mesh = sweep_segment(&x_axis_segment(), &small_config()).unwrap();
        assert_eq!(mesh.vertex_count(), 4 * 8 * 10);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
    }

    #[test]
    fn path_concatenates_segments() {
        let segments = vec![
            CubicBezier::line(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)),
            CubicBezier::line(Point3::new(5.0, 0.0, 0.0), Point3::new(5.0, 5.0, 0.0)),
        ];
        let config = small_config();
        let mesh = sweep_path(&segments, &config).unwrap();
        assert_eq!(mesh.vertex_count(), 2 * config.vertices_per_segment());
    }

    #[test]
    fn empty_path_yields_empty_mesh() {
        let mesh = sweep_path(&[], &small_config()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let segment = x_axis_segment();
        assert!(sweep_segment(&segment, &PipeConfig::default().with_radius(0.0)).is_err());
        assert!(sweep_segment(&segment, &PipeConfig::default().with_radius(f64::NAN)).is_err());
        assert!(sweep_segment(&segment, &PipeConfig::default().with_sectors(2)).is_err());
        assert!(sweep_segment(&segment, &PipeConfig::default().with_ticks(0)).is_err());
    }

    #[test]
    fn ring_points_lie_on_radius() {
        // Straight tube along X: every vertex sits at the configured radius
        // from the axis.
        let config = small_config();
        let mesh = sweep_segment(&x_axis_segment(), &config).unwrap();
        for v in &mesh.vertices {
            let radial = (v.y * v.y + v.z * v.z).sqrt();
            assert_relative_eq!(radial, config.radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let segment = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(3.0, 2.0, 1.0),
            Point3::new(4.0, 0.0, 0.0),
        );
        let mesh = sweep_segment(&segment, &small_config()).unwrap();
        for n in &mesh.normals {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn tangent_parallel_to_reference_uses_fallback_axis() {
        // Tangent along +X: the reference-axis cross product vanishes and
        // the fallback axis must keep the ring finite.
        let mesh = sweep_segment(&x_axis_segment(), &small_config()).unwrap();
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite())));

        // Antiparallel tangent exercises the angle-near-pi branch.
        let reversed =
            CubicBezier::line(Point3::new(10.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0));
        let mesh = sweep_segment(&reversed, &small_config()).unwrap();
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn coincident_segment_stays_finite() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let degenerate = CubicBezier::new(p, p, p, p);
        let mesh = sweep_segment(&degenerate, &small_config()).unwrap();
        assert_eq!(mesh.vertex_count(), small_config().vertices_per_segment());
        assert!(mesh
            .normals
            .iter()
            .all(|n| n.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn projection_lands_on_plane() {
        let normal = Vector3::z();
        let point = Point3::new(0.0, 0.0, 2.0);
        let subject = Point3::new(3.0, 4.0, 7.0);
        let projected = project_onto_plane(normal, point, subject);
        assert_relative_eq!(projected.z, 2.0, epsilon = 1e-12);
        assert_relative_eq!(projected.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(projected.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn rings_do_not_twist_on_gentle_curve() {
        // Adjacent rings keep angular correspondence: the first vertex of
        // tick i+1's quad group equals the projected first vertex of tick
        // i's group, so seams line up ring to ring.
        let segment = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.5, 0.0),
            Point3::new(4.0, 0.5, 0.0),
            Point3::new(6.0, 0.0, 0.0),
        );
        let config = PipeConfig::default()
            .with_radius(0.2)
            .with_sectors(4)
            .with_ticks(8);
        let mesh = sweep_segment(&segment, &config).unwrap();

        // Quad layout is [p10, p00, p11, p01]; sector 0 of consecutive
        // ticks shares the curve sample, so p00(tick+1) should sit close to
        // p10(tick) (both are the sector-0 point at the shared sample).
        let per_tick = 4 * config.sectors;
        for tick in 0..config.ticks - 1 {
            let p10 = mesh.vertices[tick * per_tick];
            let next_p00 = mesh.vertices[(tick + 1) * per_tick + 1];
            let gap = (next_p00 - p10).norm();
            assert!(gap < 0.1, "ring seam gap {gap} at tick {tick}");
        }
    }
}
