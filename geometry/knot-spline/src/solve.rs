//! Natural-cubic-spline solve and segment assembly.
//!
//! Interpolating a smooth curve through N knots reduces to a tridiagonal
//! linear system for the interior spline control points (natural boundary
//! conditions, one unknown per interior knot, solved per coordinate axis).
//! Adjacent control points are then mixed at 1/3 and 2/3 fractions to form
//! the cubic Bezier segment between each knot pair.

use nalgebra::{Point3, Vector3};

use crate::bezier::CubicBezier;
use crate::error::SplineError;
use crate::Result;

/// Compute the natural-cubic-spline control points for the given knots.
///
/// Returns one control point per knot. The endpoints pass through exactly
/// (`P[0] = K[0]`, `P[N-1] = K[N-1]`); interior control points come from the
/// tridiagonal system with 4 on the diagonal, 1 on both off-diagonals, and
/// right-hand side `6K[1]-K[0]`, `6K[i+1]`, `6K[N-2]-K[N-1]`.
///
/// The system is solved with the Thomas algorithm, O(N) in the knot count.
/// With fewer than 4 knots there are no interior unknowns and the knots are
/// returned unchanged.
///
/// # Errors
///
/// Returns [`SplineError::InsufficientKnots`] for fewer than 2 knots.
///
/// # Example
///
/// ```
/// use knot_spline::spline_control_points;
/// use nalgebra::Point3;
///
/// // Collinear, evenly spaced knots reproduce themselves.
/// let knots: Vec<_> = (0..5).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
/// let control = spline_control_points(&knots).unwrap();
/// assert_eq!(control.len(), knots.len());
/// assert!((control[2].x - 2.0).abs() < 1e-9);
/// ```
pub fn spline_control_points(knots: &[Point3<f64>]) -> Result<Vec<Point3<f64>>> {
    if knots.len() < 2 {
        return Err(SplineError::insufficient_knots(2, knots.len()));
    }

    let n = knots.len();
    if n < 4 {
        return Ok(knots.to_vec());
    }

    // Right-hand side for the n-2 interior unknowns.
    let m = n - 2;
    let mut rhs = vec![Vector3::zeros(); m];
    rhs[0] = knots[1].coords * 6.0 - knots[0].coords;
    rhs[m - 1] = knots[n - 2].coords * 6.0 - knots[n - 1].coords;
    for i in 1..m - 1 {
        rhs[i] = knots[i + 1].coords * 6.0;
    }

    let interior = solve_tridiagonal(&rhs);

    let mut control = Vec::with_capacity(n);
    control.push(knots[0]);
    control.extend(interior.into_iter().map(Point3::from));
    control.push(knots[n - 1]);
    Ok(control)
}

/// Thomas algorithm for the fixed `[1, 4, 1]` tridiagonal system.
///
/// The coefficients are scalar, so all three coordinate axes are swept in
/// one pass over `Vector3` values.
fn solve_tridiagonal(rhs: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    let m = rhs.len();
    let mut sweep = vec![0.0; m];
    let mut solution = vec![Vector3::zeros(); m];

    // Forward elimination. The diagonal dominance of [1, 4, 1] keeps the
    // pivots well away from zero.
    sweep[0] = 1.0 / 4.0;
    solution[0] = rhs[0] / 4.0;
    for i in 1..m {
        let pivot = 4.0 - sweep[i - 1];
        sweep[i] = 1.0 / pivot;
        solution[i] = (rhs[i] - solution[i - 1]) / pivot;
    }

    // Back substitution.
    for i in (0..m - 1).rev() {
        let next = solution[i + 1];
        solution[i] -= next * sweep[i];
    }

    solution
}

/// Build the cubic Bezier segments interpolating the given knots.
///
/// Produces `N-1` segments for `N` knots:
///
/// - 2 knots: one straight segment with control points `[K0, K0, K1, K1]`
/// - 3 knots: two segments with control points at the 1/3 and 2/3 lerp
///   fractions between adjacent knots (no linear solve)
/// - 4+ knots: the natural-cubic-spline control points from
///   [`spline_control_points`], mixed as `(2/3)P[i-1] + (1/3)P[i]` and
///   `(1/3)P[i-1] + (2/3)P[i]` between the knot endpoints
///
/// Adjacent segments share their boundary knot exactly, so the assembled
/// curve is continuous by construction.
///
/// # Errors
///
/// Returns [`SplineError::InsufficientKnots`] for fewer than 2 knots.
pub fn segments_through_knots(knots: &[Point3<f64>]) -> Result<Vec<CubicBezier>> {
    match knots.len() {
        0 | 1 => Err(SplineError::insufficient_knots(2, knots.len())),
        2 => Ok(vec![CubicBezier::line(knots[0], knots[1])]),
        3 => Ok((0..2)
            .map(|i| {
                CubicBezier::new(
                    knots[i],
                    mix(knots[i], knots[i + 1], 1.0 / 3.0),
                    mix(knots[i], knots[i + 1], 2.0 / 3.0),
                    knots[i + 1],
                )
            })
            .collect()),
        _ => {
            let control = spline_control_points(knots)?;
            Ok((1..knots.len())
                .map(|i| {
                    CubicBezier::new(
                        knots[i - 1],
                        mix(control[i - 1], control[i], 1.0 / 3.0),
                        mix(control[i - 1], control[i], 2.0 / 3.0),
                        knots[i],
                    )
                })
                .collect())
        }
    }
}

/// Affine mix of two points: `(1-t)a + tb`.
#[inline]
fn mix(a: Point3<f64>, b: Point3<f64>, t: f64) -> Point3<f64> {
    Point3::from(a.coords * (1.0 - t) + b.coords * t)
}
