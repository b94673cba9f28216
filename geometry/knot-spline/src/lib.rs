//! Interpolating cubic splines through 3D knot points.
//!
//! This crate turns an ordered sequence of user-placed **knots** into a
//! smooth piecewise-cubic curve:
//!
//! - [`spline_control_points`] - Natural-cubic-spline control points, one
//!   per knot, via a tridiagonal (Thomas algorithm) solve
//! - [`segments_through_knots`] - Cubic Bezier segments between adjacent
//!   knots, derived from those control points
//! - [`CubicBezier`] - A single cubic segment: position, tangent, chord
//!   length, ray-distance queries
//! - [`SplinePath`] - The assembled piecewise curve with cached lengths
//! - [`Ray`] - Origin + direction with forward-only perpendicular distance
//!
//! # Quick Start
//!
//! ```
//! use knot_spline::{segments_through_knots, SplinePath};
//! use nalgebra::Point3;
//!
//! let knots = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(3.0, 1.0, 0.0),
//! ];
//!
//! let path = SplinePath::through_knots(&knots).unwrap();
//! assert_eq!(path.num_segments(), 3);
//!
//! // The curve passes through the first and last knot exactly.
//! let start = path.point_at(0.0);
//! assert!((start.x - 0.0).abs() < 1e-9);
//! ```
//!
//! # Degenerate knot counts
//!
//! Two knots produce a single straight segment whose control points are the
//! knots themselves, duplicated. Three knots skip the linear solve and place
//! control points at the 1/3 and 2/3 lerp fractions. Four or more knots use
//! the natural-cubic-spline system.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bezier;
mod error;
mod ray;
mod solve;
mod spline;

pub use bezier::CubicBezier;
pub use error::SplineError;
pub use ray::Ray;
pub use solve::{segments_through_knots, spline_control_points};
pub use spline::SplinePath;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for spline operations.
pub type Result<T> = std::result::Result<T, SplineError>;

/// Parameter step used for sampled queries (length, ray distance) when the
/// caller does not supply one. 100 samples over the unit interval.
pub const DEFAULT_SAMPLE_STEP: f64 = 0.01;
