//! Tubular pipe meshes swept along cubic Bezier segments.
//!
//! Sweeps a circular cross-section of configurable radius and sector count
//! along a curve, emitting flat-shaded quads sized for direct upload as
//! vertex/normal buffers:
//!
//! - [`PipeConfig`] - Radius, sector count, and longitudinal tick count
//! - [`PipeMesh`] - Flat quad-group vertex + normal buffers
//! - [`sweep_segment`] - One segment to `4 * sectors * ticks` vertices
//! - [`sweep_path`] - A whole segment list, concatenated
//!
//! # Cross-section orientation
//!
//! Each ring is oriented by a rotation carrying the world X axis onto the
//! local tangent. The *next* ring is not framed independently: its points
//! are the current ring's points projected onto the plane through the next
//! sample with the next tangent as normal. Independent frames at every
//! sample would pick arbitrary in-plane rotations and visibly twist the
//! tube between rings; the projection step preserves angular
//! correspondence.
//!
//! # Quick Start
//!
//! ```
//! use knot_spline::CubicBezier;
//! use nalgebra::Point3;
//! use pipe_sweep::{sweep_segment, PipeConfig};
//!
//! let segment = CubicBezier::line(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//! );
//!
//! let config = PipeConfig::default().with_radius(0.5).with_sectors(16).with_ticks(20);
//! let mesh = sweep_segment(&segment, &config).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 4 * 16 * 20);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod mesh;
mod sweep;

pub use error::{PipeError, PipeResult};
pub use mesh::PipeMesh;
pub use sweep::{project_onto_plane, sweep_path, sweep_segment, PipeConfig};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
