//! Editable spline-curve scene model.
//!
//! Sits on top of [`knot_spline`] (interpolation) and [`pipe_sweep`]
//! (mesh generation) and adds the mutable editing layer: curves that own
//! knot sequences and pipe parameters, a container aggregating them for
//! picking, background mesh generation with an explicit status machine,
//! and JSON import/export of curve data.
//!
//! # Example
//!
//! ```
//! use curve_scene::{Curve, CurveContainer, GenerationStatus};
//! use nalgebra::Point3;
//!
//! let mut curve = Curve::new();
//! curve.add_knot(Point3::new(0.0, 0.0, 0.0));
//! curve.add_knot(Point3::new(1.0, 1.0, 0.0));
//! curve.add_knot(Point3::new(2.0, 0.0, 0.0));
//!
//! // Edits leave the curve dirty until the mesh is regenerated and the
//! // renderer takes the fresh buffer.
//! assert!(curve.is_dirty());
//! curve.regenerate_blocking()?;
//! assert_eq!(curve.status(), GenerationStatus::WaitingForUpload);
//! let mesh = curve.take_mesh_for_upload().ok_or("no mesh")?;
//! assert!(!mesh.is_empty());
//!
//! let mut scene = CurveContainer::new();
//! scene.add_curve(curve);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod container;
mod curve;
mod error;
mod generation;
mod io;
pub mod preset;

pub use container::CurveContainer;
pub use curve::Curve;
pub use error::{SceneError, SceneResult};
pub use generation::GenerationStatus;
pub use io::{load_curves, load_curves_from_path, save_curves, save_curves_to_path};

// Re-export the geometry vocabulary so consumers rarely need to import
// the lower layers directly.
pub use knot_spline::{Ray, SplinePath};
pub use nalgebra::{Point3, Vector3};
pub use pipe_sweep::{PipeConfig, PipeMesh};
