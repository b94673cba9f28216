//! Error types for the curve scene model.

use knot_spline::SplineError;
use pipe_sweep::PipeError;
use thiserror::Error;

/// Errors surfaced by scene editing, picking, and curve file I/O.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A spline construction error bubbled up from the geometry layer.
    #[error(transparent)]
    Spline(#[from] SplineError),

    /// A pipe configuration error bubbled up from the mesh layer.
    #[error(transparent)]
    Pipe(#[from] PipeError),

    /// A knot index referred outside the curve's knot sequence.
    #[error("knot index {index} out of bounds for curve with {len} knots")]
    KnotIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of knots the curve holds.
        len: usize,
    },

    /// A curve index referred outside the container.
    #[error("curve index {index} out of bounds for container with {len} curves")]
    CurveIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of curves the container holds.
        len: usize,
    },

    /// Reading or writing a curve file failed at the byte level.
    #[error("curve file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A curve file was not valid JSON or did not match the wire format.
    #[error("malformed curve file: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneError {
    /// Construct a knot out-of-bounds error.
    #[must_use]
    pub const fn knot_index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::KnotIndexOutOfBounds { index, len }
    }

    /// Construct a curve out-of-bounds error.
    #[must_use]
    pub const fn curve_index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::CurveIndexOutOfBounds { index, len }
    }

    /// Whether this error is an out-of-bounds index (knot or curve).
    #[must_use]
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Self::KnotIndexOutOfBounds { .. } | Self::CurveIndexOutOfBounds { .. }
        )
    }
}

/// Convenience alias for scene operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;
