//! Error types for pipe mesh generation.

use thiserror::Error;

/// Result type for pipe mesh operations.
pub type PipeResult<T> = Result<T, PipeError>;

/// Errors that can occur while generating a pipe mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipeError {
    /// Radius is zero, negative, or not finite.
    #[error("invalid radius: {0} (must be positive and finite)")]
    InvalidRadius(f64),

    /// Sector count is too low to form a closed cross-section.
    #[error("sector count must be at least {min}, got {actual}")]
    TooFewSectors {
        /// Minimum required sectors.
        min: usize,
        /// Actual sector count.
        actual: usize,
    },

    /// Tick count is too low to form any ring pair.
    #[error("tick count must be at least {min}, got {actual}")]
    TooFewTicks {
        /// Minimum required ticks.
        min: usize,
        /// Actual tick count.
        actual: usize,
    },
}
