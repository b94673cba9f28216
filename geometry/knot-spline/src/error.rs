//! Error types for spline construction.

use thiserror::Error;

/// Errors that can occur while building a spline from knots.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplineError {
    /// Not enough knots to define any segment.
    #[error("insufficient knots: need at least {required}, got {actual}")]
    InsufficientKnots {
        /// Minimum required knots.
        required: usize,
        /// Actual number of knots provided.
        actual: usize,
    },
}

impl SplineError {
    /// Create an insufficient knots error.
    #[must_use]
    pub fn insufficient_knots(required: usize, actual: usize) -> Self {
        Self::InsufficientKnots { required, actual }
    }

    /// Check if this is an insufficient knots error.
    #[must_use]
    pub fn is_insufficient_knots(&self) -> bool {
        matches!(self, Self::InsufficientKnots { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SplineError::insufficient_knots(2, 1);
        assert!(err.to_string().contains("need at least 2"));
        assert!(err.to_string().contains("got 1"));
        assert!(err.is_insufficient_knots());
    }
}
