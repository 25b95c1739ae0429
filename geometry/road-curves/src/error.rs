//! Error types for curve construction and lookup.

use thiserror::Error;

use crate::CurveId;

/// Errors that can occur while building or addressing curves.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Insufficient points to define the curve.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Radius must be positive and finite.
    #[error("invalid radius: {0} (must be positive)")]
    InvalidRadius(f64),

    /// Sweep angle is zero or not finite.
    #[error("invalid sweep angle: {0}")]
    InvalidSweep(f64),

    /// Degenerate curve (e.g. every point coincides).
    #[error("degenerate curve: {reason}")]
    Degenerate {
        /// Description of the degeneracy.
        reason: String,
    },

    /// Curve index is not part of the provider.
    #[error("curve index {index} out of range (provider holds {count} curves)")]
    UnknownCurve {
        /// Requested index.
        index: usize,
        /// Number of curves held.
        count: usize,
    },

    /// No curve with this identity is held.
    #[error("unknown {0}")]
    UnknownId(CurveId),

    /// Control point index is not part of the curve.
    #[error("point index {index} out of range (curve has {count} points)")]
    UnknownPoint {
        /// Requested point index.
        index: usize,
        /// Number of points on the curve.
        count: usize,
    },
}

impl CurveError {
    /// Create an insufficient points error.
    #[must_use]
    pub const fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create a degenerate curve error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CurveError::insufficient_points(2, 1);
        assert_eq!(
            err.to_string(),
            "insufficient points: need at least 2, got 1"
        );

        let err = CurveError::UnknownCurve { index: 3, count: 2 };
        assert!(err.to_string().contains("index 3"));

        let err = CurveError::degenerate("all points coincide");
        assert!(err.to_string().contains("all points coincide"));

        let err = CurveError::UnknownId(CurveId(7));
        assert_eq!(err.to_string(), "unknown curve#7");
    }
}
