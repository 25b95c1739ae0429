//! Error types for road mesh construction.

use thiserror::Error;

/// Result type for road mesh operations.
pub type RoadResult<T> = Result<T, RoadError>;

/// Errors that can occur while configuring or building a road mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RoadError {
    /// Width is zero, negative or not finite.
    #[error("invalid road width: {0} (must be positive)")]
    InvalidWidth(f64),

    /// Arc-length step is below the supported floor or not finite.
    #[error("invalid sampling step: {step} (must be at least {min})")]
    InvalidStep {
        /// Requested step distance.
        step: f64,
        /// Smallest accepted step.
        min: f64,
    },

    /// Fixed resolution must produce at least one segment per curve.
    #[error("invalid sampling resolution: {0} (must be at least 1)")]
    InvalidResolution(u32),

    /// The curve provider reported an unusable length.
    #[error("curve {curve} reported invalid length {length}")]
    InvalidCurveLength {
        /// Curve index.
        curve: usize,
        /// Reported length.
        length: f64,
    },

    /// The curve provider returned a non-finite position.
    #[error("curve {curve} evaluated to a non-finite position at t = {t}")]
    NonFiniteSample {
        /// Curve index.
        curve: usize,
        /// Parameter value.
        t: f64,
    },

    /// A single curve would need more segments than supported.
    #[error("curve {curve} needs {segments} segments (limit {max})")]
    TooManySegments {
        /// Curve index.
        curve: usize,
        /// Requested segment count.
        segments: f64,
        /// Upper limit.
        max: usize,
    },

    /// The vertex buffer outgrew 32-bit indices.
    #[error("mesh needs {0} vertices, more than 32-bit indices can address")]
    TooManyVertices(usize),

    /// An emitted triangle index does not address a vertex.
    #[error("index {index} at position {position} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u32,
        /// Position of the index in the index buffer.
        position: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Index buffer length is not a multiple of three.
    #[error("index buffer length {len} is not a multiple of 3")]
    MalformedIndices {
        /// Index buffer length.
        len: usize,
    },

    /// Normal buffer does not match the vertex buffer.
    #[error("{normals} normals for {vertices} vertices")]
    NormalCountMismatch {
        /// Number of normals.
        normals: usize,
        /// Number of vertices.
        vertices: usize,
    },
}

impl RoadError {
    /// Whether this error comes from configuration rather than a build.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidWidth(_) | Self::InvalidStep { .. } | Self::InvalidResolution(_)
        )
    }
}
