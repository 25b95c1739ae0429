//! Extrusion configuration.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RoadError, RoadResult};

/// How curve parameter values are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplingPolicy {
    /// Cross-sections roughly every `step` units of arc length.
    ///
    /// A curve of length `L` gets `ceil(L / step)` segments, the last one
    /// possibly shorter than `step`.
    ArcLengthStep {
        /// Target distance between cross-sections.
        step: f64,
    },
    /// A fixed number of segments per curve regardless of length.
    Resolution {
        /// Segments per curve.
        segments: u32,
    },
}

/// Whether strips end at the curve extremities or wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Topology {
    /// Every curve is an open strip.
    Open,
    /// Every curve is a loop; the last cross-section welds to the first.
    Closed,
    /// Ask the curve provider for each curve.
    #[default]
    PerCurve,
}

impl Topology {
    /// Resolve the topology for one curve given the provider's closed flag.
    #[must_use]
    pub const fn is_closed(self, curve_is_closed: bool) -> bool {
        match self {
            Self::Open => false,
            Self::Closed => true,
            Self::PerCurve => curve_is_closed,
        }
    }
}

/// Configuration for road strip extrusion.
///
/// # Example
///
/// ```
/// use road_mesh::{ExtrudeConfig, Topology};
///
/// let config = ExtrudeConfig::default()
///     .with_width(4.0)
///     .with_step(5.0)
///     .with_topology(Topology::Open);
///
/// assert!(config.validate().is_ok());
/// assert!(config.with_width(-1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtrudeConfig {
    /// Full road width, split evenly on both sides of the centerline.
    pub width: f64,
    /// Sampling policy.
    pub sampling: SamplingPolicy,
    /// Open / closed handling.
    pub topology: Topology,
}

impl Default for ExtrudeConfig {
    fn default() -> Self {
        Self {
            width: 3.0,
            sampling: SamplingPolicy::ArcLengthStep { step: 5.0 },
            topology: Topology::PerCurve,
        }
    }
}

impl ExtrudeConfig {
    /// Smallest accepted arc-length step.
    pub const MIN_STEP: f64 = 0.1;

    /// Width range editors should offer. Values outside it are still
    /// accepted as long as they are positive.
    pub const WIDTH_RANGE: RangeInclusive<f64> = 0.1..=10.0;

    /// Set the road width.
    #[must_use]
    pub const fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sample by arc length with the given step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.sampling = SamplingPolicy::ArcLengthStep { step };
        self
    }

    /// Sample with a fixed number of segments per curve.
    #[must_use]
    pub const fn with_resolution(mut self, segments: u32) -> Self {
        self.sampling = SamplingPolicy::Resolution { segments };
        self
    }

    /// Set the topology.
    #[must_use]
    pub const fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Half of the road width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    /// Check every value.
    ///
    /// # Errors
    ///
    /// - [`RoadError::InvalidWidth`] if the width is not positive and finite
    /// - [`RoadError::InvalidStep`] if the step is below [`Self::MIN_STEP`]
    /// - [`RoadError::InvalidResolution`] if the resolution is zero
    pub fn validate(&self) -> RoadResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(RoadError::InvalidWidth(self.width));
        }

        match self.sampling {
            SamplingPolicy::ArcLengthStep { step } => {
                if !(step.is_finite() && step >= Self::MIN_STEP) {
                    return Err(RoadError::InvalidStep {
                        step,
                        min: Self::MIN_STEP,
                    });
                }
            }
            SamplingPolicy::Resolution { segments } => {
                if segments == 0 {
                    return Err(RoadError::InvalidResolution(segments));
                }
            }
        }

        Ok(())
    }
}
