//! Parameter schedules: which `t` values each curve is sampled at.

use crate::config::SamplingPolicy;
use crate::error::{RoadError, RoadResult};

/// Upper bound on segments for a single curve.
pub const MAX_SEGMENTS_PER_CURVE: usize = 1 << 20;

/// Smallest segment count for a closed loop.
pub const MIN_LOOP_SEGMENTS: usize = 3;

/// Number of segments (quads) for one curve before topology adjustment.
///
/// - Arc-length step: `ceil(length / step)`, at least 1
/// - Fixed resolution: the configured segment count
///
/// `length` is only consulted for arc-length sampling.
///
/// # Errors
///
/// - [`RoadError::InvalidCurveLength`] for a negative or non-finite length
/// - [`RoadError::TooManySegments`] above [`MAX_SEGMENTS_PER_CURVE`]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn segment_count(policy: SamplingPolicy, curve: usize, length: f64) -> RoadResult<usize> {
    match policy {
        SamplingPolicy::ArcLengthStep { step } => {
            if !(length.is_finite() && length >= 0.0) {
                return Err(RoadError::InvalidCurveLength { curve, length });
            }

            let steps = (length / step).ceil();
            if steps > MAX_SEGMENTS_PER_CURVE as f64 {
                return Err(RoadError::TooManySegments {
                    curve,
                    segments: steps,
                    max: MAX_SEGMENTS_PER_CURVE,
                });
            }
            // Non-negative and bounded above, so the cast is exact.
            Ok((steps as usize).max(1))
        }
        SamplingPolicy::Resolution { segments } => {
            let segments = segments as usize;
            if segments > MAX_SEGMENTS_PER_CURVE {
                return Err(RoadError::TooManySegments {
                    curve,
                    segments: segments as f64,
                    max: MAX_SEGMENTS_PER_CURVE,
                });
            }
            Ok(segments.max(1))
        }
    }
}

/// Fill `out` with the parameter values for a curve split into `segments`.
///
/// Open curves get `t = i / segments` for `i < segments` followed by an exact
/// `t = 1`, i.e. `segments + 1` values. Closed curves skip the final `t = 1`
/// (it coincides with `t = 0`) and use at least [`MIN_LOOP_SEGMENTS`]
/// segments, giving one value per segment.
///
/// Returns the number of segments actually scheduled.
///
/// # Example
///
/// ```
/// use road_mesh::fill_schedule;
///
/// let mut ts = Vec::new();
/// assert_eq!(fill_schedule(2, false, &mut ts), 2);
/// assert_eq!(ts, vec![0.0, 0.5, 1.0]);
///
/// assert_eq!(fill_schedule(4, true, &mut ts), 4);
/// assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75]);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn fill_schedule(segments: usize, closed: bool, out: &mut Vec<f64>) -> usize {
    out.clear();

    let segments = if closed {
        segments.max(MIN_LOOP_SEGMENTS)
    } else {
        segments.max(1)
    };

    let denom = segments as f64;
    out.reserve(segments + 1);
    out.extend((0..segments).map(|i| i as f64 / denom));
    if !closed {
        out.push(1.0);
    }

    segments
}
