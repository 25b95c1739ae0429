//! Cross-section sampling.
//!
//! A cross-section is the pair of road edge points straddling the centerline
//! at one curve parameter. The edge direction is `right = tangent × up`; when
//! that product vanishes the frame falls back to world axes so the edge points
//! stay finite.

use nalgebra::{Point3, Vector3};
use road_curves::{CurveProvider, CurveSample};

use crate::config::ExtrudeConfig;

/// Relative threshold below which `tangent × up` is treated as zero.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Tangents shorter than this are replaced by a chord estimate.
const MIN_TANGENT_NORM: f64 = 1e-12;

/// Parameter distance on each side of `t` for the chord estimate.
const CHORD_STEP: f64 = 1e-4;

/// Where the right vector of a cross-section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSource {
    /// `tangent × up`, the regular case.
    CurveUp,
    /// `chord × up`, where the chord joins positions just around the sample
    /// because the curve reported a zero tangent there.
    ChordTangent,
    /// `tangent × +Z`, used when the curve's up is parallel to its tangent.
    WorldUp,
    /// A perpendicular of the tangent, used when the tangent is vertical.
    TangentPerpendicular,
    /// A perpendicular of the up vector, used when the tangent is zero.
    UpPerpendicular,
    /// Fixed `-Y`, used when neither vector is usable.
    Fixed,
}

impl FrameSource {
    /// Whether a fallback was needed.
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        !matches!(self, Self::CurveUp)
    }
}

/// Left and right road edge points at one curve parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    /// Edge on the `+right` side of the centerline.
    pub left: Point3<f64>,
    /// Edge on the `-right` side of the centerline.
    pub right: Point3<f64>,
}

impl CrossSection {
    /// Create a cross-section from its two edge points.
    #[must_use]
    pub const fn new(left: Point3<f64>, right: Point3<f64>) -> Self {
        Self { left, right }
    }

    /// Centerline point.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.left, &self.right)
    }

    /// Distance between the edges.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.left - self.right).norm()
    }

    /// Whether both edge points are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.left.iter().chain(self.right.iter()).all(|c| c.is_finite())
    }
}

/// Compute the unit right vector for a tangent / up pair.
///
/// Never returns a zero or non-finite vector.
///
/// # Example
///
/// ```
/// use road_mesh::{right_vector, FrameSource};
/// use nalgebra::Vector3;
///
/// let (right, source) = right_vector(&Vector3::x(), &Vector3::z());
/// assert!((right - -Vector3::y()).norm() < 1e-12);
/// assert_eq!(source, FrameSource::CurveUp);
///
/// // Tangent parallel to up: falls back to the world frame.
/// let (right, source) = right_vector(&Vector3::x(), &Vector3::x());
/// assert!(source.is_degenerate());
/// assert!((right.norm() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn right_vector(tangent: &Vector3<f64>, up: &Vector3<f64>) -> (Vector3<f64>, FrameSource) {
    let tangent = finite_or_zero(tangent);
    let up = finite_or_zero(up);

    if let Some(right) = normalized_cross(&tangent, &up) {
        return (right, FrameSource::CurveUp);
    }

    if let Some(right) = normalized_cross(&tangent, &Vector3::z()) {
        return (right, FrameSource::WorldUp);
    }

    if let Some(right) = perpendicular(&tangent) {
        return (right, FrameSource::TangentPerpendicular);
    }

    if let Some(right) = perpendicular(&up) {
        return (right, FrameSource::UpPerpendicular);
    }

    (-Vector3::y(), FrameSource::Fixed)
}

/// Build the cross-section for one curve sample.
///
/// `left = position + right · half_width`, `right = position − right · half_width`.
#[must_use]
pub fn cross_section(sample: &CurveSample, half_width: f64) -> (CrossSection, FrameSource) {
    let (right, source) = right_vector(&sample.tangent, &sample.up);
    let offset = right * half_width;
    (
        CrossSection::new(sample.position + offset, sample.position - offset),
        source,
    )
}

/// Samples cross-sections from a curve provider at a fixed width.
///
/// Pure: every call evaluates the provider afresh and keeps no state.
#[derive(Debug)]
pub struct CrossSectionSampler<'a, P: ?Sized> {
    provider: &'a P,
    half_width: f64,
}

impl<'a, P: CurveProvider + ?Sized> CrossSectionSampler<'a, P> {
    /// Create a sampler for the given provider using the configured width.
    #[must_use]
    pub fn new(provider: &'a P, config: &ExtrudeConfig) -> Self {
        Self {
            provider,
            half_width: config.half_width(),
        }
    }

    /// Evaluate curve `curve` at `t` and return its cross-section.
    ///
    /// A zero or non-finite tangent (a collapsed Bézier handle, coincident
    /// control points) is replaced by the direction between positions just
    /// before and after `t`, so the section keeps facing along the road.
    ///
    /// The caller guarantees a valid curve index and `t ∈ [0, 1]`.
    #[must_use]
    pub fn sample(&self, curve: usize, t: f64) -> (CrossSection, FrameSource) {
        let mut sample = self.provider.evaluate(curve, t);
        if tangent_is_usable(&sample.tangent) {
            return cross_section(&sample, self.half_width);
        }

        let Some(chord) = self.chord_direction(curve, t) else {
            return cross_section(&sample, self.half_width);
        };
        sample.tangent = chord;
        match cross_section(&sample, self.half_width) {
            (section, FrameSource::CurveUp) => (section, FrameSource::ChordTangent),
            fallback => fallback,
        }
    }

    /// Unit direction from `t - CHORD_STEP` to `t + CHORD_STEP`, clamped to
    /// the curve.
    fn chord_direction(&self, curve: usize, t: f64) -> Option<Vector3<f64>> {
        let before = self.provider.evaluate(curve, (t - CHORD_STEP).max(0.0));
        let after = self.provider.evaluate(curve, (t + CHORD_STEP).min(1.0));
        let chord = finite_or_zero(&(after.position - before.position));
        chord.try_normalize(f64::MIN_POSITIVE)
    }
}

fn tangent_is_usable(tangent: &Vector3<f64>) -> bool {
    tangent.iter().all(|c| c.is_finite()) && tangent.norm() > MIN_TANGENT_NORM
}

fn finite_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    if v.iter().all(|c| c.is_finite()) {
        *v
    } else {
        Vector3::zeros()
    }
}

/// `normalize(a × b)` unless `a` and `b` are (nearly) parallel or zero.
fn normalized_cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<Vector3<f64>> {
    let scale = a.norm() * b.norm();
    if scale <= f64::MIN_POSITIVE {
        return None;
    }

    let cross = a.cross(b);
    if cross.norm() <= PARALLEL_EPSILON * scale {
        return None;
    }
    cross.try_normalize(f64::MIN_POSITIVE)
}

/// A unit vector perpendicular to `v`, crossing with the world axis least
/// aligned with it.
fn perpendicular(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let abs_x = v.x.abs();
    let abs_y = v.y.abs();
    let abs_z = v.z.abs();

    let axis = if abs_x <= abs_y && abs_x <= abs_z {
        Vector3::x()
    } else if abs_y <= abs_z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    normalized_cross(v, &axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use road_curves::{CubicBezier, CurveSet, Polyline};

    #[test]
    fn regular_frame() {
        let (right, source) = right_vector(&Vector3::new(3.0, 0.0, 0.0), &Vector3::z());
        assert_eq!(source, FrameSource::CurveUp);
        assert!(!source.is_degenerate());
        assert_relative_eq!(right, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn unnormalized_inputs_give_unit_right() {
        let (right, _) = right_vector(&Vector3::new(0.0, 7.0, 0.0), &Vector3::new(0.0, 0.0, 0.25));
        assert_relative_eq!(right, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn up_parallel_to_tangent_uses_world_up() {
        let (right, source) = right_vector(&Vector3::y(), &Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(source, FrameSource::WorldUp);
        assert_relative_eq!(right, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn vertical_tangent_with_vertical_up() {
        let (right, source) = right_vector(&Vector3::z(), &Vector3::z());
        assert_eq!(source, FrameSource::TangentPerpendicular);
        assert_relative_eq!(right.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(right.dot(&Vector3::z()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_tangent_uses_up() {
        let (right, source) = right_vector(&Vector3::zeros(), &Vector3::z());
        assert_eq!(source, FrameSource::UpPerpendicular);
        assert_relative_eq!(right.dot(&Vector3::z()), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn nothing_usable() {
        let nan = Vector3::new(f64::NAN, 0.0, 0.0);
        let (right, source) = right_vector(&nan, &Vector3::zeros());
        assert_eq!(source, FrameSource::Fixed);
        assert_relative_eq!(right, -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn cross_section_width_and_center() {
        let sample = CurveSample::new(Point3::new(1.0, 2.0, 3.0), Vector3::x(), Vector3::z());
        let (section, source) = cross_section(&sample, 2.0);

        assert_eq!(source, FrameSource::CurveUp);
        assert_relative_eq!(section.width(), 4.0, epsilon = 1e-12);
        assert_relative_eq!(section.center().coords, sample.position.coords, epsilon = 1e-12);
        assert_relative_eq!(section.left.coords, Vector3::new(1.0, 0.0, 3.0), epsilon = 1e-12);
        assert_relative_eq!(section.right.coords, Vector3::new(1.0, 4.0, 3.0), epsilon = 1e-12);
        assert!(section.is_finite());
    }

    #[test]
    fn sampler_reads_provider() {
        let mut set = CurveSet::new();
        set.push(Polyline::from_segment(
            Point3::origin(),
            Point3::new(0.0, 10.0, 0.0),
        ));

        let config = ExtrudeConfig::default().with_width(4.0);
        let sampler = CrossSectionSampler::new(&set, &config);
        let (section, source) = sampler.sample(0, 0.5);

        assert_eq!(source, FrameSource::CurveUp);
        assert_relative_eq!(section.center().coords, Vector3::new(0.0, 5.0, 0.0), epsilon = 1e-12);
        // Heading +Y with +Z up: right = +X.
        assert_relative_eq!(section.left.coords, Vector3::new(2.0, 5.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn collapsed_handle_uses_chord() {
        let mut set = CurveSet::new();
        set.push(CubicBezier::new(
            Point3::origin(),
            Point3::origin(),
            Point3::new(7.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ));

        let config = ExtrudeConfig::default().with_width(4.0);
        let sampler = CrossSectionSampler::new(&set, &config);
        let (start, source) = sampler.sample(0, 0.0);
        let (next, _) = sampler.sample(0, 0.25);

        assert_eq!(source, FrameSource::ChordTangent);
        assert!(source.is_degenerate());
        // Same side as the regular sections further along.
        assert_relative_eq!(start.left.coords, Vector3::new(0.0, -2.0, 0.0), epsilon = 1e-9);
        assert!(next.left.y < 0.0);
    }
}
