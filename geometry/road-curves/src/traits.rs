//! Core curve traits.
//!
//! [`RoadCurve`] describes a single parametric curve. [`CurveProvider`] is the
//! narrow contract the road mesh builder consumes: a numbered set of curves it
//! can measure and evaluate.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::CurveId;

/// Curve state at one parameter value.
///
/// All three members live in the same coordinate space. `tangent` and `up`
/// are not required to be unit length, nor perpendicular to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveSample {
    /// Point on the curve.
    pub position: Point3<f64>,
    /// Direction of increasing `t`.
    pub tangent: Vector3<f64>,
    /// Up direction of the road surface at this point.
    pub up: Vector3<f64>,
}

impl CurveSample {
    /// Create a new sample.
    #[must_use]
    pub const fn new(position: Point3<f64>, tangent: Vector3<f64>, up: Vector3<f64>) -> Self {
        Self {
            position,
            tangent,
            up,
        }
    }
}

/// A parametric curve over `t ∈ [0, 1]` carrying an up vector.
///
/// # Implementors
///
/// - [`Polyline`](crate::Polyline) - Piecewise linear
/// - [`CubicBezier`](crate::CubicBezier) - Single cubic Bézier segment
/// - [`Arc`](crate::Arc) - Circular arc
/// - [`Circle`](crate::Circle) - Full circle, always closed
pub trait RoadCurve {
    /// Evaluate the curve position at parameter `t`.
    fn point_at(&self, t: f64) -> Point3<f64>;

    /// First derivative (velocity) at parameter `t`.
    fn derivative_at(&self, t: f64) -> Vector3<f64>;

    /// Up vector at parameter `t`.
    fn up_at(&self, t: f64) -> Vector3<f64>;

    /// Unit tangent at parameter `t`.
    ///
    /// Falls back to the raw derivative when it is too short to normalize,
    /// leaving the degeneracy for the caller to detect.
    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        let d = self.derivative_at(t);
        d.try_normalize(1e-12).unwrap_or(d)
    }

    /// Position, tangent and up at parameter `t`.
    fn sample_at(&self, t: f64) -> CurveSample {
        CurveSample::new(self.point_at(t), self.tangent_at(t), self.up_at(t))
    }

    /// Total arc length.
    ///
    /// The default integrates `|B'(t)|` with adaptive Simpson quadrature.
    fn arc_length(&self) -> f64 {
        adaptive_arc_length(self, 0.0, 1.0, 1e-9, 20)
    }

    /// Whether the curve forms a loop.
    ///
    /// The default compares the end points.
    fn is_closed(&self) -> bool {
        (self.point_at(0.0) - self.point_at(1.0)).norm() < 1e-10
    }
}

impl<C: RoadCurve + ?Sized> RoadCurve for Box<C> {
    fn point_at(&self, t: f64) -> Point3<f64> {
        (**self).point_at(t)
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        (**self).derivative_at(t)
    }

    fn up_at(&self, t: f64) -> Vector3<f64> {
        (**self).up_at(t)
    }

    fn tangent_at(&self, t: f64) -> Vector3<f64> {
        (**self).tangent_at(t)
    }

    fn sample_at(&self, t: f64) -> CurveSample {
        (**self).sample_at(t)
    }

    fn arc_length(&self) -> f64 {
        (**self).arc_length()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// A numbered collection of curves the mesh builder samples.
///
/// Indices run over `0..curve_count()`. Callers guarantee valid indices and
/// `t ∈ [0, 1]`; implementations may panic otherwise. Count, lengths and
/// closed flags must not change while one mesh build is running, which the
/// borrow held by the builder enforces for in-process providers.
pub trait CurveProvider {
    /// Number of curves.
    fn curve_count(&self) -> usize;

    /// Stable identity of the curve at `index`, used to route change
    /// notifications.
    fn curve_id(&self, index: usize) -> CurveId;

    /// Arc length of the curve at `index`.
    fn length(&self, index: usize) -> f64;

    /// Evaluate the curve at `index` for parameter `t`.
    fn evaluate(&self, index: usize, t: f64) -> CurveSample;

    /// Whether the curve at `index` is a closed loop.
    fn is_closed(&self, _index: usize) -> bool {
        false
    }

    /// Whether this provider holds the curve `id`.
    fn owns(&self, id: CurveId) -> bool {
        (0..self.curve_count()).any(|index| self.curve_id(index) == id)
    }
}

impl<P: CurveProvider + ?Sized> CurveProvider for &P {
    fn curve_count(&self) -> usize {
        (**self).curve_count()
    }

    fn curve_id(&self, index: usize) -> CurveId {
        (**self).curve_id(index)
    }

    fn length(&self, index: usize) -> f64 {
        (**self).length(index)
    }

    fn evaluate(&self, index: usize, t: f64) -> CurveSample {
        (**self).evaluate(index, t)
    }

    fn is_closed(&self, index: usize) -> bool {
        (**self).is_closed(index)
    }

    fn owns(&self, id: CurveId) -> bool {
        (**self).owns(id)
    }
}

/// Adaptive Simpson integration of curve speed over `[a, b]`.
fn adaptive_arc_length<C: RoadCurve + ?Sized>(
    curve: &C,
    a: f64,
    b: f64,
    tolerance: f64,
    max_depth: usize,
) -> f64 {
    fn simpson_step<C: RoadCurve + ?Sized>(curve: &C, a: f64, b: f64) -> f64 {
        let mid = (a + b) / 2.0;
        let h = (b - a) / 6.0;

        let fa = curve.derivative_at(a).norm();
        let fm = curve.derivative_at(mid).norm();
        let fb = curve.derivative_at(b).norm();

        h * (fa + 4.0 * fm + fb)
    }

    fn refine<C: RoadCurve + ?Sized>(
        curve: &C,
        a: f64,
        b: f64,
        tolerance: f64,
        whole: f64,
        depth: usize,
    ) -> f64 {
        let mid = (a + b) / 2.0;
        let left = simpson_step(curve, a, mid);
        let right = simpson_step(curve, mid, b);
        let combined = left + right;

        if depth == 0 || (combined - whole).abs() < 15.0 * tolerance {
            combined + (combined - whole) / 15.0
        } else {
            let half_tol = tolerance / 2.0;
            refine(curve, a, mid, half_tol, left, depth - 1)
                + refine(curve, mid, b, half_tol, right, depth - 1)
        }
    }

    let whole = simpson_step(curve, a, b);
    refine(curve, a, b, tolerance, whole, max_depth)
}
