//! Cubic Bézier road segments.

use nalgebra::{Point3, Vector3};

use crate::RoadCurve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single cubic Bézier segment.
///
/// Defined by four control points: the curve passes through `p0` and `p3`,
/// with `p1` and `p2` shaping the tangents at the ends. The parameter is the
/// Bézier parameter, not arc length.
///
/// # Example
///
/// ```
/// use road_curves::{CubicBezier, RoadCurve};
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// );
///
/// let end = curve.point_at(1.0);
/// assert!((end.x - 4.0).abs() < 1e-10);
/// assert!(curve.arc_length() > 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// First control point.
    pub p1: Point3<f64>,
    /// Second control point.
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
    /// Up vector for the whole segment.
    pub up: Vector3<f64>,
}

impl CubicBezier {
    /// Create a segment with `+Z` as up.
    #[must_use]
    pub fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self {
            p0,
            p1,
            p2,
            p3,
            up: Vector3::z(),
        }
    }

    /// Use a different up vector.
    #[must_use]
    pub const fn with_up(mut self, up: Vector3<f64>) -> Self {
        self.up = up;
        self
    }

    /// Control point by index (0..4).
    #[must_use]
    pub fn control_point(&self, index: usize) -> Option<Point3<f64>> {
        match index {
            0 => Some(self.p0),
            1 => Some(self.p1),
            2 => Some(self.p2),
            3 => Some(self.p3),
            _ => None,
        }
    }

    /// Mutable control point by index (0..4).
    pub fn control_point_mut(&mut self, index: usize) -> Option<&mut Point3<f64>> {
        match index {
            0 => Some(&mut self.p0),
            1 => Some(&mut self.p1),
            2 => Some(&mut self.p2),
            3 => Some(&mut self.p3),
            _ => None,
        }
    }
}

impl RoadCurve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * t)
                + self.p2.coords * (3.0 * s * t2)
                + self.p3.coords * (t2 * t),
        )
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let s = 1.0 - t;

        // B'(t) = 3(1-t)²(P₁-P₀) + 6(1-t)t(P₂-P₁) + 3t²(P₃-P₂)
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    fn up_at(&self, _t: f64) -> Vector3<f64> {
        self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn straight_bezier_length() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        );
        assert_relative_eq!(curve.arc_length(), 3.0, epsilon = 1e-8);
        assert_relative_eq!(curve.tangent_at(0.5), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn endpoints_interpolated() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(5.0, 5.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
        );
        assert_relative_eq!(curve.point_at(0.0).coords, curve.p0.coords, epsilon = 1e-12);
        assert_relative_eq!(curve.point_at(1.0).coords, curve.p3.coords, epsilon = 1e-12);
        assert!(!curve.is_closed());
    }

    #[test]
    fn control_point_access() {
        let mut curve = CubicBezier::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        );
        assert_eq!(curve.control_point(3), Some(Point3::new(3.0, 0.0, 0.0)));
        assert!(curve.control_point(4).is_none());

        if let Some(p) = curve.control_point_mut(3) {
            p.x = 6.0;
        }
        assert_relative_eq!(curve.point_at(1.0).x, 6.0, epsilon = 1e-12);
    }
}
