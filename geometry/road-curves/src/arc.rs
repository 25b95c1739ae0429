//! Arc and circle curves.
//!
//! Evaluated directly with trigonometry. The plane normal doubles as the up
//! vector, which makes these the natural centerlines for flat curved roads
//! and roundabouts.

use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};

use crate::{CurveError, Result, RoadCurve};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A circular arc in 3D space.
///
/// Traced counter-clockwise when viewed from the direction of the normal
/// for a positive sweep.
///
/// # Example
///
/// ```
/// use road_curves::{Arc, RoadCurve};
/// use nalgebra::{Point3, Vector3};
/// use std::f64::consts::FRAC_PI_2;
///
/// let arc = Arc::new(Point3::origin(), 10.0, 0.0, FRAC_PI_2, Vector3::z()).unwrap();
///
/// let start = arc.point_at(0.0);
/// assert!((start.x - 10.0).abs() < 1e-10);
///
/// let end = arc.point_at(1.0);
/// assert!((end.y - 10.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ArcRepr", into = "ArcRepr"))]
pub struct Arc {
    center: Point3<f64>,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    normal: Vector3<f64>,
    x_axis: Vector3<f64>,
    y_axis: Vector3<f64>,
}

impl Arc {
    /// Create an arc from center, radius, start angle, sweep and plane normal.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidRadius`] for a non-positive radius,
    /// [`CurveError::InvalidSweep`] for a zero or non-finite sweep, and
    /// [`CurveError::Degenerate`] for a zero normal.
    pub fn new(
        center: Point3<f64>,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        normal: Vector3<f64>,
    ) -> Result<Self> {
        if radius <= 0.0 || !radius.is_finite() {
            return Err(CurveError::InvalidRadius(radius));
        }
        if sweep_angle == 0.0 || !sweep_angle.is_finite() {
            return Err(CurveError::InvalidSweep(sweep_angle));
        }
        let normal = normal
            .try_normalize(1e-12)
            .ok_or_else(|| CurveError::degenerate("arc plane normal is zero"))?;
        let (x_axis, y_axis) = plane_axes(&normal);

        Ok(Self {
            center,
            radius,
            start_angle,
            sweep_angle,
            normal,
            x_axis,
            y_axis,
        })
    }

    /// Center point.
    #[must_use]
    pub const fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Signed sweep angle in radians.
    #[must_use]
    pub const fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + t * self.sweep_angle
    }
}

impl RoadCurve for Arc {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let angle = self.angle_at(t);
        self.center + (self.x_axis * angle.cos() + self.y_axis * angle.sin()) * self.radius
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let angle = self.angle_at(t);
        (self.y_axis * angle.cos() - self.x_axis * angle.sin()) * (self.radius * self.sweep_angle)
    }

    fn up_at(&self, _t: f64) -> Vector3<f64> {
        self.normal
    }

    fn arc_length(&self) -> f64 {
        self.radius * self.sweep_angle.abs()
    }

    fn is_closed(&self) -> bool {
        (self.sweep_angle.abs() - TAU).abs() < 1e-12
    }
}

/// A full circle, always closed.
///
/// # Example
///
/// ```
/// use road_curves::{Circle, RoadCurve};
/// use nalgebra::{Point3, Vector3};
///
/// let ring = Circle::new(Point3::origin(), 5.0, Vector3::z()).unwrap();
/// assert!(ring.is_closed());
/// assert!((ring.arc_length() - 10.0 * std::f64::consts::PI).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CircleRepr", into = "CircleRepr"))]
pub struct Circle {
    arc: Arc,
}

impl Circle {
    /// Create a circle around `center` in the plane with the given normal.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Arc::new`].
    pub fn new(center: Point3<f64>, radius: f64, normal: Vector3<f64>) -> Result<Self> {
        Ok(Self {
            arc: Arc::new(center, radius, 0.0, TAU, normal)?,
        })
    }

    /// Radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.arc.radius
    }
}

impl RoadCurve for Circle {
    fn point_at(&self, t: f64) -> Point3<f64> {
        self.arc.point_at(t)
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        self.arc.derivative_at(t)
    }

    fn up_at(&self, t: f64) -> Vector3<f64> {
        self.arc.up_at(t)
    }

    fn arc_length(&self) -> f64 {
        self.arc.arc_length()
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// Serialized arc: the constructor arguments. Plane axes are derived on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct ArcRepr {
    center: Point3<f64>,
    radius: f64,
    #[serde(default)]
    start_angle: f64,
    sweep_angle: f64,
    normal: Vector3<f64>,
}

#[cfg(feature = "serde")]
impl From<Arc> for ArcRepr {
    fn from(arc: Arc) -> Self {
        Self {
            center: arc.center,
            radius: arc.radius,
            start_angle: arc.start_angle,
            sweep_angle: arc.sweep_angle,
            normal: arc.normal,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<ArcRepr> for Arc {
    type Error = CurveError;

    fn try_from(repr: ArcRepr) -> Result<Self> {
        Self::new(
            repr.center,
            repr.radius,
            repr.start_angle,
            repr.sweep_angle,
            repr.normal,
        )
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct CircleRepr {
    center: Point3<f64>,
    radius: f64,
    normal: Vector3<f64>,
}

#[cfg(feature = "serde")]
impl From<Circle> for CircleRepr {
    fn from(circle: Circle) -> Self {
        Self {
            center: circle.arc.center,
            radius: circle.arc.radius,
            normal: circle.arc.normal,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<CircleRepr> for Circle {
    type Error = CurveError;

    fn try_from(repr: CircleRepr) -> Result<Self> {
        Self::new(repr.center, repr.radius, repr.normal)
    }
}

/// Orthonormal in-plane axes for a unit normal, with `x × y = normal`.
///
/// A `+Z` normal yields `x = +X`, `y = +Y`.
fn plane_axes(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let reference = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };

    let x_axis = (reference - normal * normal.dot(&reference)).normalize();
    let y_axis = normal.cross(&x_axis);
    (x_axis, y_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn quarter_arc_in_xy_plane() {
        let arc = Arc::new(Point3::origin(), 2.0, 0.0, FRAC_PI_2, Vector3::z()).unwrap();

        assert_relative_eq!(arc.point_at(0.0).coords, Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(arc.point_at(1.0).coords, Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(arc.tangent_at(0.0), Vector3::y(), epsilon = 1e-12);
        assert_relative_eq!(arc.arc_length(), PI, epsilon = 1e-12);
        assert!(!arc.is_closed());
    }

    #[test]
    fn derivative_matches_length() {
        let arc = Arc::new(Point3::origin(), 3.0, 0.5, -PI, Vector3::z()).unwrap();
        // Constant speed equals total length for a uniform parameterization.
        assert_relative_eq!(arc.derivative_at(0.3).norm(), arc.arc_length(), epsilon = 1e-12);
    }

    #[test]
    fn invalid_arcs() {
        assert!(Arc::new(Point3::origin(), 0.0, 0.0, PI, Vector3::z()).is_err());
        assert!(Arc::new(Point3::origin(), 1.0, 0.0, 0.0, Vector3::z()).is_err());
        assert!(Arc::new(Point3::origin(), 1.0, 0.0, PI, Vector3::zeros()).is_err());
    }

    #[test]
    fn circle_is_closed_loop() {
        let circle = Circle::new(Point3::new(1.0, 1.0, 0.0), 1.0, Vector3::z()).unwrap();
        assert!(circle.is_closed());
        assert_relative_eq!(
            circle.point_at(0.0).coords,
            circle.point_at(1.0).coords,
            epsilon = 1e-12
        );
        assert_relative_eq!(circle.up_at(0.5), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn tilted_plane_axes_are_orthonormal() {
        let normal = Vector3::new(1.0, 0.0, 1.0).normalize();
        let (x, y) = plane_axes(&normal);
        assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&normal), 0.0, epsilon = 1e-12);
        assert_relative_eq!(x.cross(&y), normal, epsilon = 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_goes_through_constructor() {
        let json = r#"{ "center": [0.0, 0.0, 0.0], "radius": 10.0, "sweep_angle": 1.5707963267948966, "normal": [0.0, 0.0, 2.0] }"#;
        let arc: Arc = serde_json::from_str(json).unwrap();
        assert_relative_eq!(arc.up_at(0.0), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(arc.point_at(1.0), Point3::new(0.0, 10.0, 0.0), epsilon = 1e-9);

        let bad_radius = r#"{ "center": [0.0, 0.0, 0.0], "radius": -1.0, "sweep_angle": 1.0, "normal": [0.0, 0.0, 1.0] }"#;
        assert!(serde_json::from_str::<Arc>(bad_radius).is_err());

        let ring = Circle::new(Point3::new(1.0, 2.0, 0.0), 5.0, Vector3::z()).unwrap();
        let text = serde_json::to_string(&ring).unwrap();
        assert!(!text.contains("x_axis"));
        assert_eq!(serde_json::from_str::<Circle>(&text).unwrap(), ring);

        let flat = r#"{ "center": [0.0, 0.0, 0.0], "radius": 3.0, "normal": [0.0, 0.0, 0.0] }"#;
        assert!(serde_json::from_str::<Circle>(flat).is_err());
    }
}
