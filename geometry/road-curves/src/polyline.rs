//! Polyline (piecewise linear) curves.
//!
//! The simplest road centerline: a sequence of control points joined by
//! straight segments, parameterized by arc length.

use nalgebra::{Point3, Vector3};

use crate::{CurveError, Result, RoadCurve};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A piecewise linear curve defined by a sequence of control points.
///
/// # Parameterization
///
/// `t ∈ [0, 1]` maps to the polyline by arc length, so `t = 0.5` is the point
/// at half the total length. A closed polyline adds an implicit segment from
/// the last control point back to the first.
///
/// # Example
///
/// ```
/// use road_curves::{Polyline, RoadCurve};
/// use nalgebra::Point3;
///
/// let polyline = Polyline::new(vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
/// ])
/// .unwrap();
///
/// assert!((polyline.arc_length() - 2.0).abs() < 1e-10);
///
/// let mid = polyline.point_at(0.5);
/// assert!((mid.x - 1.0).abs() < 1e-10);
/// assert!(mid.y.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "PolylineRepr", into = "PolylineRepr")
)]
pub struct Polyline {
    points: Vec<Point3<f64>>,
    closed: bool,
    up: Vector3<f64>,
    /// Cumulative arc length at the start of each segment, plus the total.
    cumulative: Vec<f64>,
}

/// Serialized form: control points only, validated and measured on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct PolylineRepr {
    points: Vec<Point3<f64>>,
    #[serde(default)]
    closed: bool,
    #[serde(default = "default_up")]
    up: Vector3<f64>,
}

#[cfg(feature = "serde")]
fn default_up() -> Vector3<f64> {
    Vector3::z()
}

#[cfg(feature = "serde")]
impl From<Polyline> for PolylineRepr {
    fn from(polyline: Polyline) -> Self {
        Self {
            points: polyline.points,
            closed: polyline.closed,
            up: polyline.up,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<PolylineRepr> for Polyline {
    type Error = CurveError;

    fn try_from(repr: PolylineRepr) -> Result<Self> {
        let polyline = if repr.closed {
            Self::closed(repr.points)?
        } else {
            Self::new(repr.points)?
        };
        Ok(polyline.with_up(repr.up))
    }
}

impl Polyline {
    /// Create an open polyline.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] if fewer than 2 points.
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 2 {
            return Err(CurveError::insufficient_points(2, points.len()));
        }

        let mut polyline = Self {
            points,
            closed: false,
            up: Vector3::z(),
            cumulative: Vec::new(),
        };
        polyline.recompute_lengths();
        Ok(polyline)
    }

    /// Create a closed polyline (a loop through every point).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] if fewer than 3 points.
    pub fn closed(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(CurveError::insufficient_points(3, points.len()));
        }

        let mut polyline = Self {
            points,
            closed: true,
            up: Vector3::z(),
            cumulative: Vec::new(),
        };
        polyline.recompute_lengths();
        Ok(polyline)
    }

    /// Create a polyline from a single segment.
    #[must_use]
    pub fn from_segment(start: Point3<f64>, end: Point3<f64>) -> Self {
        let mut polyline = Self {
            points: vec![start, end],
            closed: false,
            up: Vector3::z(),
            cumulative: Vec::new(),
        };
        polyline.recompute_lengths();
        polyline
    }

    /// Use a different up vector for the whole curve.
    #[must_use]
    pub fn with_up(mut self, up: Vector3<f64>) -> Self {
        self.up = up;
        self
    }

    /// Control points.
    #[must_use]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Number of segments, including the closing one for loops.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Move the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnknownPoint`] if `index` is out of range.
    pub fn set_point(&mut self, index: usize, point: Point3<f64>) -> Result<()> {
        let count = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(CurveError::UnknownPoint { index, count })?;
        *slot = point;
        self.recompute_lengths();
        Ok(())
    }

    /// Insert a control point before `index` (`index == len` appends).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnknownPoint`] if `index > len`.
    pub fn insert_point(&mut self, index: usize, point: Point3<f64>) -> Result<()> {
        let count = self.points.len();
        if index > count {
            return Err(CurveError::UnknownPoint { index, count });
        }
        self.points.insert(index, point);
        self.recompute_lengths();
        Ok(())
    }

    /// Remove the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnknownPoint`] if out of range, or
    /// [`CurveError::InsufficientPoints`] if the curve would become too short.
    pub fn remove_point(&mut self, index: usize) -> Result<Point3<f64>> {
        let count = self.points.len();
        if index >= count {
            return Err(CurveError::UnknownPoint { index, count });
        }
        let required = if self.closed { 3 } else { 2 };
        if count <= required {
            return Err(CurveError::insufficient_points(required, count - 1));
        }
        let removed = self.points.remove(index);
        self.recompute_lengths();
        Ok(removed)
    }

    /// Toggle between open and closed.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InsufficientPoints`] when closing fewer than 3
    /// points.
    pub fn set_closed(&mut self, closed: bool) -> Result<()> {
        if closed && self.points.len() < 3 {
            return Err(CurveError::insufficient_points(3, self.points.len()));
        }
        self.closed = closed;
        self.recompute_lengths();
        Ok(())
    }

    fn segment_endpoints(&self, index: usize) -> (Point3<f64>, Point3<f64>) {
        let next = (index + 1) % self.points.len();
        (self.points[index], self.points[next])
    }

    fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn recompute_lengths(&mut self) {
        let segments = self.num_segments();
        self.cumulative.clear();
        self.cumulative.reserve(segments + 1);

        let mut total = 0.0;
        self.cumulative.push(total);
        for i in 0..segments {
            let (a, b) = self.segment_endpoints(i);
            total += (b - a).norm();
            self.cumulative.push(total);
        }
    }

    /// Segment containing arc length `arc`, and the local parameter within it.
    fn segment_at_arc(&self, arc: f64) -> (usize, f64) {
        let segments = self.num_segments();
        let total = self.total_length();
        if arc <= 0.0 || total <= 0.0 {
            return (0, 0.0);
        }
        if arc >= total {
            return (segments - 1, 1.0);
        }

        // First cumulative entry strictly greater than arc marks the segment end.
        let end = self.cumulative.partition_point(|&c| c <= arc);
        let seg = end.saturating_sub(1).min(segments - 1);
        let seg_start = self.cumulative[seg];
        let seg_len = self.cumulative[seg + 1] - seg_start;

        let local_t = if seg_len > 1e-12 {
            (arc - seg_start) / seg_len
        } else {
            0.0
        };
        (seg, local_t)
    }
}

impl RoadCurve for Polyline {
    fn point_at(&self, t: f64) -> Point3<f64> {
        let (seg, local_t) = self.segment_at_arc(t * self.total_length());
        let (p0, p1) = self.segment_endpoints(seg);
        p0 + (p1 - p0) * local_t
    }

    fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let (seg, _) = self.segment_at_arc(t * self.total_length());
        let (p0, p1) = self.segment_endpoints(seg);
        let dir = p1 - p0;

        // Arc-length parameterization: speed equals total length.
        dir.try_normalize(1e-12)
            .map_or_else(Vector3::zeros, |unit| unit * self.total_length())
    }

    fn up_at(&self, _t: f64) -> Vector3<f64> {
        self.up
    }

    fn arc_length(&self) -> f64 {
        self.total_length()
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
