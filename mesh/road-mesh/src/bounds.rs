//! Axis-aligned bounding box of a road mesh.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box.
///
/// # Example
///
/// ```
/// use road_mesh::Aabb;
/// use nalgebra::Point3;
///
/// let points = [Point3::new(0.0, -1.5, 0.0), Point3::new(10.0, 1.5, 0.0)];
/// let aabb = Aabb::from_points(points.iter());
///
/// assert_eq!(aabb.size().x, 10.0);
/// assert!(aabb.contains(&Point3::new(5.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// An empty box (`min > max`), the identity for [`Self::expand_to_include`].
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point; empty for no points.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Whether the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to contain `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Whether `point` lies inside or on the boundary.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_box() {
        let aabb = Aabb::default();
        assert!(aabb.is_empty());
        assert!(!aabb.contains(&Point3::origin()));
        assert!(Aabb::from_points(std::iter::empty()).is_empty());
    }

    #[test]
    fn grows_to_fit() {
        let mut aabb = Aabb::empty();
        aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_relative_eq!(aabb.size(), Vector3::zeros());

        aabb.expand_to_include(&Point3::new(-1.0, 4.0, 3.0));
        assert_relative_eq!(aabb.size(), Vector3::new(2.0, 2.0, 0.0));
        assert_relative_eq!(aabb.center(), Point3::new(0.0, 3.0, 3.0));
        assert!(aabb.contains(&Point3::new(0.0, 3.0, 3.0)));
        assert!(!aabb.contains(&Point3::new(0.0, 3.0, 3.1)));
    }
}
