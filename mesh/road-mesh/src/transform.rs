//! Mapping curve-space points into mesh-local space.

use nalgebra::{Affine3, Isometry3, Point3, Similarity3};

/// Maps a point from curve space into the mesh's local space.
///
/// Applied to each edge point after the cross-section is computed, so width
/// is measured in curve space.
pub trait PointTransform {
    /// Transform one point.
    fn to_mesh_space(&self, point: &Point3<f64>) -> Point3<f64>;
}

/// Curve space and mesh space coincide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl PointTransform for Identity {
    #[inline]
    fn to_mesh_space(&self, point: &Point3<f64>) -> Point3<f64> {
        *point
    }
}

impl PointTransform for Isometry3<f64> {
    #[inline]
    fn to_mesh_space(&self, point: &Point3<f64>) -> Point3<f64> {
        self * point
    }
}

impl PointTransform for Similarity3<f64> {
    #[inline]
    fn to_mesh_space(&self, point: &Point3<f64>) -> Point3<f64> {
        self * point
    }
}

impl PointTransform for Affine3<f64> {
    #[inline]
    fn to_mesh_space(&self, point: &Point3<f64>) -> Point3<f64> {
        self * point
    }
}

impl<T: PointTransform + ?Sized> PointTransform for &T {
    #[inline]
    fn to_mesh_space(&self, point: &Point3<f64>) -> Point3<f64> {
        (**self).to_mesh_space(point)
    }
}
