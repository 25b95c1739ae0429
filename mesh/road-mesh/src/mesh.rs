//! The generated road mesh.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::error::{RoadError, RoadResult};

/// An indexed triangle mesh with per-vertex normals.
///
/// `indices` is a flat list, three entries per triangle, wound so that the
/// right-hand rule points along the road's up side.
///
/// # Example
///
/// ```
/// use road_mesh::RoadMesh;
/// use nalgebra::Point3;
///
/// let mut mesh = RoadMesh::new();
/// mesh.positions.extend([
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
/// mesh.indices.extend([0, 1, 2]);
/// mesh.recompute_normals();
///
/// assert!(mesh.validate().is_ok());
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!((mesh.normals[0].z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoadMesh {
    /// Vertex positions in mesh space.
    pub positions: Vec<Point3<f64>>,
    /// Unit normal per vertex. Empty until [`Self::recompute_normals`].
    pub normals: Vec<Vector3<f64>>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl RoadMesh {
    /// Create an empty mesh.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create an empty mesh with room for the given counts.
    #[must_use]
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(triangles * 3),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of complete triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remove all geometry.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Unnormalized face normal of a triangle; its length is twice the area.
    ///
    /// Returns `None` if any index is out of range.
    #[must_use]
    pub fn face_normal(&self, triangle: [u32; 3]) -> Option<Vector3<f64>> {
        let a = self.positions.get(triangle[0] as usize)?;
        let b = self.positions.get(triangle[1] as usize)?;
        let c = self.positions.get(triangle[2] as usize)?;
        Some((b - a).cross(&(c - a)))
    }

    /// Bounding box of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }

    /// Check the index and normal buffers against the vertex buffer.
    ///
    /// # Errors
    ///
    /// - [`RoadError::MalformedIndices`] if the index count is not a multiple of 3
    /// - [`RoadError::IndexOutOfRange`] for the first index past the vertex buffer
    /// - [`RoadError::NormalCountMismatch`] if normals exist but do not match
    pub fn validate(&self) -> RoadResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(RoadError::MalformedIndices {
                len: self.indices.len(),
            });
        }

        let vertex_count = self.positions.len();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= vertex_count)
        {
            return Err(RoadError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }

        if !self.normals.is_empty() && self.normals.len() != vertex_count {
            return Err(RoadError::NormalCountMismatch {
                normals: self.normals.len(),
                vertices: vertex_count,
            });
        }

        Ok(())
    }

    /// Recompute vertex normals from the triangles.
    ///
    /// Each vertex gets the area-weighted sum of its incident face normals.
    /// Vertices with no incident area get `+Z`. Triangles with out-of-range
    /// indices are skipped.
    pub fn recompute_normals(&mut self) {
        let mut normals = vec![Vector3::zeros(); self.positions.len()];

        for triangle in self.triangles() {
            let Some(face) = self.face_normal(triangle) else {
                continue;
            };
            for index in triangle {
                normals[index as usize] += face;
            }
        }

        for normal in &mut normals {
            *normal = normal
                .try_normalize(f64::MIN_POSITIVE)
                .unwrap_or_else(Vector3::z);
        }

        self.normals = normals;
    }
}
