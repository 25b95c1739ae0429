//! Destinations for finished meshes.

use crate::mesh::RoadMesh;

/// Receives each finished road mesh.
///
/// A surface only ever sees complete, validated meshes; a failed build does
/// not call it.
pub trait RenderSurface {
    /// Replace the displayed mesh.
    fn replace_mesh(&mut self, mesh: RoadMesh);
}

impl<F: FnMut(RoadMesh)> RenderSurface for F {
    fn replace_mesh(&mut self, mesh: RoadMesh) {
        self(mesh);
    }
}

/// In-memory surface holding the latest mesh.
///
/// `generation` counts replacements, so callers can tell whether a rebuild
/// reached the surface.
///
/// # Example
///
/// ```
/// use road_mesh::{MeshSlot, RenderSurface, RoadMesh};
///
/// let mut slot = MeshSlot::new();
/// assert_eq!(slot.generation(), 0);
///
/// slot.replace_mesh(RoadMesh::new());
/// assert_eq!(slot.generation(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshSlot {
    mesh: RoadMesh,
    generation: u64,
}

impl MeshSlot {
    /// Create an empty slot at generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mesh.
    #[must_use]
    pub const fn mesh(&self) -> &RoadMesh {
        &self.mesh
    }

    /// Number of meshes received so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Take the current mesh out, leaving an empty one.
    pub fn take(&mut self) -> RoadMesh {
        std::mem::take(&mut self.mesh)
    }
}

impl RenderSurface for MeshSlot {
    fn replace_mesh(&mut self, mesh: RoadMesh) {
        self.mesh = mesh;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn slot_replaces_and_counts() {
        let mut slot = MeshSlot::new();
        let mut mesh = RoadMesh::new();
        mesh.positions.push(Point3::origin());

        slot.replace_mesh(mesh.clone());
        slot.replace_mesh(mesh);
        assert_eq!(slot.generation(), 2);
        assert_eq!(slot.mesh().vertex_count(), 1);

        let taken = slot.take();
        assert_eq!(taken.vertex_count(), 1);
        assert!(slot.mesh().is_empty());
        assert_eq!(slot.generation(), 2);
    }

    #[test]
    fn closures_are_surfaces() {
        let mut received = Vec::new();
        {
            let mut surface = |mesh: RoadMesh| received.push(mesh.vertex_count());
            surface.replace_mesh(RoadMesh::new());
        }
        assert_eq!(received, vec![0]);
    }
}
