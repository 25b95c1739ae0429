//! Stitching cross-sections into quad strips.

use tracing::trace;

use crate::error::{RoadError, RoadResult};
use crate::mesh::RoadMesh;
use crate::sections::{CrossSections, CurveSpan};

/// Triangle pattern for one quad, relative to its first vertex.
///
/// Quad vertices are laid out as `left[i-1], right[i-1], left[i], right[i]`.
pub const QUAD_TRIANGLES: [[u32; 3]; 2] = [[0, 2, 3], [3, 1, 0]];

/// Vertices appended per quad.
pub const VERTICES_PER_QUAD: usize = 4;

/// Append every span of `sections` to `mesh` as a quad strip.
///
/// Each quad gets four fresh vertices; nothing is shared between quads or
/// curves. Index offsets come from the vertex count already in `mesh`, so
/// existing geometry is left untouched. Normals are not computed here.
///
/// Returns the number of quads appended.
///
/// # Errors
///
/// Returns [`RoadError::TooManyVertices`] if the mesh would outgrow `u32`
/// indices. The mesh may hold a partial strip in that case.
pub fn stitch(sections: &CrossSections, mesh: &mut RoadMesh) -> RoadResult<usize> {
    let quads = sections.quad_count();
    let needed = mesh.vertex_count() + quads * VERTICES_PER_QUAD;
    if u32::try_from(needed).is_err() {
        return Err(RoadError::TooManyVertices(needed));
    }

    mesh.positions.reserve(quads * VERTICES_PER_QUAD);
    mesh.indices.reserve(quads * 6);

    for span in sections.spans() {
        stitch_span(sections, span, mesh)?;
    }

    Ok(quads)
}

fn stitch_span(sections: &CrossSections, span: &CurveSpan, mesh: &mut RoadMesh) -> RoadResult<()> {
    let left = sections.left();
    let right = sections.right();

    trace!(
        curve = span.curve,
        start = span.start,
        len = span.len,
        closed = span.closed,
        "stitching span"
    );

    for (prev, next) in span.quad_pairs() {
        let base = u32::try_from(mesh.vertex_count())
            .map_err(|_| RoadError::TooManyVertices(mesh.vertex_count()))?;

        mesh.positions
            .extend([left[prev], right[prev], left[next], right[next]]);

        for triangle in QUAD_TRIANGLES {
            mesh.indices.extend(triangle.map(|local| base + local));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::CrossSection;
    use nalgebra::{Point3, Vector3};

    /// Straight strip along +X, `n` cross-sections one unit apart.
    fn straight(sections: &mut CrossSections, curve: usize, n: usize, y: f64, closed: bool) {
        sections.begin_curve(curve, closed);
        for i in 0..n {
            let x = i as f64;
            sections.push(CrossSection::new(
                Point3::new(x, y - 1.0, 0.0),
                Point3::new(x, y + 1.0, 0.0),
            ));
        }
    }

    #[test]
    fn open_strip_layout() {
        let mut sections = CrossSections::new();
        straight(&mut sections, 0, 3, 0.0, false);

        let mut mesh = RoadMesh::new();
        assert_eq!(stitch(&sections, &mut mesh).unwrap(), 2);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.indices, vec![0, 2, 3, 3, 1, 0, 4, 6, 7, 7, 5, 4]);
        assert!(mesh.validate().is_ok());

        // Second quad starts at the shared cross-section, duplicated.
        assert_eq!(mesh.positions[2], mesh.positions[4]);
        assert_eq!(mesh.positions[3], mesh.positions[5]);
    }

    #[test]
    fn faces_point_up() {
        let mut sections = CrossSections::new();
        straight(&mut sections, 0, 4, 0.0, false);

        let mut mesh = RoadMesh::new();
        stitch(&sections, &mut mesh).unwrap();

        for triangle in mesh.triangles() {
            let n = mesh.face_normal(triangle).unwrap();
            assert!(n.dot(&Vector3::z()) > 0.0, "{triangle:?}");
        }
    }

    #[test]
    fn closed_strip_wraps_to_start() {
        let mut sections = CrossSections::new();
        straight(&mut sections, 0, 4, 0.0, true);

        let mut mesh = RoadMesh::new();
        assert_eq!(stitch(&sections, &mut mesh).unwrap(), 4);

        let last = mesh.vertex_count() - VERTICES_PER_QUAD;
        assert_eq!(mesh.positions[last + 2], mesh.positions[0]);
        assert_eq!(mesh.positions[last + 3], mesh.positions[1]);
    }

    #[test]
    fn curves_get_separate_blocks() {
        let mut sections = CrossSections::new();
        straight(&mut sections, 0, 3, 0.0, false);
        straight(&mut sections, 1, 2, 10.0, false);

        let mut mesh = RoadMesh::new();
        assert_eq!(stitch(&sections, &mut mesh).unwrap(), 3);
        assert_eq!(mesh.vertex_count(), 12);

        let second: Vec<_> = mesh.triangles().skip(4).collect();
        assert_eq!(second.len(), 2);
        assert!(second.iter().flatten().all(|&i| (8..12).contains(&i)));
    }

    #[test]
    fn offsets_continue_from_existing_vertices() {
        let mut sections = CrossSections::new();
        straight(&mut sections, 0, 2, 0.0, false);

        let mut mesh = RoadMesh::new();
        mesh.positions.push(Point3::origin());
        stitch(&sections, &mut mesh).unwrap();

        assert_eq!(mesh.indices, vec![1, 3, 4, 4, 2, 1]);
    }

    #[test]
    fn single_section_makes_nothing() {
        let mut sections = CrossSections::new();
        straight(&mut sections, 0, 1, 0.0, false);

        let mut mesh = RoadMesh::new();
        assert_eq!(stitch(&sections, &mut mesh).unwrap(), 0);
        assert!(mesh.is_empty());
    }
}
