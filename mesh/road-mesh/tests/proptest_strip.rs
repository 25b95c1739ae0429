//! Property-based tests for road strip extrusion.
//!
//! Run with: cargo test -p road-mesh -- proptest

use nalgebra::{Point3, Vector3};
use proptest::prelude::*;
use road_curves::{CurveSet, Polyline};
use road_mesh::{ExtrudeConfig, Identity, RoadExtruder, Topology, VERTICES_PER_QUAD};

// =============================================================================
// Strategies
// =============================================================================

/// A point in a modest planar region, slightly lifted.
fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    (-200.0..200.0f64, -200.0..200.0f64, -5.0..5.0f64).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

/// A polyline whose consecutive points are at least a unit apart.
fn arb_polyline() -> impl Strategy<Value = Polyline> {
    prop::collection::vec(arb_point(), 2..8).prop_filter_map("coincident points", |points| {
        let separated = points.windows(2).all(|w| (w[1] - w[0]).norm() > 1.0);
        separated.then(|| Polyline::new(points).ok()).flatten()
    })
}

fn arb_curves() -> impl Strategy<Value = CurveSet<Polyline>> {
    prop::collection::vec(arb_polyline(), 0..5).prop_map(|lines| {
        let mut set = CurveSet::new();
        for line in lines {
            set.push(line);
        }
        set
    })
}

fn arb_width() -> impl Strategy<Value = f64> {
    0.1..10.0f64
}

fn arb_config() -> impl Strategy<Value = ExtrudeConfig> {
    let sampling = prop_oneof![
        (1.0..50.0f64).prop_map(|step| ExtrudeConfig::default().with_step(step)),
        (1u32..40).prop_map(|segments| ExtrudeConfig::default().with_resolution(segments)),
    ];
    let topology = prop_oneof![
        Just(Topology::Open),
        Just(Topology::Closed),
        Just(Topology::PerCurve)
    ];
    (sampling, topology, arb_width())
        .prop_map(|(config, topology, width)| config.with_topology(topology).with_width(width))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn proptest_indices_are_valid(curves in arb_curves(), config in arb_config()) {
        let mut ex = RoadExtruder::new(config).unwrap();
        let (mesh, report) = ex.build_mesh(&curves, &Identity).unwrap();

        prop_assert_eq!(mesh.indices.len() % 3, 0);
        prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
        prop_assert_eq!(mesh.normals.len(), mesh.vertex_count());
        prop_assert_eq!(mesh.vertex_count(), report.quads * VERTICES_PER_QUAD);
        prop_assert_eq!(mesh.triangle_count(), report.quads * 2);
    }

    #[test]
    fn proptest_sections_have_configured_width(curves in arb_curves(), config in arb_config()) {
        let mut ex = RoadExtruder::new(config).unwrap();
        ex.build_mesh(&curves, &Identity).unwrap();

        let sections = ex.cross_sections();
        prop_assert_eq!(sections.left().len(), sections.right().len());
        for i in 0..sections.len() {
            let section = sections.get(i).unwrap();
            prop_assert!((section.width() - config.width).abs() < 1e-9 * config.width.max(1.0));
        }
    }

    #[test]
    fn proptest_quads_match_schedule(curves in arb_curves(), config in arb_config()) {
        let mut ex = RoadExtruder::new(config).unwrap();
        let (_, report) = ex.build_mesh(&curves, &Identity).unwrap();

        let spans = ex.cross_sections().spans();
        prop_assert_eq!(spans.len(), report.curves);
        for span in spans {
            let expected = if span.closed { span.len } else { span.len - 1 };
            prop_assert_eq!(span.quad_count(), expected);
            prop_assert!(span.len >= 2);
        }
        prop_assert_eq!(report.closed_curves, spans.iter().filter(|s| s.closed).count());
    }

    #[test]
    fn proptest_arc_length_step_count(
        length in 0.0..500.0f64,
        step in 0.1..50.0f64,
        width in arb_width(),
    ) {
        let mut curves = CurveSet::new();
        curves.push(Polyline::from_segment(Point3::origin(), Point3::new(length, 0.0, 0.0)));

        let config = ExtrudeConfig::default()
            .with_step(step)
            .with_width(width)
            .with_topology(Topology::Open);
        let mut ex = RoadExtruder::new(config).unwrap();
        let (_, report) = ex.build_mesh(&curves, &Identity).unwrap();

        let expected = ((length / step).ceil() as usize).max(1);
        prop_assert_eq!(report.quads, expected);
        prop_assert_eq!(report.samples, expected + 1);

        // Last cross-section is at the very end of the curve.
        let last = ex.cross_sections().get(report.samples - 1).unwrap();
        prop_assert!((last.center().x - length).abs() < 1e-9 * length.max(1.0));
    }

    #[test]
    fn proptest_straight_roads_face_up(
        heading in 0.0..std::f64::consts::TAU,
        length in 1.0..300.0f64,
        width in arb_width(),
        step in 0.5..20.0f64,
    ) {
        let end = Point3::new(length * heading.cos(), length * heading.sin(), 0.0);
        let mut curves = CurveSet::new();
        curves.push(Polyline::from_segment(Point3::origin(), end));

        let config = ExtrudeConfig::default().with_step(step).with_width(width);
        let mut ex = RoadExtruder::new(config).unwrap();
        let (mesh, report) = ex.build_mesh(&curves, &Identity).unwrap();

        prop_assert_eq!(report.degenerate_frames, 0);
        for triangle in mesh.triangles() {
            let n = mesh.face_normal(triangle).unwrap();
            prop_assert!(n.dot(&Vector3::z()) > 0.0, "{:?} -> {:?}", triangle, n);
        }
        for n in &mesh.normals {
            prop_assert!((n.z - 1.0).abs() < 1e-9);
        }
    }
}
