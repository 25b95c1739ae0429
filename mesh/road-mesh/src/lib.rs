//! Road strip extrusion.
//!
//! Sweeps a flat, fixed-width cross-section along every curve of a
//! [`CurveProvider`] and stitches the result into one indexed triangle mesh:
//!
//! 1. **Schedule** - pick curve parameters, either every `step` units of arc
//!    length or a fixed number of segments per curve ([`SamplingPolicy`])
//! 2. **Sample** - at each parameter, offset the curve point half the width
//!    to each side along `tangent × up` ([`CrossSectionSampler`])
//! 3. **Stitch** - join consecutive cross-sections into quads, two triangles
//!    each, wrapping closed curves back to their first cross-section
//! 4. **Publish** - validate indices, recompute normals and hand the mesh to
//!    a [`RenderSurface`]
//!
//! A [`RoadExtruder`] can also listen to a [`ChangeFeed`] and rebuild once per
//! [`update`](RoadExtruder::update) when any of its curves was edited.
//!
//! # Quick Start
//!
//! ```
//! use road_curves::{CurveSet, Polyline};
//! use road_mesh::{ExtrudeConfig, Identity, RoadExtruder};
//! use nalgebra::Point3;
//!
//! let mut curves = CurveSet::new();
//! curves.push(Polyline::from_segment(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//! ));
//!
//! let mut extruder = RoadExtruder::new(ExtrudeConfig::default().with_width(4.0)).unwrap();
//! let (mesh, report) = extruder.build_mesh(&curves, &Identity).unwrap();
//!
//! assert_eq!(report.quads, 2);
//! assert_eq!(mesh.triangle_count(), 4);
//! assert!(mesh.normals.iter().all(|n| n.z > 0.99));
//! ```
//!
//! # Conventions
//!
//! - Right-handed coordinates, `+Z` up
//! - `right = normalize(tangent × up)`; the `left` edge is `position + right · width / 2`
//! - Triangles are wound so their normals face the curve's up side
//! - Quads never share vertices, so normals are faceted
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for [`ExtrudeConfig`], [`RoadMesh`] and [`Aabb`]

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod bounds;
mod config;
mod error;
mod extruder;
mod feed;
mod frame;
mod mesh;
mod schedule;
mod sections;
mod strip;
mod surface;
mod transform;

pub use bounds::Aabb;
pub use config::{ExtrudeConfig, SamplingPolicy, Topology};
pub use error::{RoadError, RoadResult};
pub use extruder::{BuildReport, RoadExtruder};
pub use feed::{ChangeFeed, Subscription, SubscriptionId};
pub use frame::{CrossSection, CrossSectionSampler, FrameSource, cross_section, right_vector};
pub use mesh::RoadMesh;
pub use schedule::{MAX_SEGMENTS_PER_CURVE, MIN_LOOP_SEGMENTS, fill_schedule, segment_count};
pub use sections::{CrossSections, CurveSpan};
pub use strip::{QUAD_TRIANGLES, VERTICES_PER_QUAD, stitch};
pub use surface::{MeshSlot, RenderSurface};
pub use transform::{Identity, PointTransform};

pub use road_curves::{ChangeKind, CurveChange, CurveId, CurveProvider, CurveSample};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
