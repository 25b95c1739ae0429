//! The road extruder: sampling, stitching and rebuild scheduling.

use road_curves::{CurveChange, CurveProvider};
use tracing::{debug, info, warn};

use crate::config::{ExtrudeConfig, SamplingPolicy};
use crate::error::{RoadError, RoadResult};
use crate::feed::{ChangeFeed, Subscription};
use crate::frame::{CrossSection, CrossSectionSampler};
use crate::mesh::RoadMesh;
use crate::schedule::{fill_schedule, segment_count};
use crate::sections::CrossSections;
use crate::strip::{VERTICES_PER_QUAD, stitch};
use crate::surface::RenderSurface;
use crate::transform::PointTransform;

/// Statistics for one successful build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildReport {
    /// Curves sampled.
    pub curves: usize,
    /// Curves stitched as closed loops.
    pub closed_curves: usize,
    /// Cross-sections sampled over all curves.
    pub samples: usize,
    /// Quads stitched.
    pub quads: usize,
    /// Vertices in the mesh.
    pub vertices: usize,
    /// Triangles in the mesh.
    pub triangles: usize,
    /// Samples whose frame needed a fallback.
    pub degenerate_frames: usize,
}

/// Extrudes a fixed-width road strip along every curve of a provider.
///
/// The extruder keeps its cross-section buffers between builds (see
/// [`Self::cross_sections`]) and, once [enabled](Self::enable) on a
/// [`ChangeFeed`], collects change notifications until the next
/// [`Self::update`] rebuilds the mesh once.
///
/// # Example
///
/// ```
/// use road_curves::{CurveSet, Polyline};
/// use road_mesh::{ExtrudeConfig, Identity, MeshSlot, RoadExtruder};
/// use nalgebra::Point3;
///
/// let mut curves = CurveSet::new();
/// curves.push(Polyline::from_segment(Point3::origin(), Point3::new(10.0, 0.0, 0.0)));
///
/// let config = ExtrudeConfig::default().with_width(4.0).with_step(5.0);
/// let mut extruder = RoadExtruder::new(config).unwrap();
/// let mut slot = MeshSlot::new();
///
/// let report = extruder.regenerate(&curves, &Identity, &mut slot).unwrap();
/// assert_eq!(report.samples, 3);
/// assert_eq!(slot.mesh().vertex_count(), 8);
/// assert_eq!(slot.mesh().indices.len(), 12);
/// ```
#[derive(Debug)]
pub struct RoadExtruder {
    config: ExtrudeConfig,
    sections: CrossSections,
    schedule: Vec<f64>,
    subscription: Option<Subscription>,
    dirty: bool,
}

impl RoadExtruder {
    /// Create an extruder with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the configuration error from [`ExtrudeConfig::validate`].
    pub fn new(config: ExtrudeConfig) -> RoadResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sections: CrossSections::new(),
            schedule: Vec::new(),
            subscription: None,
            dirty: false,
        })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ExtrudeConfig {
        &self.config
    }

    /// Replace the configuration and schedule a rebuild.
    ///
    /// # Errors
    ///
    /// Returns the configuration error and keeps the old configuration if
    /// `config` is invalid.
    pub fn set_config(&mut self, config: ExtrudeConfig) -> RoadResult<()> {
        config.validate()?;
        if config != self.config {
            self.config = config;
            self.dirty = true;
        }
        Ok(())
    }

    /// Cross-sections from the most recent successful build, in mesh space.
    ///
    /// Empty after a failed build.
    #[must_use]
    pub const fn cross_sections(&self) -> &CrossSections {
        &self.sections
    }

    /// Sample every curve and stitch the result into a new mesh.
    ///
    /// Edge points are mapped through `space` before they are stored. The
    /// returned mesh has been validated and has normals.
    ///
    /// # Errors
    ///
    /// - [`RoadError::InvalidCurveLength`] if the provider reports a bad length
    /// - [`RoadError::NonFiniteSample`] if an edge point is not finite
    /// - [`RoadError::TooManySegments`] / [`RoadError::TooManyVertices`] if
    ///   the mesh would be too large
    /// - [`RoadError::IndexOutOfRange`] / [`RoadError::MalformedIndices`] if
    ///   the stitched mesh fails validation
    pub fn build_mesh<P, T>(
        &mut self,
        provider: &P,
        space: &T,
    ) -> RoadResult<(RoadMesh, BuildReport)>
    where
        P: CurveProvider + ?Sized,
        T: PointTransform + ?Sized,
    {
        let result = self.try_build(provider, space);
        if result.is_err() {
            self.sections.clear();
        }
        result
    }

    fn try_build<P, T>(&mut self, provider: &P, space: &T) -> RoadResult<(RoadMesh, BuildReport)>
    where
        P: CurveProvider + ?Sized,
        T: PointTransform + ?Sized,
    {
        self.sections.clear();

        let mut report = BuildReport {
            curves: provider.curve_count(),
            ..BuildReport::default()
        };
        let sampler = CrossSectionSampler::new(provider, &self.config);

        for curve in 0..report.curves {
            let closed = self.config.topology.is_closed(provider.is_closed(curve));
            let length = match self.config.sampling {
                SamplingPolicy::ArcLengthStep { .. } => provider.length(curve),
                SamplingPolicy::Resolution { .. } => 0.0,
            };
            let segments = segment_count(self.config.sampling, curve, length)?;
            let segments = fill_schedule(segments, closed, &mut self.schedule);

            debug!(
                curve,
                id = %provider.curve_id(curve),
                length,
                segments,
                closed,
                "scheduled curve"
            );

            self.sections.begin_curve(curve, closed);
            for &t in &self.schedule {
                let (section, source) = sampler.sample(curve, t);
                if source.is_degenerate() {
                    report.degenerate_frames += 1;
                }

                let section = CrossSection::new(
                    space.to_mesh_space(&section.left),
                    space.to_mesh_space(&section.right),
                );
                if !section.is_finite() {
                    return Err(RoadError::NonFiniteSample { curve, t });
                }
                self.sections.push(section);
            }

            if closed {
                report.closed_curves += 1;
            }
        }

        report.samples = self.sections.len();

        let quads = self.sections.quad_count();
        let mut mesh = RoadMesh::with_capacity(quads * VERTICES_PER_QUAD, quads * 2);
        report.quads = stitch(&self.sections, &mut mesh)?;
        mesh.validate()?;
        mesh.recompute_normals();

        report.vertices = mesh.vertex_count();
        report.triangles = mesh.triangle_count();

        if report.degenerate_frames > 0 {
            warn!(
                count = report.degenerate_frames,
                samples = report.samples,
                "degenerate curve frames replaced with fallback axes"
            );
        }
        info!(
            curves = report.curves,
            vertices = report.vertices,
            triangles = report.triangles,
            "built road mesh"
        );

        Ok((mesh, report))
    }

    /// Build now and hand the mesh to `surface`.
    ///
    /// On failure the surface is not touched and keeps its previous mesh.
    /// A pending rebuild is considered served either way.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::build_mesh`].
    pub fn regenerate<P, T, S>(
        &mut self,
        provider: &P,
        space: &T,
        surface: &mut S,
    ) -> RoadResult<BuildReport>
    where
        P: CurveProvider + ?Sized,
        T: PointTransform + ?Sized,
        S: RenderSurface + ?Sized,
    {
        self.dirty = false;
        match self.build_mesh(provider, space) {
            Ok((mesh, report)) => {
                surface.replace_mesh(mesh);
                Ok(report)
            }
            Err(err) => {
                warn!(error = %err, "road mesh rebuild rejected, keeping previous mesh");
                Err(err)
            }
        }
    }

    /// Start listening to `feed`. Does nothing if already enabled.
    ///
    /// Edits made while disabled were missed, so a rebuild is scheduled.
    pub fn enable(&mut self, feed: &mut ChangeFeed) {
        if self.subscription.is_none() {
            self.subscription = Some(feed.subscribe());
            self.dirty = true;
        }
    }

    /// Stop listening to `feed`. Does nothing if not enabled.
    ///
    /// Notifications still queued are dropped.
    pub fn disable(&mut self, feed: &mut ChangeFeed) {
        if let Some(subscription) = self.subscription.take() {
            feed.unsubscribe(subscription.id());
        }
    }

    /// Whether the extruder is subscribed to a feed.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Handle one change notification.
    ///
    /// Marks the extruder dirty and returns `true` if `change` concerns a
    /// curve of `provider`; other curves are ignored.
    pub fn notify<P>(&mut self, change: &CurveChange, provider: &P) -> bool
    where
        P: CurveProvider + ?Sized,
    {
        let owned = provider.owns(change.curve);
        if owned {
            self.dirty = true;
        }
        owned
    }

    /// Request a rebuild on the next [`Self::update`].
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a rebuild is pending.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drain pending notifications and rebuild once if any concerned
    /// `provider`.
    ///
    /// Returns `Ok(None)` when nothing needed rebuilding.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::regenerate`]; the surface keeps its previous
    /// mesh and the extruder is not left dirty.
    pub fn update<P, T, S>(
        &mut self,
        provider: &P,
        space: &T,
        surface: &mut S,
    ) -> RoadResult<Option<BuildReport>>
    where
        P: CurveProvider + ?Sized,
        T: PointTransform + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let mut received = 0usize;
        let mut relevant = 0usize;
        if let Some(subscription) = &self.subscription {
            for change in subscription.drain() {
                received += 1;
                if provider.owns(change.curve) {
                    relevant += 1;
                }
            }
        }
        if relevant > 0 {
            self.dirty = true;
        }
        if received > 0 {
            debug!(received, relevant, "drained curve changes");
        }

        if !self.dirty {
            return Ok(None);
        }
        self.regenerate(provider, space, surface).map(Some)
    }
}
