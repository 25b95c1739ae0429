//! Cross-section buffers shared between sampling and stitching.

use nalgebra::Point3;

use crate::frame::CrossSection;
use crate::schedule::MIN_LOOP_SEGMENTS;

/// The block of cross-sections belonging to one curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSpan {
    /// Curve index in the provider.
    pub curve: usize,
    /// Index of the curve's first cross-section.
    pub start: usize,
    /// Number of cross-sections.
    pub len: usize,
    /// Whether the strip wraps from the last cross-section to the first.
    pub closed: bool,
}

impl CurveSpan {
    /// Number of quads this span stitches into.
    ///
    /// A closed span needs at least three cross-sections to wrap; with two
    /// it is stitched as an open strip.
    #[must_use]
    pub const fn quad_count(&self) -> usize {
        if self.len < 2 {
            0
        } else if self.closed && self.len >= MIN_LOOP_SEGMENTS {
            self.len
        } else {
            self.len - 1
        }
    }

    /// Consecutive cross-section index pairs, one per quad.
    ///
    /// Closed spans end with the pair `(last, first)`.
    pub fn quad_pairs(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let start = self.start;
        let len = self.len;
        let quads = self.quad_count();
        (0..quads).map(move |i| (start + i, start + (i + 1) % len))
    }
}

/// Left and right edge points for every sampled curve, index-aligned.
///
/// `left()[i]` and `right()[i]` always come from the same curve parameter.
/// Curves are stored back to back; [`CurveSpan`]s record where each begins.
#[derive(Debug, Clone, Default)]
pub struct CrossSections {
    left: Vec<Point3<f64>>,
    right: Vec<Point3<f64>>,
    spans: Vec<CurveSpan>,
}

impl CrossSections {
    /// Create empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all cross-sections and spans, keeping the allocations.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.spans.clear();
    }

    /// Start a new curve; following pushes belong to it.
    pub fn begin_curve(&mut self, curve: usize, closed: bool) {
        self.spans.push(CurveSpan {
            curve,
            start: self.left.len(),
            len: 0,
            closed,
        });
    }

    /// Append a cross-section to the current curve.
    ///
    /// Sections pushed before any [`Self::begin_curve`] are not part of any
    /// span and will not be stitched.
    pub fn push(&mut self, section: CrossSection) {
        self.left.push(section.left);
        self.right.push(section.right);
        if let Some(span) = self.spans.last_mut() {
            span.len += 1;
        }
    }

    /// Number of cross-sections over all curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether no cross-sections are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Left edge points.
    #[must_use]
    pub fn left(&self) -> &[Point3<f64>] {
        &self.left
    }

    /// Right edge points.
    #[must_use]
    pub fn right(&self) -> &[Point3<f64>] {
        &self.right
    }

    /// Per-curve spans in curve order.
    #[must_use]
    pub fn spans(&self) -> &[CurveSpan] {
        &self.spans
    }

    /// Cross-section at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CrossSection> {
        Some(CrossSection::new(
            *self.left.get(index)?,
            *self.right.get(index)?,
        ))
    }

    /// Total quads over all spans.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.spans.iter().map(CurveSpan::quad_count).sum()
    }
}
