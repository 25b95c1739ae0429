//! An ordered, editable set of curves with stable identities.

use crate::{
    ChangeKind, CurveChange, CurveError, CurveId, CurveProvider, CurveSample, Result, RoadCurve,
};

/// An ordered set of curves implementing [`CurveProvider`].
///
/// Every curve gets a [`CurveId`] on insertion that survives removal of
/// other curves. Edits made through the set return the [`CurveChange`] the
/// caller should publish so listening extruders can rebuild.
///
/// # Example
///
/// ```
/// use road_curves::{CurveProvider, CurveSet, Polyline};
/// use nalgebra::Point3;
///
/// let mut set = CurveSet::new();
/// let id = set.push(Polyline::from_segment(
///     Point3::origin(),
///     Point3::new(10.0, 0.0, 0.0),
/// ));
///
/// assert_eq!(set.curve_count(), 1);
/// assert_eq!(set.curve_id(0), id);
/// assert!((set.length(0) - 10.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CurveSet<C = Box<dyn RoadCurve>> {
    curves: Vec<(CurveId, C)>,
    next_id: u64,
}

impl<C> Default for CurveSet<C> {
    fn default() -> Self {
        Self {
            curves: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C: RoadCurve> CurveSet<C> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the set holds no curves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Append a curve, returning its new identity.
    pub fn push(&mut self, curve: C) -> CurveId {
        let id = CurveId(self.next_id);
        self.next_id += 1;
        self.curves.push((id, curve));
        id
    }

    /// Remove a curve by identity.
    pub fn remove(&mut self, id: CurveId) -> Option<C> {
        let index = self.index_of(id)?;
        Some(self.curves.remove(index).1)
    }

    /// Index of the curve `id`, if held.
    #[must_use]
    pub fn index_of(&self, id: CurveId) -> Option<usize> {
        self.curves.iter().position(|(held, _)| *held == id)
    }

    /// Borrow a curve by identity.
    #[must_use]
    pub fn get(&self, id: CurveId) -> Option<&C> {
        self.curves
            .iter()
            .find_map(|(held, curve)| (*held == id).then_some(curve))
    }

    /// Borrow a curve by index.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnknownCurve`] if `index` is out of range.
    pub fn curve(&self, index: usize) -> Result<&C> {
        self.curves
            .get(index)
            .map(|(_, curve)| curve)
            .ok_or(CurveError::UnknownCurve {
                index,
                count: self.curves.len(),
            })
    }

    /// Iterate over `(id, curve)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (CurveId, &C)> {
        self.curves.iter().map(|(id, curve)| (*id, curve))
    }

    /// Replace a curve wholesale.
    ///
    /// Returns the notification to publish, or `None` if `id` is not held.
    pub fn replace(&mut self, id: CurveId, curve: C) -> Option<CurveChange> {
        let index = self.index_of(id)?;
        self.curves[index].1 = curve;
        Some(CurveChange::new(id, 0, ChangeKind::Replaced))
    }

    /// Edit a curve in place.
    ///
    /// `point` and `kind` describe the edit for listeners; the closure does
    /// the actual mutation and may fail.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::UnknownId`] if `id` is not held, or whatever
    /// error the closure returns. No notification is produced on error.
    pub fn edit<F>(&mut self, id: CurveId, point: usize, kind: ChangeKind, f: F) -> Result<CurveChange>
    where
        F: FnOnce(&mut C) -> Result<()>,
    {
        let (_, curve) = self
            .curves
            .iter_mut()
            .find(|(held, _)| *held == id)
            .ok_or(CurveError::UnknownId(id))?;
        f(curve)?;
        Ok(CurveChange::new(id, point, kind))
    }
}

impl<C: RoadCurve> CurveProvider for CurveSet<C> {
    fn curve_count(&self) -> usize {
        self.curves.len()
    }

    fn curve_id(&self, index: usize) -> CurveId {
        self.curves[index].0
    }

    fn length(&self, index: usize) -> f64 {
        self.curves[index].1.arc_length()
    }

    fn evaluate(&self, index: usize, t: f64) -> CurveSample {
        self.curves[index].1.sample_at(t)
    }

    fn is_closed(&self, index: usize) -> bool {
        self.curves[index].1.is_closed()
    }

    fn owns(&self, id: CurveId) -> bool {
        self.index_of(id).is_some()
    }
}
