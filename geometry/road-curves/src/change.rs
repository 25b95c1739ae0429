//! Curve identity and edit notifications.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a curve, independent of its index in a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveId(pub u64);

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "curve#{}", self.0)
    }
}

/// What kind of edit touched a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeKind {
    /// Generic change, or the whole curve was replaced.
    Replaced,
    /// A control point moved.
    PointModified,
    /// A control point was inserted.
    PointInserted,
    /// A control point was removed.
    PointRemoved,
    /// Control points were reordered.
    PointsReordered,
    /// The closed flag was toggled.
    ClosedModified,
}

/// Notification that a curve was edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurveChange {
    /// The edited curve.
    pub curve: CurveId,
    /// Index of the affected control point (0 when not point-specific).
    pub point: usize,
    /// Kind of edit.
    pub kind: ChangeKind,
}

impl CurveChange {
    /// Create a new change notification.
    #[must_use]
    pub const fn new(curve: CurveId, point: usize, kind: ChangeKind) -> Self {
        Self { curve, point, kind }
    }
}

impl fmt::Display for CurveChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} point {} {:?}", self.curve, self.point, self.kind)
    }
}
