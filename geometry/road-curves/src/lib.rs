//! Curve providers for road strip extrusion.
//!
//! The road mesh builder only needs a narrow view of its curves: how many
//! there are, how long each one is, and position / tangent / up at a
//! normalized parameter. That view is the [`CurveProvider`] trait. This crate
//! defines it together with a handful of reference curves so the builder can
//! be driven without a host editor:
//!
//! - [`Polyline`] - Piecewise linear, arc-length parameterized, open or closed
//! - [`CubicBezier`] - Single cubic Bézier segment
//! - [`Arc`] - Circular arc segment
//! - [`Circle`] - Full circle (closed loop)
//! - [`CurveSet`] - Editable set of curves with stable [`CurveId`]s
//!
//! # Example
//!
//! ```
//! use road_curves::{CurveProvider, CurveSet, Polyline, RoadCurve};
//! use nalgebra::Point3;
//!
//! let mut set = CurveSet::new();
//! set.push(Polyline::from_segment(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//! ));
//!
//! let sample = set.evaluate(0, 0.5);
//! assert!((sample.position.x - 5.0).abs() < 1e-12);
//! assert!((sample.up.z - 1.0).abs() < 1e-12);
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, with `+Z` as the default up vector:
//! - X: east
//! - Y: north
//! - Z: up
//!
//! # Feature Flags
//!
//! - `serde`: Serialization for curves, samples and change notifications

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod arc;
mod bezier;
mod change;
mod error;
mod polyline;
mod set;
mod traits;

pub use arc::{Arc, Circle};
pub use bezier::CubicBezier;
pub use change::{ChangeKind, CurveChange, CurveId};
pub use error::CurveError;
pub use polyline::Polyline;
pub use set::CurveSet;
pub use traits::{CurveProvider, CurveSample, RoadCurve};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
