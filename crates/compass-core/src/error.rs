//! Error types for orientation estimation and sensor plumbing.

use thiserror_no_std::Error;

use crate::orientation::Axis;
use crate::sensors::SensorKind;

/// Reasons a rotation matrix or axis remap could not be produced.
///
/// None of these reach the UI: the estimator keeps its last valid attitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrientationError {
    /// Gravity vector is too short to define "down"
    #[error("Gravity vector too small (free fall)")]
    FreeFall,

    /// Gravity and geomagnetic vectors are parallel or zero
    #[error("Gravity and geomagnetic vectors are degenerate")]
    Degenerate,

    /// Both logical axes were mapped onto the same device axis
    #[error("Invalid axis remap: {x:?} and {y:?} share an axis")]
    InvalidRemap {
        /// Requested X axis
        x: Axis,
        /// Requested Y axis
        y: Axis,
    },
}

/// Errors from a [`VectorSource`](crate::sensors::VectorSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The platform has no sensor of this kind
    #[error("Sensor unavailable: {kind:?}")]
    Unavailable {
        /// Sensor that could not be registered
        kind: SensorKind,
    },
}
