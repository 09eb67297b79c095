//! Orientation estimation from accelerometer and magnetometer samples.
//!
//! The estimator caches the latest vector from each sensor (last value wins,
//! the two may be skewed in time) and on request turns them into a
//! [`DeviceAttitude`]:
//!
//! 1. Build a rotation matrix from gravity and the geomagnetic field.
//! 2. Remap its axes for the current [`ScreenRotation`].
//! 3. Extract azimuth, pitch and roll in degrees.
//!
//! Degenerate input (free fall, parallel or zero vectors) never reaches the
//! caller; the last valid attitude is returned instead.

pub mod matrix;

use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::sensors::{SensorEvent, SensorKind};

pub use matrix::{Axis, attitude_from_matrix, remap, rotation_matrix};

/// Rotation of the screen relative to the device's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenRotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl ScreenRotation {
    /// Map a platform rotation code (quarter turns, 0..=3).
    ///
    /// Unknown codes fall back to [`ScreenRotation::Rotation0`].
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns {
            1 => ScreenRotation::Rotation90,
            2 => ScreenRotation::Rotation180,
            3 => ScreenRotation::Rotation270,
            _ => ScreenRotation::Rotation0,
        }
    }

    pub const fn degrees(self) -> u16 {
        match self {
            ScreenRotation::Rotation0 => 0,
            ScreenRotation::Rotation90 => 90,
            ScreenRotation::Rotation180 => 180,
            ScreenRotation::Rotation270 => 270,
        }
    }

    /// Device axes that become the logical X and Y axes on screen.
    pub const fn remap_axes(self) -> (Axis, Axis) {
        match self {
            ScreenRotation::Rotation0 => (Axis::X, Axis::Y),
            ScreenRotation::Rotation90 => (Axis::Y, Axis::MinusX),
            ScreenRotation::Rotation180 => (Axis::X, Axis::MinusY),
            ScreenRotation::Rotation270 => (Axis::MinusY, Axis::X),
        }
    }
}

/// Raw estimator output, in degrees and not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceAttitude {
    /// Heading of the device's logical Y axis, `(-180, 180]`
    pub azimuth: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// Angles the compass dial draws.
///
/// `roll` is the roll of the horizon, the opposite sign of device roll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub bearing: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Orientation {
    pub const fn new(bearing: f32, pitch: f32, roll: f32) -> Self {
        Self {
            bearing,
            pitch,
            roll,
        }
    }
}

impl From<DeviceAttitude> for Orientation {
    fn from(attitude: DeviceAttitude) -> Self {
        Self {
            bearing: attitude.azimuth,
            pitch: attitude.pitch,
            roll: -attitude.roll,
        }
    }
}

/// Turns cached sensor vectors into a device attitude.
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    rotation: ScreenRotation,
    accelerometer: Vector3<f32>,
    magnetometer: Vector3<f32>,
    last: DeviceAttitude,
}

impl OrientationEstimator {
    /// Create an estimator for a screen fixed at `rotation`.
    ///
    /// Both sensor caches start at the zero vector.
    pub fn new(rotation: ScreenRotation) -> Self {
        Self {
            rotation,
            accelerometer: Vector3::zeros(),
            magnetometer: Vector3::zeros(),
            last: DeviceAttitude::default(),
        }
    }

    pub fn rotation(&self) -> ScreenRotation {
        self.rotation
    }

    /// Last successfully computed attitude.
    pub fn last(&self) -> DeviceAttitude {
        self.last
    }

    /// Overwrite the cached vector for the event's sensor.
    pub fn ingest(&mut self, event: &SensorEvent) {
        match event.kind {
            SensorKind::Accelerometer => self.accelerometer = event.values,
            SensorKind::MagneticField => self.magnetometer = event.values,
        }
    }

    /// Compute the attitude from the cached vectors.
    ///
    /// Falls back to the previous attitude when the vectors are degenerate.
    pub fn estimate(&mut self) -> DeviceAttitude {
        let (x_axis, y_axis) = self.rotation.remap_axes();

        let attitude = rotation_matrix(&self.accelerometer, &self.magnetometer)
            .and_then(|r| remap(&r, x_axis, y_axis))
            .map(|r| attitude_from_matrix(&r));

        match attitude {
            Ok(attitude) => {
                self.last = attitude;
                attitude
            }
            Err(e) => {
                trace!("Keeping last attitude: {}", e);
                self.last
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accel(x: f32, y: f32, z: f32) -> SensorEvent {
        SensorEvent::new(SensorKind::Accelerometer, Vector3::new(x, y, z))
    }

    fn mag(x: f32, y: f32, z: f32) -> SensorEvent {
        SensorEvent::new(SensorKind::MagneticField, Vector3::new(x, y, z))
    }

    fn approx(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 1e-3
    }

    #[test]
    fn test_no_samples_yields_zero_default() {
        let mut estimator = OrientationEstimator::new(ScreenRotation::Rotation0);
        assert_eq!(estimator.estimate(), DeviceAttitude::default());
    }

    #[test]
    fn test_one_sensor_only_keeps_default() {
        let mut estimator = OrientationEstimator::new(ScreenRotation::Rotation0);
        estimator.ingest(&accel(0.0, 0.0, 9.81));
        assert_eq!(estimator.estimate(), DeviceAttitude::default());
    }

    #[test]
    fn test_degenerate_sample_keeps_last_valid() {
        let mut estimator = OrientationEstimator::new(ScreenRotation::Rotation90);
        estimator.ingest(&accel(0.0, 0.0, 9.81));
        estimator.ingest(&mag(0.0, 20.0, -40.0));
        let good = estimator.estimate();
        assert!(approx(good.azimuth, 90.0), "azimuth {}", good.azimuth);

        // Field straight down: parallel to gravity.
        estimator.ingest(&mag(0.0, 0.0, -45.0));
        assert_eq!(estimator.estimate(), good);
        assert_eq!(estimator.last(), good);
    }

    #[test]
    fn test_azimuth_is_not_wrapped() {
        let mut estimator = OrientationEstimator::new(ScreenRotation::Rotation270);
        estimator.ingest(&accel(0.0, 0.0, 9.81));
        estimator.ingest(&mag(0.0, 20.0, -40.0));
        let attitude = estimator.estimate();
        assert!(approx(attitude.azimuth, -90.0), "azimuth {}", attitude.azimuth);
    }

    #[test]
    fn test_latest_sample_wins() {
        let mut estimator = OrientationEstimator::new(ScreenRotation::Rotation0);
        estimator.ingest(&accel(0.0, 0.0, 9.81));
        estimator.ingest(&mag(20.0, 0.0, -40.0));
        estimator.ingest(&mag(0.0, 20.0, -40.0));
        assert!(approx(estimator.estimate().azimuth, 0.0));
    }

    #[test]
    fn test_orientation_negates_roll() {
        let attitude = DeviceAttitude {
            azimuth: 12.0,
            pitch: -5.0,
            roll: 30.0,
        };
        assert_eq!(Orientation::from(attitude), Orientation::new(12.0, -5.0, -30.0));
    }

    #[test]
    fn test_rotation_codes() {
        assert_eq!(ScreenRotation::from_quarter_turns(1), ScreenRotation::Rotation90);
        assert_eq!(ScreenRotation::from_quarter_turns(3).degrees(), 270);
        assert_eq!(ScreenRotation::from_quarter_turns(9), ScreenRotation::Rotation0);
    }
}
