//! The compass screen: ties the estimator, the view and sensor registration together.

use log::{debug, info};

use crate::dial::DialStyle;
use crate::orientation::{Orientation, OrientationEstimator, ScreenRotation};
use crate::sensors::{COMPASS_SENSORS, SensorChannel, SensorEvent, SensorSubscription, VectorSource};
use crate::view::{AccessibilityNotifier, CompassView};

/// One instance per screen lifetime.
///
/// The screen rotation is fixed at construction; a rotation change means
/// building a new screen.
pub struct CompassScreen<N: AccessibilityNotifier> {
    estimator: OrientationEstimator,
    view: CompassView<N>,
}

impl<N: AccessibilityNotifier> CompassScreen<N> {
    /// Build the screen and show the zero orientation until data arrives.
    pub fn new(rotation: ScreenRotation, style: DialStyle, notifier: N) -> Self {
        info!("Compass screen created for rotation {}°", rotation.degrees());

        let mut view = CompassView::new(style, notifier);
        view.update(Orientation::default());

        Self {
            estimator: OrientationEstimator::new(rotation),
            view,
        }
    }

    /// Register for accelerometer and magnetometer events.
    ///
    /// Dropping (or pausing) the returned guard unregisters.
    pub fn resume<S: VectorSource>(&self, source: S) -> SensorSubscription<S> {
        debug!("Resuming sensor delivery");
        SensorSubscription::acquire(source, &COMPASS_SENSORS)
    }

    /// Feed one event through the estimator into the view.
    pub fn on_sensor_event(&mut self, event: SensorEvent) -> Orientation {
        self.estimator.ingest(&event);
        let orientation = Orientation::from(self.estimator.estimate());
        self.view.update(orientation);
        orientation
    }

    /// Apply every event queued in `channel`; returns how many were applied.
    pub fn drain(&mut self, channel: &SensorChannel) -> usize {
        let mut applied = 0;
        while let Ok(event) = channel.try_receive() {
            self.on_sensor_event(event);
            applied += 1;
        }
        applied
    }

    pub fn rotation(&self) -> ScreenRotation {
        self.estimator.rotation()
    }

    pub fn estimator(&self) -> &OrientationEstimator {
        &self.estimator
    }

    pub fn view(&self) -> &CompassView<N> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CompassView<N> {
        &mut self.view
    }
}
