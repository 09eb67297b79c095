//! Sensor events, sources and scoped subscriptions.
//!
//! A [`VectorSource`] is the platform's sensor service. Registration is held
//! by a [`SensorSubscription`] guard that unregisters when dropped, so a
//! resume/pause pair always matches even on abrupt teardown.
//!
//! Sources that deliver on another thread push into [`SENSOR_EVENTS`]; the
//! thread that owns the screen drains it before drawing.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::Vec;
use log::{debug, warn};
use nalgebra::Vector3;

use crate::error::SensorError;

/// Capacity of the cross-thread sensor event queue
pub const SENSOR_CHANNEL_CAPACITY: usize = 16;

/// Sensors the compass subscribes to.
pub const COMPASS_SENSORS: [SensorKind; 2] = [SensorKind::Accelerometer, SensorKind::MagneticField];

/// Kind of 3-axis sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Acceleration including gravity, m/s²
    Accelerometer,
    /// Geomagnetic field, µT
    MagneticField,
}

/// One 3-axis reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub values: Vector3<f32>,
}

impl SensorEvent {
    pub const fn new(kind: SensorKind, values: Vector3<f32>) -> Self {
        Self { kind, values }
    }
}

/// Queue between a sensor delivery thread and the screen's thread.
pub type SensorChannel = Channel<CriticalSectionRawMutex, SensorEvent, SENSOR_CHANNEL_CAPACITY>;

/// Global channel for sensor events
pub static SENSOR_EVENTS: SensorChannel = Channel::new();

/// Platform sensor service.
pub trait VectorSource {
    /// Start delivering events for `kind`.
    fn register(&mut self, kind: SensorKind) -> Result<(), SensorError>;

    /// Stop delivering events for every registered sensor.
    fn unregister_all(&mut self);
}

impl<T: VectorSource + ?Sized> VectorSource for &mut T {
    fn register(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        (**self).register(kind)
    }

    fn unregister_all(&mut self) {
        (**self).unregister_all()
    }
}

/// Registration guard; unregisters from its source on drop.
pub struct SensorSubscription<S: VectorSource> {
    source: S,
    registered: Vec<SensorKind, 2>,
}

impl<S: VectorSource> SensorSubscription<S> {
    /// Register every kind in `kinds`, skipping (and logging) the ones the
    /// source cannot provide.
    pub fn acquire(mut source: S, kinds: &[SensorKind]) -> Self {
        let mut registered = Vec::new();
        for &kind in kinds {
            match source.register(kind) {
                Ok(()) => {
                    if registered.push(kind).is_err() {
                        warn!("Subscription full, ignoring {:?}", kind);
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
        debug!("Sensor subscription acquired: {:?}", registered);

        Self { source, registered }
    }

    /// Sensors that registered successfully.
    pub fn registered(&self) -> &[SensorKind] {
        &self.registered
    }

    /// Release the subscription now; same as dropping it.
    pub fn pause(self) {}
}

impl<S: VectorSource> Drop for SensorSubscription<S> {
    fn drop(&mut self) {
        debug!("Sensor subscription released");
        self.source.unregister_all();
    }
}
