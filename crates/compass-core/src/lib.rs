//! Hardware-independent core library for the attitude compass.
//!
//! This crate contains all platform-agnostic logic for the compass screen:
//! turning raw accelerometer and magnetometer vectors into bearing, pitch and
//! roll, and painting the artificial-horizon compass dial from those angles
//! onto an abstract [`DrawingSurface`](render::DrawingSurface).
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod constants;
pub mod dial;
pub mod error;
pub mod geometry;
pub mod orientation;
pub mod render;
pub mod screen;
pub mod sensors;
pub mod view;

pub use dial::{DialRenderer, DialStyle};
pub use error::{OrientationError, SensorError};
pub use orientation::{DeviceAttitude, Orientation, OrientationEstimator, ScreenRotation};
pub use screen::CompassScreen;
pub use view::{AccessibilityEvent, AccessibilityNotifier, CompassView, NoAccessibility};
