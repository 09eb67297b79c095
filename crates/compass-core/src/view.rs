//! The compass view: current angles, accessibility and drawing.
//!
//! Every angle setter announces [`AccessibilityEvent::ValueChanged`] to the
//! injected [`AccessibilityNotifier`], one event per setter call.

use log::trace;

use crate::constants::DEFAULT_VIEW_SIZE_PX;
use crate::dial::{DialRenderer, DialStyle, Label, label};
use crate::orientation::Orientation;
use crate::render::DrawingSurface;

/// Events sent to the platform accessibility service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityEvent {
    /// Bearing, pitch or roll changed
    ValueChanged,
}

/// Platform accessibility service.
pub trait AccessibilityNotifier {
    fn notify(&mut self, event: AccessibilityEvent);
}

/// Notifier for hosts without an accessibility service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAccessibility;

impl AccessibilityNotifier for NoAccessibility {
    fn notify(&mut self, _event: AccessibilityEvent) {}
}

/// Compass view state.
pub struct CompassView<N: AccessibilityNotifier> {
    orientation: Orientation,
    renderer: DialRenderer,
    notifier: N,
    shown: bool,
    dirty: bool,
}

impl<N: AccessibilityNotifier> CompassView<N> {
    pub fn new(style: DialStyle, notifier: N) -> Self {
        Self {
            orientation: Orientation::default(),
            renderer: DialRenderer::new(style),
            notifier,
            shown: true,
            dirty: true,
        }
    }

    pub fn bearing(&self) -> f32 {
        self.orientation.bearing
    }

    pub fn set_bearing(&mut self, bearing: f32) {
        self.orientation.bearing = bearing;
        self.notifier.notify(AccessibilityEvent::ValueChanged);
    }

    pub fn pitch(&self) -> f32 {
        self.orientation.pitch
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.orientation.pitch = pitch;
        self.notifier.notify(AccessibilityEvent::ValueChanged);
    }

    pub fn roll(&self) -> f32 {
        self.orientation.roll
    }

    pub fn set_roll(&mut self, roll: f32) {
        self.orientation.roll = roll;
        self.notifier.notify(AccessibilityEvent::ValueChanged);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set all three angles through their setters and request a redraw.
    pub fn update(&mut self, orientation: Orientation) {
        self.set_bearing(orientation.bearing);
        self.set_pitch(orientation.pitch);
        self.set_roll(orientation.roll);
        self.invalidate();
    }

    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Spoken description: the bearing as text, only while shown.
    pub fn describe(&self) -> Option<Label> {
        self.shown.then(|| label(self.orientation.bearing))
    }

    /// Square side for the given size hints; `None` means unconstrained.
    pub fn measure(width: Option<u32>, height: Option<u32>) -> u32 {
        let width = width.unwrap_or(DEFAULT_VIEW_SIZE_PX);
        let height = height.unwrap_or(DEFAULT_VIEW_SIZE_PX);
        width.min(height)
    }

    /// Paint the dial for the current angles.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        trace!("Drawing dial for {:?}", self.orientation);
        self.renderer.render(&self.orientation, surface);
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful draw.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
