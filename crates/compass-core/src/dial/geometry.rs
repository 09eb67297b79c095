//! Dial layout derived from the surface size and label text height.

use crate::constants::{
    DIAL_MARGIN_PX, HORIZON_BAR_RADIUS_DIVISOR, PITCH_DEGREES_PER_INNER_RADIUS,
    PITCH_RUNG_RADIUS_DIVISOR, RING_TEXT_MARGIN_PX,
};
use crate::geometry::{PointF, RectF};

/// Where every part of the dial goes for one surface size.
///
/// The center and radius are whole pixels (integer halves of the surface),
/// matching how the rim and ladder widths are derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: PointF,
    /// Outer circle radius in whole pixels
    pub radius: i32,
    /// Label text height (width of the probe string)
    pub text_height: f32,
    /// Width of the heading ring between the outer and inner circles
    pub ring_width: f32,
    /// Square enclosing the outer circle
    pub outer: RectF,
    /// Square enclosing the inner "glass" circle
    pub inner: RectF,
    pub inner_radius: f32,
}

impl DialGeometry {
    pub fn new(width: u32, height: u32, text_height: f32) -> Self {
        let px = (width / 2) as i32;
        let py = (height / 2) as i32;
        let radius = px.min(py) - DIAL_MARGIN_PX;

        let center = PointF::new(px as f32, py as f32);
        let ring_width = text_height + RING_TEXT_MARGIN_PX;
        let outer = RectF::square(center, radius as f32);
        let inner = outer.inset(ring_width);

        Self {
            center,
            radius,
            text_height,
            ring_width,
            outer,
            inner,
            inner_radius: inner.height() / 2.0,
        }
    }

    /// Whether the inner circle has room for at least one label.
    pub fn is_drawable(&self) -> bool {
        self.radius > 0 && self.inner_radius > self.text_height
    }

    /// Vertical pixels per degree of pitch.
    pub fn px_per_degree(&self) -> f32 {
        self.inner_radius / PITCH_DEGREES_PER_INNER_RADIUS
    }

    /// Height of the horizon chord for a folded pitch.
    ///
    /// Equals the chord of the arc starting at `-pitch` and sweeping
    /// `180 + 2·pitch` degrees.
    pub fn horizon_y(&self, pitch: f32) -> f32 {
        let h = self.inner_radius * libm::cosf((90.0 - pitch).to_radians());
        self.center.y - h
    }

    /// Height of the ladder rung `step` degrees below the horizon.
    pub fn rung_y(&self, horizon_y: f32, step: i32) -> f32 {
        horizon_y + step as f32 * self.px_per_degree()
    }

    /// Rungs within one text height of the inner circle's top or bottom are hidden.
    pub fn rung_visible(&self, y: f32) -> bool {
        !(y < self.inner.top + self.text_height || y > self.inner.bottom - self.text_height)
    }

    pub fn rung_half_width(&self) -> f32 {
        (self.radius / PITCH_RUNG_RADIUS_DIVISOR) as f32
    }

    pub fn horizon_bar_half_width(&self) -> f32 {
        (self.radius / HORIZON_BAR_RADIUS_DIVISOR) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_square_surface() {
        let g = DialGeometry::new(241, 241, 12.0);
        assert_eq!(g.center, PointF::new(120.0, 120.0));
        assert_eq!(g.radius, 118);
        assert_eq!(g.ring_width, 16.0);
        assert_eq!(g.outer, RectF::new(2.0, 2.0, 238.0, 238.0));
        assert_eq!(g.inner, RectF::new(18.0, 18.0, 222.0, 222.0));
        assert_eq!(g.inner_radius, 102.0);
        assert_eq!(g.rung_half_width(), 39.0);
        assert_eq!(g.horizon_bar_half_width(), 59.0);
    }

    #[test]
    fn test_non_square_uses_smaller_side() {
        let g = DialGeometry::new(300, 200, 12.0);
        assert_eq!(g.center, PointF::new(150.0, 100.0));
        assert_eq!(g.radius, 98);
    }

    #[test]
    fn test_level_horizon_is_through_center() {
        let g = DialGeometry::new(200, 200, 12.0);
        assert!(libm::fabsf(g.horizon_y(0.0) - g.center.y) < 1e-3);
        assert!(g.horizon_y(30.0) < g.center.y);
    }

    #[test]
    fn test_tiny_surface_is_not_drawable() {
        assert!(!DialGeometry::new(20, 20, 12.0).is_drawable());
        assert!(!DialGeometry::new(0, 0, 12.0).is_drawable());
        assert!(DialGeometry::new(200, 200, 12.0).is_drawable());
    }
}
