//! The drawing capability set the dial renderer paints through.
//!
//! Coordinates passed to draw calls are in the surface's current local frame:
//! every [`rotate`](DrawingSurface::rotate) since the matching
//! [`save`](DrawingSurface::save) applies to them.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X13_BOLD;

use super::paint::{Paint, StrokeStyle, TextPaint};
use crate::geometry::{PointF, RectF};

/// Font used for every dial label.
pub const LABEL_FONT: MonoFont<'static> = FONT_6X13_BOLD;

/// Advance width of `text` in a monospace font.
pub fn monospace_text_width(font: &MonoFont<'_>, text: &str) -> f32 {
    let glyphs = text.chars().count() as u32;
    if glyphs == 0 {
        return 0.0;
    }
    let advance = font.character_size.width + font.character_spacing;
    (glyphs * advance - font.character_spacing) as f32
}

/// Canvas-like drawing target.
///
/// Implementations: [`CommandRecorder`](super::CommandRecorder) for tests and
/// [`RasterSurface`](super::RasterSurface) for pixels.
pub trait DrawingSurface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Push the current transform.
    fn save(&mut self);

    /// Pop back to the transform of the matching `save`.
    fn restore(&mut self);

    /// Rotate the local frame by `degrees` (clockwise) about `pivot`.
    fn rotate(&mut self, degrees: f32, pivot: PointF);

    /// Fill or stroke the ellipse inscribed in `oval`.
    fn draw_oval(&mut self, oval: RectF, paint: &Paint);

    /// Arc of the ellipse inscribed in `oval`, from `start_degrees` sweeping
    /// clockwise by `sweep_degrees`. Filling closes it with a chord; stroking
    /// draws the open arc only.
    fn draw_arc(&mut self, oval: RectF, start_degrees: f32, sweep_degrees: f32, paint: &Paint);

    fn draw_line(&mut self, from: PointF, to: PointF, stroke: &StrokeStyle);

    /// Left-aligned text with its baseline at `origin.y`.
    fn draw_text(&mut self, text: &str, origin: PointF, paint: &TextPaint);

    /// Advance width of `text` in the label font.
    fn measure_text(&self, text: &str) -> f32;
}

impl<T: DrawingSurface + ?Sized> DrawingSurface for &mut T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn save(&mut self) {
        (**self).save()
    }

    fn restore(&mut self) {
        (**self).restore()
    }

    fn rotate(&mut self, degrees: f32, pivot: PointF) {
        (**self).rotate(degrees, pivot)
    }

    fn draw_oval(&mut self, oval: RectF, paint: &Paint) {
        (**self).draw_oval(oval, paint)
    }

    fn draw_arc(&mut self, oval: RectF, start_degrees: f32, sweep_degrees: f32, paint: &Paint) {
        (**self).draw_arc(oval, start_degrees, sweep_degrees, paint)
    }

    fn draw_line(&mut self, from: PointF, to: PointF, stroke: &StrokeStyle) {
        (**self).draw_line(from, to, stroke)
    }

    fn draw_text(&mut self, text: &str, origin: PointF, paint: &TextPaint) {
        (**self).draw_text(text, origin, paint)
    }

    fn measure_text(&self, text: &str) -> f32 {
        (**self).measure_text(text)
    }
}
