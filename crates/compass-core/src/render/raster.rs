//! Rasterizing [`DrawingSurface`] backed by a [`Framebuffer`].
//!
//! Filled ovals and arcs are scan-converted per pixel: each pixel center in
//! the device bounding box is mapped back through the inverse transform and
//! tested against the shape in local coordinates, so rotated fills need no
//! polygon clipping. Strokes and text go through embedded-graphics
//! primitives on a [`BlendLayer`](super::framebuffer::BlendLayer).
//!
//! Text anchors follow the current rotation but glyphs themselves are drawn
//! upright; embedded-graphics mono fonts cannot be rotated.

use alloc::vec::Vec;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use log::trace;

use super::color::Argb;
use super::framebuffer::Framebuffer;
use super::paint::{Paint, Shader, StrokeStyle, TextPaint};
use super::surface::{DrawingSurface, LABEL_FONT, monospace_text_width};
use crate::geometry::{PointF, RectF, Transform};

/// Segments used to approximate a full ellipse outline.
const ELLIPSE_SEGMENTS: f32 = 96.0;

/// Device-space offset of stroke drop shadows.
const SHADOW_OFFSET: PointF = PointF::new(1.0, 1.0);

/// Paints dial commands into a framebuffer.
pub struct RasterSurface<'a> {
    target: &'a mut Framebuffer,
    current: Transform,
    stack: Vec<Transform>,
}

impl<'a> RasterSurface<'a> {
    pub fn new(target: &'a mut Framebuffer) -> Self {
        Self {
            target,
            current: Transform::IDENTITY,
            stack: Vec::new(),
        }
    }

    /// Blend `shader` over every pixel whose center satisfies `inside`.
    ///
    /// `bounds` is the local-space box enclosing the shape.
    fn fill_where<F>(&mut self, bounds: RectF, shader: &Shader, inside: F)
    where
        F: Fn(PointF) -> bool,
    {
        let corners = [
            PointF::new(bounds.left, bounds.top),
            PointF::new(bounds.right, bounds.top),
            PointF::new(bounds.left, bounds.bottom),
            PointF::new(bounds.right, bounds.bottom),
        ]
        .map(|p| self.current.apply(p));

        let size = self.target.size();
        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let x0 = (libm::floorf(min_x) as i32).max(0);
        let y0 = (libm::floorf(min_y) as i32).max(0);
        let x1 = (libm::ceilf(max_x) as i32).min(size.width as i32 - 1);
        let y1 = (libm::ceilf(max_y) as i32).min(size.height as i32 - 1);

        let inverse = self.current.inverse();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let local = inverse.apply(PointF::new(x as f32 + 0.5, y as f32 + 0.5));
                if inside(local) {
                    self.target.blend_pixel(x, y, shader.color_at(local));
                }
            }
        }
    }

    /// Stroke a local-space polyline, shadow first.
    fn stroke_polyline(&mut self, points: &[PointF], stroke: &StrokeStyle) {
        let device: Vec<PointF> = points.iter().map(|p| self.current.apply(*p)).collect();
        let width = (libm::roundf(stroke.width) as u32).max(1);

        let mut passes: heapless::Vec<(Argb, PointF), 2> = heapless::Vec::new();
        if let Some(shadow) = stroke.shadow {
            passes.push((shadow, SHADOW_OFFSET)).ok();
        }
        passes.push((stroke.color, PointF::new(0.0, 0.0))).ok();

        for (color, offset) in passes {
            let mut layer = self.target.blend_layer(color);
            let style = PrimitiveStyle::with_stroke(BinaryColor::On, width);
            for pair in device.windows(2) {
                let shift = |p: PointF| PointF::new(p.x + offset.x, p.y + offset.y).to_point();
                Line::new(shift(pair[0]), shift(pair[1]))
                    .into_styled(style)
                    .draw(&mut layer)
                    .ok();
            }
        }
    }
}

/// Sample the arc of `oval` from `start` sweeping `sweep` degrees.
fn arc_points(oval: RectF, start: f32, sweep: f32) -> Vec<PointF> {
    let segments = libm::ceilf(libm::fabsf(sweep) / 360.0 * ELLIPSE_SEGMENTS).max(1.0) as usize;
    (0..=segments)
        .map(|i| oval.ellipse_point(start + sweep * i as f32 / segments as f32))
        .collect()
}

/// Side of the directed line `a → b` that `p` falls on (cross product).
fn side_of(a: PointF, b: PointF, p: PointF) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl DrawingSurface for RasterSurface<'_> {
    fn width(&self) -> u32 {
        self.target.size().width
    }

    fn height(&self) -> u32 {
        self.target.size().height
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(previous) => self.current = previous,
            None => trace!("restore without matching save"),
        }
    }

    fn rotate(&mut self, degrees: f32, pivot: PointF) {
        self.current = self.current.concat(&Transform::rotation(degrees, pivot));
    }

    fn draw_oval(&mut self, oval: RectF, paint: &Paint) {
        match paint {
            Paint::Fill(shader) => self.fill_where(oval, shader, |p| oval.ellipse_contains(p)),
            Paint::Stroke(stroke) => {
                let points = arc_points(oval, 0.0, 360.0);
                self.stroke_polyline(&points, stroke);
            }
        }
    }

    fn draw_arc(&mut self, oval: RectF, start_degrees: f32, sweep_degrees: f32, paint: &Paint) {
        let sweep = sweep_degrees.clamp(-360.0, 360.0);
        if sweep == 0.0 {
            return;
        }

        match paint {
            Paint::Fill(shader) => {
                if libm::fabsf(sweep) >= 360.0 {
                    self.fill_where(oval, shader, |p| oval.ellipse_contains(p));
                    return;
                }

                // Region between the arc and its closing chord: the side of the
                // chord that holds the arc midpoint.
                let a = oval.ellipse_point(start_degrees);
                let b = oval.ellipse_point(start_degrees + sweep);
                let mid = oval.ellipse_point(start_degrees + sweep / 2.0);
                let arc_side = side_of(a, b, mid);

                self.fill_where(oval, shader, |p| {
                    oval.ellipse_contains(p) && side_of(a, b, p) * arc_side >= 0.0
                });
            }
            Paint::Stroke(stroke) => {
                let points = arc_points(oval, start_degrees, sweep);
                self.stroke_polyline(&points, stroke);
            }
        }
    }

    fn draw_line(&mut self, from: PointF, to: PointF, stroke: &StrokeStyle) {
        self.stroke_polyline(&[from, to], stroke);
    }

    fn draw_text(&mut self, text: &str, origin: PointF, paint: &TextPaint) {
        let anchor = self.current.apply(origin).to_point();
        let style = MonoTextStyle::new(&LABEL_FONT, BinaryColor::On);
        Text::with_baseline(text, anchor, style, Baseline::Alphabetic)
            .draw(&mut self.target.blend_layer(paint.color))
            .ok();
    }

    fn measure_text(&self, text: &str) -> f32 {
        monospace_text_width(&LABEL_FONT, text)
    }
}
