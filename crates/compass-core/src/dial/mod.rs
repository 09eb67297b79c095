//! Artificial-horizon compass dial.
//!
//! [`DialRenderer::render`] is a pure function of the orientation, the
//! surface size and the [`DialStyle`]: it derives all geometry afresh every
//! call and issues the same command sequence for the same inputs.
//!
//! # Layering
//!
//! Later steps overlay earlier ones with alpha, so the order is fixed:
//!
//! 1. Outer ring radial gradient
//! 2. Banked horizon (sky, ground, pitch ladder, horizon bar, roll pointer)
//! 3. Roll scale, turned 180°
//! 4. Heading ring, turned by `-bearing`
//! 5. Glass highlight over the inner circle
//! 6. Outer and inner rim strokes

pub mod direction;
pub mod fold;
pub mod geometry;
pub mod style;

use core::fmt::Write;

use heapless::String;
use log::warn;

use crate::constants::{
    HEADING_INCREMENT_DEG, HEADING_TICK_LENGTH_PX, LABEL_BASELINE_GAP_PX, PITCH_LADDER_STEP_DEG,
    PITCH_LIMIT_DEG, ROLL_LABEL_EVERY_DEG, ROLL_POINTER_HALF_WIDTH_PX, ROLL_POINTER_TAIL_PX,
    ROLL_POINTER_TIP_PX, ROLL_SCALE_STEP_DEG, ROLL_TEXT_GAP_PX, ROLL_TICK_LENGTH_PX,
    TEXT_HEIGHT_PROBE,
};
use crate::geometry::PointF;
use crate::orientation::Orientation;
use crate::render::{DrawingSurface, Paint, Shader, StrokeStyle, TextPaint};

pub use direction::CompassDirection;
pub use fold::{fold_pitch, fold_roll};
pub use geometry::DialGeometry;
pub use style::DialStyle;

/// Longest label the dial formats (a folded roll such as "-179.99998").
pub const MAX_LABEL_LENGTH: usize = 16;

/// Fixed-capacity text for dial labels and descriptions.
pub type Label = String<MAX_LABEL_LENGTH>;

/// Format `value` into a fixed-capacity label; overlong output is cut short.
pub(crate) fn label(value: impl core::fmt::Debug) -> Label {
    let mut s = Label::new();
    if write!(s, "{:?}", value).is_err() {
        warn!("Label truncated to {:?}", s);
    }
    s
}

/// Paints the compass dial onto a [`DrawingSurface`].
#[derive(Debug, Clone, Default)]
pub struct DialRenderer {
    style: DialStyle,
}

impl DialRenderer {
    pub fn new(style: DialStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &DialStyle {
        &self.style
    }

    /// Draw one frame for `orientation`.
    ///
    /// Surfaces too small to hold the inner circle are left untouched.
    pub fn render<S: DrawingSurface + ?Sized>(&self, orientation: &Orientation, surface: &mut S) {
        let text_height = surface.measure_text(TEXT_HEIGHT_PROBE);
        let geometry = DialGeometry::new(surface.width(), surface.height(), text_height);

        if !geometry.is_drawable() {
            warn!(
                "Surface {}x{} too small for the dial",
                surface.width(),
                surface.height()
            );
            return;
        }

        let pitch = fold_pitch(orientation.pitch);
        let roll = fold_roll(orientation.roll);

        self.draw_outer_ring(&geometry, surface);
        self.draw_horizon(&geometry, pitch, roll, surface);
        self.draw_roll_scale(&geometry, surface);
        self.draw_heading_ring(&geometry, orientation.bearing, surface);
        self.draw_glass(&geometry, surface);
        self.draw_rims(&geometry, surface);
    }

    fn marker(&self) -> StrokeStyle {
        StrokeStyle::new(self.style.marker_color, self.style.marker_stroke_width)
            .with_shadow(self.style.marker_shadow_color)
    }

    fn text(&self) -> TextPaint {
        TextPaint {
            color: self.style.text_color,
        }
    }

    fn draw_outer_ring<S: DrawingSurface + ?Sized>(&self, g: &DialGeometry, surface: &mut S) {
        let shader = Shader::radial(g.center, g.radius as f32, &self.style.border_stops);
        surface.draw_oval(g.outer, &Paint::Fill(shader));
    }

    /// Sky, ground, pitch ladder and roll pointer, banked by `-roll`.
    fn draw_horizon<S: DrawingSurface + ?Sized>(
        &self,
        g: &DialGeometry,
        pitch: f32,
        roll: f32,
        surface: &mut S,
    ) {
        let top = PointF::new(g.center.x, g.inner.top);
        let bottom = PointF::new(g.center.x, g.inner.bottom);
        let sky = Shader::Linear {
            from: top,
            to: bottom,
            start: self.style.sky_from,
            end: self.style.sky_to,
        };
        let ground = Shader::Linear {
            from: top,
            to: bottom,
            start: self.style.ground_from,
            end: self.style.ground_to,
        };

        let marker = self.marker();
        let text = self.text();
        let start = -pitch;
        let sweep = 2.0 * PITCH_LIMIT_DEG + 2.0 * pitch;

        surface.save();
        surface.rotate(-roll, g.center);

        // The arc below the horizon chord is the ground; the rest of the
        // inner circle stays sky.
        surface.draw_oval(g.inner, &Paint::Fill(sky));
        surface.draw_arc(g.inner, start, sweep, &Paint::Fill(ground));
        surface.draw_arc(g.inner, start, sweep, &Paint::Stroke(marker));

        let horizon_y = g.horizon_y(pitch);
        let rung_start = g.center.x - g.rung_half_width();
        let rung_end = g.center.x + g.rung_half_width();

        for step in (-90..=90).rev().step_by(PITCH_LADDER_STEP_DEG as usize) {
            let y = g.rung_y(horizon_y, step);
            if !g.rung_visible(y) {
                continue;
            }

            surface.draw_line(
                PointF::new(rung_start, y),
                PointF::new(rung_end, y),
                &marker,
            );

            let value = label((pitch - step as f32) as i32);
            let width = surface.measure_text(&value);
            let origin = PointF::new(
                (g.center.x - width / 2.0) as i32 as f32,
                (y + 1.0) as i32 as f32,
            );
            surface.draw_text(&value, origin, &text);
        }

        let bar = marker.with_width(self.style.horizon_stroke_width);
        surface.draw_line(
            PointF::new(g.center.x - g.horizon_bar_half_width(), horizon_y),
            PointF::new(g.center.x + g.horizon_bar_half_width(), horizon_y),
            &bar,
        );

        let tip = PointF::new(g.center.x, g.inner.top + ROLL_POINTER_TIP_PX);
        let tail_y = g.inner.top + ROLL_POINTER_TAIL_PX;
        surface.draw_line(
            PointF::new(g.center.x - ROLL_POINTER_HALF_WIDTH_PX, tail_y),
            tip,
            &marker,
        );
        surface.draw_line(
            PointF::new(g.center.x + ROLL_POINTER_HALF_WIDTH_PX, tail_y),
            tip,
            &marker,
        );

        let roll_text = label(roll);
        let width = surface.measure_text(&roll_text);
        surface.draw_text(
            &roll_text,
            PointF::new(
                g.center.x - width / 2.0,
                g.inner.top + g.text_height + ROLL_TEXT_GAP_PX,
            ),
            &text,
        );

        surface.restore();
    }

    /// Roll scale around the inner circle, drawn upside down.
    fn draw_roll_scale<S: DrawingSurface + ?Sized>(&self, g: &DialGeometry, surface: &mut S) {
        let marker = self.marker();
        let text = self.text();

        surface.save();
        surface.rotate(180.0, g.center);

        for i in (-180..180).step_by(ROLL_SCALE_STEP_DEG as usize) {
            if i % ROLL_LABEL_EVERY_DEG == 0 {
                let value = label(-i);
                let width = surface.measure_text(&value);
                surface.draw_text(
                    &value,
                    PointF::new(
                        g.center.x - width / 2.0,
                        g.inner.top + LABEL_BASELINE_GAP_PX + g.text_height,
                    ),
                    &text,
                );
            } else {
                surface.draw_line(
                    PointF::new(g.center.x, g.inner.top),
                    PointF::new(g.center.x, g.inner.top + ROLL_TICK_LENGTH_PX),
                    &marker,
                );
            }
            surface.rotate(ROLL_SCALE_STEP_DEG as f32, g.center);
        }

        surface.restore();
    }

    /// Sixteen compass points in the outer ring, turned by `-bearing`.
    ///
    /// `bearing` is used as given; rotation is periodic so unwrapped values
    /// still land on the right heading.
    fn draw_heading_ring<S: DrawingSurface + ?Sized>(
        &self,
        g: &DialGeometry,
        bearing: f32,
        surface: &mut S,
    ) {
        let marker = self.marker();
        let text = self.text();

        surface.save();
        surface.rotate(-bearing, g.center);

        let mut i = 0.0_f64;
        while i < 360.0 {
            let direction = CompassDirection::from_sector((i / HEADING_INCREMENT_DEG) as usize);

            // Every step of the loop lands on a sector boundary, so only the
            // label branch runs; the tick branch serves finer increments.
            if i % HEADING_INCREMENT_DEG == 0.0 {
                let value = direction.label();
                let width = surface.measure_text(value);
                surface.draw_text(
                    value,
                    PointF::new(
                        g.center.x - width / 2.0,
                        g.outer.top + LABEL_BASELINE_GAP_PX + g.text_height,
                    ),
                    &text,
                );
            } else {
                surface.draw_line(
                    PointF::new(g.center.x, g.outer.top),
                    PointF::new(g.center.x, g.outer.top + HEADING_TICK_LENGTH_PX),
                    &marker,
                );
            }

            surface.rotate(HEADING_INCREMENT_DEG as f32, g.center);
            i += HEADING_INCREMENT_DEG;
        }

        surface.restore();
    }

    fn draw_glass<S: DrawingSurface + ?Sized>(&self, g: &DialGeometry, surface: &mut S) {
        let shader = Shader::radial(g.center, g.inner_radius, &self.style.glass_stops);
        surface.draw_oval(g.inner, &Paint::Fill(shader));
    }

    fn draw_rims<S: DrawingSurface + ?Sized>(&self, g: &DialGeometry, surface: &mut S) {
        let outer = StrokeStyle::new(self.style.circle_color, self.style.outer_rim_stroke_width);
        surface.draw_oval(g.outer, &Paint::Stroke(outer));

        let inner = outer.with_width(self.style.inner_rim_stroke_width);
        surface.draw_oval(g.inner, &Paint::Stroke(inner));
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::render::{CommandRecorder, DrawCommand};

    const SIZE: u32 = 240;

    fn record(orientation: Orientation) -> CommandRecorder {
        let mut recorder = CommandRecorder::new(SIZE, SIZE);
        DialRenderer::default().render(&orientation, &mut recorder);
        recorder
    }

    fn geometry() -> DialGeometry {
        DialGeometry::new(SIZE, SIZE, 12.0)
    }

    fn kind(command: &DrawCommand) -> &'static str {
        match command {
            DrawCommand::Save => "save",
            DrawCommand::Restore => "restore",
            DrawCommand::Rotate { .. } => "rotate",
            DrawCommand::Oval {
                paint: Paint::Fill(_),
                ..
            } => "fill-oval",
            DrawCommand::Oval {
                paint: Paint::Stroke(_),
                ..
            } => "stroke-oval",
            DrawCommand::Arc {
                paint: Paint::Fill(_),
                ..
            } => "fill-arc",
            DrawCommand::Arc {
                paint: Paint::Stroke(_),
                ..
            } => "stroke-arc",
            DrawCommand::Line { .. } => "line",
            DrawCommand::Text { .. } => "text",
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 0.05
    }

    #[test]
    fn test_render_is_idempotent() {
        let o = Orientation::new(123.4, -17.0, 42.0);
        assert_eq!(record(o).into_commands(), record(o).into_commands());
    }

    #[test]
    fn test_layer_order() {
        let rec = record(Orientation::default());
        let kinds: Vec<&str> = rec.commands().iter().map(kind).collect();

        assert_eq!(&kinds[..6], &["fill-oval", "save", "rotate", "fill-oval", "fill-arc", "stroke-arc"]);
        assert_eq!(&kinds[kinds.len() - 3..], &["fill-oval", "stroke-oval", "stroke-oval"]);

        // Three save/restore groups: horizon, roll scale, heading ring.
        assert_eq!(kinds.iter().filter(|k| **k == "save").count(), 3);
        assert_eq!(kinds.iter().filter(|k| **k == "restore").count(), 3);
    }

    #[test]
    fn test_level_horizon_is_half_ellipse() {
        let rec = record(Orientation::default());
        let g = geometry();

        let arc = rec.commands().iter().find_map(|c| match c {
            DrawCommand::Arc {
                oval,
                start_degrees,
                sweep_degrees,
                paint: Paint::Fill(Shader::Linear { start, .. }),
            } => Some((*oval, *start_degrees, *sweep_degrees, *start)),
            _ => None,
        });
        let (oval, start, sweep, color) = arc.unwrap_or_else(|| panic!("no ground arc"));

        assert_eq!(oval, g.inner);
        assert_eq!(start, 0.0);
        assert_eq!(sweep, 180.0);
        assert_eq!(color, DialRenderer::default().style().ground_from);

        // Banking rotation is zero.
        assert!(rec.commands().contains(&DrawCommand::Rotate {
            degrees: 0.0,
            pivot: g.center
        }));
    }

    #[test]
    fn test_horizon_banks_by_negative_roll() {
        let rec = record(Orientation::new(0.0, 0.0, 30.0));
        assert_eq!(
            rec.commands()[2],
            DrawCommand::Rotate {
                degrees: -30.0,
                pivot: geometry().center
            }
        );
    }

    #[test]
    fn test_extreme_pitch_is_folded_before_drawing() {
        let rec = record(Orientation::new(0.0, 95.0, 0.0));
        let sweep = rec.commands().iter().find_map(|c| match c {
            DrawCommand::Arc { sweep_degrees, .. } => Some(*sweep_degrees),
            _ => None,
        });
        // 95 folds to -85: sweep = 180 + 2 * -85
        assert_eq!(sweep, Some(10.0));
    }

    #[test]
    fn test_heading_ring_north_on_top() {
        let rec = record(Orientation::default());
        let g = geometry();
        let texts = rec.texts_on_surface();

        let (_, n) = texts.iter().find(|(t, _)| *t == "N").copied().unwrap_or_else(|| panic!("no N"));
        assert!(approx(n.x, g.center.x - 3.0), "N at {:?}", n);
        assert!(approx(n.y, g.outer.top + 1.0 + 12.0), "N at {:?}", n);
    }

    #[test]
    fn test_heading_ring_east_on_top_at_ninety() {
        let rec = record(Orientation::new(90.0, 0.0, 0.0));
        let g = geometry();
        let texts = rec.texts_on_surface();

        let (_, e) = texts.iter().find(|(t, _)| *t == "E").copied().unwrap_or_else(|| panic!("no E"));
        assert!(approx(e.x, g.center.x - 3.0), "E at {:?}", e);
        assert!(approx(e.y, g.outer.top + 13.0), "E at {:?}", e);
    }

    #[test]
    fn test_heading_ring_draws_sixteen_labels_and_no_ticks() {
        let rec = record(Orientation::new(-45.0, 0.0, 0.0));
        let commands = rec.commands();

        let last_save = commands.iter().rposition(|c| *c == DrawCommand::Save).unwrap_or(0);
        let ring = &commands[last_save..];

        let labels: Vec<&str> = ring
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let expected: Vec<&str> = CompassDirection::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, expected);
        assert!(!ring.iter().any(|c| matches!(c, DrawCommand::Line { .. })));
    }

    #[test]
    fn test_roll_scale_labels_every_thirty_degrees() {
        let rec = record(Orientation::default());
        let labels: Vec<&str> = rec
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        for expected in ["180", "150", "120", "90", "60", "30", "0", "-30", "-60", "-90", "-120", "-150"] {
            assert!(labels.contains(&expected), "missing roll label {expected}");
        }
    }

    #[test]
    fn test_roll_scale_starts_upside_down() {
        let rec = record(Orientation::default());
        let g = geometry();
        let commands = rec.commands();

        let second_save = commands
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == DrawCommand::Save)
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or_else(|| panic!("no roll scale group"));
        assert_eq!(
            commands[second_save + 1],
            DrawCommand::Rotate {
                degrees: 180.0,
                pivot: g.center
            }
        );

        // "180" is the first roll label and sits at the bottom of the inner circle.
        let texts = rec.texts_on_surface();
        let (_, p) = texts.iter().find(|(t, _)| *t == "180").copied().unwrap_or_else(|| panic!("no 180"));
        assert!(p.y > g.center.y);
    }

    #[test]
    fn test_pitch_ladder_offsets_from_horizon() {
        let pitch = 10.0;
        let rec = record(Orientation::new(0.0, pitch, 0.0));
        let g = geometry();
        let horizon = g.horizon_y(pitch);

        let rung_for = |wanted: &str| -> Option<f32> {
            let commands = rec.commands();
            commands.iter().enumerate().find_map(|(i, c)| match c {
                DrawCommand::Text { text, .. } if text == wanted && i > 0 => match &commands[i - 1] {
                    DrawCommand::Line { from, .. } => Some(from.y),
                    _ => None,
                },
                _ => None,
            })
        };

        let zero = rung_for("0").unwrap_or_else(|| panic!("no 0 rung"));
        assert!(approx(zero - horizon, pitch * g.px_per_degree()), "0 rung at {zero}");

        let level = rung_for("10").unwrap_or_else(|| panic!("no 10 rung"));
        assert!(approx(level, horizon));
    }

    #[test]
    fn test_pitch_ladder_clips_near_inner_edges() {
        let rec = record(Orientation::default());
        let g = geometry();
        let rung_start = g.center.x - g.rung_half_width();
        let rung_end = g.center.x + g.rung_half_width();

        let rung_ys: Vec<f32> = rec
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, .. } if from.x == rung_start && to.x == rung_end => {
                    Some(from.y)
                }
                _ => None,
            })
            .collect();

        // Inner radius 102 gives 2.27 px per degree; rungs past ±30° fall
        // within one text height of the rim.
        assert_eq!(rung_ys.len(), 7);
        for y in &rung_ys {
            assert!(g.rung_visible(*y), "rung at {y} drawn while hidden");
        }
        assert!(!g.rung_visible(g.rung_y(g.horizon_y(0.0), 40)));
        assert!(!g.rung_visible(g.rung_y(g.horizon_y(0.0), -40)));
    }

    #[test]
    fn test_label_is_bounded() {
        assert_eq!(label(-30).as_str(), "-30");
        assert_eq!(label(-179.5_f32).as_str(), "-179.5");

        let long = label("a label far longer than sixteen bytes");
        assert!(long.len() <= MAX_LABEL_LENGTH);
        assert!(long.starts_with('"'));
    }

    #[test]
    fn test_tiny_surface_draws_nothing() {
        let mut recorder = CommandRecorder::new(16, 16);
        DialRenderer::default().render(&Orientation::default(), &mut recorder);
        assert!(recorder.commands().is_empty());
    }
}
