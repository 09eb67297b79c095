//! A [`DrawingSurface`] that records draw calls instead of painting them.
//!
//! Used to assert on what the dial renderer emits (order, geometry, labels)
//! without rasterizing, and to diff two frames for idempotence.

use alloc::string::String;
use alloc::vec::Vec;

use super::paint::{Paint, StrokeStyle, TextPaint};
use super::surface::{DrawingSurface, LABEL_FONT, monospace_text_width};
use crate::geometry::{PointF, RectF, Transform};

/// One recorded draw call, in the local frame it was issued in.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Rotate {
        degrees: f32,
        pivot: PointF,
    },
    Oval {
        oval: RectF,
        paint: Paint,
    },
    Arc {
        oval: RectF,
        start_degrees: f32,
        sweep_degrees: f32,
        paint: Paint,
    },
    Line {
        from: PointF,
        to: PointF,
        stroke: StrokeStyle,
    },
    Text {
        text: String,
        origin: PointF,
        paint: TextPaint,
    },
}

/// Records every call made on it, in order.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Pair every drawing command with the transform in effect when it was
    /// issued. `Save`/`Restore`/`Rotate` are consumed, not returned.
    pub fn replay(&self) -> Vec<(Transform, &DrawCommand)> {
        let mut current = Transform::IDENTITY;
        let mut stack: Vec<Transform> = Vec::new();
        let mut out = Vec::with_capacity(self.commands.len());

        for command in &self.commands {
            match command {
                DrawCommand::Save => stack.push(current),
                DrawCommand::Restore => current = stack.pop().unwrap_or(Transform::IDENTITY),
                DrawCommand::Rotate { degrees, pivot } => {
                    current = current.concat(&Transform::rotation(*degrees, *pivot));
                }
                other => out.push((current, other)),
            }
        }

        out
    }

    /// Text commands with their origin mapped to surface coordinates.
    pub fn texts_on_surface(&self) -> Vec<(&str, PointF)> {
        self.replay()
            .into_iter()
            .filter_map(|(transform, command)| match command {
                DrawCommand::Text { text, origin, .. } => {
                    Some((text.as_str(), transform.apply(*origin)))
                }
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for CommandRecorder {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn rotate(&mut self, degrees: f32, pivot: PointF) {
        self.commands.push(DrawCommand::Rotate { degrees, pivot });
    }

    fn draw_oval(&mut self, oval: RectF, paint: &Paint) {
        self.commands.push(DrawCommand::Oval {
            oval,
            paint: paint.clone(),
        });
    }

    fn draw_arc(&mut self, oval: RectF, start_degrees: f32, sweep_degrees: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Arc {
            oval,
            start_degrees,
            sweep_degrees,
            paint: paint.clone(),
        });
    }

    fn draw_line(&mut self, from: PointF, to: PointF, stroke: &StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn draw_text(&mut self, text: &str, origin: PointF, paint: &TextPaint) {
        self.commands.push(DrawCommand::Text {
            text: String::from(text),
            origin,
            paint: *paint,
        });
    }

    fn measure_text(&self, text: &str) -> f32 {
        monospace_text_width(&LABEL_FONT, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::Argb;

    #[test]
    fn test_replay_tracks_nested_rotations() {
        let mut rec = CommandRecorder::new(100, 100);
        let pivot = PointF::new(50.0, 50.0);
        let paint = TextPaint {
            color: Argb::opaque(255, 255, 255),
        };

        rec.save();
        rec.rotate(90.0, pivot);
        rec.draw_text("A", PointF::new(50.0, 0.0), &paint);
        rec.restore();
        rec.draw_text("B", PointF::new(50.0, 0.0), &paint);

        let texts = rec.texts_on_surface();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].0, "A");
        assert!(texts[0].1.distance_to(PointF::new(100.0, 50.0)) < 1e-3);
        assert_eq!(texts[1].1, PointF::new(50.0, 0.0));
    }

    #[test]
    fn test_measure_matches_label_font() {
        let rec = CommandRecorder::new(10, 10);
        assert_eq!(rec.measure_text("yY"), 12.0);
        assert_eq!(rec.measure_text(""), 0.0);
    }
}
