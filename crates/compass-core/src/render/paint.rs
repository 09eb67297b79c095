//! Paints and gradient shaders issued by the dial renderer.
//!
//! Gradients always clamp: positions outside the stop range take the color of
//! the nearest end stop.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use super::color::Argb;
use crate::geometry::PointF;

/// Maximum number of stops in a multi-stop gradient.
pub const MAX_GRADIENT_STOPS: usize = 5;

/// One color stop; `position` is in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: Argb,
    pub position: f32,
}

impl GradientStop {
    pub const fn new(color: Argb, position: f32) -> Self {
        Self { color, position }
    }
}

/// Stops sorted by ascending position.
pub type GradientStops = Vec<GradientStop, MAX_GRADIENT_STOPS>;

/// Source of fill color for a point in local (pre-transform) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    Solid(Argb),
    /// Two-color gradient along the segment `from` → `to`.
    Linear {
        from: PointF,
        to: PointF,
        start: Argb,
        end: Argb,
    },
    /// Multi-stop gradient by distance from `center`, 0 at center and 1 at `radius`.
    Radial {
        center: PointF,
        radius: f32,
        stops: GradientStops,
    },
}

impl Shader {
    /// Build a radial shader from a stop slice, keeping at most
    /// [`MAX_GRADIENT_STOPS`] stops.
    pub fn radial(center: PointF, radius: f32, stops: &[GradientStop]) -> Self {
        let stops = stops.iter().copied().take(MAX_GRADIENT_STOPS).collect();
        Shader::Radial {
            center,
            radius,
            stops,
        }
    }

    /// Shaded color at `p`.
    pub fn color_at(&self, p: PointF) -> Argb {
        match self {
            Shader::Solid(color) => *color,
            Shader::Linear {
                from,
                to,
                start,
                end,
            } => {
                let dx = to.x - from.x;
                let dy = to.y - from.y;
                let len_sq = dx * dx + dy * dy;
                if len_sq <= f32::EPSILON {
                    return *end;
                }
                let t = ((p.x - from.x) * dx + (p.y - from.y) * dy) / len_sq;
                start.lerp(*end, t)
            }
            Shader::Radial {
                center,
                radius,
                stops,
            } => {
                if *radius <= 0.0 {
                    return stops.last().map(|s| s.color).unwrap_or(Argb::TRANSPARENT);
                }
                sample_stops(stops, p.distance_to(*center) / radius)
            }
        }
    }
}

/// Clamped piecewise-linear lookup into sorted stops.
fn sample_stops(stops: &[GradientStop], t: f32) -> Argb {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Argb::TRANSPARENT;
    };

    if t <= first.position {
        return first.color;
    }
    if t >= last.position {
        return last.color;
    }

    for pair in stops.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.position {
            let span = hi.position - lo.position;
            if span <= f32::EPSILON {
                return hi.color;
            }
            return lo.color.lerp(hi.color, (t - lo.position) / span);
        }
    }

    last.color
}

/// Stroke parameters for lines, arcs and oval outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Argb,
    pub width: f32,
    /// Drop shadow painted one pixel down-right, under the stroke
    pub shadow: Option<Argb>,
}

impl StrokeStyle {
    pub const fn new(color: Argb, width: f32) -> Self {
        Self {
            color,
            width,
            shadow: None,
        }
    }

    pub const fn with_shadow(self, shadow: Argb) -> Self {
        Self {
            shadow: Some(shadow),
            ..self
        }
    }

    pub const fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }
}

/// How a closed shape is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Fill(Shader),
    Stroke(StrokeStyle),
}

/// Paint for left-aligned, baseline-anchored text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub color: Argb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_clamps_outside_stops() {
        let inner = Argb::opaque(255, 0, 0);
        let outer = Argb::opaque(0, 0, 255);
        let shader = Shader::radial(
            PointF::new(0.0, 0.0),
            10.0,
            &[GradientStop::new(inner, 0.2), GradientStop::new(outer, 0.8)],
        );

        assert_eq!(shader.color_at(PointF::new(0.0, 0.0)), inner);
        assert_eq!(shader.color_at(PointF::new(50.0, 0.0)), outer);
        assert_eq!(
            shader.color_at(PointF::new(5.0, 0.0)),
            inner.lerp(outer, 0.5)
        );
    }

    #[test]
    fn test_linear_gradient_is_vertical() {
        let shader = Shader::Linear {
            from: PointF::new(10.0, 0.0),
            to: PointF::new(10.0, 100.0),
            start: Argb::opaque(0, 0, 0),
            end: Argb::opaque(100, 100, 100),
        };
        assert_eq!(
            shader.color_at(PointF::new(-40.0, 25.0)),
            Argb::opaque(25, 25, 25)
        );
        assert_eq!(
            shader.color_at(PointF::new(10.0, 140.0)),
            Argb::opaque(100, 100, 100)
        );
    }

    #[test]
    fn test_empty_stops_are_transparent() {
        assert_eq!(sample_stops(&[], 0.5), Argb::TRANSPARENT);
    }
}
