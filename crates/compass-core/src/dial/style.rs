//! Dial colors, gradient stops and stroke widths.

use serde::{Deserialize, Serialize};

use crate::constants::MARKER_ALPHA;
use crate::render::{Argb, GradientStop};

/// Brightness of the glass highlight gray.
const GLASS_GRAY: u8 = 245;

/// Immutable look of the compass dial.
///
/// Gradient stops are ordered by ascending position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialStyle {
    /// Outer and inner rim strokes
    pub circle_color: Argb,
    pub text_color: Argb,
    /// Ticks, ladder rungs, horizon line
    pub marker_color: Argb,
    pub marker_shadow_color: Argb,

    /// Radial fill of the outer ring, center to rim
    pub border_stops: [GradientStop; 4],
    /// Radial highlight over the inner circle, center to rim
    pub glass_stops: [GradientStop; 5],

    /// Sky gradient, top of the inner circle to bottom
    pub sky_from: Argb,
    pub sky_to: Argb,
    /// Ground gradient, top of the inner circle to bottom
    pub ground_from: Argb,
    pub ground_to: Argb,

    pub marker_stroke_width: f32,
    pub horizon_stroke_width: f32,
    pub outer_rim_stroke_width: f32,
    pub inner_rim_stroke_width: f32,
}

impl Default for DialStyle {
    fn default() -> Self {
        let glass = |alpha: u8| Argb::new(alpha, GLASS_GRAY, GLASS_GRAY, GLASS_GRAY);

        Self {
            circle_color: Argb::from_u32(0xFF55_5555),
            text_color: Argb::from_u32(0xFFFF_FFFF),
            marker_color: Argb::from_u32(0xFFFF_FFFF).with_alpha(MARKER_ALPHA),
            marker_shadow_color: Argb::from_u32(0x77AA_AAAA),

            border_stops: [
                GradientStop::new(Argb::from_u32(0xFF44_4444), 0.0),
                GradientStop::new(Argb::from_u32(0xFF41_4141), 1.0 - 0.06),
                GradientStop::new(Argb::from_u32(0xFF32_3232), 1.0 - 0.03),
                GradientStop::new(Argb::from_u32(0xFFFF_FFFF), 1.0),
            ],
            glass_stops: [
                GradientStop::new(glass(0), 1.0 - 1.0),
                GradientStop::new(glass(0), 1.0 - 0.20),
                GradientStop::new(glass(50), 1.0 - 0.10),
                GradientStop::new(glass(100), 1.0 - 0.06),
                GradientStop::new(glass(65), 1.0 - 0.0),
            ],

            sky_from: Argb::from_u32(0xFF5F_9EA0),
            sky_to: Argb::from_u32(0xFF00_008B),
            ground_from: Argb::from_u32(0xFFA5_2A2A),
            ground_to: Argb::from_u32(0xFFFF_C125),

            marker_stroke_width: 1.0,
            horizon_stroke_width: 2.0,
            outer_rim_stroke_width: 1.0,
            inner_rim_stroke_width: 2.0,
        }
    }
}
