//! Drawing surfaces the dial renderer paints through.
//!
//! The renderer only talks to the narrow [`DrawingSurface`] trait. Two
//! surfaces ship with the crate:
//!
//! - [`CommandRecorder`] keeps the issued commands for inspection.
//! - [`RasterSurface`] paints them into an RGB565 [`Framebuffer`] that can be
//!   flushed to any embedded-graphics `DrawTarget`.

pub mod color;
pub mod framebuffer;
pub mod paint;
pub mod raster;
pub mod recorder;
pub mod surface;

pub use color::Argb;
pub use framebuffer::{BlendLayer, Framebuffer};
pub use paint::{GradientStop, GradientStops, MAX_GRADIENT_STOPS, Paint, Shader, StrokeStyle, TextPaint};
pub use raster::RasterSurface;
pub use recorder::{CommandRecorder, DrawCommand};
pub use surface::{DrawingSurface, LABEL_FONT, monospace_text_width};
