//! Heap-allocated dial framebuffer with alpha blending and change detection.
//!
//! The raster surface paints into this RAM buffer rather than straight onto
//! the display, because the dial layers translucent overlays (glass
//! highlight, markers) that must read back what is underneath. After a frame
//! is painted, only the rectangle containing changed pixels is flushed.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::{BinaryColor, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use log::debug;

use super::color::Argb;

/// Smallest rectangle covering `region` and `point`.
fn grow(region: Option<Rectangle>, point: Point) -> Rectangle {
    match region {
        None => Rectangle::new(point, Size::new(1, 1)),
        Some(region) => {
            let far = region.bottom_right().unwrap_or(region.top_left);
            Rectangle::with_corners(
                region.top_left.component_min(point),
                far.component_max(point),
            )
        }
    }
}

/// RGB565 pixel buffer implementing `DrawTarget<Color = Rgb565>`.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    /// Pixels changed since the last flush
    damage: Option<Rectangle>,
}

impl Framebuffer {
    /// Allocate a `width` x `height` buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            damage: None,
        }
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Whether anything changed since the last flush.
    pub fn is_dirty(&self) -> bool {
        self.damage.is_some()
    }

    /// Composite `color` over the pixel at `(x, y)`; out-of-bounds is ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Argb) {
        if let Some(idx) = self.index(x, y) {
            let blended = color.blend_over(self.pixels[idx]);
            self.write(idx, blended);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Store a pixel; only real changes count as damage.
    #[inline]
    fn write(&mut self, idx: usize, color: Rgb565) {
        if self.pixels[idx] == color {
            return;
        }
        self.pixels[idx] = color;
        let point = Point::new((idx % self.width) as i32, (idx / self.width) as i32);
        self.damage = Some(grow(self.damage, point));
    }

    /// Send the damaged region to `display`, placing the buffer's top-left
    /// corner at `origin`. Does nothing when no pixel changed.
    pub fn flush<D>(&mut self, display: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(region) = self.damage.take() else {
            return Ok(());
        };

        debug!(
            "Flushing {}x{} at ({}, {})",
            region.size.width, region.size.height, region.top_left.x, region.top_left.y
        );

        let stride = self.width;
        let pixels = &self.pixels;
        let colors = region
            .points()
            .map(move |p| pixels[p.y as usize * stride + p.x as usize]);

        display.fill_contiguous(&region.translate(origin), colors)
    }

    /// A `BinaryColor` view that blends `color` wherever a primitive draws `On`.
    ///
    /// Lets embedded-graphics lines and mono text be composited with alpha.
    pub fn blend_layer(&mut self, color: Argb) -> BlendLayer<'_> {
        BlendLayer { target: self, color }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(idx) = self.index(coord.x, coord.y) {
                self.write(idx, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            for x in area.top_left.x..=bottom_right.x {
                if let Some(idx) = self.index(x, y) {
                    self.write(idx, color);
                }
            }
        }
        Ok(())
    }
}

/// Alpha-blending adapter returned by [`Framebuffer::blend_layer`].
pub struct BlendLayer<'a> {
    target: &'a mut Framebuffer,
    color: Argb,
}

impl OriginDimensions for BlendLayer<'_> {
    fn size(&self) -> Size {
        self.target.size()
    }
}

impl DrawTarget for BlendLayer<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, on) in pixels {
            if on.is_on() {
                self.target.blend_pixel(coord.x, coord.y, self.color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    /// Minimal display capturing flushed pixels.
    struct CaptureDisplay {
        written: Vec<Pixel<Rgb565>>,
    }

    impl OriginDimensions for CaptureDisplay {
        fn size(&self) -> Size {
            Size::new(64, 64)
        }
    }

    impl DrawTarget for CaptureDisplay {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.written.extend(pixels);
            Ok(())
        }
    }

    #[test]
    fn test_flush_sends_only_dirty_region() {
        let mut fb = Framebuffer::new(32, 32);
        fb.blend_pixel(3, 4, Argb::opaque(255, 255, 255));
        fb.blend_pixel(5, 4, Argb::opaque(255, 255, 255));

        let mut display = CaptureDisplay {
            written: Vec::new(),
        };
        fb.flush(&mut display, Point::new(10, 10)).ok();

        assert_eq!(display.written.len(), 3);
        assert_eq!(display.written[0].0, Point::new(13, 14));
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_unchanged_write_stays_clean() {
        let mut fb = Framebuffer::new(8, 8);
        fb.blend_pixel(1, 1, Argb::opaque(0, 0, 0));
        assert!(!fb.is_dirty());
        fb.blend_pixel(-1, 100, Argb::opaque(255, 0, 0));
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_blend_layer_draws_line() {
        let mut fb = Framebuffer::new(16, 16);
        Line::new(Point::new(0, 8), Point::new(15, 8))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb.blend_layer(Argb::opaque(255, 255, 255)))
            .ok();

        assert_eq!(fb.pixel(7, 8), Some(Rgb565::WHITE));
        assert_eq!(fb.pixel(7, 7), Some(Rgb565::BLACK));
    }
}
