//! Floating-point geometry for dial layout and surface transforms.
//!
//! embedded-graphics works in whole pixels. The dial needs sub-pixel label
//! positions and rotations about the dial center, so layout is done with these
//! `f32` types and converted with [`PointF::to_point`] at rasterization time.

use embedded_graphics::prelude::Point;

/// A point in surface coordinates (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Round to the nearest integer pixel.
    pub fn to_point(self) -> Point {
        Point::new(libm::roundf(self.x) as i32, libm::roundf(self.y) as i32)
    }

    pub fn distance_to(self, other: PointF) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of half-side `half` centered on `center`.
    pub fn square(center: PointF, half: f32) -> Self {
        Self::new(
            center.x - half,
            center.y - half,
            center.x + half,
            center.y + half,
        )
    }

    /// Shrink every edge by `amount`.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Whether `p` lies inside the ellipse inscribed in this rectangle.
    pub fn ellipse_contains(&self, p: PointF) -> bool {
        let rx = self.width() / 2.0;
        let ry = self.height() / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let c = self.center();
        let nx = (p.x - c.x) / rx;
        let ny = (p.y - c.y) / ry;
        nx * nx + ny * ny <= 1.0
    }

    /// Point on the inscribed ellipse at `degrees` (0 = right, clockwise).
    pub fn ellipse_point(&self, degrees: f32) -> PointF {
        let c = self.center();
        let theta = degrees.to_radians();
        PointF::new(
            c.x + self.width() / 2.0 * libm::cosf(theta),
            c.y + self.height() / 2.0 * libm::sinf(theta),
        )
    }
}

/// Rotation plus translation, applied as `p' = M·p + t`.
///
/// Positive angles turn clockwise on screen because y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Rotation by `degrees` about `pivot`.
    pub fn rotation(degrees: f32, pivot: PointF) -> Self {
        let theta = degrees.to_radians();
        let (sin, cos) = (libm::sinf(theta), libm::cosf(theta));
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: pivot.x - cos * pivot.x + sin * pivot.y,
            ty: pivot.y - sin * pivot.x - cos * pivot.y,
        }
    }

    pub fn apply(&self, p: PointF) -> PointF {
        PointF::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// `self ∘ inner`: apply `inner` first, then `self`.
    ///
    /// This is how a canvas concatenates a new rotation onto its current
    /// matrix, so later rotations act in the already-rotated frame.
    pub fn concat(&self, inner: &Transform) -> Self {
        Self {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            tx: self.a * inner.tx + self.c * inner.ty + self.tx,
            ty: self.b * inner.tx + self.d * inner.ty + self.ty,
        }
    }

    /// Inverse of a rotation-translation (the linear part is orthonormal).
    pub fn inverse(&self) -> Self {
        Self {
            a: self.a,
            b: self.c,
            c: self.b,
            d: self.d,
            tx: -(self.a * self.tx + self.b * self.ty),
            ty: -(self.c * self.tx + self.d * self.ty),
        }
    }

    /// Net rotation angle in degrees, in `(-180, 180]`.
    pub fn angle_degrees(&self) -> f32 {
        libm::atan2f(self.b, self.a).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: PointF, b: PointF) -> bool {
        a.distance_to(b) < 1e-3
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        let pivot = PointF::new(100.0, 100.0);
        let top = PointF::new(100.0, 0.0);
        let rotated = Transform::rotation(90.0, pivot).apply(top);
        assert!(close(rotated, PointF::new(200.0, 100.0)), "{:?}", rotated);
    }

    #[test]
    fn test_concat_accumulates_rotations() {
        let pivot = PointF::new(50.0, 50.0);
        let t = Transform::rotation(-90.0, pivot).concat(&Transform::rotation(90.0, pivot));
        let p = PointF::new(50.0, 10.0);
        assert!(close(t.apply(p), p));
        assert!(libm::fabsf(t.angle_degrees()) < 1e-3);
    }

    #[test]
    fn test_inverse_round_trips() {
        let t = Transform::rotation(33.0, PointF::new(12.0, -4.0));
        let p = PointF::new(7.5, 19.0);
        assert!(close(t.inverse().apply(t.apply(p)), p));
    }

    #[test]
    fn test_ellipse_point_and_contains() {
        let r = RectF::square(PointF::new(10.0, 10.0), 5.0);
        assert!(close(r.ellipse_point(90.0), PointF::new(10.0, 15.0)));
        assert!(r.ellipse_contains(PointF::new(10.0, 14.9)));
        assert!(!r.ellipse_contains(PointF::new(14.0, 14.0)));
    }
}
