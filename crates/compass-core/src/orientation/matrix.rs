//! Rotation matrix construction, axis remapping and angle extraction.
//!
//! Matrices are row-major device-to-world rotations with rows
//! (east, north, up) expressed in device coordinates.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{FREE_FALL_GRAVITY_FRACTION, MIN_HORIZONTAL_FIELD_NORM, STANDARD_GRAVITY};
use crate::error::OrientationError;

use super::DeviceAttitude;

/// Signed device axis used to describe a coordinate remap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    MinusX,
    MinusY,
    MinusZ,
}

impl Axis {
    /// Column index of the unsigned axis.
    pub const fn index(self) -> usize {
        match self {
            Axis::X | Axis::MinusX => 0,
            Axis::Y | Axis::MinusY => 1,
            Axis::Z | Axis::MinusZ => 2,
        }
    }

    pub const fn is_negative(self) -> bool {
        matches!(self, Axis::MinusX | Axis::MinusY | Axis::MinusZ)
    }
}

fn signed(value: f32, negative: bool) -> f32 {
    if negative { -value } else { value }
}

/// Rotation matrix from a gravity reading and a geomagnetic reading.
///
/// East is `E × A`, up is `A`, north completes the frame as `A × H`.
/// Fails when the device is in free fall or the two vectors are (nearly)
/// parallel, in which case there is no usable horizontal field.
pub fn rotation_matrix(
    gravity: &Vector3<f32>,
    geomagnetic: &Vector3<f32>,
) -> Result<Matrix3<f32>, OrientationError> {
    let free_fall_sq = FREE_FALL_GRAVITY_FRACTION * STANDARD_GRAVITY * STANDARD_GRAVITY;
    let gravity_sq = gravity.norm_squared();
    if !(gravity_sq >= free_fall_sq) {
        return Err(OrientationError::FreeFall);
    }

    let east = geomagnetic.cross(gravity);
    let east_norm = east.norm();
    if !(east_norm >= MIN_HORIZONTAL_FIELD_NORM) {
        return Err(OrientationError::Degenerate);
    }

    let h = east / east_norm;
    let a = gravity / libm::sqrtf(gravity_sq);
    let m = a.cross(&h);

    Ok(Matrix3::new(
        h.x, h.y, h.z, //
        m.x, m.y, m.z, //
        a.x, a.y, a.z,
    ))
}

/// Re-express `rotation` so device axis `x_axis` becomes logical X and
/// `y_axis` becomes logical Y. Logical Z is picked to keep the frame
/// right-handed.
pub fn remap(
    rotation: &Matrix3<f32>,
    x_axis: Axis,
    y_axis: Axis,
) -> Result<Matrix3<f32>, OrientationError> {
    let (x, y) = (x_axis.index(), y_axis.index());
    if x == y {
        return Err(OrientationError::InvalidRemap {
            x: x_axis,
            y: y_axis,
        });
    }

    let z = 3 - x - y;
    let cyclic = x == (z + 1) % 3 && y == (z + 2) % 3;
    let z_negative = x_axis.is_negative() ^ y_axis.is_negative() ^ !cyclic;

    let mut out = Matrix3::zeros();
    for row in 0..3 {
        out[(row, x)] = signed(rotation[(row, 0)], x_axis.is_negative());
        out[(row, y)] = signed(rotation[(row, 1)], y_axis.is_negative());
        out[(row, z)] = signed(rotation[(row, 2)], z_negative);
    }

    Ok(out)
}

/// Azimuth, pitch and roll (degrees) of a rotation matrix.
///
/// Azimuth comes straight from `atan2` and so lies in `(-180, 180]`; it is
/// not wrapped into `[0, 360)`.
pub fn attitude_from_matrix(r: &Matrix3<f32>) -> DeviceAttitude {
    let azimuth = libm::atan2f(r[(0, 1)], r[(1, 1)]);
    let pitch = libm::asinf((-r[(2, 1)]).clamp(-1.0, 1.0));
    let roll = libm::atan2f(-r[(2, 0)], r[(2, 2)]);

    DeviceAttitude {
        azimuth: azimuth.to_degrees(),
        pitch: pitch.to_degrees(),
        roll: roll.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: f32 = 9.81;

    fn approx(a: f32, b: f32) -> bool {
        libm::fabsf(a - b) < 1e-3
    }

    fn flat_north() -> Matrix3<f32> {
        rotation_matrix(&Vector3::new(0.0, 0.0, G), &Vector3::new(0.0, 20.0, -40.0))
            .unwrap_or_else(|e| panic!("flat device should resolve: {e:?}"))
    }

    #[test]
    fn test_flat_device_facing_north_is_identity() {
        let r = flat_north();
        assert!((r - Matrix3::identity()).abs().max() < 1e-5);
    }

    #[test]
    fn test_free_fall_is_rejected() {
        let result = rotation_matrix(&Vector3::new(0.0, 0.0, 0.5), &Vector3::new(0.0, 20.0, -40.0));
        assert_eq!(result, Err(OrientationError::FreeFall));
    }

    #[test]
    fn test_parallel_vectors_are_degenerate() {
        let result = rotation_matrix(&Vector3::new(0.0, 0.0, G), &Vector3::new(0.0, 0.0, -45.0));
        assert_eq!(result, Err(OrientationError::Degenerate));
    }

    #[test]
    fn test_nan_input_is_rejected() {
        let result = rotation_matrix(&Vector3::new(f32::NAN, 0.0, G), &Vector3::new(0.0, 20.0, -40.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_remap_rejects_shared_axis() {
        let result = remap(&Matrix3::identity(), Axis::X, Axis::MinusX);
        assert_eq!(
            result,
            Err(OrientationError::InvalidRemap {
                x: Axis::X,
                y: Axis::MinusX
            })
        );
    }

    #[test]
    fn test_remap_tables_rotate_azimuth() {
        let r = flat_north();

        let cases = [
            (Axis::X, Axis::Y, 0.0),
            (Axis::Y, Axis::MinusX, 90.0),
            (Axis::MinusY, Axis::X, -90.0),
        ];
        for (x, y, expected) in cases {
            let remapped = remap(&r, x, y).unwrap_or_else(|e| panic!("{e:?}"));
            let azimuth = attitude_from_matrix(&remapped).azimuth;
            assert!(approx(azimuth, expected), "{x:?}/{y:?}: {azimuth}");
        }

        let upside_down = remap(&r, Axis::X, Axis::MinusY).unwrap_or_else(|e| panic!("{e:?}"));
        assert!(approx(libm::fabsf(attitude_from_matrix(&upside_down).azimuth), 180.0));
    }

    #[test]
    fn test_remap_keeps_right_handed_frame() {
        let r = flat_north();
        for (x, y) in [
            (Axis::X, Axis::Y),
            (Axis::Y, Axis::MinusX),
            (Axis::X, Axis::MinusY),
            (Axis::MinusY, Axis::X),
        ] {
            let remapped = remap(&r, x, y).unwrap_or_else(|e| panic!("{e:?}"));
            assert!(approx(remapped.determinant(), 1.0), "{x:?}/{y:?}");
        }
    }

    #[test]
    fn test_pitch_and_roll_from_tilted_gravity() {
        let half = 0.5 * G;
        let cos30 = 0.866_025_4 * G;
        let magnetic = Vector3::new(0.0, 20.0, -40.0);

        let pitched = rotation_matrix(&Vector3::new(0.0, half, cos30), &magnetic)
            .unwrap_or_else(|e| panic!("{e:?}"));
        let attitude = attitude_from_matrix(&pitched);
        assert!(approx(attitude.pitch, -30.0), "pitch {}", attitude.pitch);
        assert!(approx(attitude.azimuth, 0.0));

        let rolled = rotation_matrix(&Vector3::new(-half, 0.0, cos30), &magnetic)
            .unwrap_or_else(|e| panic!("{e:?}"));
        let attitude = attitude_from_matrix(&rolled);
        assert!(approx(attitude.roll, 30.0), "roll {}", attitude.roll);
    }
}
