//! Reflect-at-boundary normalization of pitch and roll.
//!
//! A value past a limit is mirrored back through the opposite limit rather
//! than wrapped: pitch 95° becomes -85°. A negative overshoot is negated
//! first and then folded the same way, so pitch -95° also becomes -85°. This
//! flips the horizon for extreme attitudes and must match what the dial expects.

use crate::constants::{PITCH_LIMIT_DEG, ROLL_LIMIT_DEG};

/// Beyond this many full spans the value is reduced in closed form; repeated
/// subtraction stops making progress once the spacing of `f32` exceeds the span.
const CLOSED_FORM_SPANS: f32 = 8.0;

/// Fold pitch into `[-90, 90]`.
pub fn fold_pitch(pitch: f32) -> f32 {
    fold_into(pitch, PITCH_LIMIT_DEG)
}

/// Fold roll into `[-180, 180]`.
pub fn fold_roll(roll: f32) -> f32 {
    fold_into(roll, ROLL_LIMIT_DEG)
}

/// Non-finite input folds to 0.
fn fold_into(value: f32, limit: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }

    let span = 2.0 * limit;
    let mut v = value;

    if libm::fabsf(v) > CLOSED_FORM_SPANS * span {
        if v < -limit {
            v = -v;
        }
        v -= span * libm::ceilf((v - limit) / span);
        return v.clamp(-limit, limit);
    }

    while v > limit || v < -limit {
        if v > limit {
            v = -limit + (v - limit);
        }
        if v < -limit {
            v = limit - (v + limit);
        }
    }

    v
}
