//! # Scalar and Angle Interpolators
//!
//! Pure blends of two tick-boundary values at fractional time `t`.
//!
//! - Linear values round to nearest, so a still object never jitters by one
//!   unit between frames.
//! - Angles take the short way around. Blending 350° to 10° passes through
//!   0°, never through 180°.
//!
//! Both angle precisions share [`short_arc_lerp`]; only the length of a turn
//! differs.

use tickframe_core::{
    Angle, Fixed, FixedAngle, WorldDistance, WorldPoint3d, FIXED_FULL_CIRCLE, FULL_CIRCLE,
};

/// Whether `t` is a fraction the driver will blend with.
///
/// Anything outside `[0, 1]`, NaN included, skips the frame.
#[inline]
#[must_use]
pub fn is_blendable(t: f32) -> bool {
    (0.0..=1.0).contains(&t)
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn blend(a: i64, b: i64, t: f32) -> f64 {
    a as f64 + (b - a) as f64 * f64::from(t)
}

/// Rounded linear blend of two world distances.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lerp_distance(a: WorldDistance, b: WorldDistance, t: f32) -> WorldDistance {
    blend(i64::from(a), i64::from(b), t).round() as WorldDistance
}

/// Rounded linear blend of two fixed-point scalars.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lerp_fixed(a: Fixed, b: Fixed, t: f32) -> Fixed {
    blend(i64::from(a), i64::from(b), t).round() as Fixed
}

/// Component-wise [`lerp_distance`].
#[inline]
#[must_use]
pub fn lerp_point(a: WorldPoint3d, b: WorldPoint3d, t: f32) -> WorldPoint3d {
    WorldPoint3d::new(
        lerp_distance(a.x, b.x, t),
        lerp_distance(a.y, b.y, t),
        lerp_distance(a.z, b.z, t),
    )
}

/// Blends two angles measured in a unit where one turn is `full_turn`.
///
/// Both inputs are normalized into `[0, full_turn)`. When they are more than
/// half a turn apart the lower one is lifted by a full turn, so the blend
/// runs along the arc of at most half a turn. The result is normalized.
///
/// # Panics
///
/// Panics if `full_turn` is not positive.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn short_arc_lerp(a: i64, b: i64, t: f32, full_turn: i64) -> i64 {
    assert!(full_turn > 0, "A turn must have a positive length");
    let half_turn = full_turn / 2;

    let mut a = a.rem_euclid(full_turn);
    let mut b = b.rem_euclid(full_turn);

    if a - b > half_turn {
        b += full_turn;
    } else if a - b < -half_turn {
        a += full_turn;
    }

    let blended = blend(a, b, t).round() as i64;
    blended.rem_euclid(full_turn)
}

/// Short-arc blend of two integer angles.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lerp_angle(a: Angle, b: Angle, t: f32) -> Angle {
    short_arc_lerp(i64::from(a), i64::from(b), t, i64::from(FULL_CIRCLE)) as Angle
}

/// Short-arc blend of two fixed-point angles.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn lerp_fixed_angle(a: FixedAngle, b: FixedAngle, t: f32) -> FixedAngle {
    short_arc_lerp(i64::from(a), i64::from(b), t, i64::from(FIXED_FULL_CIRCLE)) as FixedAngle
}
