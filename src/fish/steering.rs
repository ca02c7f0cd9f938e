//! Discretised steering.
//!
//! A fish never steers continuously. Lateral input picks one of two fixed
//! turn angles (small when also swimming forward, large for a pure sideways
//! push) and the heading then eases toward that target at a rate that shrinks
//! as the fish speeds up. Large heading gaps bleed speed.

use bevy::prelude::*;

use crate::config::MovementTuning;
use crate::shared::*;

/// Lateral input at or below this is treated as "straight ahead".
const LATERAL_THRESHOLD: f32 = 0.1;
/// Forward input above this turns a sideways push into a gentle turn.
const FORWARD_THRESHOLD: f32 = 0.1;
/// Heading gap (degrees) below which turning costs no speed.
const DAMPING_START_ANGLE: f32 = 10.0;
/// Heading gap (degrees) at which turn damping reaches `turn_dampening`.
const DAMPING_FULL_ANGLE: f32 = 60.0;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Signed turn, in degrees, requested by a move input.
pub fn turn_delta(input: Vec2, tuning: &MovementTuning) -> f32 {
    if input.x.abs() <= LATERAL_THRESHOLD {
        return 0.0;
    }
    let magnitude = if input.y > FORWARD_THRESHOLD {
        tuning.turn_angle_small
    } else {
        tuning.turn_angle_large
    };
    if input.x > 0.0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Absolute target heading for a move input, relative to the current heading.
pub fn target_heading(input: Vec2, current_heading: f32, tuning: &MovementTuning) -> f32 {
    wrap_degrees(current_heading + turn_delta(input, tuning))
}

/// Maximum angular speed (degrees/s) at the given linear speed.
pub fn turn_rate(speed: f32, tuning: &MovementTuning) -> f32 {
    let ratio = if tuning.max_speed > 0.0 {
        speed / tuning.max_speed
    } else {
        1.0
    };
    lerp(tuning.turn_speed_base, tuning.turn_speed_at_max_speed, ratio)
}

/// Per-tick speed multiplier for a heading gap of `gap` degrees.
pub fn turn_damping(gap: f32, tuning: &MovementTuning) -> f32 {
    let gap = gap.abs();
    if gap <= DAMPING_START_ANGLE {
        return 1.0;
    }
    lerp(1.0, tuning.turn_dampening, gap / DAMPING_FULL_ANGLE)
}
