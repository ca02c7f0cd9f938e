//! Raw move axis → filtered move intent.

use bevy::prelude::*;

use super::movement::smooth_damp;
use crate::config::IntentTuning;

/// Radial dead zone: vectors shorter than `dead_zone` become zero, the rest
/// are rescaled so the edge of the dead zone maps to zero magnitude.
pub fn apply_dead_zone(input: Vec2, dead_zone: f32) -> Vec2 {
    let magnitude = input.length();
    if magnitude < dead_zone || magnitude <= f32::EPSILON {
        return Vec2::ZERO;
    }
    if dead_zone <= 0.0 {
        return input;
    }
    let remapped = ((magnitude - dead_zone) / (1.0 - dead_zone)).clamp(0.0, 1.0);
    input / magnitude * remapped
}

/// Per-fish input smoothing state.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct IntentFilter {
    pub smoothed: Vec2,
    velocity: Vec2,
}

impl IntentFilter {
    /// Dead zone, inversion, clamp, then optional smoothing.
    pub fn process(&mut self, raw: Vec2, dt: f32, tuning: &IntentTuning) -> Vec2 {
        let mut input = apply_dead_zone(raw, tuning.dead_zone);
        if tuning.invert_x {
            input.x = -input.x;
        }
        if tuning.invert_y {
            input.y = -input.y;
        }
        let input = input.clamp(Vec2::NEG_ONE, Vec2::ONE);

        if !tuning.smooth_input || tuning.smooth_time <= 0.0 {
            self.smoothed = input;
            self.velocity = Vec2::ZERO;
            return input;
        }

        self.smoothed = Vec2::new(
            smooth_damp(
                self.smoothed.x,
                input.x,
                &mut self.velocity.x,
                tuning.smooth_time,
                f32::INFINITY,
                dt,
            ),
            smooth_damp(
                self.smoothed.y,
                input.y,
                &mut self.velocity.y,
                tuning.smooth_time,
                f32::INFINITY,
                dt,
            ),
        );
        self.smoothed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
