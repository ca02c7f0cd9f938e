//! Fish movement integration.
//!
//! One tick, in order:
//!  1. pick a target speed (base with input, half base without, boost overrides)
//!  2. accelerate / decelerate toward it
//!  3. bleed speed while the heading gap is large
//!  4. ease the heading toward its target, capped by the speed-dependent turn rate
//!  5. advance along the heading, pinned to the swim plane
//!  6. keep the fish inside the pond, bouncing it back toward the centre

use bevy::prelude::*;

use super::steering;
use crate::config::MovementTuning;
use crate::shared::*;

/// Move input below this magnitude counts as "no input".
const INPUT_EPSILON: f32 = 0.1;
/// Speed multiplier applied when the fish hits the pond edge.
const BOUNDARY_SPEED_FACTOR: f32 = 0.5;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct FishKinematics {
    pub current_speed: f32,
    pub target_speed: f32,
    /// Degrees, `[0, 360)`.
    pub current_heading: f32,
    /// Degrees, `[0, 360)`.
    pub target_heading: f32,
    /// x in `[-1, 1]`, y in `[0, 1]`: fish cannot swim backwards.
    pub move_input: Vec2,
    pub position: Vec3,
    pub velocity: Vec3,
    heading_velocity: f32,
    /// Signed turn (degrees) the current input asked for.
    requested_turn: f32,
    /// Inward nudge from the last edge hit, spent on the next step.
    boundary_push: Vec3,
}

impl FishKinematics {
    pub fn new(position: Vec3, heading: f32, tuning: &MovementTuning) -> Self {
        let mut position = position;
        if tuning.constrain_to_plane {
            position.y = tuning.swim_depth;
        }
        let heading = wrap_degrees(heading);
        Self {
            current_speed: tuning.base_speed,
            target_speed: tuning.base_speed,
            current_heading: heading,
            target_heading: heading,
            move_input: Vec2::ZERO,
            position,
            velocity: Vec3::ZERO,
            heading_velocity: 0.0,
            requested_turn: 0.0,
            boundary_push: Vec3::ZERO,
        }
    }

    /// Accept a move intent. The target heading is only recomputed when the
    /// discrete turn it maps to changes, so a held (or still easing) direction
    /// turns once.
    pub fn set_move_input(&mut self, input: Vec2, tuning: &MovementTuning) {
        let input = Vec2::new(input.x.clamp(-1.0, 1.0), input.y.clamp(0.0, 1.0));
        self.move_input = input;

        let turn = if input.length() < INPUT_EPSILON {
            0.0
        } else {
            steering::turn_delta(input, tuning)
        };
        if turn == self.requested_turn {
            return;
        }
        self.requested_turn = turn;
        self.target_heading = steering::target_heading(input, self.current_heading, tuning);
    }

    /// Drop the move intent without touching the heading target.
    pub fn clear_move_input(&mut self) {
        self.move_input = Vec2::ZERO;
        self.requested_turn = 0.0;
    }

    pub fn has_input(&self) -> bool {
        self.move_input.length() >= INPUT_EPSILON
    }

    /// Unsigned angle, in degrees, between current and target heading.
    pub fn heading_gap(&self) -> f32 {
        delta_angle(self.current_heading, self.target_heading).abs()
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.current_heading.to_radians())
    }

    /// Advance one tick. `boosting` keeps the boost-assigned target speed.
    pub fn integrate(&mut self, dt: f32, boosting: bool, tuning: &MovementTuning) {
        if dt <= 0.0 {
            return;
        }

        if !boosting {
            self.target_speed = if self.has_input() {
                tuning.base_speed
            } else {
                tuning.base_speed * 0.5
            };
        }

        let rate = if self.current_speed < self.target_speed {
            tuning.acceleration
        } else {
            tuning.deceleration
        };
        self.current_speed = move_towards(self.current_speed, self.target_speed, rate * dt);

        self.current_speed *= steering::turn_damping(self.heading_gap(), tuning);

        let max_turn_rate = steering::turn_rate(self.current_speed, tuning);
        let heading = smooth_damp_angle(
            self.current_heading,
            self.target_heading,
            &mut self.heading_velocity,
            tuning.direction_smooth_time,
            max_turn_rate,
            dt,
        );
        self.current_heading = wrap_degrees(heading);

        self.velocity = heading_forward(self.current_heading) * self.current_speed
            + std::mem::take(&mut self.boundary_push);
        if tuning.constrain_to_plane {
            self.velocity.y = 0.0;
        }
        self.position += self.velocity * dt;
        if tuning.constrain_to_plane {
            self.position.y = tuning.swim_depth;
        }

        self.contain(tuning);
        self.current_speed = self.current_speed.clamp(0.0, tuning.max_speed);
    }

    /// Clamp to the pond rectangle. Returns true if an edge was hit. The
    /// inward push lands in the next step's displacement.
    pub fn contain(&mut self, tuning: &MovementTuning) -> bool {
        let half = tuning.half_extents();
        let mut hit = false;

        if self.position.x.abs() > half.x {
            let push = -self.position.x.signum();
            self.position.x = self.position.x.clamp(-half.x, half.x);
            self.boundary_push.x += push * tuning.boundary_push_force;
            hit = true;
        }

        if self.position.z.abs() > half.y {
            let push = -self.position.z.signum();
            self.position.z = self.position.z.clamp(-half.y, half.y);
            self.boundary_push.z += push * tuning.boundary_push_force;
            hit = true;
        }

        if hit {
            self.current_speed *= BOUNDARY_SPEED_FACTOR;
            let to_center = Vec3::new(-self.position.x, 0.0, -self.position.z);
            if to_center.length() > INPUT_EPSILON {
                self.target_heading = heading_of(to_center);
            }
        }
        hit
    }

    pub fn debug_info(&self, tuning: &MovementTuning) -> String {
        format!(
            "Speed: {:.1}/{:.1} | Heading: {:.0}°",
            self.current_speed, tuning.max_speed, self.current_heading
        )
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Critically damped approach of `current` toward `target`, with the rate of
/// change capped at `max_speed` units/s. Never overshoots.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let reachable = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = reachable + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }
    output
}

/// [`smooth_damp`] for angles in degrees, taking the short way round.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, max_speed, dt)
}
