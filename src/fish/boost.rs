//! Boost combo.
//!
//! Each boost press (re)starts a short burst. Presses landing inside the combo
//! window stack the combo level, which scales the burst's speed multiplier.
//! Left alone for 1.5 windows after the last press, the combo drops to zero.

use bevy::prelude::*;

use crate::config::BoostTuning;

/// How many combo windows of silence clear the combo.
const COMBO_DECAY_WINDOWS: f32 = 1.5;

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct BoostState {
    pub combo_level: u32,
    /// `Time::elapsed_secs` of the last accepted press.
    pub last_press_time: Option<f32>,
    pub active: bool,
    pub end_time: f32,
}

impl BoostState {
    /// Speed multiplier for a combo level: 1.0 at level 0, `max_multiplier`
    /// at `max_combo_level`.
    pub fn multiplier(level: u32, tuning: &BoostTuning) -> f32 {
        let max_level = tuning.max_combo_level.max(1) as f32;
        1.0 + (tuning.max_multiplier - 1.0) * (level as f32 / max_level)
    }

    /// Register a press at `now`. Returns the boosted target speed.
    pub fn trigger(
        &mut self,
        now: f32,
        current_speed: f32,
        max_speed: f32,
        tuning: &BoostTuning,
    ) -> f32 {
        let in_window = self
            .last_press_time
            .is_some_and(|last| now - last < tuning.combo_window);

        self.combo_level = if in_window {
            (self.combo_level + 1).min(tuning.max_combo_level)
        } else {
            1
        };

        self.last_press_time = Some(now);
        self.active = true;
        self.end_time = now + tuning.duration;

        (current_speed * Self::multiplier(self.combo_level, tuning)).min(max_speed)
    }

    /// Expire the burst and decay the combo.
    pub fn update(&mut self, now: f32, tuning: &BoostTuning) {
        if self.active && now > self.end_time {
            self.active = false;
        }

        if !self.active {
            if let Some(last) = self.last_press_time {
                if now - last > tuning.combo_window * COMBO_DECAY_WINDOWS {
                    self.combo_level = 0;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
