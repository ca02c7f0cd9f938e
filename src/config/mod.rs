//! Gameplay tuning: every number the fish, fisher and match domains read.
//!
//! Defaults mirror the values the game shipped with. At startup the tuning is
//! replaced by `assets/tuning.ron` when that file exists; a missing file keeps
//! the defaults, a malformed one keeps them too and logs a warning. Whatever is
//! loaded passes through [`GameTuning::sanitized`] so downstream code never
//! sees negative durations or an empty boundary.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub struct TuningPlugin;

impl Plugin for TuningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameTuning>()
            .init_resource::<TuningPath>()
            .add_systems(Startup, load_tuning_file.in_set(TuningLoaded));
    }
}

/// Startup set that finishes once tuning is in place. Spawning runs after it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TuningLoaded;

/// Location of the RON tuning file read at startup.
#[derive(Resource, Debug, Clone)]
pub struct TuningPath(pub PathBuf);

impl Default for TuningPath {
    fn default() -> Self {
        Self(PathBuf::from("assets/tuning.ron"))
    }
}

// ─── Tuning tables ───────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub movement: MovementTuning,
    pub boost: BoostTuning,
    pub fish_state: FishStateTuning,
    pub escape: EscapeTuning,
    pub intent: IntentTuning,
    pub targeting: TargetingTuning,
    pub capture: CaptureTuning,
    pub match_rules: MatchTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub base_speed: f32,
    pub max_speed: f32,
    /// Units/s² when speeding up toward the target speed.
    pub acceleration: f32,
    /// Units/s² when slowing down toward the target speed.
    pub deceleration: f32,
    /// Per-tick speed multiplier at a 60° heading gap (1.0 below 10°).
    pub turn_dampening: f32,
    /// Degrees/s the heading may change at rest.
    pub turn_speed_base: f32,
    /// Degrees/s the heading may change at `max_speed`.
    pub turn_speed_at_max_speed: f32,
    /// Turn for pure lateral input.
    pub turn_angle_large: f32,
    /// Turn for forward + lateral input.
    pub turn_angle_small: f32,
    pub direction_smooth_time: f32,
    /// Y of the swim plane.
    pub swim_depth: f32,
    pub constrain_to_plane: bool,
    /// Full X/Z extents of the pond, centred on the origin.
    pub boundary_size: Vec2,
    pub boundary_push_force: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            base_speed: 2.0,
            max_speed: 8.0,
            acceleration: 3.0,
            deceleration: 1.5,
            turn_dampening: 0.85,
            turn_speed_base: 120.0,
            turn_speed_at_max_speed: 60.0,
            turn_angle_large: 60.0,
            turn_angle_small: 30.0,
            direction_smooth_time: 0.1,
            swim_depth: 0.0,
            constrain_to_plane: true,
            boundary_size: Vec2::new(50.0, 50.0),
            boundary_push_force: 5.0,
        }
    }
}

impl MovementTuning {
    pub fn half_extents(&self) -> Vec2 {
        self.boundary_size / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostTuning {
    /// Speed multiplier at the top combo level.
    pub max_multiplier: f32,
    pub duration: f32,
    /// Presses closer together than this build the combo.
    pub combo_window: f32,
    pub max_combo_level: u32,
}

impl Default for BoostTuning {
    fn default() -> Self {
        Self {
            max_multiplier: 1.5,
            duration: 0.5,
            combo_window: 0.3,
            max_combo_level: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishStateTuning {
    pub stunned_duration: f32,
    /// Heading gap (degrees) that throws the fish into Turning.
    pub turn_state_angle: f32,
    /// Seconds spent in Turning before returning to the interrupted state.
    pub turn_state_duration: f32,
    /// Below this speed the fish is Idle.
    pub idle_speed: f32,
    /// Above this speed (with enough stamina) the fish is Sprinting.
    pub sprint_speed: f32,
    /// Stamina needed to enter Sprinting.
    pub sprint_min_stamina: f32,
    pub max_stamina: f32,
    pub stamina_drain_rate: f32,
    pub stamina_recovery_rate: f32,
    /// Stamina must move at least this far from the last report to notify.
    pub stamina_event_epsilon: f32,
}

impl Default for FishStateTuning {
    fn default() -> Self {
        Self {
            stunned_duration: 2.0,
            turn_state_angle: 45.0,
            turn_state_duration: 0.5,
            idle_speed: 0.5,
            sprint_speed: 5.0,
            sprint_min_stamina: 10.0,
            max_stamina: 100.0,
            stamina_drain_rate: 5.0,
            stamina_recovery_rate: 3.0,
            stamina_event_epsilon: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeTuning {
    /// Longest a hooked fish may struggle before it is caught.
    pub max_duration: f32,
    /// Progress lost per second.
    pub decay_rate: f32,
    pub success_threshold: f32,
    /// Progress gained per struggle press.
    pub struggle_amount: f32,
}

impl Default for EscapeTuning {
    fn default() -> Self {
        Self {
            max_duration: 5.0,
            decay_rate: 10.0,
            success_threshold: 100.0,
            struggle_amount: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentTuning {
    pub dead_zone: f32,
    pub invert_x: bool,
    pub invert_y: bool,
    pub smooth_input: bool,
    pub smooth_time: f32,
}

impl Default for IntentTuning {
    fn default() -> Self {
        Self {
            dead_zone: 0.2,
            invert_x: false,
            invert_y: false,
            smooth_input: true,
            smooth_time: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingTuning {
    /// Y of the plane the fish swim on; the logical crosshair lives here.
    pub fish_plane_y: f32,
    /// Y of the display-only crosshair.
    pub visual_plane_y: f32,
    /// Exponential approach rate of the logical crosshair (1/s).
    pub smooth_speed: f32,
}

impl Default for TargetingTuning {
    fn default() -> Self {
        Self {
            fish_plane_y: 0.0,
            visual_plane_y: 5.0,
            smooth_speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureTuning {
    pub swing_duration: f32,
    pub swing_cooldown: f32,
    pub hook_radius: f32,
    /// Bitmask of collider layers the hook can catch.
    pub capture_layers: u32,
    /// When set, a hit hooks the fish instead of ending the match outright.
    pub hook_before_catch: bool,
}

impl Default for CaptureTuning {
    fn default() -> Self {
        Self {
            swing_duration: 0.5,
            swing_cooldown: 1.0,
            hook_radius: 0.5,
            capture_layers: crate::shared::CAPTURE_LAYER_FISH,
            hook_before_catch: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTuning {
    pub duration: f32,
    /// Start the first match as soon as the app boots.
    pub auto_start: bool,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            duration: 60.0,
            auto_start: true,
        }
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

impl GameTuning {
    /// Parse a RON document. Omitted fields keep their defaults.
    pub fn from_ron(src: &str) -> Result<Self, String> {
        ron::from_str::<GameTuning>(src)
            .map(GameTuning::sanitized)
            .map_err(|e| format!("Tuning parse failed: {}", e))
    }

    /// Clamp every value into a range the simulation can handle.
    pub fn sanitized(mut self) -> Self {
        let m = &mut self.movement;
        m.base_speed = m.base_speed.max(0.0);
        m.max_speed = m.max_speed.max(m.base_speed).max(f32::EPSILON);
        m.acceleration = m.acceleration.max(0.0);
        m.deceleration = m.deceleration.max(0.0);
        m.turn_dampening = m.turn_dampening.clamp(0.0, 1.0);
        m.turn_speed_base = m.turn_speed_base.max(0.0);
        m.turn_speed_at_max_speed = m.turn_speed_at_max_speed.max(0.0);
        m.direction_smooth_time = m.direction_smooth_time.max(0.0);
        m.boundary_size = m.boundary_size.max(Vec2::splat(0.01));
        m.boundary_push_force = m.boundary_push_force.max(0.0);

        let b = &mut self.boost;
        b.max_multiplier = b.max_multiplier.max(1.0);
        b.duration = b.duration.max(0.0);
        b.combo_window = b.combo_window.max(0.0);
        b.max_combo_level = b.max_combo_level.max(1);

        let s = &mut self.fish_state;
        s.stunned_duration = s.stunned_duration.max(0.0);
        s.turn_state_angle = s.turn_state_angle.max(0.0);
        s.turn_state_duration = s.turn_state_duration.max(0.0);
        s.idle_speed = s.idle_speed.max(0.0);
        s.sprint_speed = s.sprint_speed.max(s.idle_speed);
        s.max_stamina = s.max_stamina.max(f32::EPSILON);
        s.sprint_min_stamina = s.sprint_min_stamina.clamp(0.0, s.max_stamina);
        s.stamina_drain_rate = s.stamina_drain_rate.max(0.0);
        s.stamina_recovery_rate = s.stamina_recovery_rate.max(0.0);
        s.stamina_event_epsilon = s.stamina_event_epsilon.max(0.0);

        let e = &mut self.escape;
        e.max_duration = e.max_duration.max(0.0);
        e.decay_rate = e.decay_rate.max(0.0);
        e.success_threshold = e.success_threshold.max(0.0);
        e.struggle_amount = e.struggle_amount.max(0.0);

        let i = &mut self.intent;
        i.dead_zone = i.dead_zone.clamp(0.0, 0.99);
        i.smooth_time = i.smooth_time.max(0.0);

        self.targeting.smooth_speed = self.targeting.smooth_speed.max(0.0);

        let c = &mut self.capture;
        c.swing_duration = c.swing_duration.max(0.0);
        c.swing_cooldown = c.swing_cooldown.max(0.0);
        c.hook_radius = c.hook_radius.max(0.0);

        self.match_rules.duration = self.match_rules.duration.max(0.0);
        self
    }
}

fn load_tuning_file(path: Res<TuningPath>, mut tuning: ResMut<GameTuning>) {
    let path = &path.0;
    let src = match std::fs::read_to_string(path) {
        Ok(src) => src,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("[Tuning] {} not found, using built-in defaults.", path.display());
            *tuning = tuning.clone().sanitized();
            return;
        }
        Err(e) => {
            warn!("[Tuning] Could not read {}: {}", path.display(), e);
            *tuning = tuning.clone().sanitized();
            return;
        }
    };

    match GameTuning::from_ron(&src) {
        Ok(loaded) => {
            info!("[Tuning] Loaded {}", path.display());
            *tuning = loaded;
        }
        Err(e) => {
            warn!("[Tuning] {}, keeping defaults.", e);
            *tuning = tuning.clone().sanitized();
        }
    }
}
