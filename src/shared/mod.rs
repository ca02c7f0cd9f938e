//! Shared components, resources, events, and system sets for Fish And Fisher.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// FRAME ORDERING: input → movement → aim/capture → fish state → match
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame ordering of the gameplay systems. Chained in `Update` by
/// [`configure_game_sets`], so events written in one set are visible to every
/// later set within the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Device state has already become intents; route them to the actors.
    Input,
    /// Steering, boost and position integration.
    Movement,
    /// Crosshair tracking and rod swings.
    Aim,
    /// Fish commands, state timers, stamina and automatic transitions.
    FishState,
    /// Match timer and win resolution.
    Match,
}

pub fn configure_game_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameSet::Input,
            GameSet::Movement,
            GameSet::Aim,
            GameSet::FishState,
            GameSet::Match,
        )
            .chain(),
    );
}

// ═══════════════════════════════════════════════════════════════════════
// FISH STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FishState {
    #[default]
    Idle,
    Swimming,
    Sprinting,
    /// Short hard-turn state; reverts to the state it interrupted.
    Turning,
    Stunned,
    /// Hooked and struggling to break free.
    Escaping,
    /// Terminal.
    Caught,
}

impl FishState {
    /// States in which the speed-based Idle/Swimming/Sprinting selection is suspended.
    pub fn blocks_auto_transitions(self) -> bool {
        matches!(
            self,
            FishState::Stunned | FishState::Caught | FishState::Escaping | FishState::Turning
        )
    }

    pub fn can_move(self) -> bool {
        !matches!(self, FishState::Stunned | FishState::Caught)
    }

    pub fn can_accelerate(self) -> bool {
        matches!(self, FishState::Swimming | FishState::Sprinting)
    }

    pub fn regenerates_stamina(self) -> bool {
        matches!(self, FishState::Idle | FishState::Swimming)
    }

    pub fn can_start_turn(self) -> bool {
        matches!(
            self,
            FishState::Idle | FishState::Swimming | FishState::Sprinting
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MATCH
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Ready,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchResult {
    #[default]
    Undecided,
    FishWins,
    FisherWins,
}

/// Process-wide match state. Only the match domain mutates it; everything
/// else reads it (usually through [`match_running`]) or posts events.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchState {
    pub phase: MatchPhase,
    /// Seconds left on the clock. Frozen once the match has ended.
    pub remaining_time: f32,
    /// Length of a match in seconds, copied from tuning at start.
    pub duration: f32,
    pub result: MatchResult,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: MatchPhase::Ready,
            remaining_time: 60.0,
            duration: 60.0,
            result: MatchResult::Undecided,
        }
    }
}

impl MatchState {
    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_time(&self) -> String {
        let total = self.remaining_time.max(0.0);
        let minutes = (total / 60.0).floor() as u32;
        let seconds = (total % 60.0).floor() as u32;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Run condition: true while a match is being played.
pub fn match_running(state: Res<MatchState>) -> bool {
    state.is_running()
}

// ═══════════════════════════════════════════════════════════════════════
// ACTOR MARKERS & COLLIDERS
// ═══════════════════════════════════════════════════════════════════════

/// Root entity of a fish. Capture hits on child colliders resolve up to it.
#[derive(Component, Debug, Default)]
pub struct Fish;

/// Root entity of a fisher.
#[derive(Component, Debug, Default)]
pub struct Fisher;

/// Where an actor was spawned, so a match restart can put it back.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub position: Vec3,
    /// Yaw in degrees.
    pub heading: f32,
}

pub const CAPTURE_LAYER_FISH: u32 = 1 << 0;
pub const CAPTURE_LAYER_SCENERY: u32 = 1 << 1;

/// Spherical collider the fisher's hook can overlap. Its world position is the
/// entity's `Transform` composed with every ancestor's.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HookTarget {
    pub radius: f32,
    /// Bitmask of `CAPTURE_LAYER_*` values.
    pub layers: u32,
}

impl Default for HookTarget {
    fn default() -> Self {
        Self {
            radius: 0.5,
            layers: CAPTURE_LAYER_FISH,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INTENTS: written by the input layer (or tests), consumed by the actors
// ═══════════════════════════════════════════════════════════════════════

/// Fish player intents for the current frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct FishInput {
    /// Raw stick/keyboard axis: x = lateral, y = forward. Filtered downstream.
    pub move_axis: Vec2,
    /// Boost button press edge. Doubles as the struggle action while hooked.
    /// Cleared once consumed.
    pub boost: bool,
}

/// Fisher player intents for the current frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct FisherInput {
    /// Ray from the viewing camera through the pointer, if the pointer is over
    /// the viewport.
    pub aim_ray: Option<Ray3d>,
    /// Attack button press edge. Cleared once consumed.
    pub attack: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: commands
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FishCommandKind {
    /// Stun for the given seconds; a non-positive value uses the tuned default.
    Stun(f32),
    /// Hooked: forces the Escaping state.
    Hook,
    /// Struggle against the hook. Ignored outside Escaping.
    AddEscapeProgress(f32),
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FishCommand {
    pub fish: Entity,
    pub kind: FishCommandKind,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommand {
    Start,
    Restart,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS: notifications
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone, Copy)]
pub struct FishStateChangedEvent {
    pub fish: Entity,
    pub from: FishState,
    pub to: FishState,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EscapeSuccessEvent {
    pub fish: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FishCaughtEvent {
    pub fish: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct StaminaChangedEvent {
    pub fish: Entity,
    /// Stamina as a fraction of the maximum, 0.0–1.0.
    pub fraction: f32,
}

/// A rod swing was accepted (cooldown elapsed, no swing in progress).
#[derive(Event, Debug, Clone, Copy)]
pub struct SwingEvent {
    pub fisher: Entity,
    /// Fish whose collider the hook overlapped, if any.
    pub hit: Option<Entity>,
}

/// The fisher's hook landed on a fish.
#[derive(Event, Debug, Clone, Copy)]
pub struct CaptureEvent {
    pub fisher: Entity,
    pub fish: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct MatchStartedEvent {
    pub duration: f32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct MatchEndedEvent {
    pub result: MatchResult,
}

// ═══════════════════════════════════════════════════════════════════════
// ANGLE HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// Wraps degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed difference `target - current` in degrees, in `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Horizontal forward vector for a yaw in degrees (0° faces +Z, 90° faces +X).
pub fn heading_forward(heading: f32) -> Vec3 {
    let radians = heading.to_radians();
    Vec3::new(radians.sin(), 0.0, radians.cos())
}

/// Yaw in degrees of a horizontal direction, inverse of [`heading_forward`].
pub fn heading_of(direction: Vec3) -> f32 {
    wrap_degrees(direction.x.atan2(direction.z).to_degrees())
}
