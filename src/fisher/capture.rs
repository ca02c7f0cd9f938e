//! Rod swings and hook hit detection.

use bevy::prelude::*;

use super::targeting::Crosshair;
use crate::config::{CaptureTuning, GameTuning};
use crate::shared::*;

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FishingRod {
    pub swinging: bool,
    pub swing_timer: f32,
    /// `Time::elapsed_secs` of the last accepted swing.
    pub last_swing_time: Option<f32>,
}

impl FishingRod {
    /// Seconds until another swing will be accepted.
    pub fn cooldown_remaining(&self, now: f32, tuning: &CaptureTuning) -> f32 {
        self.last_swing_time
            .map(|last| (tuning.swing_cooldown - (now - last)).max(0.0))
            .unwrap_or(0.0)
    }

    /// Start a swing unless one is in progress or the rod is cooling down.
    pub fn try_start_swing(&mut self, now: f32, tuning: &CaptureTuning) -> bool {
        if self.swinging || self.cooldown_remaining(now, tuning) > 0.0 {
            return false;
        }
        self.swinging = true;
        self.swing_timer = 0.0;
        self.last_swing_time = Some(now);
        true
    }

    pub fn advance(&mut self, dt: f32, tuning: &CaptureTuning) {
        if !self.swinging {
            return;
        }
        self.swing_timer += dt.max(0.0);
        if self.swing_timer >= tuning.swing_duration {
            self.swinging = false;
            self.swing_timer = 0.0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Colliders on `layers` whose spheres overlap the hook sphere, nearest first.
pub fn overlapping_targets(
    center: Vec3,
    radius: f32,
    layers: u32,
    candidates: impl IntoIterator<Item = (Entity, Vec3, HookTarget)>,
) -> Vec<Entity> {
    let mut hits: Vec<(Entity, f32)> = candidates
        .into_iter()
        .filter(|(_, _, target)| target.layers & layers != 0)
        .filter_map(|(entity, position, target)| {
            let distance = position.distance(center);
            (distance <= radius + target.radius).then_some((entity, distance))
        })
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits.into_iter().map(|(entity, _)| entity).collect()
}

/// World position of `entity`: its own `Transform` composed through every
/// ancestor's.
pub fn world_translation(
    entity: Entity,
    transforms: &Query<&Transform>,
    parents: &Query<&Parent>,
) -> Option<Vec3> {
    let mut world = *transforms.get(entity).ok()?;
    for ancestor in parents.iter_ancestors(entity) {
        if let Ok(parent_transform) = transforms.get(ancestor) {
            world = parent_transform.mul_transform(world);
        }
    }
    Some(world.translation)
}

/// The fish a collider belongs to: the collider itself or its nearest fish
/// ancestor.
pub fn resolve_owner(
    collider: Entity,
    fish: &Query<(), With<Fish>>,
    parents: &Query<&Parent>,
) -> Option<Entity> {
    if fish.contains(collider) {
        return Some(collider);
    }
    parents
        .iter_ancestors(collider)
        .find(|ancestor| fish.contains(*ancestor))
}

// ─── Systems ─────────────────────────────────────────────────────────────────

pub fn advance_swings(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    mut rods: Query<&mut FishingRod, With<Fisher>>,
) {
    let dt = time.delta_secs();
    for mut rod in &mut rods {
        rod.advance(dt, &tuning.capture);
    }
}

/// Consume the attack press: swing, test the hook sphere at the crosshair and
/// report at most one fish per swing.
#[allow(clippy::too_many_arguments)]
pub fn handle_attack(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    match_state: Res<MatchState>,
    mut input: ResMut<FisherInput>,
    mut fishers: Query<(Entity, Option<&Crosshair>, &mut FishingRod), With<Fisher>>,
    targets: Query<(Entity, &HookTarget)>,
    transforms: Query<&Transform>,
    parents: Query<&Parent>,
    fish: Query<(), With<Fish>>,
    mut swing_events: EventWriter<SwingEvent>,
    mut capture_events: EventWriter<CaptureEvent>,
    mut fish_commands: EventWriter<FishCommand>,
) {
    if !std::mem::take(&mut input.attack) || !match_state.is_running() {
        return;
    }

    let capture = &tuning.capture;
    let now = time.elapsed_secs();

    for (fisher, crosshair, mut rod) in &mut fishers {
        let Some(crosshair) = crosshair else {
            warn!("[Fisher] {:?} has no crosshair, cannot swing", fisher);
            continue;
        };

        if !rod.try_start_swing(now, capture) {
            debug!(
                "[Fisher] Swing ignored ({:.2}s cooldown left)",
                rod.cooldown_remaining(now, capture)
            );
            continue;
        }

        let candidates = targets.iter().filter_map(|(entity, target)| {
            world_translation(entity, &transforms, &parents).map(|pos| (entity, pos, *target))
        });
        let hit = overlapping_targets(
            crosshair.logical,
            capture.hook_radius,
            capture.capture_layers,
            candidates,
        )
        .into_iter()
        .find_map(|collider| resolve_owner(collider, &fish, &parents));

        swing_events.send(SwingEvent { fisher, hit });

        let Some(fish_entity) = hit else {
            debug!("[Fisher] Swing at {:?} missed", crosshair.logical);
            continue;
        };

        if capture.hook_before_catch {
            info!("[Fisher] Hooked {:?}", fish_entity);
            fish_commands.send(FishCommand {
                fish: fish_entity,
                kind: FishCommandKind::Hook,
            });
        } else {
            info!("[Fisher] Caught {:?}", fish_entity);
            capture_events.send(CaptureEvent {
                fisher,
                fish: fish_entity,
            });
        }
    }
}
