use bevy::prelude::*;

use crate::config::GameTuning;
use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod capture;
mod targeting;

pub use capture::*;
pub use targeting::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FisherPlugin;

impl Plugin for FisherPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                reset_fisher_on_match_start,
                update_crosshair,
                advance_swings,
                handle_attack,
            )
                .chain()
                .in_set(GameSet::Aim),
        );
    }
}

/// Where the player's fisher stands: on the bank, above the pond.
pub const FISHER_SPAWN_POSITION: Vec3 = Vec3::new(0.0, 2.0, -30.0);

// ─── Spawning ────────────────────────────────────────────────────────────────

pub fn spawn_fisher(commands: &mut Commands, position: Vec3, tuning: &GameTuning) -> Entity {
    commands
        .spawn((
            Fisher,
            Name::new("Fisher"),
            SpawnPoint {
                position,
                heading: 0.0,
            },
            Crosshair::new(
                tuning.targeting.fish_plane_y,
                tuning.targeting.visual_plane_y,
            ),
            FishingRod::default(),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn spawn_fisher_player(mut commands: Commands, tuning: Res<GameTuning>) {
    let fisher = spawn_fisher(&mut commands, FISHER_SPAWN_POSITION, &tuning);
    info!("[Fisher] Spawned {:?}", fisher);
}

// ─── Systems ─────────────────────────────────────────────────────────────────

pub fn reset_fisher_on_match_start(
    mut started: EventReader<MatchStartedEvent>,
    tuning: Res<GameTuning>,
    mut fishers: Query<(&mut FishingRod, Option<&mut Crosshair>), With<Fisher>>,
) {
    if started.read().count() == 0 {
        return;
    }

    for (mut rod, crosshair) in &mut fishers {
        rod.reset();
        if let Some(mut crosshair) = crosshair {
            crosshair.reset(
                tuning.targeting.fish_plane_y,
                tuning.targeting.visual_plane_y,
            );
        }
    }
}
