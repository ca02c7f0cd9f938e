use bevy::prelude::*;

use crate::config::GameTuning;
use crate::shared::*;

// ─── Sub-modules ────────────────────────────────────────────────────────────
mod boost;
mod intent;
mod movement;
mod state;
mod steering;

pub use boost::*;
pub use intent::*;
pub use movement::*;
pub use state::*;
pub use steering::*;

// ─── Plugin ─────────────────────────────────────────────────────────────────

pub struct FishPlugin;

impl Plugin for FishPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (reset_fish_on_match_start, route_fish_input)
                .chain()
                .in_set(GameSet::Input),
        )
        .add_systems(
            Update,
            (update_boosts, integrate_fish_movement)
                .chain()
                .in_set(GameSet::Movement),
        )
        .add_systems(
            Update,
            (apply_fish_commands, update_fish_states)
                .chain()
                .in_set(GameSet::FishState),
        );
    }
}

// ─── Collider layout ─────────────────────────────────────────────────────────

const BODY_RADIUS: f32 = 0.5;
const TAIL_RADIUS: f32 = 0.3;
const TAIL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -1.2);

/// Where the player's fish starts.
pub const FISH_SPAWN_POSITION: Vec3 = Vec3::new(0.0, 0.0, -10.0);

// ─── Status snapshot ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishStatusInfo {
    pub position: Vec3,
    pub heading: f32,
    pub speed: f32,
    pub state: FishState,
    pub input: Vec2,
}

impl FishStatusInfo {
    pub fn of(kinematics: &FishKinematics, status: &FishStatus) -> Self {
        Self {
            position: kinematics.position,
            heading: kinematics.current_heading,
            speed: kinematics.current_speed,
            state: status.state,
            input: kinematics.move_input,
        }
    }
}

// ─── Spawning ────────────────────────────────────────────────────────────────

/// Spawn a fish root with a body and a tail collider as children.
pub fn spawn_fish(
    commands: &mut Commands,
    position: Vec3,
    heading: f32,
    tuning: &GameTuning,
) -> Entity {
    let kinematics = FishKinematics::new(position, heading, &tuning.movement);
    let transform =
        Transform::from_translation(kinematics.position).with_rotation(kinematics.rotation());

    commands
        .spawn((
            Fish,
            Name::new("Fish"),
            SpawnPoint { position, heading },
            FishStatus::new(tuning),
            kinematics,
            BoostState::default(),
            IntentFilter::default(),
            transform,
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("FishBody"),
                HookTarget {
                    radius: BODY_RADIUS,
                    layers: CAPTURE_LAYER_FISH,
                },
                Transform::default(),
            ));
            parent.spawn((
                Name::new("FishTail"),
                HookTarget {
                    radius: TAIL_RADIUS,
                    layers: CAPTURE_LAYER_FISH,
                },
                Transform::from_translation(TAIL_OFFSET),
            ));
        })
        .id()
}

pub fn spawn_fish_player(mut commands: Commands, tuning: Res<GameTuning>) {
    let fish = spawn_fish(&mut commands, FISH_SPAWN_POSITION, 0.0, &tuning);
    info!("[Fish] Spawned {:?}", fish);
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// Put every fish back at its spawn point when a match begins.
pub fn reset_fish_on_match_start(
    mut started: EventReader<MatchStartedEvent>,
    tuning: Res<GameTuning>,
    mut fish_query: Query<
        (
            &SpawnPoint,
            &mut FishKinematics,
            &mut FishStatus,
            &mut BoostState,
            &mut IntentFilter,
            &mut Transform,
        ),
        With<Fish>,
    >,
) {
    if started.read().count() == 0 {
        return;
    }

    for (spawn, mut kinematics, mut status, mut boost, mut filter, mut transform) in &mut fish_query
    {
        *kinematics = FishKinematics::new(spawn.position, spawn.heading, &tuning.movement);
        status.reset(&tuning);
        boost.reset();
        filter.reset();
        transform.translation = kinematics.position;
        transform.rotation = kinematics.rotation();
    }
}

/// Feed this frame's fish intents into every fish.
///
/// Move input only reaches fish that accept it. The boost press is consumed
/// here: while hooked it becomes a struggle, otherwise it triggers a boost if
/// the fish may accelerate.
pub fn route_fish_input(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    match_state: Res<MatchState>,
    mut input: ResMut<FishInput>,
    mut fish_query: Query<
        (
            Entity,
            &FishStatus,
            &mut FishKinematics,
            &mut BoostState,
            &mut IntentFilter,
        ),
        With<Fish>,
    >,
    mut fish_commands: EventWriter<FishCommand>,
) {
    let boost_pressed = std::mem::take(&mut input.boost);
    let running = match_state.is_running();
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (entity, status, mut kinematics, mut boost, mut filter) in &mut fish_query {
        if !running || !status.input_enabled || !status.can_move() {
            kinematics.clear_move_input();
            filter.reset();
            continue;
        }

        let filtered = filter.process(input.move_axis, dt, &tuning.intent);
        kinematics.set_move_input(filtered, &tuning.movement);

        if !boost_pressed {
            continue;
        }
        if status.state == FishState::Escaping {
            fish_commands.send(FishCommand {
                fish: entity,
                kind: FishCommandKind::AddEscapeProgress(tuning.escape.struggle_amount),
            });
        } else if status.can_accelerate() {
            let current = kinematics.current_speed;
            kinematics.target_speed =
                boost.trigger(now, current, tuning.movement.max_speed, &tuning.boost);
            debug!("[Fish] Boost x{}", boost.combo_level);
        }
    }
}

pub fn update_boosts(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    mut boosts: Query<&mut BoostState, With<Fish>>,
) {
    let now = time.elapsed_secs();
    for mut boost in &mut boosts {
        boost.update(now, &tuning.boost);
    }
}

/// Integrate every fish and mirror the pose onto its `Transform`.
pub fn integrate_fish_movement(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    mut fish_query: Query<(&mut FishKinematics, &BoostState, &mut Transform), With<Fish>>,
) {
    let dt = time.delta_secs();
    for (mut kinematics, boost, mut transform) in &mut fish_query {
        kinematics.integrate(dt, boost.active, &tuning.movement);
        transform.translation = kinematics.position;
        transform.rotation = kinematics.rotation();
    }
}
