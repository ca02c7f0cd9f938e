//! Headless integration tests for Fish And Fisher.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` with a fixed manual frame time, register
//! the same resources, events and domain plugins as `main.rs` (minus input
//! and presentation), and drive the game through its intent resources and
//! command events.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use fish_and_fisher::config::{GameTuning, TuningLoaded, TuningPath, TuningPlugin};
use fish_and_fisher::fish::{
    spawn_fish_player, BoostState, FishKinematics, FishPlugin, FishStatus, FishStatusInfo,
    FISH_SPAWN_POSITION,
};
use fish_and_fisher::fisher::{spawn_fisher_player, Crosshair, FisherPlugin, FishingRod};
use fish_and_fisher::game::MatchPlugin;
use fish_and_fisher::shared::*;

const DT: f32 = 1.0 / 60.0;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Collects every event of type `E` seen during the test.
#[derive(Resource)]
struct Recorded<E: Event>(Vec<E>);

impl<E: Event> Default for Recorded<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut log: ResMut<Recorded<E>>) {
    log.0.extend(reader.read().cloned());
}

fn track<E: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<E>>()
        .add_systems(Last, record::<E>);
}

/// Builds a minimal Bevy app with the shared resources, events and domain
/// plugins registered, one fish and one fisher spawned, and the first
/// (zero-length) frame already run.
fn build_test_app(tuning: GameTuning) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)));

    // ── Tuning: injected directly, no file on disk ───────────────────────
    app.insert_resource(tuning)
        .insert_resource(TuningPath("tests/no-such-tuning.ron".into()));

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<MatchState>()
        .init_resource::<FishInput>()
        .init_resource::<FisherInput>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<FishCommand>()
        .add_event::<MatchCommand>()
        .add_event::<FishStateChangedEvent>()
        .add_event::<EscapeSuccessEvent>()
        .add_event::<FishCaughtEvent>()
        .add_event::<StaminaChangedEvent>()
        .add_event::<SwingEvent>()
        .add_event::<CaptureEvent>()
        .add_event::<MatchStartedEvent>()
        .add_event::<MatchEndedEvent>();

    configure_game_sets(&mut app);

    app.add_plugins(TuningPlugin)
        .add_plugins(FishPlugin)
        .add_plugins(FisherPlugin)
        .add_plugins(MatchPlugin)
        .add_systems(
            Startup,
            (spawn_fish_player, spawn_fisher_player).after(TuningLoaded),
        );

    track::<FishStateChangedEvent>(&mut app);
    track::<EscapeSuccessEvent>(&mut app);
    track::<FishCaughtEvent>(&mut app);
    track::<StaminaChangedEvent>(&mut app);
    track::<SwingEvent>(&mut app);
    track::<CaptureEvent>(&mut app);
    track::<MatchStartedEvent>(&mut app);
    track::<MatchEndedEvent>(&mut app);

    app.update();
    app
}

/// Fish that stays where it spawned, so hook tests can aim at it.
fn still_fish_tuning() -> GameTuning {
    let mut tuning = GameTuning::default();
    tuning.movement.base_speed = 0.0;
    tuning
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn fish(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Fish>>()
        .single(app.world())
}

fn fisher(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Fisher>>()
        .single(app.world())
}

fn status(app: &App, fish: Entity) -> FishStatus {
    app.world().get::<FishStatus>(fish).unwrap().clone()
}

fn kinematics(app: &App, fish: Entity) -> FishKinematics {
    app.world().get::<FishKinematics>(fish).unwrap().clone()
}

fn recorded<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

fn command(app: &mut App, fish: Entity, kind: FishCommandKind) {
    app.world_mut().send_event(FishCommand { fish, kind });
}

fn straight_down(point: Vec3) -> Ray3d {
    Ray3d {
        origin: point + Vec3::Y * 20.0,
        direction: Dir3::NEG_Y,
    }
}

/// Aim at `point` and give the crosshair two seconds to settle on it.
fn aim_at(app: &mut App, point: Vec3) {
    app.world_mut().resource_mut::<FisherInput>().aim_ray = Some(straight_down(point));
    run(app, 120);
}

fn attack(app: &mut App) {
    app.world_mut().resource_mut::<FisherInput>().attack = true;
    app.update();
}

// ─────────────────────────────────────────────────────────────────────────────
// Startup
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_startup_spawns_actors_and_starts_match() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);
    let fisher = fisher(&mut app);

    let state = app.world().resource::<MatchState>();
    assert_eq!(state.phase, MatchPhase::Playing);
    assert_eq!(state.remaining_time, 60.0);
    assert_eq!(recorded::<MatchStartedEvent>(&app).len(), 1);

    let info = FishStatusInfo::of(&kinematics(&app, fish), &status(&app, fish));
    assert_eq!(info.position, FISH_SPAWN_POSITION);
    assert_eq!(info.heading, 0.0);
    assert_eq!(info.speed, 2.0);
    assert_eq!(info.input, Vec2::ZERO);
    assert!(app.world().get::<Crosshair>(fisher).is_some());
    assert!(app.world().get::<FishingRod>(fisher).is_some());

    let children = app.world().get::<Children>(fish).unwrap();
    assert_eq!(children.len(), 2, "body and tail colliders");
}

#[test]
fn test_auto_start_can_be_disabled() {
    let mut tuning = GameTuning::default();
    tuning.match_rules.auto_start = false;
    let mut app = build_test_app(tuning);
    assert_eq!(app.world().resource::<MatchState>().phase, MatchPhase::Ready);

    // Input is not routed before the match starts.
    let fish = fish(&mut app);
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(0.0, 1.0);
    run(&mut app, 5);
    assert_eq!(kinematics(&app, fish).move_input, Vec2::ZERO);

    app.world_mut().send_event(MatchCommand::Start);
    app.update();
    assert_eq!(app.world().resource::<MatchState>().phase, MatchPhase::Playing);

    run(&mut app, 5);
    assert!(kinematics(&app, fish).move_input.y > 0.0);
}

#[test]
fn test_tuning_file_overrides_defaults() {
    let path = std::env::temp_dir().join("fish_and_fisher_headless_tuning.ron");
    std::fs::write(&path, "(match_rules: (duration: 30.0), boost: (max_combo_level: 5))")
        .unwrap();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TuningPath(path.clone()))
        .add_plugins(TuningPlugin);
    app.update();

    let tuning = app.world().resource::<GameTuning>();
    assert_eq!(tuning.match_rules.duration, 30.0);
    assert_eq!(tuning.boost.max_combo_level, 5);
    assert_eq!(tuning.movement.base_speed, 2.0);
    let _ = std::fs::remove_file(path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Fish movement
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fish_stays_inside_pond() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);
    let half = GameTuning::default().movement.half_extents();

    let inputs = [Vec2::new(0.0, 1.0), Vec2::new(0.4, 1.0), Vec2::new(1.0, 0.0)];
    for frame in 0..3000 {
        {
            let mut input = app.world_mut().resource_mut::<FishInput>();
            input.move_axis = inputs[(frame / 200) % inputs.len()];
            input.boost = frame % 15 == 0;
        }
        app.update();

        let kin = kinematics(&app, fish);
        assert!(kin.position.x.abs() <= half.x, "x escaped: {:?}", kin.position);
        assert!(kin.position.z.abs() <= half.y, "z escaped: {:?}", kin.position);
        let transform = app.world().get::<Transform>(fish).unwrap();
        assert_eq!(transform.translation, kin.position);
    }
}

#[test]
fn test_steering_turn_angles() {
    let mut tuning = GameTuning::default();
    tuning.intent.smooth_input = false;
    let mut app = build_test_app(tuning);
    let fish = fish(&mut app);

    let before = kinematics(&app, fish).current_heading;
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(1.0, 0.0);
    app.update();
    assert!((kinematics(&app, fish).target_heading - wrap_degrees(before + 60.0)).abs() < 1e-4);

    let before = kinematics(&app, fish).current_heading;
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(1.0, 1.0);
    app.update();
    assert!((kinematics(&app, fish).target_heading - wrap_degrees(before + 30.0)).abs() < 1e-4);

    let before = kinematics(&app, fish).current_heading;
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(0.0, 1.0);
    app.update();
    assert!((kinematics(&app, fish).target_heading - before).abs() < 1e-4);
}

#[test]
fn test_held_turn_with_default_smoothing_turns_once() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);
    assert!(app.world().resource::<GameTuning>().intent.smooth_input);

    let start = kinematics(&app, fish).current_heading;
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(1.0, 0.0);

    let mut targets = vec![kinematics(&app, fish).target_heading];
    for _ in 0..180 {
        app.update();
        let target = kinematics(&app, fish).target_heading;
        if targets.last() != Some(&target) {
            targets.push(target);
        }
    }

    assert_eq!(targets, vec![start, wrap_degrees(start + 60.0)], "one discrete retarget");
    let end = kinematics(&app, fish).current_heading;
    assert!((delta_angle(start, end) - 60.0).abs() < 1.0, "turned {}", delta_angle(start, end));
}

#[test]
fn test_boost_combo_builds_then_decays() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);
    assert_eq!(status(&app, fish).state, FishState::Swimming);

    app.world_mut().resource_mut::<FishInput>().boost = true;
    app.update();
    assert_eq!(app.world().get::<BoostState>(fish).unwrap().combo_level, 1);

    run(&mut app, 5);
    app.world_mut().resource_mut::<FishInput>().boost = true;
    app.update();
    let boost = app.world().get::<BoostState>(fish).unwrap();
    assert_eq!(boost.combo_level, 2);
    assert!(boost.active);

    run(&mut app, 54);
    let boost = app.world().get::<BoostState>(fish).unwrap();
    assert!(!boost.active);
    assert_eq!(boost.combo_level, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Fish state machine
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sprinting_drains_and_swimming_recovers_stamina() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);
    let max = GameTuning::default().fish_state.max_stamina;

    // Hold a long boost at top speed.
    {
        let mut boost = app.world_mut().get_mut::<BoostState>(fish).unwrap();
        boost.active = true;
        boost.end_time = 1.0e6;
    }
    app.world_mut().get_mut::<FishKinematics>(fish).unwrap().target_speed = 8.0;
    run(&mut app, 120);
    assert_eq!(status(&app, fish).state, FishState::Sprinting);

    let mut last = status(&app, fish).stamina;
    for _ in 0..60 {
        app.update();
        let now = status(&app, fish);
        assert!(now.stamina >= 0.0 && now.stamina <= max);
        if now.state == FishState::Sprinting {
            assert!(now.stamina < last);
        }
        last = now.stamina;
    }

    // Let go: back to cruising and recovering, well away from the pond edge.
    app.world_mut().get_mut::<BoostState>(fish).unwrap().reset();
    app.world_mut().get_mut::<FishKinematics>(fish).unwrap().position = Vec3::new(0.0, 0.0, -20.0);
    run(&mut app, 240);
    let before = status(&app, fish);
    assert!(matches!(before.state, FishState::Swimming | FishState::Idle));
    run(&mut app, 60);
    let after = status(&app, fish);
    assert!(after.stamina > before.stamina || after.stamina == max);

    let fractions: Vec<f32> = recorded::<StaminaChangedEvent>(&app)
        .iter()
        .map(|e| e.fraction)
        .collect();
    assert!(!fractions.is_empty());
    assert!(fractions.iter().all(|f| (0.0..=1.0).contains(f)));
}

#[test]
fn test_stun_blocks_input_until_it_wears_off() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);

    command(&mut app, fish, FishCommandKind::Stun(1.0));
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(0.0, 1.0);
    app.update();
    assert_eq!(status(&app, fish).state, FishState::Stunned);
    assert!(!status(&app, fish).can_move());

    run(&mut app, 30);
    assert_eq!(status(&app, fish).state, FishState::Stunned);
    assert_eq!(kinematics(&app, fish).move_input, Vec2::ZERO);

    run(&mut app, 40);
    let after = status(&app, fish);
    assert_ne!(after.state, FishState::Stunned);
    assert!(after.input_enabled);
    run(&mut app, 5);
    assert!(kinematics(&app, fish).move_input.y > 0.0);

    let changes = recorded::<FishStateChangedEvent>(&app);
    assert!(changes.iter().any(|c| c.to == FishState::Stunned));
    assert!(changes
        .iter()
        .any(|c| c.from == FishState::Stunned && c.to == FishState::Swimming));
}

#[test]
fn test_struggling_breaks_free() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);

    command(&mut app, fish, FishCommandKind::Hook);
    app.update();
    assert_eq!(status(&app, fish).state, FishState::Escaping);

    for _ in 0..10 {
        app.world_mut().resource_mut::<FishInput>().boost = true;
        app.update();
        if status(&app, fish).state != FishState::Escaping {
            break;
        }
    }

    assert_eq!(status(&app, fish).state, FishState::Swimming);
    assert_eq!(recorded::<EscapeSuccessEvent>(&app).len(), 1);
    assert!(recorded::<FishCaughtEvent>(&app).is_empty());
    assert_eq!(app.world().resource::<MatchState>().phase, MatchPhase::Playing);
}

#[test]
fn test_escape_success_wins_the_last_tick() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);

    command(&mut app, fish, FishCommandKind::Hook);
    app.update();
    {
        let mut status = app.world_mut().get_mut::<FishStatus>(fish).unwrap();
        status.escaping_timer = 5.0 - DT * 0.5;
        status.escape_progress = 100.0;
    }
    app.update();

    assert_eq!(status(&app, fish).state, FishState::Swimming);
    assert_eq!(recorded::<EscapeSuccessEvent>(&app).len(), 1);
    assert!(recorded::<FishCaughtEvent>(&app).is_empty());
}

#[test]
fn test_failed_escape_is_terminal_and_wins_for_fisher() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);

    command(&mut app, fish, FishCommandKind::Hook);
    run(&mut app, 60 * 5 + 10);

    assert_eq!(status(&app, fish).state, FishState::Caught);
    assert_eq!(recorded::<FishCaughtEvent>(&app).len(), 1);
    let state = app.world().resource::<MatchState>();
    assert_eq!(state.phase, MatchPhase::Ended);
    assert_eq!(state.result, MatchResult::FisherWins);

    // Nothing moves a caught fish.
    command(&mut app, fish, FishCommandKind::Stun(1.0));
    command(&mut app, fish, FishCommandKind::Hook);
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(1.0, 1.0);
    run(&mut app, 30);
    let caught = status(&app, fish);
    assert_eq!(caught.state, FishState::Caught);
    assert!(!caught.can_move());
    assert_eq!(kinematics(&app, fish).move_input, Vec2::ZERO);
}

// ─────────────────────────────────────────────────────────────────────────────
// Fisher
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_crosshair_clamps_to_pond_edge() {
    let mut app = build_test_app(GameTuning::default());
    let fisher = fisher(&mut app);

    app.world_mut().resource_mut::<FisherInput>().aim_ray =
        Some(straight_down(Vec3::new(300.0, 0.0, -40.0)));
    app.update();

    let crosshair = app.world().get::<Crosshair>(fisher).unwrap().clone();
    assert_eq!(crosshair.target, Vec3::new(25.0, 0.0, -25.0));
    assert_eq!(crosshair.visual.x, crosshair.logical.x);
    assert_eq!(crosshair.visual.z, crosshair.logical.z);
    assert_eq!(crosshair.visual.y, 5.0);

    run(&mut app, 300);
    let crosshair = app.world().get::<Crosshair>(fisher).unwrap();
    assert!((crosshair.logical.x - 25.0).abs() < 1e-3);
    assert!((crosshair.logical.z + 25.0).abs() < 1e-3);
}

#[test]
fn test_capture_through_tail_collider_ends_match() {
    let mut app = build_test_app(still_fish_tuning());
    let fish = fish(&mut app);
    let fisher = fisher(&mut app);

    // Tail sits 1.2 behind the root along the heading.
    let root = kinematics(&app, fish);
    let tail = root.position - heading_forward(root.current_heading) * 1.2;
    aim_at(&mut app, tail);
    attack(&mut app);

    let swings = recorded::<SwingEvent>(&app);
    assert_eq!(swings.len(), 1);
    assert_eq!(swings[0].fisher, fisher);
    assert_eq!(swings[0].hit, Some(fish));

    let captures = recorded::<CaptureEvent>(&app);
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].fish, fish);

    let state = app.world().resource::<MatchState>().clone();
    assert_eq!(state.phase, MatchPhase::Ended);
    assert_eq!(state.result, MatchResult::FisherWins);
    let ended = recorded::<MatchEndedEvent>(&app);
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].result, MatchResult::FisherWins);

    // The clock is frozen.
    run(&mut app, 60);
    assert_eq!(
        app.world().resource::<MatchState>().remaining_time,
        state.remaining_time
    );
}

#[test]
fn test_miss_and_cooldown() {
    let mut app = build_test_app(still_fish_tuning());
    let fish = fish(&mut app);

    let far = kinematics(&app, fish).position + Vec3::new(10.0, 0.0, 0.0);
    aim_at(&mut app, far);
    attack(&mut app);
    let swings = recorded::<SwingEvent>(&app);
    assert_eq!(swings.len(), 1);
    assert_eq!(swings[0].hit, None);

    // Second press inside the cooldown is ignored.
    run(&mut app, 10);
    attack(&mut app);
    assert_eq!(recorded::<SwingEvent>(&app).len(), 1);

    run(&mut app, 60);
    attack(&mut app);
    assert_eq!(recorded::<SwingEvent>(&app).len(), 2);
    assert!(recorded::<CaptureEvent>(&app).is_empty());
    assert_eq!(app.world().resource::<MatchState>().phase, MatchPhase::Playing);
}

#[test]
fn test_fisher_without_crosshair_cannot_swing() {
    let mut app = build_test_app(still_fish_tuning());
    let fish = fish(&mut app);
    let fisher = fisher(&mut app);

    let fish_position = kinematics(&app, fish).position;
    aim_at(&mut app, fish_position);
    app.world_mut().entity_mut(fisher).remove::<Crosshair>();
    let before = app.world().resource::<MatchState>().clone();

    attack(&mut app);

    assert!(recorded::<SwingEvent>(&app).is_empty());
    assert!(recorded::<CaptureEvent>(&app).is_empty());
    assert!(!app.world().get::<FishingRod>(fisher).unwrap().swinging);
    assert!(!app.world().resource::<FisherInput>().attack, "press consumed");

    let after = app.world().resource::<MatchState>().clone();
    assert_eq!(after.phase, before.phase);
    assert_eq!(after.result, before.result);
    assert!((before.remaining_time - after.remaining_time - DT).abs() < 1e-4, "clock keeps running");
}

#[test]
fn test_hook_mode_hooks_then_catches() {
    let mut tuning = still_fish_tuning();
    tuning.capture.hook_before_catch = true;
    let mut app = build_test_app(tuning);
    let fish = fish(&mut app);

    let position = kinematics(&app, fish).position;
    aim_at(&mut app, position);
    attack(&mut app);

    assert_eq!(status(&app, fish).state, FishState::Escaping);
    assert!(recorded::<CaptureEvent>(&app).is_empty());
    assert_eq!(app.world().resource::<MatchState>().phase, MatchPhase::Playing);

    run(&mut app, 60 * 5 + 10);
    assert_eq!(status(&app, fish).state, FishState::Caught);
    assert_eq!(
        app.world().resource::<MatchState>().result,
        MatchResult::FisherWins
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_time_running_out_gives_fish_the_win() {
    let mut app = build_test_app(GameTuning::default());

    run(&mut app, 60 * 60 + 5);

    let state = app.world().resource::<MatchState>();
    assert_eq!(state.phase, MatchPhase::Ended);
    assert_eq!(state.result, MatchResult::FishWins);
    assert_eq!(state.remaining_time, 0.0);
    assert_eq!(state.formatted_time(), "00:00");
    assert_eq!(recorded::<MatchEndedEvent>(&app).len(), 1);
}

#[test]
fn test_start_while_playing_is_ignored() {
    let mut app = build_test_app(GameTuning::default());
    run(&mut app, 60);
    let before = app.world().resource::<MatchState>().remaining_time;

    app.world_mut().send_event(MatchCommand::Start);
    app.update();

    let state = app.world().resource::<MatchState>();
    assert_eq!(state.phase, MatchPhase::Playing);
    assert!(state.remaining_time < before);
    assert_eq!(recorded::<MatchStartedEvent>(&app).len(), 1);
}

#[test]
fn test_restart_resets_match_and_actors() {
    let mut app = build_test_app(GameTuning::default());
    let fish = fish(&mut app);
    let fisher = fisher(&mut app);

    command(&mut app, fish, FishCommandKind::Hook);
    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::new(1.0, 1.0);
    run(&mut app, 60 * 5 + 10);
    assert_eq!(app.world().resource::<MatchState>().phase, MatchPhase::Ended);
    app.world_mut().get_mut::<FishingRod>(fisher).unwrap().swinging = true;

    app.world_mut().resource_mut::<FishInput>().move_axis = Vec2::ZERO;
    app.world_mut().send_event(MatchCommand::Restart);
    app.update();
    let state = app.world().resource::<MatchState>().clone();
    assert_eq!(state.phase, MatchPhase::Playing);
    assert_eq!(state.result, MatchResult::Undecided);
    assert!(state.remaining_time > 59.9);

    // Actors are reset at the start of the next frame.
    app.update();
    let fish_status = status(&app, fish);
    assert_ne!(fish_status.state, FishState::Caught);
    assert!(fish_status.stamina >= 99.9);
    let kin = kinematics(&app, fish);
    assert!(kin.position.distance(FISH_SPAWN_POSITION) < 0.1);
    let rod = app.world().get::<FishingRod>(fisher).unwrap();
    assert!(!rod.swinging);
    assert_eq!(rod.last_swing_time, None);
    assert_eq!(recorded::<MatchStartedEvent>(&app).len(), 2);
}
