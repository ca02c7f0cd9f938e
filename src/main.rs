mod shared;
mod config;
mod input;
mod fish;
mod fisher;
mod game;
mod view;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Fish And Fisher".into(),
            resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            present_mode: PresentMode::AutoVsync,
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    // Shared resources
    .init_resource::<MatchState>()
    .init_resource::<FishInput>()
    .init_resource::<FisherInput>()
    // Commands
    .add_event::<FishCommand>()
    .add_event::<MatchCommand>()
    // Notifications
    .add_event::<FishStateChangedEvent>()
    .add_event::<EscapeSuccessEvent>()
    .add_event::<FishCaughtEvent>()
    .add_event::<StaminaChangedEvent>()
    .add_event::<SwingEvent>()
    .add_event::<CaptureEvent>()
    .add_event::<MatchStartedEvent>()
    .add_event::<MatchEndedEvent>();

    // Frame order: input → movement → aim → fish state → match
    configure_game_sets(&mut app);

    app
        // Domain plugins
        .add_plugins(config::TuningPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(fish::FishPlugin)
        .add_plugins(fisher::FisherPlugin)
        .add_plugins(game::MatchPlugin)
        .add_plugins(view::ViewPlugin)
        // Actors and camera
        .add_systems(
            Startup,
            (fish::spawn_fish_player, fisher::spawn_fisher_player).after(config::TuningLoaded),
        )
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 45.0, -35.0).looking_at(Vec3::ZERO, Vec3::Y),
        input::AimCamera,
    ));
}
