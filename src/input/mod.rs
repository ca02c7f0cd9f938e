use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>().add_systems(
            PreUpdate,
            (read_fish_input, read_fisher_input, read_match_input).after(InputSystem),
        );
    }
}

/// The camera aim rays are cast from.
#[derive(Component, Debug, Default)]
pub struct AimCamera;

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub swim_forward: KeyCode,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub boost: KeyCode,
    pub attack: MouseButton,
    pub start_match: KeyCode,
    pub restart_match: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            swim_forward: KeyCode::KeyW,
            turn_left: KeyCode::KeyA,
            turn_right: KeyCode::KeyD,
            boost: KeyCode::Space,
            attack: MouseButton::Left,
            start_match: KeyCode::Enter,
            restart_match: KeyCode::KeyR,
        }
    }
}

/// Keyboard and the first gamepad become the fish's move axis and boost press.
/// Backward input is passed through; the fish clamps it away.
fn read_fish_input(
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    bindings: Res<KeyBindings>,
    mut input: ResMut<FishInput>,
) {
    let mut axis = Vec2::ZERO;
    if keys.pressed(bindings.swim_forward) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.turn_left) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(bindings.turn_right) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    let mut boost = keys.just_pressed(bindings.boost);

    if let Some(gamepad) = gamepads.iter().next() {
        let stick = gamepad.left_stick();
        if axis == Vec2::ZERO {
            axis = stick;
        }
        boost |= gamepad.just_pressed(GamepadButton::South);
    }

    input.move_axis = if axis.length() > 1.0 {
        axis.normalize()
    } else {
        axis
    };
    input.boost = boost;
}

/// Cursor position becomes an aim ray from the [`AimCamera`].
fn read_fisher_input(
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<AimCamera>>,
    mut input: ResMut<FisherInput>,
) {
    input.attack = mouse.just_pressed(bindings.attack);
    input.aim_ray = None;

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_position) else {
        return;
    };
    input.aim_ray = Some(ray);
}

fn read_match_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut match_commands: EventWriter<MatchCommand>,
) {
    if keys.just_pressed(bindings.restart_match) {
        match_commands.send(MatchCommand::Restart);
    } else if keys.just_pressed(bindings.start_match) {
        match_commands.send(MatchCommand::Start);
    }
}
