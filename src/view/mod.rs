//! Debug-style presentation for the binary: gizmo outlines for the pond, the
//! fish colliders and both crosshair points, plus the match clock in the
//! window title.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::GameTuning;
use crate::fish::{FishKinematics, FishStatus};
use crate::fisher::{Crosshair, FishingRod};
use crate::shared::*;

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (draw_pond, draw_fish, draw_crosshairs, update_window_title).after(GameSet::Match),
        );
    }
}

const WINDOW_TITLE: &str = "Fish And Fisher";
const HEADING_LINE_LENGTH: f32 = 2.0;
const CROSSHAIR_RADIUS: f32 = 0.6;

fn state_color(state: FishState) -> Color {
    match state {
        FishState::Idle => Color::srgb(0.6, 0.8, 1.0),
        FishState::Swimming => Color::srgb(0.2, 0.6, 1.0),
        FishState::Sprinting => Color::srgb(0.1, 1.0, 0.9),
        FishState::Turning => Color::srgb(0.5, 0.5, 1.0),
        FishState::Stunned => Color::srgb(1.0, 1.0, 0.2),
        FishState::Escaping => Color::srgb(1.0, 0.5, 0.1),
        FishState::Caught => Color::srgb(1.0, 0.1, 0.1),
    }
}

/// Flat circle in the XZ plane.
fn ground_circle(center: Vec3) -> Isometry3d {
    Isometry3d::new(center, Quat::from_rotation_x(FRAC_PI_2))
}

fn draw_pond(mut gizmos: Gizmos, tuning: Res<GameTuning>) {
    let half = tuning.movement.half_extents();
    let y = tuning.movement.swim_depth;
    let corners = [
        Vec3::new(-half.x, y, -half.y),
        Vec3::new(half.x, y, -half.y),
        Vec3::new(half.x, y, half.y),
        Vec3::new(-half.x, y, half.y),
    ];
    let color = Color::srgb(0.2, 0.4, 0.7);
    for i in 0..corners.len() {
        gizmos.line(corners[i], corners[(i + 1) % corners.len()], color);
    }
}

fn draw_fish(
    mut gizmos: Gizmos,
    fish_query: Query<(&GlobalTransform, &FishStatus, &Children), With<Fish>>,
    colliders: Query<(&GlobalTransform, &HookTarget)>,
) {
    for (root, status, children) in &fish_query {
        let color = state_color(status.state);
        for child in children.iter() {
            if let Ok((transform, target)) = colliders.get(*child) {
                gizmos.sphere(
                    Isometry3d::from_translation(transform.translation()),
                    target.radius,
                    color,
                );
            }
        }
        let origin = root.translation();
        gizmos.line(origin, origin + root.back() * HEADING_LINE_LENGTH, color);
    }
}

fn draw_crosshairs(
    mut gizmos: Gizmos,
    tuning: Res<GameTuning>,
    fishers: Query<(&Crosshair, &FishingRod), With<Fisher>>,
) {
    for (crosshair, rod) in &fishers {
        let color = if rod.swinging {
            Color::srgb(1.0, 0.3, 0.3)
        } else {
            Color::srgb(1.0, 1.0, 1.0)
        };
        gizmos.circle(
            ground_circle(crosshair.logical),
            tuning.capture.hook_radius,
            color,
        );
        gizmos.circle(
            ground_circle(crosshair.visual),
            CROSSHAIR_RADIUS,
            color.with_alpha(0.5),
        );
        gizmos.line(crosshair.logical, crosshair.visual, color.with_alpha(0.25));
    }
}

fn update_window_title(
    tuning: Res<GameTuning>,
    match_state: Res<MatchState>,
    fish_query: Query<(&FishKinematics, &FishStatus), With<Fish>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    let phase = match match_state.phase {
        MatchPhase::Ready => "Press Enter to start".to_string(),
        MatchPhase::Playing => match_state.formatted_time(),
        MatchPhase::Ended => format!("{:?} (R to restart)", match_state.result),
    };
    let fish = fish_query
        .iter()
        .next()
        .map(|(kinematics, status)| {
            format!(
                "{} | {}",
                status.state_info(&tuning),
                kinematics.debug_info(&tuning.movement)
            )
        })
        .unwrap_or_default();

    let title = format!("{} | {} | {}", WINDOW_TITLE, phase, fish);
    if window.title != title {
        window.title = title;
    }
}
