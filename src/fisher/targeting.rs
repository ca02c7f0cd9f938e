//! Fisher aim point.
//!
//! The aim ray is projected onto the fish plane and clamped to the pond; the
//! logical crosshair eases toward that point. A second, purely cosmetic point
//! mirrors it at the display height.

use bevy::prelude::*;

use crate::config::GameTuning;
use crate::shared::*;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Crosshair {
    /// Gameplay aim point, on the fish plane.
    pub logical: Vec3,
    /// Display-only mirror of `logical` at the visual plane height.
    pub visual: Vec3,
    /// Where `logical` is heading.
    pub target: Vec3,
}

impl Crosshair {
    pub fn new(fish_plane_y: f32, visual_plane_y: f32) -> Self {
        let logical = Vec3::new(0.0, fish_plane_y, 0.0);
        Self {
            logical,
            visual: Vec3::new(0.0, visual_plane_y, 0.0),
            target: logical,
        }
    }

    pub fn aim(&mut self, point: Vec3) {
        self.target = point;
    }

    /// Exponential approach toward the target.
    pub fn advance(&mut self, dt: f32, smooth_speed: f32) {
        let t = (smooth_speed * dt).clamp(0.0, 1.0);
        self.logical = self.logical.lerp(self.target, t);
    }

    pub fn sync_visual(&mut self, visual_plane_y: f32) {
        self.visual = Vec3::new(self.logical.x, visual_plane_y, self.logical.z);
    }

    pub fn reset(&mut self, fish_plane_y: f32, visual_plane_y: f32) {
        *self = Self::new(fish_plane_y, visual_plane_y);
    }
}

/// Where `ray` meets the plane `y = plane_y`, with X/Z clamped to `half`.
/// `None` when the ray runs parallel to or away from the plane.
pub fn project_onto_fish_plane(ray: Ray3d, plane_y: f32, half: Vec2) -> Option<Vec3> {
    let distance = ray.intersect_plane(Vec3::Y * plane_y, InfinitePlane3d::new(Vec3::Y))?;
    let hit = ray.get_point(distance);
    Some(Vec3::new(
        hit.x.clamp(-half.x, half.x),
        plane_y,
        hit.z.clamp(-half.y, half.y),
    ))
}

pub fn update_crosshair(
    time: Res<Time>,
    tuning: Res<GameTuning>,
    match_state: Res<MatchState>,
    input: Res<FisherInput>,
    mut crosshairs: Query<&mut Crosshair, With<Fisher>>,
) {
    let targeting = &tuning.targeting;
    let aim_point = input
        .aim_ray
        .filter(|_| match_state.is_running())
        .and_then(|ray| {
            project_onto_fish_plane(
                ray,
                targeting.fish_plane_y,
                tuning.movement.half_extents(),
            )
        });

    let dt = time.delta_secs();
    for mut crosshair in &mut crosshairs {
        if let Some(point) = aim_point {
            crosshair.aim(point);
        }
        crosshair.advance(dt, targeting.smooth_speed);
        crosshair.sync_visual(targeting.visual_plane_y);
    }
}
