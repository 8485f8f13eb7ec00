use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::render_settings::PROBE_DISTANCE;

use crate::engine::physics::{Collider, cast_against};
use crate::engine::scene::token::Token;

use super::state::{HoverChanged, HoverTarget};

/// World-space ray under the cursor of the primary window.
pub fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    cameras: &Query<(&GlobalTransform, &Camera), With<Camera3d>>,
) -> Option<Ray3d> {
    let window = windows.single().ok()?;
    let cursor = window.cursor_position()?;
    let (cam_xf, camera) = cameras.single().ok()?;
    camera.viewport_to_world(cam_xf, cursor).ok()
}

/// Nearest token the ray passes through.
pub fn pick_token<'a>(
    ray: Ray3d,
    tokens: impl IntoIterator<Item = (Entity, &'a GlobalTransform, &'a Collider)>,
) -> Option<Entity> {
    let origin = ray.origin;
    let far = origin + *ray.direction * PROBE_DISTANCE;
    cast_against(tokens, origin, far, None).map(|hit| hit.entity)
}

/// Hover transitions between the previous and the newly picked token.
pub fn hover_transitions(previous: Option<Entity>, picked: Option<Entity>) -> Vec<HoverChanged> {
    if previous == picked {
        return Vec::new();
    }
    previous
        .map(HoverChanged::Exited)
        .into_iter()
        .chain(picked.map(HoverChanged::Entered))
        .collect()
}

// Cursor picking against token colliders; only changes are reported
pub fn update_hover_target(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    tokens: Query<(Entity, &GlobalTransform, &Collider), With<Token>>,
    mut hover: ResMut<HoverTarget>,
    mut events: EventWriter<HoverChanged>,
) {
    let picked = cursor_ray(&windows, &cameras).and_then(|ray| pick_token(ray, tokens.iter()));
    // A despawned hover target cannot be exited any more.
    let previous = hover.0.filter(|&entity| tokens.contains(entity));

    for change in hover_transitions(previous, picked) {
        events.write(change);
    }
    if hover.0 != picked {
        hover.0 = picked;
    }
}
