use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::physics::{Collider, ColliderQuery, LiveColliders, PhysicsWorld, anchor_point};
use crate::engine::scene::token::Token;
use crate::tools::drop_indicator::{DropIndicator, IndicatorSettings};

use super::bindings::ActionBindings;
use super::controller::{ControllerOutput, DragInputController, InputEvent};
use super::picking::cursor_ray;
use super::state::*;

pub fn attach_drag_controllers(
    mut commands: Commands,
    tokens: Query<Entity, (With<Token>, Without<DragInputController>)>,
) {
    for entity in &tokens {
        commands.entity(entity).insert(DragInputController::default());
    }
}

// Feed hover, button and pointer motion into every token controller
pub fn drive_token_controllers(
    bindings: Res<ActionBindings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<RotationSettings>,
    mut hover_events: EventReader<HoverChanged>,
    mut motion: EventReader<MouseMotion>,
    mut controllers: Query<(Entity, &mut DragInputController, &mut Transform)>,
    mut selected: EventWriter<TokenSelected>,
) {
    let speed = settings.speed;

    for change in hover_events.read() {
        let event = match change {
            HoverChanged::Entered(_) => InputEvent::HoverEntered,
            HoverChanged::Exited(_) => InputEvent::HoverExited,
        };
        if let Ok((_, mut controller, _)) = controllers.get_mut(change.entity()) {
            controller.handle(event, speed);
        }
    }

    let mut events = bindings.action_events(&mouse, &keys);
    events.extend(
        motion
            .read()
            .map(|m| InputEvent::PointerMotion { velocity: m.delta }),
    );
    if events.is_empty() {
        return;
    }

    for (entity, mut controller, mut transform) in &mut controllers {
        for &event in &events {
            match controller.handle(event, speed) {
                Some(ControllerOutput::Select) => {
                    selected.write(TokenSelected { body: entity });
                }
                Some(yaw) => yaw.apply(&mut transform),
                None => {}
            }
        }
    }
}

// Grab starts on the hovered token; only one token is held at a time
pub fn grab_hovered_token(
    bindings: Res<ActionBindings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    drag: Res<DragSettings>,
    mut commands: Commands,
    mut tokens: Query<
        (Entity, &DragInputController, &Transform, Option<&mut DropIndicator>),
        Without<Held>,
    >,
    held: Query<(), With<Held>>,
) {
    if !bindings.grab.just_pressed(&mouse, &keys) || !held.is_empty() {
        return;
    }
    let Some((entity, _, transform, indicator)) = tokens
        .iter_mut()
        .find(|(_, controller, _, _)| controller.is_hovered() && !controller.is_rotating())
    else {
        return;
    };

    commands.entity(entity).insert(Held {
        plane_height: transform.translation.y + drag.lift_height,
    });
    if let Some(mut indicator) = indicator {
        indicator.show();
    }
    debug!("Grabbed token {entity}");
}

/// Point on the horizontal plane at `height` under the ray.
pub fn plane_point(ray: Ray3d, height: f32) -> Option<Vec3> {
    let t = ray.intersect_plane(Vec3::Y * height, InfinitePlane3d::new(Vec3::Y))?;
    Some(ray.get_point(t))
}

pub fn move_held_tokens(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    mut held: Query<(&Held, &mut Transform)>,
) {
    if held.is_empty() {
        return;
    }
    let Some(ray) = cursor_ray(&windows, &cameras) else {
        return;
    };

    for (held, mut transform) in &mut held {
        let Some(point) = plane_point(ray, held.plane_height) else {
            continue;
        };
        // Skip no-op writes so the indicator only refreshes on real movement.
        if transform.translation.distance_squared(point) > f32::EPSILON {
            transform.translation = point;
        }
    }
}

/// Translation that puts the body's anchor on the first surface below it.
pub fn landing_translation(
    transform: &Transform,
    collider: &Collider,
    physics: &dyn PhysicsWorld,
    body: Entity,
    probe_distance: f32,
) -> Option<Vec3> {
    let anchor = anchor_point(&GlobalTransform::from(*transform), collider);
    let hit = physics.cast_ray(anchor, anchor + Vec3::NEG_Y * probe_distance, Some(body))?;
    Some(transform.translation + (hit.position - anchor))
}

// Release snaps the token onto whatever the probe finds; a miss leaves it where it is
pub fn drop_held_tokens(
    bindings: Res<ActionBindings>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<IndicatorSettings>,
    colliders: ColliderQuery,
    mut commands: Commands,
    mut held: Query<(Entity, &mut Transform, &Collider, Option<&mut DropIndicator>), With<Held>>,
) {
    if !bindings.grab.just_released(&mouse, &keys) {
        return;
    }
    let physics = LiveColliders(&colliders);

    for (entity, mut transform, collider, indicator) in &mut held {
        match landing_translation(&transform, collider, &physics, entity, settings.probe_distance) {
            Some(landing) => transform.translation = landing,
            None => debug!("Token {entity} dropped over nothing"),
        }
        commands.entity(entity).remove::<Held>();
        if let Some(mut indicator) = indicator {
            indicator.hide();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::ColliderWorld;

    #[test]
    fn plane_point_under_downward_ray() {
        let ray = Ray3d::new(Vec3::new(2.0, 10.0, -1.0), Dir3::NEG_Y);
        let point = plane_point(ray, 0.75).unwrap();
        assert!(point.abs_diff_eq(Vec3::new(2.0, 0.75, -1.0), 1e-5));

        let parallel = Ray3d::new(Vec3::Y, Dir3::X);
        assert_eq!(plane_point(parallel, 0.0), None);
    }

    #[test]
    fn landing_puts_base_on_surface() {
        let mut world = World::new();
        let board = world.spawn_empty().id();
        let token = world.spawn_empty().id();
        let physics = ColliderWorld::new().with_body(
            board,
            Transform::IDENTITY,
            Collider::cuboid(Vec3::new(10.0, 1.0, 10.0)).with_offset(Vec3::NEG_Y * 0.5),
        );
        let collider = Collider::standing(Vec3::new(0.5, 1.0, 0.5));

        let lifted = Transform::from_xyz(1.0, 3.0, 2.0);
        let landing = landing_translation(&lifted, &collider, &physics, token, 1000.0).unwrap();
        assert!(landing.abs_diff_eq(Vec3::new(1.0, 0.0, 2.0), 1e-5));

        let off_board = Transform::from_xyz(40.0, 3.0, 0.0);
        assert_eq!(landing_translation(&off_board, &collider, &physics, token, 1000.0), None);
    }
}
