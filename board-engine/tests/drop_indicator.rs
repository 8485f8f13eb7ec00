use bevy::prelude::*;
use board_engine::engine::mesh::indicator_mesh::dash_count;
use board_engine::engine::physics::{Collider, ColliderWorld};
use board_engine::tools::drop_indicator::{DropIndicatorRenderer, IndicatorSettings};

fn floor() -> Collider {
    Collider::cuboid(Vec3::new(20.0, 1.0, 20.0)).with_offset(Vec3::NEG_Y * 0.5)
}

fn entities(n: usize) -> (World, Vec<Entity>) {
    let mut world = World::new();
    let ids = (0..n).map(|_| world.spawn_empty().id()).collect();
    (world, ids)
}

#[test]
fn anchor_touching_surface_draws_disc_only() {
    let (_world, ids) = entities(1);
    let physics = ColliderWorld::new().with_body(ids[0], Transform::IDENTITY, floor());
    let settings = IndicatorSettings::default();
    let mut renderer = DropIndicatorRenderer::default();

    let hit = renderer
        .refresh(Vec3::new(0.0, 0.0005, 0.0), &physics, None, &settings)
        .unwrap();

    assert!(hit.distance < 0.001);
    assert!(renderer.line().is_empty());
    assert_eq!(renderer.disc().triangle_count(), settings.disc_segments);
}

#[test]
fn own_collider_is_ignored() {
    let (_world, ids) = entities(2);
    let (board, token) = (ids[0], ids[1]);
    let anchor = Vec3::new(0.0, 2.0, 0.0);
    let physics = ColliderWorld::new()
        .with_body(board, Transform::IDENTITY, floor())
        .with_body(
            token,
            Transform::from_translation(anchor),
            Collider::standing(Vec3::ONE),
        );
    let settings = IndicatorSettings::default();
    let mut renderer = DropIndicatorRenderer::default();

    let hit = renderer.refresh(anchor, &physics, Some(token), &settings).unwrap();
    assert_eq!(hit.entity, board);
    assert_eq!(
        renderer.line().triangle_count(),
        dash_count(2.0, &settings.dash_style()) * 8
    );
}

#[test]
fn lands_on_nearest_surface_below() {
    let (_world, ids) = entities(2);
    let (board, crate_top) = (ids[0], ids[1]);
    let physics = ColliderWorld::new()
        .with_body(board, Transform::IDENTITY, floor())
        .with_body(
            crate_top,
            Transform::from_xyz(0.0, 1.0, 0.0),
            Collider::cuboid(Vec3::ONE),
        );
    let settings = IndicatorSettings::default();
    let mut renderer = DropIndicatorRenderer::default();

    let hit = renderer
        .refresh(Vec3::new(0.0, 4.0, 0.0), &physics, None, &settings)
        .unwrap();
    assert_eq!(hit.entity, crate_top);
    assert!(hit.position.abs_diff_eq(Vec3::new(0.0, 1.5, 0.0), 1e-5));
}

#[test]
fn disc_follows_tilted_surface() {
    let (_world, ids) = entities(1);
    let tilt = Quat::from_rotation_z(0.3);
    let physics = ColliderWorld::new().with_body(
        ids[0],
        Transform::from_rotation(tilt),
        floor(),
    );
    let settings = IndicatorSettings::default();
    let mut renderer = DropIndicatorRenderer::default();

    let hit = renderer
        .refresh(Vec3::new(0.0, 3.0, 0.0), &physics, None, &settings)
        .unwrap();
    let expected_normal = tilt * Vec3::Y;
    assert!(hit.normal.abs_diff_eq(expected_normal, 1e-4));

    let positions = renderer.disc().positions();
    let center = Vec3::from_array(positions[0]);
    assert!(center.abs_diff_eq(hit.position + expected_normal * settings.surface_offset, 1e-4));
    // Rim lies in the surface plane at the configured radius.
    for rim in &positions[1..] {
        let offset = Vec3::from_array(*rim) - center;
        assert!(offset.dot(expected_normal).abs() < 1e-4);
        assert!((offset.length() - settings.disc_radius).abs() < 1e-4);
    }
}

#[test]
fn probe_out_of_range_misses() {
    let (_world, ids) = entities(1);
    let physics = ColliderWorld::new().with_body(ids[0], Transform::IDENTITY, floor());
    let settings = IndicatorSettings {
        probe_distance: 1.0,
        ..default()
    };
    let mut renderer = DropIndicatorRenderer::default();

    assert!(renderer.refresh(Vec3::new(0.0, 3.0, 0.0), &physics, None, &settings).is_none());
    assert_eq!(renderer.triangle_count(), 0);
}
