use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use constants::render_settings::INDICATOR_COLOUR;

use crate::engine::mesh::indicator_mesh::empty_indicator_mesh;
use crate::engine::physics::{Collider, ColliderQuery, LiveColliders, anchor_point};
use crate::engine::scene::token::Token;

use super::state::*;

pub fn create_indicator_material(mut commands: Commands, mut materials: ResMut<Assets<StandardMaterial>>) {
    let [r, g, b, a] = INDICATOR_COLOUR;
    let material = materials.add(StandardMaterial {
        base_color: Color::linear_rgba(r, g, b, a),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        ..default()
    });
    commands.insert_resource(IndicatorAssets { material });
}

// Give every token a hidden indicator with its own pair of mesh entities
pub fn attach_drop_indicators(
    mut commands: Commands,
    tokens: Query<(Entity, &Token), Without<DropIndicator>>,
    indicator_assets: Option<Res<IndicatorAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Some(indicator_assets) = indicator_assets else { return };

    for (owner, token) in &tokens {
        let mut spawn_node = |part: IndicatorPart| {
            commands
                .spawn((
                    Mesh3d(meshes.add(empty_indicator_mesh())),
                    MeshMaterial3d(indicator_assets.material.clone()),
                    Transform::IDENTITY,
                    Visibility::Hidden,
                    NoFrustumCulling,
                    IndicatorNode { owner, part },
                    Name::new(format!("{}_indicator_{:?}", token.placement_id, part)),
                ))
                .id()
        };
        let line_node = spawn_node(IndicatorPart::Line);
        let disc_node = spawn_node(IndicatorPart::Disc);

        commands
            .entity(owner)
            .insert(DropIndicator::new(line_node, disc_node));
    }
}

// Rebuild shown indicators from a fresh downward probe
pub fn refresh_drop_indicators(
    settings: Res<IndicatorSettings>,
    colliders: ColliderQuery,
    mut indicators: Query<(Entity, Ref<GlobalTransform>, &Collider, &mut DropIndicator)>,
    nodes: Query<(), With<IndicatorNode>>,
) {
    let physics = LiveColliders(&colliders);

    for (entity, xf, collider, mut indicator) in &mut indicators {
        if !indicator.renderer.is_visible() {
            continue;
        }
        let moved = xf.is_changed();
        if settings.refresh_policy == RefreshPolicy::OnMove && !moved && !indicator.stale {
            continue;
        }
        // Nodes already despawned: nothing left to draw into.
        if !nodes.contains(indicator.line_node) || !nodes.contains(indicator.disc_node) {
            continue;
        }

        let anchor = anchor_point(&xf, collider);
        let indicator = &mut *indicator;
        indicator.stale = false;
        indicator
            .renderer
            .refresh(anchor, &physics, Some(entity), &settings);
    }
}

// Copy changed buffers into their mesh assets and toggle node visibility
pub fn sync_indicator_meshes(
    indicators: Query<&DropIndicator, Changed<DropIndicator>>,
    mut nodes: Query<(&Mesh3d, &mut Visibility), With<IndicatorNode>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for indicator in &indicators {
        let renderer = &indicator.renderer;
        for (node, buffer) in [
            (indicator.line_node, renderer.line()),
            (indicator.disc_node, renderer.disc()),
        ] {
            let Ok((mesh3d, mut visibility)) = nodes.get_mut(node) else {
                continue;
            };
            if let Some(mesh) = meshes.get_mut(&mesh3d.0) {
                buffer.write_to_mesh(mesh);
            }
            let wanted = if renderer.is_visible() && !buffer.is_empty() {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
            visibility.set_if_neq(wanted);
        }
    }
}

// Indicator nodes are top-level entities, so they go when their owner loses the indicator
pub fn despawn_indicator_nodes(
    trigger: Trigger<OnRemove, DropIndicator>,
    indicators: Query<&DropIndicator>,
    mut commands: Commands,
) {
    let Ok(indicator) = indicators.get(trigger.target()) else {
        return;
    };
    for node in [indicator.line_node, indicator.disc_node] {
        commands.queue(move |world: &mut World| {
            if world.entities().contains(node) {
                world.despawn(node);
            }
        });
    }
}
