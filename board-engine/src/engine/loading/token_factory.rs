use bevy::prelude::*;

use crate::engine::assets::level_data::PlacementSpec;
use crate::engine::assets::token_catalog::TokenKinds;
use crate::engine::physics::Collider;
use crate::engine::scene::token::Token;

use super::error::SpawnError;

/// Creates token entities from placements, keyed by species.
pub trait TokenFactory: Send + Sync {
    /// Spawn the token for `placement` under `container` at `transform`.
    fn create_from_placement(
        &self,
        world: &mut World,
        container: Entity,
        placement: &PlacementSpec,
        transform: Transform,
    ) -> Result<Entity, SpawnError>;
}

/// Spawns species registered in the [`TokenKinds`] resource.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogTokenFactory;

impl TokenFactory for CatalogTokenFactory {
    fn create_from_placement(
        &self,
        world: &mut World,
        container: Entity,
        placement: &PlacementSpec,
        transform: Transform,
    ) -> Result<Entity, SpawnError> {
        let kind = world
            .get_resource::<TokenKinds>()
            .and_then(|kinds| kinds.get(&placement.species))
            .cloned()
            .ok_or_else(|| SpawnError::UnknownKind(placement.species.clone()))?;

        let material = if placement.shiny {
            kind.shiny_material
        } else {
            kind.material
        };

        let entity = world
            .spawn((
                Token {
                    placement_id: placement.placement_id.clone(),
                    species: placement.species.clone(),
                    shiny: placement.shiny,
                },
                Collider::standing(kind.size),
                Mesh3d(kind.mesh),
                MeshMaterial3d(material),
                transform,
                GlobalTransform::from(transform),
                ChildOf(container),
                Name::new(format!("{}_{}", placement.species, placement.placement_id)),
            ))
            .id();
        Ok(entity)
    }
}
