use bevy::prelude::*;

use crate::engine::assets::level_data::LevelData;
use crate::engine::physics::Collider;
use crate::engine::scene::token::{LevelTokens, MapRoot, Token};

use super::error::{LevelLoadError, SpawnError};
use super::level_provider::LevelDataProvider;
use super::scene_resolver::{MapVisual, SceneResolver};
use super::token_factory::TokenFactory;

/// Raised once per `load` that got as far as instantiating the map.
#[derive(Event, Debug, Clone)]
pub struct LevelLoaded {
    pub map_asset_path: String,
    pub tokens: usize,
    pub failures: usize,
}

/// Raised for every token a load spawns.
#[derive(Event, Debug, Clone)]
pub struct TokenSpawned {
    pub entity: Entity,
    pub placement_id: String,
}

/// Raised when a loaded level is torn down.
#[derive(Event, Debug, Clone)]
pub struct LevelCleared;

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnFailure {
    pub placement_id: String,
    pub error: SpawnError,
}

/// Outcome of a successful load. Failed placements are listed, not fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub spawned: usize,
    pub failures: Vec<SpawnFailure>,
}

/// Entities making up the loaded level.
#[derive(Debug, Clone)]
pub struct LoadedLevel {
    pub map: Entity,
    pub container: Entity,
    pub tokens: Vec<Entity>,
}

/// Owns the lifecycle of the current level: the map visual, the token
/// container and the ordered list of spawned tokens.
///
/// Every method takes the `World` explicitly; the loader itself is kept as a
/// resource and borrowed out with `World::resource_scope`.
#[derive(Resource)]
pub struct LevelLoader {
    resolver: Box<dyn SceneResolver>,
    factory: Box<dyn TokenFactory>,
    provider: Box<dyn LevelDataProvider>,
    current: Option<LoadedLevel>,
    last_loaded: Option<LevelData>,
}

impl LevelLoader {
    pub fn new(
        resolver: Box<dyn SceneResolver>,
        factory: Box<dyn TokenFactory>,
        provider: Box<dyn LevelDataProvider>,
    ) -> Self {
        Self {
            resolver,
            factory,
            provider,
            current: None,
            last_loaded: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&LoadedLevel> {
        self.current.as_ref()
    }

    /// Tracked tokens in placement order.
    pub fn tokens(&self) -> &[Entity] {
        self.current
            .as_ref()
            .map_or(&[][..], |level| level.tokens.as_slice())
    }

    pub fn last_loaded(&self) -> Option<&LevelData> {
        self.last_loaded.as_ref()
    }

    /// Replace the current level with `data`.
    ///
    /// The previous level is cleared first, so on error the loader is empty.
    /// Placements that fail to spawn are logged and skipped.
    pub fn load(&mut self, world: &mut World, data: &LevelData) -> Result<LoadReport, LevelLoadError> {
        self.clear(world);

        let path = data.map_asset_path.trim();
        if path.is_empty() {
            return Err(LevelLoadError::MissingMapPath);
        }
        if !self.resolver.exists(path) {
            return Err(LevelLoadError::MapAssetNotFound(path.to_owned()));
        }
        let visual = self.resolver.load(path)?;

        let map = spawn_map(world, data, visual);
        let container = world
            .spawn((
                LevelTokens,
                Transform::IDENTITY,
                GlobalTransform::IDENTITY,
                Visibility::default(),
                Name::new("LevelTokens"),
            ))
            .id();

        let frame = data.frame();
        let mut tokens = Vec::with_capacity(data.placements.len());
        let mut failures = Vec::new();

        for placement in &data.placements {
            let spawned = placement
                .world_transform(&frame)
                .ok_or_else(|| SpawnError::InvalidTransform(placement.placement_id.clone()))
                .and_then(|transform| {
                    self.factory
                        .create_from_placement(world, container, placement, transform)
                });

            match spawned {
                Ok(entity) => {
                    tokens.push(entity);
                    world.send_event(TokenSpawned {
                        entity,
                        placement_id: placement.placement_id.clone(),
                    });
                }
                Err(error) => {
                    warn!(
                        "Token spawn failed for placement {}: {}",
                        placement.placement_id, error
                    );
                    failures.push(SpawnFailure {
                        placement_id: placement.placement_id.clone(),
                        error,
                    });
                }
            }
        }

        let report = LoadReport {
            spawned: tokens.len(),
            failures,
        };
        info!(
            "Level loaded: {} ({} tokens, {} failed)",
            path,
            report.spawned,
            report.failures.len()
        );
        world.send_event(LevelLoaded {
            map_asset_path: path.to_owned(),
            tokens: report.spawned,
            failures: report.failures.len(),
        });

        self.current = Some(LoadedLevel {
            map,
            container,
            tokens,
        });
        self.last_loaded = Some(data.clone());
        Ok(report)
    }

    /// Resolve a level document through the provider, then `load` it.
    pub fn load_from_path(&mut self, world: &mut World, path: &str) -> Result<LoadReport, LevelLoadError> {
        let data = self
            .provider
            .resolve(path)
            .map_err(|source| LevelLoadError::LevelDataUnavailable {
                path: path.to_owned(),
                source,
            })?;
        self.load(world, &data)
    }

    /// Load the last successfully loaded level again.
    pub fn reload(&mut self, world: &mut World) -> Result<LoadReport, LevelLoadError> {
        let data = self.last_loaded.clone().ok_or(LevelLoadError::NothingLoaded)?;
        self.load(world, &data)
    }

    /// Destroy every tracked token, then the map and the container. Safe on an
    /// empty loader and against entities that are already gone.
    pub fn clear(&mut self, world: &mut World) {
        let Some(level) = self.current.take() else {
            return;
        };

        for token in level.tokens {
            despawn_if_alive(world, token);
        }
        despawn_if_alive(world, level.map);
        despawn_if_alive(world, level.container);

        info!("Level cleared");
        world.send_event(LevelCleared);
    }

    /// Destroy one tracked token. Returns whether it was tracked.
    pub fn remove_token(&mut self, world: &mut World, entity: Entity) -> bool {
        let Some(level) = self.current.as_mut() else {
            return false;
        };
        let Some(index) = level.tokens.iter().position(|&e| e == entity) else {
            return false;
        };
        level.tokens.remove(index);
        despawn_if_alive(world, entity);
        true
    }

    /// First tracked token whose placement id matches. Duplicate ids resolve to
    /// the earliest spawned.
    pub fn find_token_by_placement_id(&self, world: &World, placement_id: &str) -> Option<Entity> {
        self.tokens().iter().copied().find(|&entity| {
            world
                .get::<Token>(entity)
                .is_some_and(|token| token.placement_id == placement_id)
        })
    }
}

fn spawn_map(world: &mut World, data: &LevelData, visual: MapVisual) -> Entity {
    let transform = data.map_transform();
    let mut map = world.spawn((
        MapRoot {
            source: visual.source.clone(),
        },
        transform,
        GlobalTransform::from(transform),
        Visibility::default(),
        Name::new(format!("Map {}", visual.source)),
    ));

    if let Some(scene) = visual.scene {
        map.insert(SceneRoot(scene));
    }
    if let Some(extent) = data.board_extent {
        let size = Vec3::from_array(extent);
        map.insert(Collider::cuboid(size).with_offset(Vec3::NEG_Y * size.y * 0.5));
    }
    map.id()
}

fn despawn_if_alive(world: &mut World, entity: Entity) {
    if world.entities().contains(entity) {
        world.despawn(entity);
    }
}
