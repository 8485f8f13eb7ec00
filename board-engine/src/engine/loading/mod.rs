//! Level lifecycle: resolving level documents, instantiating the map and
//! spawning tokens from placements.
//!
//! ## Flow
//!
//! ```text
//! Startup
//!   ├─> install_level_loader   LevelLoader resource with asset/JSON collaborators
//!   └─> start_catalog_loading  token catalog JSON handed to the asset server
//! Update
//!   ├─> build_token_kinds      catalog asset -> TokenKinds, then startup level request
//!   └─> handle_level_commands  LevelCommand events -> LevelLoader (exclusive)
//! ```
//!
//! Spawned tokens, the map and the token container are plain entities; the
//! loader tracks their `Entity` handles and despawns them on clear/reload.

/// Error taxonomy for loading, spawning and document resolution.
pub mod error;

/// Map, container and token lifecycle owner.
pub mod level_loader;

/// Level document sources.
pub mod level_provider;

/// Loading progress flags for the startup sequence.
pub mod progress;

/// Map asset lookup and instantiation.
pub mod scene_resolver;

/// Token creation keyed by species.
pub mod token_factory;

use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::token_catalog::{TokenCatalog, TokenKinds};
use crate::engine::core::settings::BoardSettings;

use level_loader::{LevelCleared, LevelLoaded, LevelLoader, TokenSpawned};
use level_provider::JsonLevelProvider;
use progress::LoadingProgress;
use scene_resolver::AssetSceneResolver;
use token_factory::CatalogTokenFactory;

/// Requests handled by the level loader at the start of the next update.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum LevelCommand {
    Load(String),
    Reload,
    Clear,
    RemoveToken(Entity),
}

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<TokenCatalog>>,
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<TokenCatalog>::new(&["catalog.json"]))
            .init_resource::<BoardSettings>()
            .init_resource::<CatalogLoader>()
            .init_resource::<LoadingProgress>()
            .init_resource::<TokenKinds>()
            .add_event::<LevelCommand>()
            .add_event::<LevelLoaded>()
            .add_event::<LevelCleared>()
            .add_event::<TokenSpawned>()
            .add_systems(Startup, (install_level_loader, start_catalog_loading))
            .add_systems(Update, (build_token_kinds, handle_level_commands).chain());
    }
}

/// Build the loader from the asset server and board settings.
pub fn install_level_loader(world: &mut World) {
    let settings = world.get_resource::<BoardSettings>().cloned().unwrap_or_default();
    let Some(asset_server) = world.get_resource::<AssetServer>().cloned() else {
        error!("Asset server unavailable, level loading disabled");
        return;
    };

    let provider = JsonLevelProvider::new(&settings.levels_root);
    info!("Level documents resolved from: {}", provider.root().display());

    world.insert_resource(LevelLoader::new(
        Box::new(AssetSceneResolver::new(asset_server, &settings.asset_root)),
        Box::new(CatalogTokenFactory),
        Box::new(provider),
    ));
}

pub fn start_catalog_loading(
    mut catalog_loader: ResMut<CatalogLoader>,
    settings: Res<BoardSettings>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading token catalog from: {}", settings.token_catalog);
    catalog_loader.handle = Some(asset_server.load(settings.token_catalog.clone()));
}

/// Turn the catalog into spawnable kinds once it arrives, then request the startup level.
pub fn build_token_kinds(
    mut progress: ResMut<LoadingProgress>,
    catalog_loader: Res<CatalogLoader>,
    catalogs: Res<Assets<TokenCatalog>>,
    settings: Res<BoardSettings>,
    mut kinds: ResMut<TokenKinds>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut level_commands: EventWriter<LevelCommand>,
) {
    if progress.catalog_loaded {
        return;
    }
    let Some(catalog) = catalog_loader.handle.as_ref().and_then(|h| catalogs.get(h)) else {
        return;
    };

    *kinds = TokenKinds::from_catalog(catalog, &mut meshes, &mut materials);
    progress.catalog_loaded = true;
    info!("✓ Token catalog loaded: {} kinds", kinds.len());

    if let Some(level) = settings.startup_level.clone() {
        level_commands.write(LevelCommand::Load(level));
    }
}

/// Apply queued level commands. Errors are logged; the loader stays usable.
pub fn handle_level_commands(world: &mut World) {
    // Without a loader the commands stay queued and age out with the event buffer.
    if !world.contains_resource::<LevelLoader>() {
        let pending = world
            .get_resource::<Events<LevelCommand>>()
            .map_or(0, |events| events.len());
        if pending > 0 {
            warn!("No level loader installed, ignoring {pending} level command(s)");
        }
        return;
    }
    let commands: Vec<LevelCommand> = match world.get_resource_mut::<Events<LevelCommand>>() {
        Some(mut events) => events.drain().collect(),
        None => return,
    };
    if commands.is_empty() {
        return;
    }

    world.resource_scope(|world, mut loader: Mut<LevelLoader>| {
        for command in commands {
            let result = match &command {
                LevelCommand::Load(path) => loader.load_from_path(world, path).map(|_| ()),
                LevelCommand::Reload => loader.reload(world).map(|_| ()),
                LevelCommand::Clear => {
                    loader.clear(world);
                    Ok(())
                }
                LevelCommand::RemoveToken(entity) => {
                    if !loader.remove_token(world, *entity) {
                        debug!("RemoveToken ignored, {entity} is not a tracked token");
                    }
                    Ok(())
                }
            };
            if let Err(err) = result {
                error!("Level command {:?} failed: {}", command, err);
            }
        }
    });
}
