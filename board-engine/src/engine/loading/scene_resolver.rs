use std::path::PathBuf;

use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use super::error::LevelLoadError;

/// Visual content of a loaded map.
#[derive(Debug, Clone, Default)]
pub struct MapVisual {
    pub source: String,
    pub scene: Option<Handle<Scene>>,
}

/// Looks up and loads map assets.
pub trait SceneResolver: Send + Sync {
    fn exists(&self, path: &str) -> bool;
    fn load(&self, path: &str) -> Result<MapVisual, LevelLoadError>;
}

/// Resolves glTF maps through the asset server, checking existence on disk first.
pub struct AssetSceneResolver {
    asset_server: AssetServer,
    asset_root: PathBuf,
}

impl AssetSceneResolver {
    pub fn new(asset_server: AssetServer, asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_server,
            asset_root: asset_root.into(),
        }
    }
}

/// Map formats the resolver can instantiate.
pub fn is_supported_map(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".glb") || lower.ends_with(".gltf")
}

impl SceneResolver for AssetSceneResolver {
    fn exists(&self, path: &str) -> bool {
        self.asset_root.join(path).is_file()
    }

    fn load(&self, path: &str) -> Result<MapVisual, LevelLoadError> {
        if !is_supported_map(path) {
            return Err(LevelLoadError::MapAssetInvalid {
                path: path.to_owned(),
                reason: "expected a .glb or .gltf scene".into(),
            });
        }
        let scene = self
            .asset_server
            .load(GltfAssetLabel::Scene(0).from_asset(path.to_owned()));
        Ok(MapVisual {
            source: path.to_owned(),
            scene: Some(scene),
        })
    }
}
