use std::path::{Path, PathBuf};

use crate::engine::assets::level_data::LevelData;

use super::error::LevelDataError;

/// Resolves level documents from external storage.
pub trait LevelDataProvider: Send + Sync {
    fn resolve(&self, path: &str) -> Result<LevelData, LevelDataError>;
}

/// Reads JSON level documents relative to a root directory.
#[derive(Debug, Clone)]
pub struct JsonLevelProvider {
    root: PathBuf,
}

impl JsonLevelProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LevelDataProvider for JsonLevelProvider {
    fn resolve(&self, path: &str) -> Result<LevelData, LevelDataError> {
        let full = self.root.join(path);
        let text = std::fs::read_to_string(&full).map_err(|source| LevelDataError::Io {
            path: full.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LevelDataError::Parse { path: full, source })
    }
}
