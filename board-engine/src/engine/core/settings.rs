use std::path::Path;

use bevy::prelude::*;
use constants::path::{ASSET_ROOT, LEVELS_ROOT, TOKEN_CATALOG_PATH};
use serde::{Deserialize, Serialize};

/// Paths and startup choices for the board, overridable from JSON.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub asset_root: String,
    pub levels_root: String,
    pub token_catalog: String,
    /// Level document loaded once the token catalog is ready.
    pub startup_level: Option<String>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            asset_root: ASSET_ROOT.to_owned(),
            levels_root: LEVELS_ROOT.to_owned(),
            token_catalog: TOKEN_CATALOG_PATH.to_owned(),
            startup_level: Some("meadow.json".to_owned()),
        }
    }
}

impl BoardSettings {
    /// Read settings from `path`, falling back to defaults when the file is
    /// absent or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                info!("No board settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Ignoring malformed board settings {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, r#"{ "startup_level": null, "levels_root": "custom" }"#).unwrap();

        let settings = BoardSettings::load_or_default(&path);
        assert_eq!(settings.levels_root, "custom");
        assert_eq!(settings.startup_level, None);
        assert_eq!(settings.token_catalog, TOKEN_CATALOG_PATH);
    }

    #[test]
    fn missing_or_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(BoardSettings::load_or_default(dir.path().join("nope.json")), BoardSettings::default());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "[1, 2").unwrap();
        assert_eq!(BoardSettings::load_or_default(&bad), BoardSettings::default());
    }
}
