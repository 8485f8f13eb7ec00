/// Runtime override file for board settings, relative to the working directory.
pub const BOARD_SETTINGS_PATH: &str = "assets/config/board.json";

/// Asset root used by the Bevy asset server.
pub const ASSET_ROOT: &str = "assets";

/// Level documents live here, relative to the working directory.
pub const LEVELS_ROOT: &str = "assets/levels";

/// Token catalog, relative to the asset root.
pub const TOKEN_CATALOG_PATH: &str = "tokens/catalog.json";
