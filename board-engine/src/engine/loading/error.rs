use std::path::PathBuf;

/// Failure of a single `load` call. The previous level has already been cleared
/// when one of these is returned; callers decide whether to retry.
#[derive(Debug, thiserror::Error)]
pub enum LevelLoadError {
    #[error("level has no map asset path")]
    MissingMapPath,
    #[error("map asset not found: {0}")]
    MapAssetNotFound(String),
    #[error("map asset {path} could not be loaded: {reason}")]
    MapAssetInvalid { path: String, reason: String },
    #[error("level document {path} unavailable: {source}")]
    LevelDataUnavailable {
        path: String,
        #[source]
        source: LevelDataError,
    },
    #[error("no level has been loaded yet")]
    NothingLoaded,
}

/// Failure to spawn one placement. Logged and skipped by the loader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("unknown token kind: {0}")]
    UnknownKind(String),
    #[error("placement {0} has an invalid transform")]
    InvalidTransform(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LevelDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
