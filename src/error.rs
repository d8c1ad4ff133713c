use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("`{0}` is not an object type")]
    NotAnObjectType(String),
    #[error("failed to serialize example: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model {origin} at JSON path {json_path} → {message}")]
    Decode {
        origin: String,
        json_path: String,
        message: String,
    },
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),
    #[error("type `{0}` is its own supertype or simple base")]
    Cycle(String),
}

#[derive(Debug, Error)]
#[error("unknown container shape `{0}` (expected array, collection, list or map)")]
pub struct UnknownContainerShape(pub String);
