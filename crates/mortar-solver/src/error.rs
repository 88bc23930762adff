use std::path::PathBuf;

use mortar_models::ModelError;
use thiserror::Error;

/// Failure of a single solution request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("launch point `{id}` not found")]
    UnknownLaunchPoint { id: String },
}

/// Errors raised while loading or validating a calculator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("map {axis} must be positive and finite, got {value}")]
    MapDimension { axis: &'static str, value: f64 },
    #[error("max range factor must be positive and finite, got {0}")]
    RangeFactor(f64),
    #[error("launch point registry is empty")]
    EmptyRegistry,
    #[error("launch point id must not be empty")]
    EmptyId,
    #[error("duplicate launch point id `{0}`")]
    DuplicateId(String),
    #[error("launch point `{0}` has non-finite coordinates")]
    NonFinitePosition(String),
}
