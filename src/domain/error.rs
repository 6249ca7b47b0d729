//! Error types for cases, tuning and the engine as a whole

use thiserror::Error;

/// Problems with a case description (JSON or built programmatically)
#[derive(Debug, Error)]
pub enum CaseError {
    /// The JSON could not be parsed into a case
    #[error("malformed case JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("case id must not be empty")]
    EmptyId,
    #[error("case dimensions must be positive and finite, got {width} x {height} x {depth}")]
    InvalidDimensions { width: f32, height: f32, depth: f32 },
    /// Walls would leave no interior volume
    #[error("wall thickness {wall} leaves no interior (must be >= 0 and < {limit})")]
    InvalidWallThickness { wall: f32, limit: f32 },
    #[error("duplicate fan id '{0}'")]
    DuplicateFan(String),
    #[error("fan '{fan}' has invalid opening radius {radius}")]
    InvalidRadius { fan: String, radius: f32 },
    #[error("fan '{0}' has a zero-length or non-finite normal")]
    DegenerateNormal(String),
    #[error("fan '{0}' has a non-finite position")]
    InvalidFanPosition(String),
    #[error("obstacle '{0}' has an inverted or non-finite box")]
    InvalidObstacle(String),
    #[error("emitter position must be finite")]
    InvalidEmitter,
}

/// Problems with simulation tuning values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("config field '{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("config field '{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("config field '{field}' must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("config field '{field}' is {value}, above the limit of {max}")]
    TooLarge { field: &'static str, value: usize, max: usize },
    #[error("config field '{0}' must be finite")]
    NotFinite(&'static str),
}

/// Anything the session API can reject
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Case(#[from] CaseError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("malformed fan preset JSON: {0}")]
    InvalidPreset(#[source] serde_json::Error),
}
