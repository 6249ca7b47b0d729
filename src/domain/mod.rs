//! Domain model: fans, case descriptions, tuning and errors

pub mod case;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod fan;

pub use case::{CaseSpec, Dimensions, ObstacleSpec, PresetSpec};
pub use catalogue::CaseCatalogue;
pub use config::SimConfig;
pub use error::{CaseError, ConfigError, EngineError};
pub use fan::{Fan, FanBank, FanSlot, FanState, FanStatus};
