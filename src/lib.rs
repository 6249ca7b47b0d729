//! Caseflow Engine - airflow particle simulation for PC case previews, in WASM
//!
//! Fans push smoke through a case shell: intakes pull it in, exhausts throw
//! it out, obstacles deflect it and walls keep it inside.
//!
//! Architecture:
//! - core/        - Geometry, RNG, particle pool, logging
//! - domain/      - Fans, case descriptions, tuning, errors
//! - systems/     - Forces, openings, wall crossings, emission
//! - simulation/  - Session orchestration and the wasm facade

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use log::{info, LevelFilter};
use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::install(LevelFilter::Info);
    info!("Caseflow engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Change the log level at runtime ("off", "error", "warn", "info", "debug", "trace").
/// Returns false for unknown names.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match crate::core::logging::parse_level(level) {
        Some(filter) => {
            crate::core::logging::install(filter);
            true
        }
        None => false,
    }
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{CaseCatalogue, CaseSpec, EngineError, FanState, SimConfig};
pub use simulation::{AbiLayout, AirflowSimulation, PerfStats, SimulationCore};
