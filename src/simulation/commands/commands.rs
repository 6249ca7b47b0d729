use std::collections::HashMap;

use glam::Vec3;
use log::{debug, warn};

use crate::domain::error::EngineError;
use crate::domain::fan::FanState;

use super::SimulationCore;

pub(super) fn set_smoke_enabled(sim: &mut SimulationCore, enabled: bool) {
    sim.smoke_enabled = enabled;
    sim.opacity_target = if enabled {
        sim.config.opacity_on
    } else {
        sim.config.opacity_off
    };
}

/// Non-finite points are ignored so a bad frame can't poison the pool
pub(super) fn set_emitter(sim: &mut SimulationCore, position: Vec3) {
    if position.is_finite() {
        sim.emitter = position;
    }
}

pub(super) fn cycle_fan(sim: &mut SimulationCore, id: &str) -> Option<FanState> {
    let state = sim.fans.cycle(id)?;
    debug!("fan '{}' -> {}", id, state.as_str());
    Some(state)
}

pub(super) fn set_fan_state(sim: &mut SimulationCore, id: &str, state: FanState) -> bool {
    let known = sim.fans.set_state(id, state);
    if known {
        debug!("fan '{}' set to {}", id, state.as_str());
    }
    known
}

pub(super) fn apply_preset(sim: &mut SimulationCore, mapping: &HashMap<String, FanState>) -> usize {
    let applied = sim.fans.apply_mapping(mapping);
    debug!("preset mapping set {} of {} fans", applied, mapping.len());
    applied
}

pub(super) fn apply_preset_json(sim: &mut SimulationCore, json: &str) -> Result<usize, EngineError> {
    let mapping: HashMap<String, FanState> =
        serde_json::from_str(json).map_err(EngineError::InvalidPreset)?;
    Ok(apply_preset(sim, &mapping))
}

pub(super) fn apply_named_preset(sim: &mut SimulationCore, key: &str) -> bool {
    let Some(preset) = sim.case.preset(key) else {
        warn!("case '{}' has no preset '{}'", sim.case.id, key);
        return false;
    };
    sim.fans.apply_preset(preset);
    debug!("preset '{}' applied", key);
    true
}

pub(super) fn reset_fans(sim: &mut SimulationCore) {
    sim.fans.reset_all();
    debug!("fans reset to defaults");
}
