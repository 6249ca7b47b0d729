//! Simulation session - one active case and its smoke particles
//!
//! `SimulationCore` owns everything a tick touches: the fan bank, the
//! opening registry built from it, obstacle boxes, the particle pool, the
//! emitter and the RNG. Switching case or config rebuilds all of it.
//!
//! The work itself lives in the submodules:
//! - init/      - building and rebuilding a session
//! - step/      - the per-tick pipeline (spawn, forces, integrate, lifecycle)
//! - commands/  - fan intents, presets, smoke toggle
//! - render/    - buffers and status read by the host
//! - perf/      - timing and counters

use std::collections::HashMap;

use glam::Vec3;

use crate::core::geometry::Aabb;
use crate::core::pool::ParticlePool;
use crate::core::random::Rng;
use crate::domain::case::CaseSpec;
use crate::domain::catalogue::CaseCatalogue;
use crate::domain::config::SimConfig;
use crate::domain::error::EngineError;
use crate::domain::fan::{FanBank, FanState, FanStatus};
use crate::systems::openings::OpeningRegistry;

#[path = "perf/phase_clock.rs"]
mod phase_clock;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "step/spawn.rs"]
mod spawn;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{AbiLayout, AirflowSimulation};
pub use perf_stats::PerfStats;

use phase_clock::PhaseClock;

pub(crate) struct AbiLayoutData {
    pub(crate) positions_ptr: *const f32,
    pub(crate) positions_len_elements: usize,
    pub(crate) positions_len_bytes: usize,
    pub(crate) ages_ptr: *const f32,
    pub(crate) ages_len_elements: usize,
    pub(crate) ages_len_bytes: usize,
    pub(crate) live_count: usize,
    pub(crate) capacity: usize,
}

/// One airflow session
pub struct SimulationCore {
    catalogue: CaseCatalogue,
    case: CaseSpec,
    config: SimConfig,

    // Derived from the case
    fans: FanBank,
    openings: OpeningRegistry,
    obstacles: Vec<Aabb>,
    inner: Aabb,
    retire_bounds: Aabb,
    emitter: Vec3,

    // State
    pool: ParticlePool,
    rng: Rng,
    smoke_enabled: bool,
    opacity: f32,
    opacity_target: f32,
    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    /// Session on the built-in default case with default tuning
    pub fn new() -> Self {
        init::create_simulation_core(CaseCatalogue::builtin(), None, SimConfig::default())
    }

    /// Session on a custom case. The case joins the built-in catalogue.
    pub fn with_case(case: CaseSpec, config: SimConfig) -> Result<Self, EngineError> {
        case.validate()?;
        config.validate()?;
        let mut catalogue = CaseCatalogue::builtin();
        let id = case.id.clone();
        catalogue.insert(case);
        Ok(init::create_simulation_core(catalogue, Some(&id), config))
    }

    /// Rebuild on another catalogue case (unknown ids fall back to the default case)
    pub fn switch_case(&mut self, id: &str) {
        init::switch_case(self, id);
    }

    /// Parse, validate and switch to a case given as JSON
    pub fn load_case_json(&mut self, json: &str) -> Result<(), EngineError> {
        let case = CaseSpec::from_json(json)?;
        let id = case.id.clone();
        self.catalogue.insert(case);
        init::switch_case(self, &id);
        Ok(())
    }

    /// Replace the tuning and rebuild the session on the same case
    pub fn set_config_json(&mut self, json: &str) -> Result<(), EngineError> {
        let config = SimConfig::from_json(json)?;
        settings::set_config(self, config);
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn case(&self) -> &CaseSpec {
        &self.case
    }

    pub fn catalogue(&self) -> &CaseCatalogue {
        &self.catalogue
    }

    pub fn case_manifest_json(&self) -> String {
        self.catalogue.manifest_json()
    }

    /// Advance by `dt` seconds (clamped to `[0, max_dt]`)
    pub fn tick(&mut self, dt: f32) {
        step::tick(self, dt);
    }

    pub fn set_smoke_enabled(&mut self, enabled: bool) {
        commands::set_smoke_enabled(self, enabled);
    }

    pub fn smoke_enabled(&self) -> bool {
        self.smoke_enabled
    }

    /// Current smoke opacity, easing toward the on/off target every tick
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn emitter(&self) -> Vec3 {
        self.emitter
    }

    pub fn set_emitter(&mut self, position: Vec3) {
        commands::set_emitter(self, position);
    }

    pub fn inner_box(&self) -> Aabb {
        self.inner
    }

    // === FAN API ===

    pub fn fans(&self) -> &FanBank {
        &self.fans
    }

    pub fn openings(&self) -> &OpeningRegistry {
        &self.openings
    }

    /// INTAKE → EXHAUST → OFF → INTAKE. `None` for unknown ids.
    pub fn cycle_fan(&mut self, id: &str) -> Option<FanState> {
        commands::cycle_fan(self, id)
    }

    /// Returns false for unknown ids
    pub fn set_fan_state(&mut self, id: &str, state: FanState) -> bool {
        commands::set_fan_state(self, id, state)
    }

    pub fn fan_state(&self, id: &str) -> Option<FanState> {
        self.fans.state_of(id)
    }

    /// Set the listed fans, leave the rest alone. Returns fans changed.
    pub fn apply_preset(&mut self, mapping: &HashMap<String, FanState>) -> usize {
        commands::apply_preset(self, mapping)
    }

    /// `{"Bottom-1": "INTAKE", ...}`
    pub fn apply_preset_json(&mut self, json: &str) -> Result<usize, EngineError> {
        commands::apply_preset_json(self, json)
    }

    /// Apply one of the case's named presets; false when the key is unknown
    pub fn apply_named_preset(&mut self, key: &str) -> bool {
        commands::apply_named_preset(self, key)
    }

    pub fn reset_fans(&mut self) {
        commands::reset_fans(self);
    }

    pub fn fan_status(&self) -> Vec<FanStatus> {
        self.fans.status()
    }

    pub fn fan_status_json(&self) -> String {
        render_extract::fan_status_json(self)
    }

    // === PARTICLES ===

    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Live positions as packed xyz
    pub fn positions(&self) -> &[f32] {
        self.pool.positions()
    }

    /// Live ages, one per particle
    pub fn ages(&self) -> &[f32] {
        self.pool.ages()
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.pool.positions_ptr()
    }

    pub fn positions_len_elements(&self) -> usize {
        self.pool.positions_len()
    }

    pub fn positions_len_bytes(&self) -> usize {
        self.pool.positions_len() * std::mem::size_of::<f32>()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    // === PERF ===

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub(crate) fn abi_layout_data(&self) -> AbiLayoutData {
        render_extract::abi_layout_data(self)
    }
}

impl Default for SimulationCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
