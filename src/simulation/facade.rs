use glam::Vec3;
use wasm_bindgen::prelude::*;

use crate::domain::fan::FanState;

use super::perf_stats::PerfStats;
use super::SimulationCore;

/// Where the particle buffers live in wasm memory. Build typed-array views
/// from these after every case or config switch.
#[wasm_bindgen]
pub struct AbiLayout {
    positions_ptr: u32,
    positions_len_elements: u32,
    positions_len_bytes: u32,
    ages_ptr: u32,
    ages_len_elements: u32,
    ages_len_bytes: u32,
    live_count: u32,
    capacity: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn positions_ptr(&self) -> u32 { self.positions_ptr }
    #[wasm_bindgen(getter)]
    pub fn positions_len_elements(&self) -> u32 { self.positions_len_elements }
    #[wasm_bindgen(getter)]
    pub fn positions_len_bytes(&self) -> u32 { self.positions_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn ages_ptr(&self) -> u32 { self.ages_ptr }
    #[wasm_bindgen(getter)]
    pub fn ages_len_elements(&self) -> u32 { self.ages_len_elements }
    #[wasm_bindgen(getter)]
    pub fn ages_len_bytes(&self) -> u32 { self.ages_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn live_count(&self) -> u32 { self.live_count }
    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> u32 { self.capacity }
}

#[wasm_bindgen]
pub struct AirflowSimulation {
    core: SimulationCore,
}

#[wasm_bindgen]
impl AirflowSimulation {
    /// Session on the default built-in case
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            core: SimulationCore::new(),
        }
    }

    /// Session on a catalogue case (unknown ids fall back to the default)
    #[wasm_bindgen(js_name = withCase)]
    pub fn with_case(case_id: &str) -> Self {
        let mut core = SimulationCore::new();
        core.switch_case(case_id);
        Self { core }
    }

    pub fn switch_case(&mut self, case_id: &str) {
        self.core.switch_case(case_id);
    }

    /// Load a case from JSON and switch to it
    pub fn load_case_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core
            .load_case_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.core
            .set_config_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    pub fn case_manifest_json(&self) -> String {
        self.core.case_manifest_json()
    }

    #[wasm_bindgen(getter)]
    pub fn case_id(&self) -> String {
        self.core.case().id.clone()
    }

    /// Advance by the frame delta in seconds
    pub fn tick(&mut self, dt: f32) {
        self.core.tick(dt);
    }

    pub fn set_smoke_enabled(&mut self, enabled: bool) {
        self.core.set_smoke_enabled(enabled);
    }

    #[wasm_bindgen(getter)]
    pub fn smoke_enabled(&self) -> bool {
        self.core.smoke_enabled()
    }

    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.core.opacity()
    }

    pub fn set_emitter(&mut self, x: f32, y: f32, z: f32) {
        self.core.set_emitter(Vec3::new(x, y, z));
    }

    // === FANS ===

    pub fn cycle_fan(&mut self, id: &str) -> Option<FanState> {
        self.core.cycle_fan(id)
    }

    pub fn set_fan_state(&mut self, id: &str, state: FanState) -> bool {
        self.core.set_fan_state(id, state)
    }

    pub fn fan_state(&self, id: &str) -> Option<FanState> {
        self.core.fan_state(id)
    }

    /// `{"<fan id>": "INTAKE" | "EXHAUST" | "OFF"}`; returns fans changed
    pub fn apply_preset_json(&mut self, json: &str) -> Result<u32, JsValue> {
        self.core
            .apply_preset_json(json)
            .map(|n| n as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn apply_named_preset(&mut self, key: &str) -> bool {
        self.core.apply_named_preset(key)
    }

    pub fn reset_fans(&mut self) {
        self.core.reset_fans();
    }

    pub fn fan_status_json(&self) -> String {
        self.core.fan_status_json()
    }

    // === PARTICLES ===

    #[wasm_bindgen(getter)]
    pub fn live_count(&self) -> u32 {
        self.core.live_count() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> u32 {
        self.core.capacity() as u32
    }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 {
        self.core.frame()
    }

    /// Pointer to packed xyz positions (first `live_count` triplets are live)
    pub fn positions_ptr(&self) -> *const f32 {
        self.core.positions_ptr()
    }

    pub fn positions_len_elements(&self) -> usize {
        self.core.positions_len_elements()
    }

    pub fn positions_len_bytes(&self) -> usize {
        self.core.positions_len_bytes()
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        AbiLayout {
            positions_ptr: data.positions_ptr as u32,
            positions_len_elements: data.positions_len_elements as u32,
            positions_len_bytes: data.positions_len_bytes as u32,
            ages_ptr: data.ages_ptr as u32,
            ages_len_elements: data.ages_len_elements as u32,
            ages_len_bytes: data.ages_len_bytes as u32,
            live_count: data.live_count as u32,
            capacity: data.capacity as u32,
        }
    }

    // === PERF ===

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

impl AirflowSimulation {
    /// Native access to the session behind the wasm wrapper
    pub fn core(&self) -> &SimulationCore {
        &self.core
    }
}

impl Default for AirflowSimulation {
    fn default() -> Self {
        Self::new()
    }
}
