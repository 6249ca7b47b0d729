use wasm_bindgen::prelude::*;

/// Snapshot of the last tick. All zeros while perf metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(crate) tick_ms: f64,
    pub(crate) forces_ms: f64,
    pub(crate) integrate_ms: f64,
    pub(crate) lifecycle_ms: f64,
    pub(crate) spawned: u32,
    pub(crate) respawned: u32,
    pub(crate) retired: u32,
    pub(crate) wall_hits: u32,
    pub(crate) openings_entered: u32,
    pub(crate) openings_exited: u32,
    pub(crate) live_count: u32,
    pub(crate) capacity: u32,
    pub(crate) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 { self.tick_ms }
    #[wasm_bindgen(getter)]
    pub fn forces_ms(&self) -> f64 { self.forces_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn lifecycle_ms(&self) -> f64 { self.lifecycle_ms }
    #[wasm_bindgen(getter)]
    pub fn spawned(&self) -> u32 { self.spawned }
    #[wasm_bindgen(getter)]
    pub fn respawned(&self) -> u32 { self.respawned }
    #[wasm_bindgen(getter)]
    pub fn retired(&self) -> u32 { self.retired }
    #[wasm_bindgen(getter)]
    pub fn wall_hits(&self) -> u32 { self.wall_hits }
    #[wasm_bindgen(getter)]
    pub fn openings_entered(&self) -> u32 { self.openings_entered }
    #[wasm_bindgen(getter)]
    pub fn openings_exited(&self) -> u32 { self.openings_exited }
    #[wasm_bindgen(getter)]
    pub fn live_count(&self) -> u32 { self.live_count }
    #[wasm_bindgen(getter)]
    pub fn capacity(&self) -> u32 { self.capacity }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
