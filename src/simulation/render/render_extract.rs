use super::{AbiLayoutData, SimulationCore};

pub(super) fn fan_status_json(sim: &SimulationCore) -> String {
    serde_json::to_string(&sim.fans.status()).unwrap_or_else(|_| "[]".to_string())
}

/// Pointers stay valid until the session is rebuilt (case or config switch)
pub(super) fn abi_layout_data(sim: &SimulationCore) -> AbiLayoutData {
    let positions_len = sim.pool.positions_len();
    let ages_len = sim.pool.capacity();
    AbiLayoutData {
        positions_ptr: sim.pool.positions_ptr(),
        positions_len_elements: positions_len,
        positions_len_bytes: positions_len * std::mem::size_of::<f32>(),
        ages_ptr: sim.pool.ages_ptr(),
        ages_len_elements: ages_len,
        ages_len_bytes: ages_len * std::mem::size_of::<f32>(),
        live_count: sim.pool.live_count(),
        capacity: sim.pool.capacity(),
    }
}
