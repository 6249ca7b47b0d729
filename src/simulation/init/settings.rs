use crate::domain::config::SimConfig;

use super::init;
use super::perf_stats::PerfStats;
use super::SimulationCore;

pub(super) fn enable_perf_metrics(sim: &mut SimulationCore, enabled: bool) {
    sim.perf_enabled = enabled;
    if !enabled {
        sim.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(sim: &SimulationCore) -> PerfStats {
    sim.perf_stats.clone()
}

/// New tuning means a new pool and RNG, so the session is rebuilt
pub(super) fn set_config(sim: &mut SimulationCore, config: SimConfig) {
    sim.config = config;
    let case = sim.case.clone();
    init::rebuild(sim, case);
}
