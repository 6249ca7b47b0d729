use log::info;

use crate::core::geometry::Aabb;
use crate::core::pool::ParticlePool;
use crate::core::random::Rng;
use crate::domain::case::CaseSpec;
use crate::domain::catalogue::CaseCatalogue;
use crate::domain::config::SimConfig;
use crate::domain::fan::FanBank;
use crate::systems::emitter::default_emitter;
use crate::systems::openings::OpeningRegistry;

use super::perf_stats::PerfStats;
use super::SimulationCore;

/// Everything a session derives from its case and config
struct CaseRuntime {
    fans: FanBank,
    openings: OpeningRegistry,
    obstacles: Vec<Aabb>,
    inner: Aabb,
    retire_bounds: Aabb,
    emitter: glam::Vec3,
}

fn build_runtime(case: &CaseSpec, config: &SimConfig) -> CaseRuntime {
    let inner = case.inner_box();
    let fans = FanBank::from_slots(&case.fan_slots);
    let openings = OpeningRegistry::build(&fans, config.axis_tolerance);
    let obstacles = case.obstacles.iter().map(|o| o.bounds()).collect();
    let retire_bounds = inner.expand(config.outer_margin_min, config.outer_margin_max);
    let emitter = case.emitter.unwrap_or_else(|| default_emitter(&inner, config));

    info!(
        "case '{}' ready: {} fans, {} openings, {} obstacles, capacity {}",
        case.id,
        fans.len(),
        openings.len(),
        case.obstacles.len(),
        config.capacity
    );

    CaseRuntime {
        fans,
        openings,
        obstacles,
        inner,
        retire_bounds,
        emitter,
    }
}

pub(super) fn create_simulation_core(
    catalogue: CaseCatalogue,
    case_id: Option<&str>,
    config: SimConfig,
) -> SimulationCore {
    let case = match case_id {
        Some(id) => catalogue.get(id).clone(),
        None => catalogue.get(catalogue.default_id()).clone(),
    };
    let runtime = build_runtime(&case, &config);

    SimulationCore {
        pool: ParticlePool::new(config.capacity),
        rng: Rng::new(config.seed),
        smoke_enabled: true,
        opacity: config.opacity_on,
        opacity_target: config.opacity_on,
        frame: 0,
        fans: runtime.fans,
        openings: runtime.openings,
        obstacles: runtime.obstacles,
        inner: runtime.inner,
        retire_bounds: runtime.retire_bounds,
        emitter: runtime.emitter,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        catalogue,
        case,
        config,
    }
}

/// Drop every particle and fan state and rebuild on `case`. Smoke toggle
/// and perf settings carry over.
pub(super) fn rebuild(sim: &mut SimulationCore, case: CaseSpec) {
    let runtime = build_runtime(&case, &sim.config);

    sim.fans = runtime.fans;
    sim.openings = runtime.openings;
    sim.obstacles = runtime.obstacles;
    sim.inner = runtime.inner;
    sim.retire_bounds = runtime.retire_bounds;
    sim.emitter = runtime.emitter;
    sim.case = case;

    if sim.pool.capacity() == sim.config.capacity {
        sim.pool.clear();
    } else {
        sim.pool = ParticlePool::new(sim.config.capacity);
    }
    sim.rng = Rng::new(sim.config.seed);
    sim.opacity_target = if sim.smoke_enabled {
        sim.config.opacity_on
    } else {
        sim.config.opacity_off
    };
    sim.opacity = sim.opacity_target;
    sim.perf_stats.reset();
}

pub(super) fn switch_case(sim: &mut SimulationCore, id: &str) {
    if !sim.catalogue.contains(id) {
        log::warn!(
            "unknown case '{}', falling back to '{}'",
            id,
            sim.catalogue.default_id()
        );
    }
    let case = sim.catalogue.get(id).clone();
    rebuild(sim, case);
}
