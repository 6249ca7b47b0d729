use crate::systems::boundary::{self, BoundaryContext};
use crate::systems::forces;

use super::spawn;
use super::{PhaseClock, SimulationCore};

/// Counters gathered while a tick runs
#[derive(Default)]
struct TickCounters {
    spawned: u32,
    respawned: u32,
    retired: u32,
    wall_hits: u32,
    entered: u32,
    exited: u32,
}

/// Clamp the host's frame delta. NaN and negative deltas freeze the tick.
#[inline]
pub(super) fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.max(0.0).min(max_dt)
}

pub(super) fn tick(sim: &mut SimulationCore, dt: f32) {
    let dt = clamp_dt(dt, sim.config.max_dt);
    let perf_on = sim.perf_enabled;
    if perf_on {
        sim.perf_stats.reset();
    }
    let tick_clock = PhaseClock::begin(perf_on);
    let mut counters = TickCounters::default();

    counters.spawned = spawn::spawn_batch(sim, dt);

    let clock = PhaseClock::begin(perf_on);
    apply_forces(sim, dt);
    clock.record(&mut sim.perf_stats.forces_ms);

    let clock = PhaseClock::begin(perf_on);
    integrate(sim, dt, &mut counters);
    clock.record(&mut sim.perf_stats.integrate_ms);

    let clock = PhaseClock::begin(perf_on);
    age_and_retire(sim, dt, &mut counters);
    clock.record(&mut sim.perf_stats.lifecycle_ms);

    sim.opacity += (sim.opacity_target - sim.opacity) * sim.config.opacity_ease;
    sim.frame += 1;

    if tick_clock.is_running() {
        let stats = &mut sim.perf_stats;
        tick_clock.record(&mut stats.tick_ms);
        stats.spawned = counters.spawned;
        stats.respawned = counters.respawned;
        stats.retired = counters.retired;
        stats.wall_hits = counters.wall_hits;
        stats.openings_entered = counters.entered;
        stats.openings_exited = counters.exited;
        stats.live_count = sim.pool.live_count() as u32;
        stats.capacity = sim.pool.capacity() as u32;
        stats.memory_bytes = sim.pool.memory_bytes() as u32;
    }
}

/// Base flow, fans, obstacles and drag into every live velocity
fn apply_forces(sim: &mut SimulationCore, dt: f32) {
    for i in 0..sim.pool.live_count() {
        let p = sim.pool.position(i);
        let v = forces::accelerate(
            p,
            sim.pool.velocity(i),
            dt,
            &sim.fans,
            &sim.obstacles,
            &sim.config,
            &mut sim.rng,
        );
        let age = sim.pool.age(i);
        sim.pool.write(i, p, v, age);
    }
}

/// Move every particle and settle it against the walls
fn integrate(sim: &mut SimulationCore, dt: f32, counters: &mut TickCounters) {
    let ctx = BoundaryContext {
        inner: &sim.inner,
        openings: &sim.openings,
        fans: &sim.fans,
        config: &sim.config,
    };

    for i in 0..sim.pool.live_count() {
        let prev = sim.pool.position(i);
        let mut v = sim.pool.velocity(i);
        let mut p = prev + v * dt;

        let outcome = boundary::resolve(&ctx, prev, &mut p, &mut v);
        counters.wall_hits += outcome.wall_hits;
        counters.entered += outcome.entered;
        counters.exited += outcome.exited;

        let age = sim.pool.age(i);
        sim.pool.write(i, p, v, age);
    }
}

/// Age every particle; expired or escaped ones respawn (smoke on) or go away.
///
/// Walks from the last live slot down so a swapped-in particle has already
/// been aged this tick.
fn age_and_retire(sim: &mut SimulationCore, dt: f32, counters: &mut TickCounters) {
    let lifetime = sim.config.lifetime;

    for i in (0..sim.pool.live_count()).rev() {
        let p = sim.pool.position(i);
        let age = sim.pool.age(i) + dt;

        let expired = age > lifetime;
        let escaped = !p.is_finite() || !sim.retire_bounds.contains(p);
        if !(expired || escaped) {
            let v = sim.pool.velocity(i);
            sim.pool.write(i, p, v, age);
            continue;
        }

        if sim.smoke_enabled {
            spawn::respawn(sim, i);
            counters.respawned += 1;
        } else {
            sim.pool.swap_remove(i);
            counters.retired += 1;
        }
    }
}
