use crate::systems::emitter;

use super::SimulationCore;

/// Emit this tick's batch at the emitter. Stops silently at capacity.
/// Returns how many particles were added.
pub(super) fn spawn_batch(sim: &mut SimulationCore, dt: f32) -> u32 {
    if !sim.smoke_enabled {
        return 0;
    }

    let wanted = emitter::spawn_count(dt, &sim.config);
    let mut spawned = 0;
    for _ in 0..wanted {
        if sim.pool.is_full() {
            break;
        }
        let position = emitter::spawn_position(sim.emitter, &sim.config, &mut sim.rng);
        let velocity = emitter::spawn_velocity(&sim.config, &mut sim.rng, true);
        let age = emitter::initial_age(&sim.config, &mut sim.rng);
        if sim.pool.push(position, velocity, age).is_some() {
            spawned += 1;
        }
    }
    spawned
}

/// Reuse slot `i` for a fresh particle at the emitter
pub(super) fn respawn(sim: &mut SimulationCore, i: usize) {
    let position = emitter::spawn_position(sim.emitter, &sim.config, &mut sim.rng);
    let velocity = emitter::spawn_velocity(&sim.config, &mut sim.rng, false);
    sim.pool.write(i, position, velocity, 0.0);
}
