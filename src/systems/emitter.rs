//! Smoke emitter - where and how new particles start

use glam::Vec3;

use crate::core::geometry::Aabb;
use crate::core::random::Rng;
use crate::domain::config::SimConfig;

/// Emitter used when a case does not name one: just outside the +X wall,
/// level with the middle of the inner box, inside the retirement margin.
pub fn default_emitter(inner: &Aabb, config: &SimConfig) -> Vec3 {
    let center = inner.center();
    Vec3::new(inner.max.x + config.outer_margin_max.x * 0.8, center.y, center.z)
}

/// Particles to emit this tick, capped per tick
#[inline]
pub fn spawn_count(dt: f32, config: &SimConfig) -> usize {
    let wanted = (config.spawn_rate * dt).floor().max(0.0) as usize;
    wanted.min(config.spawn_burst_cap)
}

/// Emitter point plus a small per-axis jitter
#[inline]
pub fn spawn_position(emitter: Vec3, config: &SimConfig, rng: &mut Rng) -> Vec3 {
    emitter + rng.jitter3(config.spawn_jitter)
}

/// Base flow scaled by a random speed. Fresh spawns also get a sideways
/// wobble on Y and Z; respawns start straight.
#[inline]
pub fn spawn_velocity(config: &SimConfig, rng: &mut Rng, lateral: bool) -> Vec3 {
    let speed = rng.range(config.spawn_speed_min, config.spawn_speed_min + config.spawn_speed_span);
    let mut v = config.base_flow * speed;
    if lateral {
        v.y += rng.centered(config.lateral_jitter);
        v.z += rng.centered(config.lateral_jitter);
    }
    v
}

/// Fresh particles start part-way through their life so they don't all expire together
#[inline]
pub fn initial_age(config: &SimConfig, rng: &mut Rng) -> f32 {
    rng.next_f32() * config.initial_age_fraction * config.lifetime
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_count_is_rate_times_dt_capped() {
        let config = SimConfig::default();
        assert_eq!(spawn_count(1.0 / 60.0, &config), 5);
        assert_eq!(spawn_count(0.05, &config), 16);
        assert_eq!(spawn_count(0.0, &config), 0);
        assert_eq!(spawn_count(10.0, &config), 120);
    }

    #[test]
    fn spawn_position_stays_near_emitter() {
        let config = SimConfig::default();
        let mut rng = Rng::new(7);
        let emitter = Vec3::new(0.4, 0.0, 0.1);
        for _ in 0..200 {
            let p = spawn_position(emitter, &config, &mut rng);
            assert!((p - emitter).abs().max_element() <= 0.025 + 1e-5);
        }
    }

    #[test]
    fn spawn_velocity_follows_base_flow() {
        let config = SimConfig::default();
        let mut rng = Rng::new(7);
        for _ in 0..200 {
            let v = spawn_velocity(&config, &mut rng, true);
            assert!(v.x <= -0.45 * 0.2 + 1e-6 && v.x >= -0.45 * 0.6 - 1e-6);
            assert!(v.y.abs() <= 0.025 && v.z.abs() <= 0.025);

            let straight = spawn_velocity(&config, &mut rng, false);
            assert_eq!(straight.y, 0.0);
            assert_eq!(straight.z, 0.0);
        }
    }

    #[test]
    fn initial_age_within_fraction_of_lifetime() {
        let config = SimConfig::default();
        let mut rng = Rng::new(11);
        for _ in 0..200 {
            let age = initial_age(&config, &mut rng);
            assert!((0.0..0.4 * 16.0).contains(&age));
        }
    }

    #[test]
    fn default_emitter_sits_outside_the_right_wall() {
        let config = SimConfig::default();
        let inner = Aabb::centered(Vec3::new(0.436, 0.446, 0.436));
        let e = default_emitter(&inner, &config);
        assert!(e.x > inner.max.x);
        assert!(e.x < inner.max.x + config.outer_margin_max.x);
        assert!(!inner.contains(e));
    }
}
