//! Per-tick forces: base flow, fan push, obstacle deflection and drag

use glam::Vec3;

use crate::core::geometry::Aabb;
use crate::core::random::Rng;
use crate::domain::config::SimConfig;
use crate::domain::fan::FanBank;

/// Combined push of every running fan within reach of `p`
#[inline]
pub fn fan_push(fans: &FanBank, p: Vec3, config: &SimConfig) -> Vec3 {
    fans.iter()
        .filter_map(|fan| fan.influence(p, config.fan_influence_radius, config.fan_influence_scale))
        .fold(Vec3::ZERO, |acc, push| acc + push)
}

/// Repulsion away from an obstacle box.
///
/// Inside the box the push points toward the nearest face; outside it points
/// away from the closest surface point. Magnitude is `repulsion / (d + eps)`.
/// Exactly on the surface the direction degenerates, so a random one is used.
pub fn repel_from_box(p: Vec3, bounds: &Aabb, config: &SimConfig, rng: &mut Rng) -> Vec3 {
    let dir = if bounds.contains(p) {
        bounds.nearest_surface_point(p) - p
    } else {
        p - bounds.clamp_point(p)
    };

    let dir = if dir.length_squared() > 0.0 {
        dir
    } else {
        random_direction(rng)
    };

    let len = dir.length();
    dir / len * (config.obstacle_repulsion / (len + config.obstacle_epsilon))
}

/// Tie-breaker for degenerate repulsion directions
fn random_direction(rng: &mut Rng) -> Vec3 {
    let v = rng.jitter3(0.4);
    if v.length_squared() > 1e-12 {
        v
    } else {
        Vec3::Y
    }
}

/// Weighted repulsion from every obstacle: strong inside a box, weak when
/// merely close to it. Not yet scaled by dt.
pub fn obstacle_push(p: Vec3, obstacles: &[Aabb], config: &SimConfig, rng: &mut Rng) -> Vec3 {
    let mut push = Vec3::ZERO;
    for bounds in obstacles {
        if bounds.contains(p) {
            push += repel_from_box(p, bounds, config, rng) * config.obstacle_inside_weight;
        } else if bounds.distance_to_point(p) < config.obstacle_near_distance {
            push += repel_from_box(p, bounds, config, rng) * config.obstacle_near_weight;
        }
    }
    push
}

/// Velocity after one tick of ambient flow, fan and obstacle forces plus drag
#[inline]
pub fn accelerate(
    p: Vec3,
    velocity: Vec3,
    dt: f32,
    fans: &FanBank,
    obstacles: &[Aabb],
    config: &SimConfig,
    rng: &mut Rng,
) -> Vec3 {
    let mut v = velocity;
    v += config.base_flow * (config.base_flow_weight * dt);
    v += fan_push(fans, p, config) * (config.fan_force_weight * dt);
    v += obstacle_push(p, obstacles, config, rng) * dt;
    v * (1.0 - config.drag * dt).max(0.0)
}
