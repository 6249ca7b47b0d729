//! Simulation tuning
//!
//! Every constant the integrator uses lives here so hosts can retune the
//! look without rebuilding. Missing JSON fields fall back to the defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::pool::MAX_CAPACITY;

use super::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Pool capacity (max live particles)
    pub capacity: usize,
    /// Seconds before a particle expires
    pub lifetime: f32,
    /// Particles per second while smoke is on
    pub spawn_rate: f32,
    /// Per-tick spawn cap
    pub spawn_burst_cap: usize,
    /// Full width of the uniform spawn jitter around the emitter
    pub spawn_jitter: f32,
    /// Full width of the lateral (y/z) velocity jitter on fresh spawns
    pub lateral_jitter: f32,
    pub spawn_speed_min: f32,
    pub spawn_speed_span: f32,
    /// Fresh spawns start with age in [0, lifetime * fraction)
    pub initial_age_fraction: f32,

    /// Ambient flow direction and speed (right → left)
    pub base_flow: Vec3,
    pub base_flow_weight: f32,
    pub drag: f32,

    pub fan_influence_radius: f32,
    pub fan_influence_scale: f32,
    pub fan_force_weight: f32,

    pub obstacle_inside_weight: f32,
    pub obstacle_near_weight: f32,
    pub obstacle_near_distance: f32,
    pub obstacle_repulsion: f32,
    pub obstacle_epsilon: f32,

    /// Share of the normal speed kept after bouncing off a wall
    pub wall_restitution: f32,
    /// Extra damping on every velocity component after a wall hit
    pub wall_damping: f32,
    /// Distance a particle is pushed past a plane it is allowed through
    pub boundary_nudge: f32,
    /// Share of the opening radius that lets particles through
    pub opening_coverage: f32,
    /// Per-component tolerance when classifying fan normals
    pub axis_tolerance: f32,

    /// Retirement margins beyond the inner box, low side
    pub outer_margin_min: Vec3,
    /// Retirement margins beyond the inner box, high side
    pub outer_margin_max: Vec3,

    /// Frame hitches are clamped to this step (seconds)
    pub max_dt: f32,

    pub opacity_on: f32,
    pub opacity_off: f32,
    /// Per-tick easing factor toward the target opacity
    pub opacity_ease: f32,

    pub seed: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            capacity: 8000,
            lifetime: 16.0,
            spawn_rate: 320.0,
            spawn_burst_cap: 120,
            spawn_jitter: 0.05,
            lateral_jitter: 0.05,
            spawn_speed_min: 0.2,
            spawn_speed_span: 0.4,
            initial_age_fraction: 0.4,

            base_flow: Vec3::new(-0.45, 0.0, 0.0),
            base_flow_weight: 0.4,
            drag: 0.25,

            fan_influence_radius: 0.14,
            fan_influence_scale: 0.14,
            fan_force_weight: 6.0,

            obstacle_inside_weight: 2.0,
            obstacle_near_weight: 0.6,
            obstacle_near_distance: 0.04,
            obstacle_repulsion: 0.25,
            obstacle_epsilon: 0.0001,

            wall_restitution: 0.6,
            wall_damping: 0.92,
            boundary_nudge: 0.001,
            opening_coverage: 0.95,
            axis_tolerance: 0.01,

            outer_margin_min: Vec3::new(0.15, 0.25, 0.2),
            outer_margin_max: Vec3::new(0.25, 0.25, 0.2),

            max_dt: 0.05,

            opacity_on: 0.85,
            opacity_off: 0.08,
            opacity_ease: 0.05,

            seed: 12345,
        }
    }
}

impl SimConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::NotPositive { field: "capacity", value: 0.0 });
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::TooLarge {
                field: "capacity",
                value: self.capacity,
                max: MAX_CAPACITY,
            });
        }

        let positive = [
            ("lifetime", self.lifetime),
            ("fan_influence_radius", self.fan_influence_radius),
            ("obstacle_epsilon", self.obstacle_epsilon),
            ("max_dt", self.max_dt),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("spawn_rate", self.spawn_rate),
            ("spawn_jitter", self.spawn_jitter),
            ("lateral_jitter", self.lateral_jitter),
            ("spawn_speed_min", self.spawn_speed_min),
            ("spawn_speed_span", self.spawn_speed_span),
            ("base_flow_weight", self.base_flow_weight),
            ("drag", self.drag),
            ("fan_influence_scale", self.fan_influence_scale),
            ("fan_force_weight", self.fan_force_weight),
            ("obstacle_inside_weight", self.obstacle_inside_weight),
            ("obstacle_near_weight", self.obstacle_near_weight),
            ("obstacle_near_distance", self.obstacle_near_distance),
            ("obstacle_repulsion", self.obstacle_repulsion),
            ("boundary_nudge", self.boundary_nudge),
            ("opening_coverage", self.opening_coverage),
            ("axis_tolerance", self.axis_tolerance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let unit = [
            ("initial_age_fraction", self.initial_age_fraction),
            ("wall_restitution", self.wall_restitution),
            ("wall_damping", self.wall_damping),
            ("opacity_on", self.opacity_on),
            ("opacity_off", self.opacity_off),
            ("opacity_ease", self.opacity_ease),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        if !self.base_flow.is_finite() {
            return Err(ConfigError::NotFinite("base_flow"));
        }

        // Negative margins would pull the retirement box inside the walls
        let margins = [
            ("outer_margin_min", self.outer_margin_min),
            ("outer_margin_max", self.outer_margin_max),
        ];
        for (field, value) in margins {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
            if value.min_element() < 0.0 {
                return Err(ConfigError::Negative {
                    field,
                    value: value.min_element(),
                });
            }
        }

        Ok(())
    }
}
