//! Case specifications
//!
//! A case is the shell the smoke flows through: outer dimensions, wall
//! thickness, fan slots, internal obstacles and named fan presets. Cases are
//! either built in or loaded from JSON, e.g.
//!
//! ```json
//! {
//!   "id": "mini",
//!   "name": "Mini tower",
//!   "dimensions": { "width": 0.3, "height": 0.4, "depth": 0.35 },
//!   "wall_thickness": 0.01,
//!   "fan_slots": [
//!     { "id": "Front", "position": [0.0, 0.0, 0.165], "normal": [0, 0, 1],
//!       "radius": 0.06, "default_state": "INTAKE" }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::geometry::Aabb;

use super::error::CaseError;
use super::fan::{FanSlot, FanState};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimensions {
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// Internal component the airflow has to go around (read-only to the simulation)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
    #[serde(default)]
    pub color: Option<String>,
}

impl ObstacleSpec {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }
}

/// Named fan arrangement: listed fans in/out, everything else off
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetSpec {
    #[serde(default)]
    pub intakes: Vec<String>,
    #[serde(default)]
    pub exhausts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub dimensions: Dimensions,
    pub wall_thickness: f32,
    /// Faces rendered as glass ("front", "right", ...); display only
    #[serde(default)]
    pub glass_faces: Vec<String>,
    #[serde(default)]
    pub fan_slots: Vec<FanSlot>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub presets: BTreeMap<String, PresetSpec>,
    /// Smoke source position; defaults to just outside the +X wall
    #[serde(default)]
    pub emitter: Option<Vec3>,
}

impl CaseSpec {
    pub fn from_json(json: &str) -> Result<Self, CaseError> {
        let spec: CaseSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), CaseError> {
        if self.id.trim().is_empty() {
            return Err(CaseError::EmptyId);
        }

        let size = self.dimensions.as_vec3();
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(CaseError::InvalidDimensions {
                width: self.dimensions.width,
                height: self.dimensions.height,
                depth: self.dimensions.depth,
            });
        }

        let limit = size.min_element() * 0.5;
        if !self.wall_thickness.is_finite() || self.wall_thickness < 0.0 || self.wall_thickness >= limit {
            return Err(CaseError::InvalidWallThickness {
                wall: self.wall_thickness,
                limit,
            });
        }

        let mut seen = HashSet::new();
        for slot in &self.fan_slots {
            if !seen.insert(slot.id.as_str()) {
                return Err(CaseError::DuplicateFan(slot.id.clone()));
            }
            if !slot.radius.is_finite() || slot.radius <= 0.0 {
                return Err(CaseError::InvalidRadius {
                    fan: slot.id.clone(),
                    radius: slot.radius,
                });
            }
            if !slot.normal.is_finite() || slot.normal.length_squared() == 0.0 {
                return Err(CaseError::DegenerateNormal(slot.id.clone()));
            }
            if !slot.position.is_finite() {
                return Err(CaseError::InvalidFanPosition(slot.id.clone()));
            }
        }

        for obstacle in &self.obstacles {
            if !obstacle.bounds().is_valid() {
                return Err(CaseError::InvalidObstacle(obstacle.id.clone()));
            }
        }

        if let Some(emitter) = self.emitter {
            if !emitter.is_finite() {
                return Err(CaseError::InvalidEmitter);
            }
        }

        Ok(())
    }

    /// Outer shell, centered on the origin
    pub fn outer_box(&self) -> Aabb {
        Aabb::centered(self.dimensions.as_vec3())
    }

    /// Interior volume the particles are contained in
    pub fn inner_box(&self) -> Aabb {
        self.outer_box().inset(self.wall_thickness)
    }

    pub fn preset(&self, key: &str) -> Option<&PresetSpec> {
        self.presets.get(key)
    }

    /// The built-in showcase: a dual-chamber "aquarium" case with glass
    /// front and right panels.
    pub fn aquario() -> Self {
        let width = 0.46;
        let height = 0.47;
        let depth = 0.46;
        let wall = 0.012;
        let slot_radius = 0.06;

        let top_y = height / 2.0 - wall * 1.3;
        let bottom_y = -height / 2.0 + wall * 1.3;
        let right_x = width / 2.0 - wall * 1.4;
        let left_x = -width / 2.0 + wall * 1.7;
        let back_z = -depth / 2.0 + wall * 1.2;
        let front_z = depth / 2.0 - wall * 1.2;

        let offsets = [-0.14, 0.0, 0.14];
        let side_z = front_z - 0.08;
        let roof_z = 0.08;

        let mut fan_slots = Vec::with_capacity(10);
        for (i, x) in offsets.iter().enumerate() {
            fan_slots.push(FanSlot::new(
                &format!("Bottom-{}", i + 1),
                Vec3::new(*x, bottom_y, 0.02),
                Vec3::NEG_Y,
                slot_radius,
                FanState::Intake,
            ));
        }
        for (i, y) in offsets.iter().enumerate() {
            fan_slots.push(FanSlot::new(
                &format!("Side-{}", i + 1),
                Vec3::new(right_x, *y, side_z),
                Vec3::X,
                slot_radius,
                FanState::Intake,
            ));
        }
        for (i, x) in offsets.iter().enumerate() {
            fan_slots.push(FanSlot::new(
                &format!("Top-{}", i + 1),
                Vec3::new(*x, top_y, roof_z),
                Vec3::Y,
                slot_radius,
                FanState::Exhaust,
            ));
        }
        fan_slots.push(FanSlot::new(
            "Rear",
            Vec3::new(left_x + 0.06, 0.05, back_z),
            Vec3::NEG_Z,
            slot_radius,
            FanState::Exhaust,
        ));

        let obstacles = vec![
            obstacle(
                "motherboard",
                "Motherboard",
                Vec3::new(left_x + 0.03, -0.12, back_z + 0.03),
                Vec3::new(left_x + 0.18, 0.16, back_z + 0.14),
                "#293242",
            ),
            obstacle(
                "gpu",
                "GPU",
                Vec3::new(left_x + 0.03, -0.02, back_z + 0.16),
                Vec3::new(left_x + 0.26, 0.06, back_z + 0.3),
                "#39465c",
            ),
            obstacle(
                "psu",
                "PSU Chamber",
                Vec3::new(-width / 2.0 + wall * 1.5, -height / 2.0 + wall * 1.5, -depth / 2.0 + 0.12),
                Vec3::new(width / 2.0 - wall * 1.5, -height / 2.0 + 0.1, depth / 2.0 - 0.12),
                "#1d2533",
            ),
            obstacle(
                "cpu-cooler",
                "CPU Block",
                Vec3::new(left_x + 0.12, 0.1, back_z + 0.11),
                Vec3::new(left_x + 0.18, 0.16, back_z + 0.17),
                "#45556c",
            ),
        ];

        let mut presets = BTreeMap::new();
        presets.insert(
            "positive".to_string(),
            preset(
                &["Bottom-1", "Bottom-2", "Bottom-3", "Side-1", "Side-2", "Side-3"],
                &["Top-1", "Top-2", "Top-3", "Rear"],
            ),
        );
        presets.insert(
            "negative".to_string(),
            preset(
                &["Side-2", "Side-3"],
                &["Top-1", "Top-2", "Top-3", "Rear", "Bottom-1", "Bottom-2", "Bottom-3"],
            ),
        );
        presets.insert(
            "balanced".to_string(),
            preset(
                &["Bottom-1", "Bottom-2", "Bottom-3", "Side-2", "Side-3"],
                &["Top-1", "Top-2", "Top-3", "Rear"],
            ),
        );

        Self {
            id: "aquario".to_string(),
            name: "Aquário (tipo O11 Dynamic)".to_string(),
            dimensions: Dimensions { width, height, depth },
            wall_thickness: wall,
            glass_faces: vec!["front".to_string(), "right".to_string()],
            fan_slots,
            obstacles,
            presets,
            // Level with the side intakes, inside the retirement margin
            emitter: Some(Vec3::new(width / 2.0 + 0.2, 0.0, side_z)),
        }
    }
}

fn obstacle(id: &str, name: &str, min: Vec3, max: Vec3, color: &str) -> ObstacleSpec {
    ObstacleSpec {
        id: id.to_string(),
        name: name.to_string(),
        min,
        max,
        color: Some(color.to_string()),
    }
}

fn preset(intakes: &[&str], exhausts: &[&str]) -> PresetSpec {
    PresetSpec {
        intakes: intakes.iter().map(|s| s.to_string()).collect(),
        exhausts: exhausts.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_case_is_valid() {
        let case = CaseSpec::aquario();
        case.validate().expect("built-in case must validate");
        assert_eq!(case.fan_slots.len(), 10);
        assert_eq!(case.obstacles.len(), 4);
        assert_eq!(case.presets.len(), 3);

        let inner = case.inner_box();
        assert!((inner.max.y - 0.223).abs() < 1e-6);
        // Bottom fans sit at y ≈ -0.22, the plane the bottom bucket covers
        assert!((case.fan_slots[0].position.y + 0.2194).abs() < 1e-4);
    }

    #[test]
    fn from_json_applies_defaults() {
        let json = r#"{
            "id": "mini",
            "dimensions": { "width": 0.3, "height": 0.4, "depth": 0.35 },
            "wall_thickness": 0.01,
            "fan_slots": [
                { "id": "Front", "position": [0.0, 0.0, 0.165], "normal": [0, 0, 1], "default_state": "INTAKE" }
            ],
            "presets": { "all-off": {} }
        }"#;
        let case = CaseSpec::from_json(json).expect("case should parse");
        assert_eq!(case.fan_slots[0].radius, 0.06);
        assert_eq!(case.fan_slots[0].normal, Vec3::Z);
        assert!(case.obstacles.is_empty());
        assert!(case.emitter.is_none());
        assert_eq!(case.preset("all-off"), Some(&PresetSpec::default()));
    }

    #[test]
    fn rejects_duplicate_fans_and_bad_radius() {
        let mut case = CaseSpec::aquario();
        case.fan_slots[1].id = case.fan_slots[0].id.clone();
        assert!(matches!(case.validate(), Err(CaseError::DuplicateFan(id)) if id == "Bottom-1"));

        let mut case = CaseSpec::aquario();
        case.fan_slots[2].radius = 0.0;
        assert!(matches!(case.validate(), Err(CaseError::InvalidRadius { .. })));

        let mut case = CaseSpec::aquario();
        case.fan_slots[3].normal = Vec3::ZERO;
        assert!(matches!(case.validate(), Err(CaseError::DegenerateNormal(_))));
    }

    #[test]
    fn rejects_walls_that_swallow_the_interior() {
        let mut case = CaseSpec::aquario();
        case.wall_thickness = 0.3;
        assert!(matches!(case.validate(), Err(CaseError::InvalidWallThickness { .. })));
    }

    #[test]
    fn rejects_inverted_obstacles() {
        let mut case = CaseSpec::aquario();
        let obstacle = &mut case.obstacles[0];
        std::mem::swap(&mut obstacle.min, &mut obstacle.max);
        assert!(matches!(case.validate(), Err(CaseError::InvalidObstacle(id)) if id == "motherboard"));
    }

    #[test]
    fn json_round_trip_preserves_case() {
        let case = CaseSpec::aquario();
        let parsed = CaseSpec::from_json(&case.to_json()).expect("serialized case should parse");
        assert_eq!(parsed, case);
    }
}
