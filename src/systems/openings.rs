//! Opening registry - which parts of each wall let particles through
//!
//! Fan openings are bucketed by the wall they sit in (the axis and sign of
//! their outward normal) once per case load. A boundary crossing then only
//! scans the openings of the face it hits.

use glam::Vec3;
use log::warn;

use crate::core::geometry::Axis;
use crate::domain::fan::FanBank;

/// One of the six walls of the inner box, named by outward normal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl BoundaryFace {
    pub const ALL: [BoundaryFace; 6] = [
        BoundaryFace::PosX,
        BoundaryFace::NegX,
        BoundaryFace::PosY,
        BoundaryFace::NegY,
        BoundaryFace::PosZ,
        BoundaryFace::NegZ,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            BoundaryFace::PosX => 0,
            BoundaryFace::NegX => 1,
            BoundaryFace::PosY => 2,
            BoundaryFace::NegY => 3,
            BoundaryFace::PosZ => 4,
            BoundaryFace::NegZ => 5,
        }
    }

    #[inline]
    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => BoundaryFace::PosX,
            (Axis::X, false) => BoundaryFace::NegX,
            (Axis::Y, true) => BoundaryFace::PosY,
            (Axis::Y, false) => BoundaryFace::NegY,
            (Axis::Z, true) => BoundaryFace::PosZ,
            (Axis::Z, false) => BoundaryFace::NegZ,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            BoundaryFace::PosX | BoundaryFace::NegX => Axis::X,
            BoundaryFace::PosY | BoundaryFace::NegY => Axis::Y,
            BoundaryFace::PosZ | BoundaryFace::NegZ => Axis::Z,
        }
    }

    pub fn normal(self) -> Vec3 {
        match self {
            BoundaryFace::PosX => Vec3::X,
            BoundaryFace::NegX => Vec3::NEG_X,
            BoundaryFace::PosY => Vec3::Y,
            BoundaryFace::NegY => Vec3::NEG_Y,
            BoundaryFace::PosZ => Vec3::Z,
            BoundaryFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Face whose normal matches `normal` within `tolerance` on every component
    pub fn classify(normal: Vec3, tolerance: f32) -> Option<Self> {
        let n = normal.normalize_or_zero();
        Self::ALL
            .into_iter()
            .find(|face| n.abs_diff_eq(face.normal(), tolerance))
    }
}

/// Which way a particle is going through a wall
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelDirection {
    /// Outside → inside
    In,
    /// Inside → outside
    Out,
}

/// A fan's hole in a wall. `fan` indexes the session's [`FanBank`] so the
/// live state is read at crossing time.
#[derive(Clone, Debug)]
pub struct Opening {
    pub id: String,
    pub face: BoundaryFace,
    pub position: Vec3,
    pub radius: f32,
    pub fan: usize,
}

#[derive(Clone, Debug, Default)]
pub struct OpeningRegistry {
    buckets: [Vec<Opening>; 6],
    excluded: Vec<String>,
}

impl OpeningRegistry {
    /// Bucket every fan by the wall it faces. Fans whose normal is not
    /// axis-aligned are left out (they still push particles around).
    pub fn build(fans: &FanBank, tolerance: f32) -> Self {
        let mut registry = Self::default();

        for index in 0..fans.len() {
            let Some(fan) = fans.get(index) else {
                continue;
            };

            match BoundaryFace::classify(fan.normal(), tolerance) {
                Some(face) => registry.buckets[face.index()].push(Opening {
                    id: fan.id().to_string(),
                    face,
                    position: fan.position(),
                    radius: fan.radius(),
                    fan: index,
                }),
                None => {
                    warn!(
                        "fan '{}' normal {:?} is not axis-aligned; its opening is treated as solid wall",
                        fan.id(),
                        fan.normal()
                    );
                    registry.excluded.push(fan.id().to_string());
                }
            }
        }

        registry
    }

    #[inline]
    pub fn bucket(&self, face: BoundaryFace) -> &[Opening] {
        &self.buckets[face.index()]
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fan ids left out of the registry
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Can a particle cross `face` at `point` going `travel`?
    ///
    /// Only the inner `coverage` share of each opening's radius counts. Intake
    /// lets particles in, exhaust lets them out, and an OFF fan lets them pass
    /// either way: it doesn't push, but a stopped fan is not a seal. Anywhere
    /// no opening admits the crossing is solid wall.
    pub fn is_permeable(
        &self,
        face: BoundaryFace,
        point: Vec3,
        travel: TravelDirection,
        fans: &FanBank,
        coverage: f32,
    ) -> bool {
        let (a, b) = face.axis().orthogonal();
        let (a, b) = (a.index(), b.index());

        for opening in self.bucket(face) {
            let planar = (point[a] - opening.position[a]).hypot(point[b] - opening.position[b]);
            if planar > opening.radius * coverage {
                continue;
            }

            let Some(fan) = fans.get(opening.fan) else {
                continue;
            };
            let admitted = match travel {
                TravelDirection::In => fan.state().admits_inflow(),
                TravelDirection::Out => fan.state().admits_outflow(),
            };
            if admitted {
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fan::{FanSlot, FanState};

    const COVERAGE: f32 = 0.95;

    fn single_bottom_fan(state: FanState) -> (FanBank, OpeningRegistry) {
        let fans = FanBank::from_slots(&[FanSlot::new(
            "Bottom-1",
            Vec3::new(0.0, -0.22, 0.02),
            Vec3::new(0.0, -1.0, 0.0),
            0.06,
            state,
        )]);
        let registry = OpeningRegistry::build(&fans, 0.01);
        (fans, registry)
    }

    #[test]
    fn classifies_six_directions() {
        assert_eq!(BoundaryFace::classify(Vec3::X, 0.01), Some(BoundaryFace::PosX));
        assert_eq!(BoundaryFace::classify(Vec3::NEG_Y * 3.0, 0.01), Some(BoundaryFace::NegY));
        assert_eq!(BoundaryFace::classify(Vec3::new(0.0, 0.0, -1.0), 0.01), Some(BoundaryFace::NegZ));
        assert_eq!(BoundaryFace::classify(Vec3::new(1.0, 1.0, 0.0), 0.01), None);
        assert_eq!(BoundaryFace::classify(Vec3::ZERO, 0.01), None);
    }

    #[test]
    fn tilted_fans_are_excluded_and_reported() {
        let fans = FanBank::from_slots(&[
            FanSlot::new("Straight", Vec3::ZERO, Vec3::Y, 0.06, FanState::Exhaust),
            FanSlot::new("Tilted", Vec3::ZERO, Vec3::new(0.0, 1.0, 0.3), 0.06, FanState::Exhaust),
        ]);
        let registry = OpeningRegistry::build(&fans, 0.01);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.bucket(BoundaryFace::PosY)[0].id, "Straight");
        assert_eq!(registry.excluded(), &["Tilted".to_string()]);
    }

    #[test]
    fn intake_admits_inflow_only() {
        let (fans, registry) = single_bottom_fan(FanState::Intake);
        // Crossing the bottom plane 0.03 from the fan center
        let point = Vec3::new(0.03, -0.223, 0.02);
        assert!(registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::In, &fans, COVERAGE));
        assert!(!registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::Out, &fans, COVERAGE));
    }

    #[test]
    fn exhaust_admits_outflow_only() {
        let (fans, registry) = single_bottom_fan(FanState::Exhaust);
        let point = Vec3::new(0.0, -0.223, 0.05);
        assert!(registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::Out, &fans, COVERAGE));
        assert!(!registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::In, &fans, COVERAGE));
    }

    #[test]
    fn off_fan_is_open_both_ways() {
        // Stopped fans pass flow passively in both directions; keep it that way.
        let (fans, registry) = single_bottom_fan(FanState::Off);
        let point = Vec3::new(-0.02, -0.223, 0.0);
        assert!(registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::In, &fans, COVERAGE));
        assert!(registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::Out, &fans, COVERAGE));
    }

    #[test]
    fn only_inner_share_of_radius_counts() {
        let (fans, registry) = single_bottom_fan(FanState::Intake);
        let inside_rim = Vec3::new(0.056, -0.223, 0.02);
        let on_rim = Vec3::new(0.058, -0.223, 0.02);
        assert!(registry.is_permeable(BoundaryFace::NegY, inside_rim, TravelDirection::In, &fans, COVERAGE));
        assert!(!registry.is_permeable(BoundaryFace::NegY, on_rim, TravelDirection::In, &fans, COVERAGE));
    }

    #[test]
    fn other_faces_are_solid() {
        let (fans, registry) = single_bottom_fan(FanState::Off);
        let point = Vec3::new(0.0, 0.223, 0.02);
        assert!(!registry.is_permeable(BoundaryFace::PosY, point, TravelDirection::Out, &fans, COVERAGE));
    }

    #[test]
    fn state_changes_are_seen_immediately() {
        let (mut fans, registry) = single_bottom_fan(FanState::Intake);
        let point = Vec3::new(0.0, -0.223, 0.02);
        assert!(!registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::Out, &fans, COVERAGE));
        fans.set_state("Bottom-1", FanState::Exhaust);
        assert!(registry.is_permeable(BoundaryFace::NegY, point, TravelDirection::Out, &fans, COVERAGE));
    }
}
