//! Fans - per-opening state machine and directional influence
//!
//! Each fan cycles INTAKE → EXHAUST → OFF → INTAKE when clicked and can be
//! set directly by presets. The session owns all fans in a [`FanBank`];
//! the simulation only reads them during a tick.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::case::PresetSpec;

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FanState {
    Intake = 0,
    Exhaust = 1,
    Off = 2,
}

impl FanState {
    /// Next state in the click cycle
    #[inline]
    pub fn next(self) -> Self {
        match self {
            FanState::Intake => FanState::Exhaust,
            FanState::Exhaust => FanState::Off,
            FanState::Off => FanState::Intake,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FanState::Intake => "INTAKE",
            FanState::Exhaust => "EXHAUST",
            FanState::Off => "OFF",
        }
    }

    /// Whether particles may enter the case through this fan's opening.
    /// A stopped fan does not block either way.
    #[inline]
    pub fn admits_inflow(self) -> bool {
        matches!(self, FanState::Intake | FanState::Off)
    }

    /// Whether particles may leave the case through this fan's opening.
    /// A stopped fan does not block either way.
    #[inline]
    pub fn admits_outflow(self) -> bool {
        matches!(self, FanState::Exhaust | FanState::Off)
    }

    /// Legend colour (blue = in, red = out, grey = off)
    pub fn color_hex(self) -> &'static str {
        match self {
            FanState::Intake => "#5bb3ff",
            FanState::Exhaust => "#ff6f6f",
            FanState::Off => "#a7b3c2",
        }
    }
}

fn default_radius() -> f32 {
    0.06
}

/// Static description of a fan slot in a case
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FanSlot {
    pub id: String,
    pub position: Vec3,
    /// Outward normal of the wall the fan sits in
    pub normal: Vec3,
    #[serde(default = "default_radius")]
    pub radius: f32,
    pub default_state: FanState,
}

impl FanSlot {
    pub fn new(id: &str, position: Vec3, normal: Vec3, radius: f32, default_state: FanState) -> Self {
        Self {
            id: id.to_string(),
            position,
            normal,
            radius,
            default_state,
        }
    }
}

/// What the status panel shows for one fan
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FanStatus {
    pub id: String,
    pub state: FanState,
    pub color: &'static str,
    pub arrow: Vec3,
    pub blade_opacity: f32,
}

#[derive(Clone, Debug)]
pub struct Fan {
    slot: FanSlot,
    normal: Vec3,
    state: FanState,
}

impl Fan {
    pub fn new(slot: FanSlot) -> Self {
        let normal = slot.normal.normalize_or_zero();
        let state = slot.default_state;
        Self { slot, normal, state }
    }

    pub fn id(&self) -> &str {
        &self.slot.id
    }

    pub fn position(&self) -> Vec3 {
        self.slot.position
    }

    /// Unit outward normal
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn radius(&self) -> f32 {
        self.slot.radius
    }

    #[inline]
    pub fn state(&self) -> FanState {
        self.state
    }

    pub fn default_state(&self) -> FanState {
        self.slot.default_state
    }

    pub fn cycle_state(&mut self) -> FanState {
        self.state = self.state.next();
        self.state
    }

    pub fn set_state(&mut self, state: FanState) {
        self.state = state;
    }

    pub fn reset(&mut self) {
        self.state = self.slot.default_state;
    }

    /// Push this fan applies to a particle at `p`.
    ///
    /// Falls off linearly from `scale` at the fan center to zero at `radius`.
    /// Intake pulls along -normal, exhaust pushes along +normal, off does nothing.
    #[inline]
    pub fn influence(&self, p: Vec3, radius: f32, scale: f32) -> Option<Vec3> {
        let distance = self.slot.position.distance(p);
        if distance > radius {
            return None;
        }

        let dir = match self.state {
            FanState::Intake => -self.normal,
            FanState::Exhaust => self.normal,
            FanState::Off => return None,
        };

        let strength = (1.0 - distance / radius) * scale;
        Some(dir * strength)
    }

    /// Direction the status arrow points (into the case for intake)
    pub fn arrow_direction(&self) -> Vec3 {
        let dir = match self.state {
            FanState::Intake => -self.normal,
            _ => self.normal,
        };
        if dir.length_squared() == 0.0 {
            Vec3::Z
        } else {
            dir
        }
    }

    pub fn status(&self) -> FanStatus {
        FanStatus {
            id: self.slot.id.clone(),
            state: self.state,
            color: self.state.color_hex(),
            arrow: self.arrow_direction(),
            blade_opacity: if self.state == FanState::Off { 0.45 } else { 0.85 },
        }
    }
}

/// All fans of the active case, addressable by slot id
#[derive(Clone, Debug, Default)]
pub struct FanBank {
    fans: Vec<Fan>,
    index_by_id: HashMap<String, usize>,
}

impl FanBank {
    pub fn from_slots(slots: &[FanSlot]) -> Self {
        let mut bank = Self::default();
        for slot in slots {
            // Ids are validated unique at load time; first one wins otherwise
            if bank.index_by_id.contains_key(&slot.id) {
                continue;
            }
            bank.index_by_id.insert(slot.id.clone(), bank.fans.len());
            bank.fans.push(Fan::new(slot.clone()));
        }
        bank
    }

    pub fn len(&self) -> usize {
        self.fans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fan> {
        self.fans.iter()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Fan> {
        self.fans.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&Fan> {
        self.index_of(id).and_then(|i| self.fans.get(i))
    }

    fn by_id_mut(&mut self, id: &str) -> Option<&mut Fan> {
        let i = self.index_of(id)?;
        self.fans.get_mut(i)
    }

    pub fn state_of(&self, id: &str) -> Option<FanState> {
        self.by_id(id).map(Fan::state)
    }

    /// Advance one fan through the click cycle; unknown ids are ignored
    pub fn cycle(&mut self, id: &str) -> Option<FanState> {
        self.by_id_mut(id).map(Fan::cycle_state)
    }

    /// Returns false for unknown ids
    pub fn set_state(&mut self, id: &str, state: FanState) -> bool {
        match self.by_id_mut(id) {
            Some(fan) => {
                fan.set_state(state);
                true
            }
            None => false,
        }
    }

    /// Set every listed fan; unlisted fans keep their state, unknown ids are
    /// skipped. Returns how many fans were set.
    pub fn apply_mapping(&mut self, mapping: &HashMap<String, FanState>) -> usize {
        mapping
            .iter()
            .filter(|(id, state)| self.set_state(id, **state))
            .count()
    }

    /// Named preset: listed intakes and exhausts, everything else off
    pub fn apply_preset(&mut self, preset: &PresetSpec) {
        for fan in self.fans.iter_mut() {
            let id = fan.id();
            let state = if preset.intakes.iter().any(|i| i == id) {
                FanState::Intake
            } else if preset.exhausts.iter().any(|e| e == id) {
                FanState::Exhaust
            } else {
                FanState::Off
            };
            fan.set_state(state);
        }
    }

    pub fn reset_all(&mut self) {
        for fan in self.fans.iter_mut() {
            fan.reset();
        }
    }

    pub fn status(&self) -> Vec<FanStatus> {
        self.fans.iter().map(Fan::status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bottom_fan(state: FanState) -> Fan {
        Fan::new(FanSlot::new(
            "Bottom-1",
            Vec3::new(0.0, -0.22, 0.02),
            Vec3::new(0.0, -1.0, 0.0),
            0.06,
            state,
        ))
    }

    #[test]
    fn cycle_order_is_intake_exhaust_off() {
        let mut fan = bottom_fan(FanState::Intake);
        assert_eq!(fan.cycle_state(), FanState::Exhaust);
        assert_eq!(fan.cycle_state(), FanState::Off);
        assert_eq!(fan.cycle_state(), FanState::Intake);
    }

    #[test]
    fn set_state_and_reset() {
        let mut fan = bottom_fan(FanState::Intake);
        fan.set_state(FanState::Off);
        assert_eq!(fan.state(), FanState::Off);
        fan.reset();
        assert_eq!(fan.state(), FanState::Intake);
    }

    #[test]
    fn influence_direction_follows_state() {
        let p = Vec3::new(0.0, -0.17, 0.02);
        let intake = bottom_fan(FanState::Intake).influence(p, 0.14, 1.0).unwrap();
        assert!(intake.y > 0.0, "intake pulls into the case");

        let exhaust = bottom_fan(FanState::Exhaust).influence(p, 0.14, 1.0).unwrap();
        assert!(exhaust.y < 0.0, "exhaust pushes out of the case");

        assert!(bottom_fan(FanState::Off).influence(p, 0.14, 1.0).is_none());
    }

    #[test]
    fn influence_falls_off_linearly_to_zero() {
        let fan = Fan::new(FanSlot::new("Rear", Vec3::ZERO, Vec3::NEG_Z, 0.06, FanState::Exhaust));
        let mut last = f32::INFINITY;
        for step in 0..50 {
            let d = step as f32 * 0.01;
            let m = fan.influence(Vec3::new(d, 0.0, 0.0), 0.5, 0.14).unwrap().length();
            assert!(m < last, "magnitude must strictly decrease with distance");
            last = m;
        }

        let at_radius = fan.influence(Vec3::new(0.0, 0.5, 0.0), 0.5, 0.14).unwrap();
        assert_eq!(at_radius.length(), 0.0);
        assert!(fan.influence(Vec3::new(0.0, 0.51, 0.0), 0.5, 0.14).is_none());
    }

    #[test]
    fn bank_ignores_unknown_ids() {
        let slots = vec![
            FanSlot::new("A", Vec3::ZERO, Vec3::X, 0.06, FanState::Intake),
            FanSlot::new("B", Vec3::ZERO, Vec3::Y, 0.06, FanState::Exhaust),
        ];
        let mut bank = FanBank::from_slots(&slots);

        assert_eq!(bank.cycle("nope"), None);
        assert!(!bank.set_state("nope", FanState::Off));

        let mut mapping = HashMap::new();
        mapping.insert("A".to_string(), FanState::Off);
        mapping.insert("ghost".to_string(), FanState::Exhaust);
        assert_eq!(bank.apply_mapping(&mapping), 1);
        assert_eq!(bank.state_of("A"), Some(FanState::Off));
        assert_eq!(bank.state_of("B"), Some(FanState::Exhaust));

        bank.reset_all();
        assert_eq!(bank.state_of("A"), Some(FanState::Intake));
    }

    #[test]
    fn preset_turns_unlisted_fans_off() {
        let slots = vec![
            FanSlot::new("A", Vec3::ZERO, Vec3::X, 0.06, FanState::Exhaust),
            FanSlot::new("B", Vec3::ZERO, Vec3::Y, 0.06, FanState::Exhaust),
            FanSlot::new("C", Vec3::ZERO, Vec3::Z, 0.06, FanState::Intake),
        ];
        let mut bank = FanBank::from_slots(&slots);
        bank.apply_preset(&PresetSpec {
            intakes: vec!["A".into()],
            exhausts: vec!["B".into()],
        });
        assert_eq!(bank.state_of("A"), Some(FanState::Intake));
        assert_eq!(bank.state_of("B"), Some(FanState::Exhaust));
        assert_eq!(bank.state_of("C"), Some(FanState::Off));
    }

    #[test]
    fn status_reports_color_and_arrow() {
        let fan = bottom_fan(FanState::Intake);
        let status = fan.status();
        assert_eq!(status.color, "#5bb3ff");
        assert_eq!(status.arrow, Vec3::Y);
        assert_eq!(status.blade_opacity, 0.85);
    }

    #[test]
    fn state_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&FanState::Exhaust).unwrap(), "\"EXHAUST\"");
        let parsed: FanState = serde_json::from_str("\"OFF\"").unwrap();
        assert_eq!(parsed, FanState::Off);
    }
}
