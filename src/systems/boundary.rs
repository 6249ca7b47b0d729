//! Wall collisions against the inner box
//!
//! Each axis is resolved on its own. A particle whose coordinate crossed one
//! of the two planes between the previous and the new position either passes
//! through a fan opening or bounces off the wall. Crossing detection is
//! continuous (sign change across the plane), so fast particles cannot skip a
//! wall, and passing particles are nudged clear of the plane so they cannot
//! re-trigger it next tick.

use glam::Vec3;

use crate::core::geometry::{Aabb, Axis};
use crate::domain::config::SimConfig;
use crate::domain::fan::FanBank;

use super::openings::{BoundaryFace, OpeningRegistry, TravelDirection};

pub struct BoundaryContext<'a> {
    pub inner: &'a Aabb,
    pub openings: &'a OpeningRegistry,
    pub fans: &'a FanBank,
    pub config: &'a SimConfig,
}

/// What happened to one particle at the walls this tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundaryOutcome {
    pub wall_hits: u32,
    /// Passes through an opening from outside
    pub entered: u32,
    /// Passes through an opening from inside
    pub exited: u32,
}

#[derive(Clone, Copy, Debug)]
struct Crossing {
    plane: f32,
    face: BoundaryFace,
    travel: TravelDirection,
}

/// Plane crossed on `axis` between `before` and `after`, if any
#[inline]
fn detect(axis: Axis, lo: f32, hi: f32, before: f32, after: f32) -> Option<Crossing> {
    let (plane, positive, travel) = if before <= hi && after > hi {
        (hi, true, TravelDirection::Out)
    } else if before > hi && after <= hi {
        (hi, true, TravelDirection::In)
    } else if before >= lo && after < lo {
        (lo, false, TravelDirection::Out)
    } else if before < lo && after >= lo {
        (lo, false, TravelDirection::In)
    } else {
        return None;
    };

    Some(Crossing {
        plane,
        face: BoundaryFace::new(axis, positive),
        travel,
    })
}

/// Resolve wall contact for one particle that moved from `prev` to `pos`
pub fn resolve(ctx: &BoundaryContext, prev: Vec3, pos: &mut Vec3, vel: &mut Vec3) -> BoundaryOutcome {
    let was_inside = ctx.inner.contains(prev);
    let mut outcome = BoundaryOutcome::default();

    for axis in Axis::ALL {
        resolve_axis(ctx, axis, prev, was_inside, pos, vel, &mut outcome);
    }

    outcome
}

fn resolve_axis(
    ctx: &BoundaryContext,
    axis: Axis,
    prev: Vec3,
    was_inside: bool,
    pos: &mut Vec3,
    vel: &mut Vec3,
    outcome: &mut BoundaryOutcome,
) {
    let i = axis.index();
    let lo = ctx.inner.min[i];
    let hi = ctx.inner.max[i];
    let before = prev[i];
    let after = pos[i];

    let Some(crossing) = detect(axis, lo, hi, before, after) else {
        return;
    };

    // before and after sit on opposite sides of the plane, so this never divides by zero
    let t = (crossing.plane - before) / (after - before);
    let point = prev.lerp(*pos, t);

    // Particles coming from outside only hit the wall if they meet the actual face
    if !was_inside && !ctx.inner.face_covers(axis, point) {
        return;
    }

    let nudge = ctx.config.boundary_nudge;
    let permeable = ctx.openings.is_permeable(
        crossing.face,
        point,
        crossing.travel,
        ctx.fans,
        ctx.config.opening_coverage,
    );

    let upper = crossing.plane == hi;
    if permeable {
        pos[i] = match (crossing.travel, upper) {
            (TravelDirection::Out, true) => after.max(hi + nudge),
            (TravelDirection::Out, false) => after.min(lo - nudge),
            (TravelDirection::In, true) => after.min(hi - nudge).max(lo + nudge),
            (TravelDirection::In, false) => after.max(lo + nudge).min(hi - nudge),
        };
        match crossing.travel {
            TravelDirection::In => outcome.entered += 1,
            TravelDirection::Out => outcome.exited += 1,
        }
        return;
    }

    // Solid wall: stay on the side the particle came from and bounce back
    let speed = vel[i].abs() * ctx.config.wall_restitution;
    let (clamped, bounced) = match (crossing.travel, upper) {
        (TravelDirection::Out, true) => (hi, -speed),
        (TravelDirection::Out, false) => (lo, speed),
        (TravelDirection::In, true) => (hi + nudge, speed),
        (TravelDirection::In, false) => (lo - nudge, -speed),
    };
    pos[i] = clamped;
    vel[i] = bounced;
    *vel *= ctx.config.wall_damping;
    outcome.wall_hits += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fan::{FanSlot, FanState};

    struct Fixture {
        inner: Aabb,
        fans: FanBank,
        openings: OpeningRegistry,
        config: SimConfig,
    }

    impl Fixture {
        /// Unit-ish box with a single fan in the top wall
        fn with_top_fan(state: FanState) -> Self {
            let inner = Aabb::new(Vec3::splat(-0.2), Vec3::splat(0.2));
            let fans = FanBank::from_slots(&[FanSlot::new(
                "Top",
                Vec3::new(0.0, 0.2, 0.0),
                Vec3::Y,
                0.06,
                state,
            )]);
            let openings = OpeningRegistry::build(&fans, 0.01);
            Self {
                inner,
                fans,
                openings,
                config: SimConfig::default(),
            }
        }

        fn ctx(&self) -> BoundaryContext<'_> {
            BoundaryContext {
                inner: &self.inner,
                openings: &self.openings,
                fans: &self.fans,
                config: &self.config,
            }
        }
    }

    #[test]
    fn solid_wall_reflects_and_damps() {
        let fx = Fixture::with_top_fan(FanState::Exhaust);
        let prev = Vec3::new(0.15, 0.0, 0.0);
        let mut pos = Vec3::new(0.25, 0.0, 0.0);
        let mut vel = Vec3::new(1.0, 0.5, 0.0);

        let outcome = resolve(&fx.ctx(), prev, &mut pos, &mut vel);

        assert_eq!(outcome.wall_hits, 1);
        assert_eq!(pos.x, 0.2);
        assert!((vel.x + 0.6 * 0.92).abs() < 1e-6);
        assert!((vel.y - 0.5 * 0.92).abs() < 1e-6);
    }

    #[test]
    fn exhaust_lets_particles_out_past_the_plane() {
        let fx = Fixture::with_top_fan(FanState::Exhaust);
        let prev = Vec3::new(0.01, 0.195, 0.0);
        let mut pos = Vec3::new(0.01, 0.2005, 0.0);
        let mut vel = Vec3::new(0.0, 0.3, 0.0);

        let outcome = resolve(&fx.ctx(), prev, &mut pos, &mut vel);

        assert_eq!(outcome.exited, 1);
        assert_eq!(outcome.entered, 0);
        assert!(pos.y >= 0.2 + 0.001, "nudged clear of the plane");
        assert_eq!(vel, Vec3::new(0.0, 0.3, 0.0));
    }

    #[test]
    fn intake_blocks_particles_going_out() {
        let fx = Fixture::with_top_fan(FanState::Intake);
        let prev = Vec3::new(0.0, 0.19, 0.0);
        let mut pos = Vec3::new(0.0, 0.21, 0.0);
        let mut vel = Vec3::new(0.0, 0.5, 0.0);

        resolve(&fx.ctx(), prev, &mut pos, &mut vel);

        assert_eq!(pos.y, 0.2);
        assert!(vel.y < 0.0);
    }

    #[test]
    fn intake_pulls_outside_particles_in() {
        let fx = Fixture::with_top_fan(FanState::Intake);
        let prev = Vec3::new(0.02, 0.23, 0.01);
        let mut pos = Vec3::new(0.02, 0.18, 0.01);
        let mut vel = Vec3::new(0.0, -1.0, 0.0);

        let outcome = resolve(&fx.ctx(), prev, &mut pos, &mut vel);

        assert_eq!(outcome.entered, 1);
        assert_eq!(outcome.exited, 0);
        assert!(pos.y <= 0.2 - 0.001);
        assert!(fx.inner.contains(pos));
    }

    #[test]
    fn wall_blocks_outside_particles_from_outside() {
        let fx = Fixture::with_top_fan(FanState::Intake);
        // Lands on the top wall away from the opening
        let prev = Vec3::new(0.15, 0.23, 0.15);
        let mut pos = Vec3::new(0.15, 0.18, 0.15);
        let mut vel = Vec3::new(0.0, -1.0, 0.0);

        let outcome = resolve(&fx.ctx(), prev, &mut pos, &mut vel);

        assert_eq!(outcome.wall_hits, 1);
        assert!(pos.y > 0.2, "stays outside the shell");
        assert!(vel.y > 0.0);
    }

    #[test]
    fn outside_particles_beside_the_case_fly_past() {
        let fx = Fixture::with_top_fan(FanState::Exhaust);
        // Beyond +X entirely, dropping through the height of the top plane
        let prev = Vec3::new(0.4, 0.23, 0.0);
        let mut pos = Vec3::new(0.4, 0.18, 0.0);
        let mut vel = Vec3::new(0.0, -1.0, 0.0);

        let outcome = resolve(&fx.ctx(), prev, &mut pos, &mut vel);

        assert_eq!(outcome, BoundaryOutcome::default());
        assert_eq!(pos, Vec3::new(0.4, 0.18, 0.0));
    }

    #[test]
    fn particle_on_the_plane_does_not_oscillate() {
        let fx = Fixture::with_top_fan(FanState::Exhaust);
        // Sitting exactly on the wall after a bounce, drifting further in
        let prev = Vec3::new(0.2, 0.0, 0.0);
        let mut pos = Vec3::new(0.199, 0.0, 0.0);
        let mut vel = Vec3::new(-0.06, 0.0, 0.0);

        let outcome = resolve(&fx.ctx(), prev, &mut pos, &mut vel);
        assert_eq!(outcome, BoundaryOutcome::default());
        assert_eq!(pos.x, 0.199);
    }

    #[test]
    fn uncovered_walls_contain_fast_particles() {
        let fx = Fixture::with_top_fan(FanState::Off);
        let prev = Vec3::new(0.1, -0.1, 0.05);
        for dir in [Vec3::X, Vec3::NEG_X, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            let mut pos = prev + dir * 3.0;
            let mut vel = dir * 50.0;
            resolve(&fx.ctx(), prev, &mut pos, &mut vel);
            assert!(fx.inner.contains(pos), "escaped through {:?}: {:?}", dir, pos);
        }
    }
}
