//! Axis-aligned geometry used by the airflow simulation.
//!
//! Everything lives in case-local space: X → right, Y → up, Z → front.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the three world axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two axes spanning a plane perpendicular to this one
    #[inline]
    pub fn orthogonal(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// Axis-aligned bounding box (inclusive on both ends)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin with the given full size
    pub fn centered(size: Vec3) -> Self {
        let half = size * 0.5;
        Self { min: -half, max: half }
    }

    /// True when min <= max on every axis and all corners are finite
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Shrink every face inward by `amount`
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec3::splat(amount),
            max: self.max - Vec3::splat(amount),
        }
    }

    /// Grow the box by per-axis margins on the low and high sides
    pub fn expand(&self, low: Vec3, high: Vec3) -> Self {
        Self {
            min: self.min - low,
            max: self.max + high,
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Closest point of the box to `p` (`p` itself when inside)
    #[inline]
    pub fn clamp_point(&self, p: Vec3) -> Vec3 {
        p.max(self.min).min(self.max)
    }

    #[inline]
    pub fn distance_to_point(&self, p: Vec3) -> f32 {
        (p - self.clamp_point(p)).length()
    }

    /// Projection of an interior point onto the nearest face.
    ///
    /// Ties resolve in face order -X, +X, -Y, +Y, -Z, +Z. Points outside the
    /// box are clamped first.
    pub fn nearest_surface_point(&self, p: Vec3) -> Vec3 {
        let p = self.clamp_point(p);
        let mut best = p;
        let mut best_dist = f32::INFINITY;

        for axis in Axis::ALL {
            let i = axis.index();
            let to_min = p[i] - self.min[i];
            if to_min < best_dist {
                best_dist = to_min;
                best = p;
                best[i] = self.min[i];
            }
            let to_max = self.max[i] - p[i];
            if to_max < best_dist {
                best_dist = to_max;
                best = p;
                best[i] = self.max[i];
            }
        }

        best
    }

    /// True when the two coordinates orthogonal to `axis` lie on the box face
    #[inline]
    pub fn face_covers(&self, axis: Axis, p: Vec3) -> bool {
        let (a, b) = axis.orthogonal();
        let (a, b) = (a.index(), b.index());
        p[a] >= self.min[a] && p[a] <= self.max[a] && p[b] >= self.min[b] && p[b] <= self.max[b]
    }
}
