//! Particle pool - fixed-capacity SoA buffers
//!
//! Positions and velocities are packed xyz triplets, ages are one float per
//! slot. Slots `0..live` are live; retirement swaps the last live slot into
//! the hole, so indices are not stable across ticks.

use glam::Vec3;

/// Largest pool a session will allocate
pub const MAX_CAPACITY: usize = 1 << 22;

pub struct ParticlePool {
    positions: Vec<f32>,
    velocities: Vec<f32>,
    ages: Vec<f32>,
    live: usize,
    capacity: usize,
}

impl ParticlePool {
    /// Allocate every buffer up front; the pool never grows afterwards.
    /// Capacity is capped at [`MAX_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_CAPACITY);
        let floats = capacity.checked_mul(3).unwrap_or(MAX_CAPACITY * 3);
        Self {
            positions: vec![0.0; floats],
            velocities: vec![0.0; floats],
            ages: vec![0.0; capacity],
            live: 0,
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.live >= self.capacity
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn velocity(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn age(&self, i: usize) -> f32 {
        self.ages[i]
    }

    /// Overwrite a live slot in place
    #[inline]
    pub fn write(&mut self, i: usize, position: Vec3, velocity: Vec3, age: f32) {
        debug_assert!(i < self.live);
        position.write_to_slice(&mut self.positions[i * 3..i * 3 + 3]);
        velocity.write_to_slice(&mut self.velocities[i * 3..i * 3 + 3]);
        self.ages[i] = age;
    }

    /// Append a particle; `None` when the pool is at capacity
    pub fn push(&mut self, position: Vec3, velocity: Vec3, age: f32) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let i = self.live;
        self.live += 1;
        self.write(i, position, velocity, age);
        Some(i)
    }

    /// Retire slot `i`: the last live particle moves into it
    pub fn swap_remove(&mut self, i: usize) {
        if i >= self.live {
            return;
        }
        let last = self.live - 1;
        if i != last {
            self.positions.copy_within(last * 3..last * 3 + 3, i * 3);
            self.velocities.copy_within(last * 3..last * 3 + 3, i * 3);
            self.ages[i] = self.ages[last];
        }
        self.live = last;
    }

    pub fn clear(&mut self) {
        self.live = 0;
    }

    /// Live positions as packed xyz
    pub fn positions(&self) -> &[f32] {
        &self.positions[..self.live * 3]
    }

    pub fn ages(&self) -> &[f32] {
        &self.ages[..self.live]
    }

    pub fn positions_ptr(&self) -> *const f32 {
        self.positions.as_ptr()
    }

    pub fn ages_ptr(&self) -> *const f32 {
        self.ages.as_ptr()
    }

    /// Full position buffer length (capacity * 3 floats)
    pub fn positions_len(&self) -> usize {
        self.positions.len()
    }

    pub fn memory_bytes(&self) -> usize {
        (self.positions.len() + self.velocities.len() + self.ages.len()) * std::mem::size_of::<f32>()
    }
}
