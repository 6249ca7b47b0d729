//! Deterministic xorshift randomness for spawns and jitter

use glam::Vec3;

/// Xorshift32 step
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Session random source (xorshift32).
///
/// Seeded per session so runs are reproducible; a zero seed would lock the
/// generator at zero forever, so it is replaced.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in [lo, hi)
    #[inline]
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Uniform in [-span/2, span/2)
    #[inline]
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.next_f32() - 0.5) * span
    }

    /// Per-axis centered jitter
    #[inline]
    pub fn jitter3(&mut self, span: f32) -> Vec3 {
        Vec3::new(self.centered(span), self.centered(span), self.centered(span))
    }
}
