//! Core building blocks: geometry, randomness, particle storage, logging

pub mod geometry;
pub mod logging;
pub mod pool;
pub mod random;

pub use geometry::{Aabb, Axis};
pub use pool::ParticlePool;
pub use random::Rng;
