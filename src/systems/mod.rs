//! Per-tick systems: forces, wall crossings, opening lookup and emission

pub mod boundary;
pub mod emitter;
pub mod forces;
pub mod openings;

pub use boundary::{BoundaryContext, BoundaryOutcome};
pub use openings::{BoundaryFace, Opening, OpeningRegistry, TravelDirection};
