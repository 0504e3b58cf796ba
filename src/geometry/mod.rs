//! Geometry module orchestrator.
//!
//! Downstream code imports the floor-plane primitives from here while the
//! implementation details live in the private `core` module.

mod core;

pub use core::{Facing, Point, WallSide};
