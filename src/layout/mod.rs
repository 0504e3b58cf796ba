//! Layout module orchestrator.
//!
//! Downstream code imports layout types from here while the composition
//! internals live in the private `core` module; the partitioning, sizing,
//! and wall-building stages are public for callers that drive them alone.

mod core;
pub mod partition;
pub mod size;
pub mod walls;

pub use core::{Composer, LayoutConfig, Placard, PlacedItem, PlacedObject, Room};
pub use partition::partition;
pub use size::{room_width, safety_width, wall_length};
pub use walls::{Doorway, WallSegment, build_walls};
