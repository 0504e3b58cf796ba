//! Museum layout engine MVP: turns a hierarchical document (sections
//! holding text panels and pictures, nested arbitrarily deep) into a
//! walkable floor plan of square rooms joined by doorways.
//!
//! The composer is pure: a measured content tree goes in, an immutable
//! [`Room`] value tree comes out. Fetching documents and rendering meshes
//! belong to the callers on either side of that boundary.

pub mod content;
pub mod error;
pub mod footprint;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod render;

pub use content::{ContentNode, ExhibitRef};
pub use error::{LayoutError, Result};
pub use footprint::{ExhibitSpec, FootprintProvider, SectionSpec, StandardFootprint, measure_tree};
pub use geometry::{Facing, Point, WallSide};
pub use layout::{
    Composer, Doorway, LayoutConfig, Placard, PlacedItem, PlacedObject, Room, WallSegment,
    build_walls, partition, room_width, safety_width, wall_length,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use registry::PlanCache;
pub use render::{SketchRenderer, SketchSettings};
