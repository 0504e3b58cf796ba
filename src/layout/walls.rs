//! Wall and doorway emission for a single square room.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, WallSide};

/// A solid, straight run of wall in room-local coordinates.
///
/// Immutable once emitted. A wall interrupted by a doorway appears as two
/// collinear segments; the gap between them is described by a [`Doorway`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub from: Point,
    pub to: Point,
}

impl WallSegment {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f32 {
        self.from.distance_to(self.to)
    }
}

/// The fixed-width gap left in one wall for passage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Doorway {
    pub side: WallSide,
    pub center: Point,
    pub width: f32,
}

/// Emit the wall set for a square room of interior width `width`.
///
/// Local frame: the entrance is centered on z = 0 and the room extends to
/// z = -width, with x spanning [-width/2, +width/2]. The entrance wall is
/// always split around a centered doorway; the room at recursion level 0
/// also receives a symmetric exit through its back wall, dividing the
/// complex into an entrance half and an exit half.
pub fn build_walls(width: f32, level: u32, door_width: f32) -> (Vec<WallSegment>, Vec<Doorway>) {
    let half = width / 2.0;
    let half_door = door_width / 2.0;

    let mut walls = Vec::with_capacity(6);
    let mut doorways = Vec::with_capacity(2);

    doorways.push(Doorway {
        side: WallSide::Front,
        center: Point::new(0.0, 0.0),
        width: door_width,
    });

    // Left wall, full depth.
    walls.push(WallSegment::new(
        Point::new(-half, 0.0),
        Point::new(-half, -width),
    ));

    if level == 0 {
        walls.push(WallSegment::new(
            Point::new(-half, -width),
            Point::new(-half_door, -width),
        ));
        walls.push(WallSegment::new(
            Point::new(half_door, -width),
            Point::new(half, -width),
        ));
        doorways.push(Doorway {
            side: WallSide::Back,
            center: Point::new(0.0, -width),
            width: door_width,
        });
    } else {
        walls.push(WallSegment::new(
            Point::new(-half, -width),
            Point::new(half, -width),
        ));
    }

    // Right wall, full depth.
    walls.push(WallSegment::new(
        Point::new(half, -width),
        Point::new(half, 0.0),
    ));

    // Entrance wall, split around the doorway.
    walls.push(WallSegment::new(
        Point::new(-half, 0.0),
        Point::new(-half_door, 0.0),
    ));
    walls.push(WallSegment::new(
        Point::new(half_door, 0.0),
        Point::new(half, 0.0),
    ));

    (walls, doorways)
}
