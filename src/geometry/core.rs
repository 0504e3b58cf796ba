use serde::{Deserialize, Serialize};

/// Floor-plane coordinate in world units.
///
/// `x` runs along the entrance wall, `z` runs into the depth of a room
/// (deeper is more negative). The vertical axis belongs to the renderer and
/// never appears in plan data beyond configured heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub z: f32,
}

impl Point {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// This point moved `distance` along `direction` (a unit vector).
    pub fn translated(self, direction: Point, distance: f32) -> Self {
        Self {
            x: self.x + direction.x * distance,
            z: self.z + direction.z * distance,
        }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Quarter-turn rotation about the vertical axis, counter-clockwise when
/// seen from above. `Deg270` is the same turn as -90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Facing {
    pub const fn degrees(self) -> f32 {
        match self {
            Facing::Deg0 => 0.0,
            Facing::Deg90 => 90.0,
            Facing::Deg180 => 180.0,
            Facing::Deg270 => 270.0,
        }
    }

    pub fn radians(self) -> f32 {
        self.degrees().to_radians()
    }
}

/// The four walls of a room, named as seen by a visitor standing in the
/// entrance doorway and looking in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Back,
    Right,
    Front,
}

impl WallSide {
    /// The walls that receive partitioned content, in group order.
    pub const CONTENT_WALLS: [WallSide; 3] = [WallSide::Left, WallSide::Back, WallSide::Right];

    /// Where item placement starts on this wall, for a room of interior
    /// width `width` whose entrance is centered on z = 0.
    pub fn start(self, width: f32) -> Point {
        let half = width / 2.0;
        match self {
            WallSide::Left => Point::new(-half, 0.0),
            WallSide::Back => Point::new(-half, -width),
            WallSide::Right => Point::new(half, -width),
            WallSide::Front => Point::new(half, 0.0),
        }
    }

    /// Unit vector running along the wall in placement order.
    pub fn direction(self) -> Point {
        match self {
            WallSide::Left => Point::new(0.0, -1.0),
            WallSide::Back => Point::new(1.0, 0.0),
            WallSide::Right => Point::new(0.0, 1.0),
            WallSide::Front => Point::new(-1.0, 0.0),
        }
    }

    /// Unit vector pointing from the wall into the room interior.
    pub fn inward_normal(self) -> Point {
        match self {
            WallSide::Left => Point::new(1.0, 0.0),
            WallSide::Back => Point::new(0.0, 1.0),
            WallSide::Right => Point::new(-1.0, 0.0),
            WallSide::Front => Point::new(0.0, -1.0),
        }
    }

    /// Rotation that turns a wall-mounted item to face the room interior.
    pub fn facing(self) -> Facing {
        match self {
            WallSide::Left => Facing::Deg90,
            WallSide::Back => Facing::Deg0,
            WallSide::Right => Facing::Deg270,
            WallSide::Front => Facing::Deg180,
        }
    }
}
