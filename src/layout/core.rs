use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::content::{ContentNode, ExhibitRef};
use crate::error::{LayoutError, Result};
use crate::geometry::{Facing, Point, WallSide};
use crate::layout::partition::partition;
use crate::layout::size::{room_width, safety_width, wall_length};
use crate::layout::walls::{Doorway, WallSegment, build_walls};
use crate::logging::Logger;
use crate::metrics::LayoutMetrics;

/// Tunable distances for the floor plan, in world units.
///
/// Everything is passed in; the composer never infers spacing from content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Clearance left for every doorway.
    pub door_width: f32,
    /// Spacing before, between, and after the items on a wall.
    pub gap_width: f32,
    /// Width of a room with little or no content.
    pub min_room_width: f32,
    /// How far exhibits stand off their wall, toward the interior.
    pub exhibit_inset: f32,
    /// Wall height, handed through to the renderer.
    pub wall_height: f32,
    /// Wall thickness, handed through to the renderer.
    pub wall_thickness: f32,
    /// Mounting height of the section name placard.
    pub placard_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            door_width: 20.0,
            gap_width: 10.0,
            min_room_width: 30.0,
            exhibit_inset: 1.0,
            wall_height: 50.0,
            wall_thickness: 2.0,
            placard_height: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Reject configurations the composer cannot honor.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("door_width", self.door_width),
            ("gap_width", self.gap_width),
            ("min_room_width", self.min_room_width),
            ("exhibit_inset", self.exhibit_inset),
            ("wall_height", self.wall_height),
            ("wall_thickness", self.wall_thickness),
            ("placard_height", self.placard_height),
        ];
        for (field, value) in lengths {
            if value <= 0.0 {
                return Err(LayoutError::NonPositiveConfig { field, value });
            }
        }
        // The narrowest room must still fit its doorway.
        if self.door_width > self.min_room_width {
            return Err(LayoutError::DoorTooWide {
                door: self.door_width,
                min: self.min_room_width,
            });
        }
        Ok(())
    }
}

/// Anything mounted along a wall: a leaf exhibit or a fully composed
/// nested room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlacedObject {
    Exhibit(ExhibitRef),
    Room(Room),
}

/// Final position of one object within its parent room.
///
/// Created exactly once per layout pass and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub object: PlacedObject,
    /// Offset within the parent room's local frame.
    pub position: Point,
    pub facing: Facing,
    pub wall: WallSide,
}

/// The section name board, mounted over the wall opposite the entrance so
/// it greets a visitor walking in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placard {
    pub text: String,
    pub position: Point,
    pub facing: Facing,
    /// How high above the floor the renderer mounts the board.
    pub mount_height: f32,
}

/// A composed square floor cell with its walls, doorways, and placed items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    /// Interior side length of the square floor cell.
    pub width: f32,
    /// Width a parent must reserve for this room, doorway clearance included.
    pub safety_width: f32,
    pub walls: Vec<WallSegment>,
    pub doorways: Vec<Doorway>,
    pub placed_items: Vec<PlacedItem>,
    pub placard: Placard,
}

impl Room {
    /// Items mounted on one wall, in placement order.
    pub fn items_on(&self, wall: WallSide) -> impl Iterator<Item = &PlacedItem> {
        self.placed_items.iter().filter(move |item| item.wall == wall)
    }

    /// Nested rooms directly inside this one.
    pub fn sub_rooms(&self) -> impl Iterator<Item = &Room> {
        self.placed_items.iter().filter_map(|item| match &item.object {
            PlacedObject::Room(room) => Some(room),
            PlacedObject::Exhibit(_) => None,
        })
    }

    /// Serialize the plan tree for an out-of-process renderer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Recursive room composer.
///
/// Pure computation over an already-measured content tree: sizes flow
/// bottom-up (a parent needs every child's clearance width), positions flow
/// top-down (an item's place exists only once its room's walls are fixed).
/// Composing the same tree twice yields identical plans.
#[derive(Debug, Clone)]
pub struct Composer {
    config: LayoutConfig,
}

impl Composer {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_default() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compose the whole exhibition, rooted at `node`.
    ///
    /// # Panics
    /// Panics if any exhibit carries a non-positive width; widths must be
    /// resolved by the footprint layer before layout.
    pub fn compose(&self, node: &ContentNode) -> Room {
        self.compose_at(node, 0)
    }

    /// Compose `node` as a room at the given recursion level. Level 0 is
    /// the exhibition root and the only room with an exit doorway.
    pub fn compose_at(&self, node: &ContentNode, level: u32) -> Room {
        let mut metrics = LayoutMetrics::new();
        self.compose_room(node, level, &mut metrics)
    }

    /// Compose the whole exhibition and report counters for the pass.
    pub fn compose_measured(&self, node: &ContentNode) -> (Room, LayoutMetrics) {
        let mut metrics = LayoutMetrics::new();
        let room = self.compose_room(node, 0, &mut metrics);
        (room, metrics)
    }

    /// Compose the whole exhibition, then emit a summary event through
    /// `logger`.
    pub fn compose_logged(&self, node: &ContentNode, logger: &Logger) -> Room {
        let started = Instant::now();
        let (room, metrics) = self.compose_measured(node);
        let snapshot = metrics.snapshot(started.elapsed());
        let _ = logger.log_event(snapshot.to_log_event("museum::layout.compose"));
        room
    }

    fn compose_room(&self, node: &ContentNode, level: u32, metrics: &mut LayoutMetrics) -> Room {
        let child_rooms: Vec<Room> = node
            .children
            .iter()
            .map(|child| self.compose_room(child, level + 1, metrics))
            .collect();
        self.assemble(node, child_rooms, level, metrics)
    }

    /// Assemble one room from its own exhibits and already composed child
    /// rooms. Split out from the recursion so a plan cache can substitute
    /// reused children.
    pub(crate) fn assemble(
        &self,
        node: &ContentNode,
        child_rooms: Vec<Room>,
        level: u32,
        metrics: &mut LayoutMetrics,
    ) -> Room {
        for exhibit in &node.exhibits {
            assert!(
                exhibit.width > 0.0,
                "exhibit {} has non-positive width {}",
                exhibit.handle,
                exhibit.width
            );
        }

        let exhibit_count = node.exhibits.len();
        let sub_room_count = child_rooms.len();

        // Exhibits first, subsections after, exactly as they appeared in
        // the source document.
        let mut objects: Vec<PlacedObject> =
            Vec::with_capacity(exhibit_count + sub_room_count);
        objects.extend(node.exhibits.iter().copied().map(PlacedObject::Exhibit));
        objects.extend(child_rooms.into_iter().map(PlacedObject::Room));

        // A nested room weighs its clearance width, not its raw width.
        let weights: Vec<f32> = objects.iter().map(object_weight).collect();
        let groups = partition(&weights, 3);

        let gap = self.config.gap_width;
        let lengths = [
            wall_length(&weights[groups[0].clone()], gap),
            wall_length(&weights[groups[1].clone()], gap),
            wall_length(&weights[groups[2].clone()], gap),
        ];
        let width = room_width(lengths, self.config.min_room_width);

        let (walls, doorways) = build_walls(width, level, self.config.door_width);

        let mut placed_items = Vec::with_capacity(objects.len());
        let mut remaining = objects.into_iter();
        for ((wall, range), group_length) in
            WallSide::CONTENT_WALLS.into_iter().zip(groups).zip(lengths)
        {
            let start = wall.start(width);
            let along = wall.direction();
            // Surplus over the group length is split evenly between both
            // ends of the wall.
            let mut progress = (width - group_length) / 2.0;
            for index in range {
                let object = remaining
                    .next()
                    .expect("contiguous partition covers every item");
                let item_width = weights[index];
                progress += gap;
                let mut position = start.translated(along, progress + item_width / 2.0);
                progress += item_width;
                if matches!(object, PlacedObject::Exhibit(_)) {
                    // Exhibits hang flush against the wall face; nested
                    // rooms own their footprint from the wall line on.
                    position = position.translated(wall.inward_normal(), self.config.exhibit_inset);
                }
                placed_items.push(PlacedItem {
                    object,
                    position,
                    facing: wall.facing(),
                    wall,
                });
            }
        }

        let safety = safety_width(
            width,
            placed_items.iter().filter_map(|item| match &item.object {
                PlacedObject::Room(room) => Some(room.safety_width),
                PlacedObject::Exhibit(_) => None,
            }),
        );

        let placard = Placard {
            text: node.name.clone(),
            position: Point::new(0.0, -width)
                .translated(WallSide::Back.inward_normal(), self.config.exhibit_inset),
            facing: Facing::Deg0,
            mount_height: self.config.placard_height,
        };

        metrics.record_room(level, exhibit_count, sub_room_count, walls.len());

        Room {
            name: node.name.clone(),
            width,
            safety_width: safety,
            walls,
            doorways,
            placed_items,
            placard,
        }
    }
}

fn object_weight(object: &PlacedObject) -> f32 {
    match object {
        PlacedObject::Exhibit(exhibit) => exhibit.width,
        PlacedObject::Room(room) => room.safety_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LayoutConfig {
        LayoutConfig {
            door_width: 4.0,
            gap_width: 2.0,
            min_room_width: 5.0,
            exhibit_inset: 0.5,
            wall_height: 50.0,
            wall_thickness: 2.0,
            placard_height: 40.0,
        }
    }

    fn composer() -> Composer {
        Composer::new(test_config()).unwrap()
    }

    fn exhibit(handle: u64, width: f32) -> ExhibitRef {
        ExhibitRef::new(handle, width)
    }

    /// Offset of an item along its wall, with the inset component removed.
    fn offset_along_wall(item: &PlacedItem, width: f32) -> f32 {
        let start = item.wall.start(width);
        let along = item.wall.direction();
        (item.position.x - start.x) * along.x + (item.position.z - start.z) * along.z
    }

    #[test]
    fn empty_section_yields_a_minimal_room() {
        let room = composer().compose_at(&ContentNode::section("Notes"), 1);
        assert_eq!(room.width, 5.0);
        assert_eq!(room.safety_width, 5.0);
        assert_eq!(room.doorways.len(), 1);
        assert!(room.placed_items.is_empty());
    }

    #[test]
    fn empty_root_still_gets_entrance_and_exit() {
        let room = composer().compose(&ContentNode::section("Notes"));
        assert_eq!(room.doorways.len(), 2);
    }

    #[test]
    fn three_equal_exhibits_take_one_wall_each() {
        let node = ContentNode::section("Gallery")
            .with_exhibit(exhibit(0, 10.0))
            .with_exhibit(exhibit(1, 10.0))
            .with_exhibit(exhibit(2, 10.0));
        let room = composer().compose_at(&node, 1);

        assert_eq!(room.width, 14.0);
        for (item, wall) in room
            .placed_items
            .iter()
            .zip([WallSide::Left, WallSide::Back, WallSide::Right])
        {
            assert_eq!(item.wall, wall);
            assert_eq!(item.facing, wall.facing());
        }
    }

    #[test]
    fn items_are_centered_on_their_walls_and_inset() {
        let node = ContentNode::section("Gallery")
            .with_exhibit(exhibit(0, 10.0))
            .with_exhibit(exhibit(1, 10.0))
            .with_exhibit(exhibit(2, 10.0));
        let room = composer().compose_at(&node, 1);

        // width 14: each wall has one item centered at 2 + 5 = 7 along the
        // wall, pushed 0.5 off the wall face.
        assert_eq!(room.placed_items[0].position, Point::new(-6.5, -7.0));
        assert_eq!(room.placed_items[1].position, Point::new(0.0, -13.5));
        assert_eq!(room.placed_items[2].position, Point::new(6.5, -7.0));
    }

    #[test]
    fn lone_exhibit_lands_on_the_back_wall() {
        let node = ContentNode::section("Hero").with_exhibit(exhibit(0, 50.0));
        let room = composer().compose_at(&node, 1);

        assert_eq!(room.width, 54.0);
        assert_eq!(room.placed_items.len(), 1);
        let item = &room.placed_items[0];
        assert_eq!(item.wall, WallSide::Back);
        assert_eq!(item.position, Point::new(0.0, -53.5));
        assert_eq!(item.facing, Facing::Deg0);
    }

    #[test]
    fn nested_room_weighs_its_safety_width() {
        let child = ContentNode::section("Annex");
        let parent = ContentNode::section("Hall").with_child(child);
        let room = composer().compose_at(&parent, 1);

        // Child: empty room of the minimum width 5, safety 5. Parent back
        // wall carries it: 5 + 2 gaps of 2 = 9.
        assert_eq!(room.width, 9.0);
        assert_eq!(room.safety_width, room.width + 2.0 * 5.0);

        let placed = &room.placed_items[0];
        assert_eq!(placed.wall, WallSide::Back);
        // Rooms sit on the wall line, not inset.
        assert_eq!(placed.position, Point::new(0.0, -9.0));
        match &placed.object {
            PlacedObject::Room(sub) => {
                assert_eq!(sub.width, 5.0);
                assert_eq!(sub.doorways.len(), 1);
            }
            PlacedObject::Exhibit(_) => panic!("expected a nested room"),
        }
    }

    #[test]
    fn safety_width_grows_only_with_nested_rooms() {
        let leaf_only = ContentNode::section("Flat").with_exhibit(exhibit(0, 12.0));
        let flat = composer().compose_at(&leaf_only, 1);
        assert_eq!(flat.safety_width, flat.width);

        let nested = ContentNode::section("Deep")
            .with_exhibit(exhibit(1, 12.0))
            .with_child(ContentNode::section("Annex"));
        let deep = composer().compose_at(&nested, 1);
        assert!(deep.safety_width > deep.width);
    }

    #[test]
    fn wall_intervals_never_overlap() {
        let node = ContentNode::section("Crowded")
            .with_exhibit(exhibit(0, 7.0))
            .with_exhibit(exhibit(1, 3.0))
            .with_exhibit(exhibit(2, 12.0))
            .with_exhibit(exhibit(3, 5.0))
            .with_exhibit(exhibit(4, 9.0))
            .with_exhibit(exhibit(5, 2.0))
            .with_exhibit(exhibit(6, 11.0));
        let room = composer().compose_at(&node, 1);

        for wall in WallSide::CONTENT_WALLS {
            let mut spans: Vec<(f32, f32)> = room
                .items_on(wall)
                .map(|item| {
                    let center = offset_along_wall(item, room.width);
                    let half = object_weight(&item.object) / 2.0;
                    (center - half, center + half)
                })
                .collect();
            spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            for pair in spans.windows(2) {
                assert!(pair[0].1 <= pair[1].0);
            }
        }
    }

    #[test]
    fn composition_is_deterministic() {
        let node = ContentNode::section("Hall")
            .with_exhibit(exhibit(0, 8.0))
            .with_child(ContentNode::section("Annex").with_exhibit(exhibit(1, 6.0)))
            .with_exhibit(exhibit(2, 14.0));
        let composer = composer();
        assert_eq!(composer.compose(&node), composer.compose(&node));
    }

    #[test]
    fn placard_carries_the_section_name() {
        let room = composer().compose_at(&ContentNode::section("Marsupials"), 1);
        assert_eq!(room.placard.text, "Marsupials");
        assert_eq!(room.placard.facing, Facing::Deg0);
        assert_eq!(room.placard.position, Point::new(0.0, -4.5));
        assert_eq!(room.placard.mount_height, 40.0);
    }

    #[test]
    fn metrics_count_the_whole_pass() {
        let node = ContentNode::section("Hall")
            .with_exhibit(exhibit(0, 8.0))
            .with_child(ContentNode::section("Annex").with_exhibit(exhibit(1, 6.0)));
        let (_, metrics) = composer().compose_measured(&node);
        let snapshot = metrics.snapshot(std::time::Duration::from_millis(3));

        assert_eq!(snapshot.rooms, 2);
        assert_eq!(snapshot.exhibits_placed, 2);
        assert_eq!(snapshot.sub_rooms_placed, 1);
        assert_eq!(snapshot.max_depth, 2);
    }

    #[test]
    fn plan_survives_a_json_round_trip() {
        let node = ContentNode::section("Hall")
            .with_exhibit(exhibit(0, 8.0))
            .with_child(ContentNode::section("Annex"));
        let room = composer().compose(&node);
        let json = room.to_json().unwrap();
        let back: Room = serde_json::from_str(&json).unwrap();
        assert_eq!(back, room);
    }

    #[test]
    #[should_panic(expected = "non-positive width")]
    fn zero_width_exhibit_is_rejected_loudly() {
        let node = ContentNode::section("Broken").with_exhibit(exhibit(0, 0.0));
        composer().compose(&node);
    }

    #[test]
    fn config_validation_rejects_oversized_doors() {
        let config = LayoutConfig {
            door_width: 50.0,
            min_room_width: 30.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            Composer::new(config),
            Err(LayoutError::DoorTooWide { .. })
        ));
    }

    #[test]
    fn config_validation_rejects_non_positive_lengths() {
        let config = LayoutConfig {
            gap_width: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::NonPositiveConfig { field: "gap_width", .. })
        ));
    }
}
