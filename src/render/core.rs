use std::io::Write;

use crate::error::Result;
use crate::geometry::Point;
use crate::layout::{PlacedObject, Room, WallSegment};

/// Sketch tuning knobs.
#[derive(Debug, Clone)]
pub struct SketchSettings {
    /// World units per character cell.
    pub units_per_cell: f32,
}

impl Default for SketchSettings {
    fn default() -> Self {
        Self { units_per_cell: 5.0 }
    }
}

/// Draws a composed room's floor plan as ASCII for quick inspection.
///
/// `#` marks wall, `.` marks a doorway gap, `o` an exhibit, `@` the
/// entrance of a nested room. One room at a time; nested rooms extend
/// beyond their parent's wall and are sketched separately.
pub struct SketchRenderer {
    settings: SketchSettings,
}

impl SketchRenderer {
    pub fn new(settings: SketchSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(SketchSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut SketchSettings {
        &mut self.settings
    }

    pub fn sketch(&self, room: &Room, writer: &mut impl Write) -> Result<()> {
        writer.write_all(self.sketch_to_string(room).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn sketch_to_string(&self, room: &Room) -> String {
        let unit = self.settings.units_per_cell;
        assert!(unit > 0.0, "units_per_cell must be positive, got {unit}");

        let cells = (room.width / unit).round() as usize + 1;
        let mut grid = vec![vec![' '; cells]; cells];

        for wall in &room.walls {
            self.draw_segment(&mut grid, room.width, wall);
        }

        for doorway in &room.doorways {
            // Walk the gap crosswise and mark whatever the walls left open.
            let along = doorway.side.direction();
            let steps = (doorway.width / unit).ceil() as usize;
            for i in 0..=steps {
                let distance = doorway.width * i as f32 / steps.max(1) as f32 - doorway.width / 2.0;
                let (row, col) = self.cell(room.width, doorway.center.translated(along, distance), cells);
                if grid[row][col] == ' ' {
                    grid[row][col] = '.';
                }
            }
        }

        for item in &room.placed_items {
            let marker = match item.object {
                PlacedObject::Exhibit(_) => 'o',
                PlacedObject::Room(_) => '@',
            };
            let (row, col) = self.cell(room.width, item.position, cells);
            grid[row][col] = marker;
        }

        let mut out = String::with_capacity(cells * (cells + 1));
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }

    fn draw_segment(&self, grid: &mut [Vec<char>], room_width: f32, wall: &WallSegment) {
        let steps = (wall.length() / self.settings.units_per_cell).ceil() as usize;
        for i in 0..=steps {
            let t = i as f32 / steps.max(1) as f32;
            let point = Point::new(
                wall.from.x + (wall.to.x - wall.from.x) * t,
                wall.from.z + (wall.to.z - wall.from.z) * t,
            );
            let (row, col) = self.cell(room_width, point, grid.len());
            grid[row][col] = '#';
        }
    }

    /// Map a local point to a grid cell; row 0 is the entrance wall.
    fn cell(&self, room_width: f32, point: Point, cells: usize) -> (usize, usize) {
        let unit = self.settings.units_per_cell;
        let limit = (cells - 1) as f32;
        let col = ((point.x + room_width / 2.0) / unit).round().clamp(0.0, limit) as usize;
        let row = ((-point.z) / unit).round().clamp(0.0, limit) as usize;
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentNode, ExhibitRef};
    use crate::layout::Composer;

    fn sketch(room: &Room) -> String {
        SketchRenderer::with_default().sketch_to_string(room)
    }

    #[test]
    fn empty_room_sketch_shows_walls_and_entrance_gap() {
        let room = Composer::with_default().compose_at(&ContentNode::section("Notes"), 1);
        let text = sketch(&room);
        let rows: Vec<&str> = text.lines().collect();

        // Width 30 at 5 units per cell: a 7x7 grid.
        assert_eq!(rows.len(), 7);
        let entrance = rows[0];
        assert!(entrance.starts_with('#'));
        assert!(entrance.ends_with('#'));
        assert!(entrance.contains('.'));
        // Back wall of a nested room is solid.
        assert!(!rows[6].contains('.'));
    }

    #[test]
    fn root_sketch_opens_both_ends() {
        let room = Composer::with_default().compose(&ContentNode::section("Notes"));
        let rows_text = sketch(&room);
        let rows: Vec<&str> = rows_text.lines().collect();
        assert!(rows[0].contains('.'));
        assert!(rows[rows.len() - 1].contains('.'));
    }

    #[test]
    fn markers_distinguish_exhibits_from_sub_rooms() {
        let node = ContentNode::section("Hall")
            .with_exhibit(ExhibitRef::new(0, 25.0))
            .with_exhibit(ExhibitRef::new(1, 25.0))
            .with_child(ContentNode::section("Annex"));
        let room = Composer::with_default().compose(&node);
        let text = sketch(&room);

        assert_eq!(text.matches('o').count(), 2);
        assert_eq!(text.matches('@').count(), 1);
    }

    #[test]
    fn sketch_writes_through_any_writer() {
        let room = Composer::with_default().compose(&ContentNode::section("Notes"));
        let mut out = Vec::new();
        SketchRenderer::with_default().sketch(&room, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), sketch(&room));
    }
}
