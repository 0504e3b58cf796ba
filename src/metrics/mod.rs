use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated over one composition pass.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    rooms: u64,
    exhibits_placed: u64,
    sub_rooms_placed: u64,
    wall_segments: u64,
    max_depth: u32,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_room(
        &mut self,
        level: u32,
        exhibits: usize,
        sub_rooms: usize,
        wall_segments: usize,
    ) {
        self.rooms = self.rooms.saturating_add(1);
        self.exhibits_placed = self.exhibits_placed.saturating_add(exhibits as u64);
        self.sub_rooms_placed = self.sub_rooms_placed.saturating_add(sub_rooms as u64);
        self.wall_segments = self.wall_segments.saturating_add(wall_segments as u64);
        self.max_depth = self.max_depth.max(level.saturating_add(1));
    }

    pub fn snapshot(&self, elapsed: Duration) -> MetricSnapshot {
        MetricSnapshot {
            elapsed_ms: elapsed.as_millis() as u64,
            rooms: self.rooms,
            exhibits_placed: self.exhibits_placed,
            sub_rooms_placed: self.sub_rooms_placed,
            wall_segments: self.wall_segments,
            max_depth: self.max_depth,
        }
    }
}

/// Frozen view of a pass, ready for reporting.
#[derive(Debug, Clone)]
pub struct MetricSnapshot {
    pub elapsed_ms: u64,
    pub rooms: u64,
    pub exhibits_placed: u64,
    pub sub_rooms_placed: u64,
    pub wall_segments: u64,
    pub max_depth: u32,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "layout_pass".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("elapsed_ms".to_string(), json!(self.elapsed_ms));
        map.insert("rooms".to_string(), json!(self.rooms));
        map.insert("exhibits_placed".to_string(), json!(self.exhibits_placed));
        map.insert("sub_rooms_placed".to_string(), json!(self.sub_rooms_placed));
        map.insert("wall_segments".to_string(), json!(self.wall_segments));
        map.insert("max_depth".to_string(), json!(self.max_depth));
        map
    }
}
