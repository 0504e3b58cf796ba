//! Room sizing: wall-group lengths, the max-rule interior width, and the
//! clearance width a parent reserves for a nested room.

/// Wall run required by one group: every item plus a gap before the first,
/// between each pair, and after the last.
pub fn wall_length(weights: &[f32], gap_width: f32) -> f32 {
    let items: f32 = weights.iter().sum();
    items + (weights.len() + 1) as f32 * gap_width
}

/// Interior width of a square room whose three walls carry the given group
/// lengths.
///
/// Taking the maximum guarantees every group physically fits its wall; the
/// shorter walls center their contents in the surplus. The floor cell is a
/// square, so a parent can treat this room as a single scalar-width item.
pub fn room_width(group_lengths: [f32; 3], min_room_width: f32) -> f32 {
    group_lengths
        .into_iter()
        .fold(min_room_width, f32::max)
}

/// Clearance width a parent must reserve for this room.
///
/// Nested rooms push the margin out by the largest child clearance on both
/// sides, so a sibling on the parent wall can never sit flush against a
/// child room's doorway cutout. A leaf-only room needs no extra clearance.
pub fn safety_width(width: f32, child_safety_widths: impl IntoIterator<Item = f32>) -> f32 {
    let largest = child_safety_widths.into_iter().fold(0.0f32, f32::max);
    if largest > 0.0 {
        width + 2.0 * largest
    } else {
        width
    }
}
