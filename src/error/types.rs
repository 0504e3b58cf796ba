use thiserror::Error;

/// Unified result type for the museum layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced at the crate rim.
///
/// Composition over a well-formed content tree cannot fail; a non-positive
/// exhibit width is a broken caller contract and panics instead of being
/// threaded through every signature.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("configuration field `{field}` must be positive, got {value}")]
    NonPositiveConfig { field: &'static str, value: f32 },
    #[error("door width {door} does not fit the minimum room width {min}")]
    DoorTooWide { door: f32, min: f32 },
    #[error("plan serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
