use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opaque handle to a renderer-owned exhibit (a text panel or a picture).
///
/// The layout engine reads nothing but the resolved width; the handle rides
/// through placement untouched so the renderer can find its object again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExhibitRef {
    pub handle: u64,
    /// Mounted width in world units, resolved before layout runs.
    pub width: f32,
}

impl ExhibitRef {
    pub const fn new(handle: u64, width: f32) -> Self {
        Self { handle, width }
    }
}

/// One section of the source document: its own exhibits plus nested
/// subsections, both in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub name: String,
    pub exhibits: Vec<ExhibitRef>,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn section(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exhibits: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_exhibit(mut self, exhibit: ExhibitRef) -> Self {
        self.exhibits.push(exhibit);
        self
    }

    pub fn with_child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of sections in this subtree, this one included.
    pub fn section_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ContentNode::section_count)
            .sum::<usize>()
    }

    /// Load a content tree the document layer serialized as JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
