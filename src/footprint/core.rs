use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::content::{ContentNode, ExhibitRef};

/// Unmeasured description of a leaf exhibit, as the document layer hands
/// it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExhibitSpec {
    /// A paragraph of body text destined for a wall panel.
    Text { text: String },
    /// A picture with known pixel dimensions.
    Picture { px_width: u32, px_height: u32 },
}

/// An unmeasured document section: raw exhibit descriptions plus nested
/// subsections, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub exhibits: Vec<ExhibitSpec>,
    pub children: Vec<SectionSpec>,
}

impl SectionSpec {
    pub fn section(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exhibits: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.exhibits.push(ExhibitSpec::Text { text: text.into() });
        self
    }

    pub fn with_picture(mut self, px_width: u32, px_height: u32) -> Self {
        self.exhibits.push(ExhibitSpec::Picture {
            px_width,
            px_height,
        });
        self
    }

    pub fn with_child(mut self, child: SectionSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// Resolves the mounted width of an exhibit before layout runs.
///
/// Implementations must be synchronous: by the time a content tree reaches
/// the composer, every width is a plain positive number. Asynchronous
/// concerns (texture loading, font metrics) settle behind this boundary.
pub trait FootprintProvider {
    fn measure(&self, spec: &ExhibitSpec) -> f32;
}

/// Default measurement rules.
///
/// Pictures keep their aspect ratio at a fixed mounted height; text panels
/// take a fixed panel width, narrowed when the text is shorter than one
/// panel line.
#[derive(Debug, Clone)]
pub struct StandardFootprint {
    /// Mounted height of pictures in world units.
    pub picture_height: f32,
    /// Width of a full text panel in world units.
    pub panel_width: f32,
    /// World units per text column.
    pub units_per_column: f32,
}

impl Default for StandardFootprint {
    fn default() -> Self {
        Self {
            picture_height: 30.0,
            panel_width: 20.0,
            units_per_column: 0.4,
        }
    }
}

impl FootprintProvider for StandardFootprint {
    fn measure(&self, spec: &ExhibitSpec) -> f32 {
        match spec {
            ExhibitSpec::Picture {
                px_width,
                px_height,
            } => {
                let ratio = *px_width as f32 / (*px_height).max(1) as f32;
                self.picture_height * ratio
            }
            ExhibitSpec::Text { text } => {
                let columns = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
                (columns as f32 * self.units_per_column)
                    .clamp(self.units_per_column, self.panel_width)
            }
        }
    }
}

/// Resolve a spec tree into a measured content tree, assigning exhibit
/// handles depth-first in document order.
pub fn measure_tree(provider: &dyn FootprintProvider, root: &SectionSpec) -> ContentNode {
    let mut next_handle = 0u64;
    measure_section(provider, root, &mut next_handle)
}

fn measure_section(
    provider: &dyn FootprintProvider,
    spec: &SectionSpec,
    next_handle: &mut u64,
) -> ContentNode {
    let exhibits = spec
        .exhibits
        .iter()
        .map(|exhibit| {
            let handle = *next_handle;
            *next_handle += 1;
            ExhibitRef::new(handle, provider.measure(exhibit))
        })
        .collect();
    let children = spec
        .children
        .iter()
        .map(|child| measure_section(provider, child, next_handle))
        .collect();
    ContentNode {
        name: spec.name.clone(),
        exhibits,
        children,
    }
}
