use egui::{Pos2, Rect};

use crate::element::ElementId;
use crate::tools::ToolKind;

/// How an element was transformed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementChange {
    Moved(Pos2),
    Resized(Rect),
    Rotated(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    ElementAdded {
        id: ElementId,
        kind: &'static str,
    },
    ElementRemoved {
        id: ElementId,
    },
    ElementChanged {
        id: ElementId,
        change: ElementChange,
    },
    SelectionChanged {
        old: Option<ElementId>,
        new: Option<ElementId>,
    },
    /// Pixels of the raster surface changed
    RasterChanged,
    ImageDecodeFailed {
        name: String,
        reason: String,
    },
}

impl CanvasEvent {
    /// Whether the event changes what is on screen
    pub fn needs_repaint(&self) -> bool {
        !matches!(self, CanvasEvent::ImageDecodeFailed { .. })
    }
}
