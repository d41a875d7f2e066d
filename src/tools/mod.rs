use egui::{CursorIcon, Modifiers, Pos2};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::overlay::OverlayModel;
use crate::stroke::ShapeKind;

mod draw_stroke_tool;
mod selection_tool;
mod shape_tool;
mod text_tool;

pub use draw_stroke_tool::{DrawStrokeTool, StrokeMode};
pub use selection_tool::{SelectionState, SelectionTool};
pub use shape_tool::ShapeTool;
pub use text_tool::TextTool;

/// Pointer position in canvas coordinates plus the keyboard modifiers held
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Pos2,
    pub modifiers: Modifiers,
}

impl PointerState {
    pub fn new(position: Pos2) -> Self {
        Self {
            position,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(position: Pos2, modifiers: Modifiers) -> Self {
        Self { position, modifiers }
    }
}

/// Tool trait defines the interface for all canvas tools.
///
/// Tools never mutate the canvas themselves: each pointer event produces at
/// most one [`Command`], which the caller executes.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Called when the tool is selected
    fn activate(&mut self) {}

    /// Called when another tool is selected; returns a command finishing any
    /// gesture still in progress
    fn deactivate(&mut self) -> Option<Command>;

    fn on_pointer_down(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command>;

    fn on_pointer_move(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command>;

    fn on_pointer_up(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command>;

    /// The pointer left the canvas while the tool was active
    fn on_pointer_leave(&mut self, _overlay: &OverlayModel) -> Option<Command> {
        None
    }

    /// Cursor to show while hovering `hover` on the canvas
    fn cursor_icon(&self, _hover: Pos2, _overlay: &OverlayModel) -> CursorIcon {
        CursorIcon::Crosshair
    }
}

/// The tools a user can pick, without their per-gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Pencil,
    Eraser,
    Rectangle,
    Circle,
    Line,
    Text,
    Select,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Line,
        ToolKind::Text,
        ToolKind::Select,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
            ToolKind::Line => "Line",
            ToolKind::Text => "Text",
            ToolKind::Select => "Select",
        }
    }
}

/// Enum dispatch over every tool implementation
#[derive(Debug, Clone)]
pub enum ToolType {
    DrawStroke(DrawStrokeTool),
    Shape(ShapeTool),
    Text(TextTool),
    Selection(SelectionTool),
}

impl ToolType {
    /// Build a fresh tool of the given kind, configured from `config`
    pub fn new(kind: ToolKind, config: &CanvasConfig) -> Self {
        match kind {
            ToolKind::Pencil => Self::DrawStroke(DrawStrokeTool::new(StrokeMode::Pencil)),
            ToolKind::Eraser => Self::DrawStroke(DrawStrokeTool::new(StrokeMode::Eraser)),
            ToolKind::Rectangle => Self::Shape(ShapeTool::new(ShapeKind::Rectangle)),
            ToolKind::Circle => Self::Shape(ShapeTool::new(ShapeKind::Circle)),
            ToolKind::Line => Self::Shape(ShapeTool::new(ShapeKind::Line)),
            ToolKind::Text => Self::Text(TextTool::new(
                config.default_text.clone(),
                config.font_size,
                config.text_color(),
            )),
            ToolKind::Select => Self::Selection(SelectionTool::new(config.handle_radius)),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::DrawStroke(tool) => match tool.mode() {
                StrokeMode::Pencil => ToolKind::Pencil,
                StrokeMode::Eraser => ToolKind::Eraser,
            },
            Self::Shape(tool) => match tool.shape() {
                ShapeKind::Rectangle => ToolKind::Rectangle,
                ShapeKind::Circle => ToolKind::Circle,
                ShapeKind::Line => ToolKind::Line,
            },
            Self::Text(_) => ToolKind::Text,
            Self::Selection(_) => ToolKind::Select,
        }
    }

    pub fn as_selection_tool(&self) -> Option<&SelectionTool> {
        match self {
            Self::Selection(tool) => Some(tool),
            _ => None,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::DrawStroke(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
            Self::Text(tool) => tool.name(),
            Self::Selection(tool) => tool.name(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::DrawStroke(tool) => tool.activate(),
            Self::Shape(tool) => tool.activate(),
            Self::Text(tool) => tool.activate(),
            Self::Selection(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.deactivate(),
            Self::Shape(tool) => tool.deactivate(),
            Self::Text(tool) => tool.deactivate(),
            Self::Selection(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_down(pointer, overlay),
            Self::Shape(tool) => tool.on_pointer_down(pointer, overlay),
            Self::Text(tool) => tool.on_pointer_down(pointer, overlay),
            Self::Selection(tool) => tool.on_pointer_down(pointer, overlay),
        }
    }

    fn on_pointer_move(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_move(pointer, overlay),
            Self::Shape(tool) => tool.on_pointer_move(pointer, overlay),
            Self::Text(tool) => tool.on_pointer_move(pointer, overlay),
            Self::Selection(tool) => tool.on_pointer_move(pointer, overlay),
        }
    }

    fn on_pointer_up(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_up(pointer, overlay),
            Self::Shape(tool) => tool.on_pointer_up(pointer, overlay),
            Self::Text(tool) => tool.on_pointer_up(pointer, overlay),
            Self::Selection(tool) => tool.on_pointer_up(pointer, overlay),
        }
    }

    fn on_pointer_leave(&mut self, overlay: &OverlayModel) -> Option<Command> {
        match self {
            Self::DrawStroke(tool) => tool.on_pointer_leave(overlay),
            Self::Shape(tool) => tool.on_pointer_leave(overlay),
            Self::Text(tool) => tool.on_pointer_leave(overlay),
            Self::Selection(tool) => tool.on_pointer_leave(overlay),
        }
    }

    fn cursor_icon(&self, hover: Pos2, overlay: &OverlayModel) -> CursorIcon {
        match self {
            Self::DrawStroke(tool) => tool.cursor_icon(hover, overlay),
            Self::Shape(tool) => tool.cursor_icon(hover, overlay),
            Self::Text(tool) => tool.cursor_icon(hover, overlay),
            Self::Selection(tool) => tool.cursor_icon(hover, overlay),
        }
    }
}
