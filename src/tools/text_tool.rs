use egui::{Color32, CursorIcon, Pos2};

use crate::command::Command;
use crate::element::common::{clamp_position, estimate_text_size};
use crate::element::factory;
use crate::overlay::OverlayModel;
use crate::tools::{PointerState, Tool};

/// Places a text element wherever the canvas is clicked, nudged back inside
/// the canvas when it would overflow an edge
#[derive(Debug, Clone)]
pub struct TextTool {
    content: String,
    font_size: f32,
    color: Color32,
}

impl TextTool {
    pub fn new(content: String, font_size: f32, color: Color32) -> Self {
        Self {
            content,
            font_size,
            color,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn deactivate(&mut self) -> Option<Command> {
        None
    }

    fn on_pointer_down(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command> {
        if self.content.is_empty() {
            return None;
        }
        let size = estimate_text_size(&self.content, self.font_size);
        let position = clamp_position(pointer.position, size, overlay.canvas_size());
        let element = factory::create_text(self.content.clone(), self.font_size, self.color, position);
        Some(Command::AddElement(element))
    }

    fn on_pointer_move(&mut self, _pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        None
    }

    fn on_pointer_up(&mut self, _pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        None
    }

    fn cursor_icon(&self, _hover: Pos2, _overlay: &OverlayModel) -> CursorIcon {
        CursorIcon::Text
    }
}
