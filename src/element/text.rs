use egui::{Color32, Pos2};

use super::{Element, ElementId};
use crate::element::common::{self, Placement};
use crate::renderer::Surface;

/// Single-line text overlay placed with the text tool
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    id: ElementId,
    content: String,
    font_size: f32,
    color: Color32,
    placement: Placement,
}

impl Text {
    pub(crate) fn new(id: ElementId, content: String, font_size: f32, color: Color32, position: Pos2) -> Self {
        // The box is an estimate; egui only knows real glyph extents at paint time
        let size = common::estimate_text_size(&content, font_size);
        Self {
            id,
            content,
            font_size,
            color,
            placement: Placement::new(position, size),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }
}

impl Element for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_text(&self.content, self.rect(), self.font_size, self.color, self.rotation());
    }
}
