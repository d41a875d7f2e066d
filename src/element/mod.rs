use std::fmt;
use std::sync::Arc;

use egui::{Color32, ColorImage, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod common;
pub(crate) mod image;
pub(crate) mod text;

pub use common::Placement;
pub use image::Image;
pub use text::Text;

use crate::geometry::hit_testing;
use crate::renderer::Surface;

/// Stable identity of an overlay element, assigned once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The first block is enough to tell elements apart in logs
        let s = self.0.simple().to_string();
        write!(f, "{}", &s[..8])
    }
}

/// Common trait that all overlay elements implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    fn placement(&self) -> &Placement;

    fn placement_mut(&mut self) -> &mut Placement;

    /// Draw the element onto the surface, rotated about its own center
    fn draw(&self, surface: &mut dyn Surface);

    fn position(&self) -> Pos2 {
        self.placement().position()
    }

    fn size(&self) -> Vec2 {
        self.placement().size()
    }

    /// Unrotated bounding rectangle in canvas space
    fn rect(&self) -> Rect {
        self.placement().rect()
    }

    /// Rotation in degrees, always within `[0, 360)`
    fn rotation(&self) -> f32 {
        self.placement().rotation()
    }

    /// Test if the rotated element contains the given canvas position
    fn hit_test(&self, pos: Pos2) -> bool {
        hit_testing::point_in_rotated_rect(pos, self.rect(), self.rotation())
    }
}

/// Enumeration of all overlay element kinds
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Image(Image),
    Text(Text),
}

impl ElementType {
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            ElementType::Image(image) => Some(image),
            ElementType::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ElementType::Text(text) => Some(text),
            ElementType::Image(_) => None,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Image(i) => i.id(),
            ElementType::Text(t) => t.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Image(i) => i.element_type(),
            ElementType::Text(t) => t.element_type(),
        }
    }

    fn placement(&self) -> &Placement {
        match self {
            ElementType::Image(i) => i.placement(),
            ElementType::Text(t) => t.placement(),
        }
    }

    fn placement_mut(&mut self) -> &mut Placement {
        match self {
            ElementType::Image(i) => i.placement_mut(),
            ElementType::Text(t) => t.placement_mut(),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            ElementType::Image(i) => i.draw(surface),
            ElementType::Text(t) => t.draw(surface),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Create a new image element with a fresh id
    pub fn create_image(name: impl Into<String>, pixels: Arc<ColorImage>, position: Pos2, size: Vec2) -> ElementType {
        ElementType::Image(Image::new(ElementId::new(), name.into(), pixels, position, size))
    }

    /// Create a new text element with a fresh id
    pub fn create_text(content: impl Into<String>, font_size: f32, color: Color32, position: Pos2) -> ElementType {
        ElementType::Text(Text::new(ElementId::new(), content.into(), font_size, color, position))
    }
}
