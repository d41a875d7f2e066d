use std::sync::Arc;

use egui::{ColorImage, Pos2, Vec2};

use super::{Element, ElementId};
use crate::element::common::Placement;
use crate::renderer::Surface;

/// Image overlay backed by a decoded bitmap
#[derive(Clone)]
pub struct Image {
    id: ElementId,
    name: String,
    pixels: Arc<ColorImage>,
    placement: Placement,
}

// ColorImage's Debug would dump every pixel
impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("pixel_size", &self.pixels.size)
            .field("placement", &self.placement)
            .finish()
    }
}

impl Image {
    pub(crate) fn new(id: ElementId, name: String, pixels: Arc<ColorImage>, position: Pos2, size: Vec2) -> Self {
        Self {
            id,
            name,
            pixels,
            placement: Placement::new(position, size),
        }
    }

    /// File name the bitmap was decoded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decoded bitmap
    pub fn pixels(&self) -> &Arc<ColorImage> {
        &self.pixels
    }

    /// Pixel dimensions of the source bitmap, independent of the displayed size
    pub fn pixel_size(&self) -> [usize; 2] {
        self.pixels.size
    }
}

impl Element for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "image"
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn placement_mut(&mut self) -> &mut Placement {
        &mut self.placement
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.draw_image(self.id, &self.pixels, self.rect(), self.rotation());
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.placement == other.placement
    }
}
