use std::sync::Arc;

use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{Color32, ColorImage, Context, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, TextureHandle, TextureOptions};

use crate::element::ElementId;
use crate::geometry::rotated_corners;
use crate::gizmo::TransformGizmo;
use crate::overlay::OverlayModel;
use crate::raster::RasterSurface;
use crate::texture_manager::TextureManager;

const FULL_UV: Rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
const MAX_CACHED_TEXTURES: usize = 64;

/// Drawing primitives the overlay layer is rendered with.
///
/// Coordinates are canvas-space; rotations are degrees about the given
/// rectangle's center.
pub trait Surface {
    /// Clear a region of the overlay layer
    fn clear(&mut self, rect: Rect);

    fn draw_image(&mut self, id: ElementId, image: &Arc<ColorImage>, rect: Rect, rotation: f32);

    fn draw_text(&mut self, text: &str, rect: Rect, font_size: f32, color: Color32, rotation: f32);

    fn stroke_rotated_rect(&mut self, rect: Rect, rotation: f32, stroke: Stroke);

    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: Stroke);
}

/// `Surface` over an egui painter whose canvas origin sits at `origin` on screen
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    ctx: &'a Context,
    origin: Pos2,
    textures: &'a mut TextureManager,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, ctx: &'a Context, origin: Pos2, textures: &'a mut TextureManager) -> Self {
        Self {
            painter,
            ctx,
            origin,
            textures,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.origin.to_vec2()
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        rect.translate(self.origin.to_vec2())
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, _rect: Rect) {
        // Each egui frame starts from an empty layer, there is nothing to erase
    }

    fn draw_image(&mut self, id: ElementId, image: &Arc<ColorImage>, rect: Rect, rotation: f32) {
        let screen_rect = self.rect_to_screen(rect);
        let texture = self
            .textures
            .get_or_create_texture(id, || Ok(ColorImage::clone(image)), self.ctx);

        match texture {
            Ok(texture_id) => {
                // Translate to center, rotate, draw centered
                let mut mesh = Mesh::with_texture(texture_id);
                mesh.add_rect_with_uv(screen_rect, FULL_UV, Color32::WHITE);
                mesh.rotate(Rot2::from_angle(rotation.to_radians()), screen_rect.center());
                self.painter.add(Shape::mesh(mesh));
            }
            Err(err) => {
                log::warn!("No texture for image {}: {}", id, err);
                let corners = rotated_corners(rect, rotation).map(|p| self.to_screen(p));
                self.painter.add(Shape::convex_polygon(
                    corners.to_vec(),
                    Color32::from_gray(200),
                    Stroke::new(1.0, Color32::from_gray(100)),
                ));
            }
        }
    }

    fn draw_text(&mut self, text: &str, rect: Rect, font_size: f32, color: Color32, rotation: f32) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), FontId::proportional(font_size), color);
        let rot = Rot2::from_angle(rotation.to_radians());
        // TextShape rotates about its top-left corner, so place that corner
        // where the rotated galley stays centered on the element
        let center = self.to_screen(rect.center());
        let top_left = center + rot * (-0.5 * galley.size());
        self.painter
            .add(TextShape::new(top_left, galley, color).with_angle(rotation.to_radians()));
    }

    fn stroke_rotated_rect(&mut self, rect: Rect, rotation: f32, stroke: Stroke) {
        let corners = rotated_corners(rect, rotation).map(|p| self.to_screen(p));
        self.painter.add(Shape::closed_line(corners.to_vec(), stroke));
    }

    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter.circle_filled(self.to_screen(center), radius, color);
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, stroke: Stroke) {
        self.painter.circle_stroke(self.to_screen(center), radius, stroke);
    }
}

/// Composes one frame of the canvas: background, raster strokes, overlay
/// elements back-to-front and the selection gizmo on top
pub struct Renderer {
    textures: TextureManager,
    raster_texture: Option<TextureHandle>,
    uploaded_raster_version: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("textures", &self.textures)
            .field("uploaded_raster_version", &self.uploaded_raster_version)
            .finish_non_exhaustive()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            textures: TextureManager::new(MAX_CACHED_TEXTURES),
            raster_texture: None,
            uploaded_raster_version: None,
        }
    }

    pub fn render(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        canvas_rect: Rect,
        raster: &RasterSurface,
        overlay: &OverlayModel,
        gizmo: Option<TransformGizmo>,
    ) {
        let painter = painter.with_clip_rect(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);

        self.upload_raster(ctx, raster);
        if let Some(texture) = &self.raster_texture {
            painter.image(texture.id(), canvas_rect, FULL_UV, Color32::WHITE);
        }

        self.textures.begin_frame();
        self.textures.retain_elements(|id| overlay.index_of(id).is_some());
        self.textures.reserve(overlay.len());

        let mut surface = PainterSurface::new(&painter, ctx, canvas_rect.min, &mut self.textures);
        overlay.render(&mut surface);
        if let Some(gizmo) = gizmo {
            gizmo.draw(&mut surface);
        }

        painter.rect_stroke(canvas_rect, 0.0, Stroke::new(1.0, Color32::GRAY));
    }

    /// Re-upload the raster layers only when their pixels changed
    fn upload_raster(&mut self, ctx: &Context, raster: &RasterSurface) {
        if self.uploaded_raster_version == Some(raster.version()) {
            return;
        }

        let image = raster.composite();
        match &mut self.raster_texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.raster_texture = Some(ctx.load_texture("raster_surface", image, TextureOptions::NEAREST));
            }
        }
        self.uploaded_raster_version = Some(raster.version());
    }
}
