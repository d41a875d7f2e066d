use egui::{Color32, ColorImage, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::element::common::distance_to_line_segment;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Which of the two pixel layers an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterLayer {
    /// Persistent strokes and committed shapes
    Base,
    /// In-progress shape, redrawn on every pointer move
    Preview,
}

/// Persistent pixel buffer that pencil, eraser and shape tools draw into.
///
/// The preview layer is composited over the base layer for display, so a
/// shape being dragged never disturbs strokes that are already on the canvas.
#[derive(Clone)]
pub struct RasterSurface {
    base: RgbaImage,
    preview: RgbaImage,
    version: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.base.width())
            .field("height", &self.base.height())
            .field("version", &self.version)
            .finish()
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            base: RgbaImage::new(width, height),
            preview: RgbaImage::new(width, height),
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    /// Bumped by every mutation, used to skip redundant texture uploads
    pub fn version(&self) -> u64 {
        self.version
    }

    fn layer(&self, layer: RasterLayer) -> &RgbaImage {
        match layer {
            RasterLayer::Base => &self.base,
            RasterLayer::Preview => &self.preview,
        }
    }

    fn layer_mut(&mut self, layer: RasterLayer) -> &mut RgbaImage {
        self.version += 1;
        match layer {
            RasterLayer::Base => &mut self.base,
            RasterLayer::Preview => &mut self.preview,
        }
    }

    /// Color of one pixel of a layer, or `None` outside the surface
    pub fn pixel(&self, layer: RasterLayer, x: u32, y: u32) -> Option<Color32> {
        let image = self.layer(layer);
        if x >= image.width() || y >= image.height() {
            return None;
        }
        let [r, g, b, a] = image.get_pixel(x, y).0;
        Some(Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Number of non-transparent pixels in a layer
    pub fn painted_pixels(&self, layer: RasterLayer) -> usize {
        self.layer(layer).pixels().filter(|p| p.0[3] > 0).count()
    }

    /// Clear both layers
    pub fn clear(&mut self) {
        self.clear_layer(RasterLayer::Base);
        self.clear_layer(RasterLayer::Preview);
    }

    pub fn clear_layer(&mut self, layer: RasterLayer) {
        let image = self.layer_mut(layer);
        for pixel in image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Make every pixel whose center falls inside `rect` transparent
    pub fn clear_rect(&mut self, layer: RasterLayer, rect: Rect) {
        let image = self.layer_mut(layer);
        for_each_pixel_in(image, rect, |image, x, y, center| {
            if center.x < rect.max.x && center.y < rect.max.y && center.x >= rect.min.x && center.y >= rect.min.y {
                image.put_pixel(x, y, TRANSPARENT);
            }
        });
    }

    /// Draw a round-capped segment of the given width
    pub fn stroke_segment(&mut self, layer: RasterLayer, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = width / 2.0;
        let bounds = Rect::from_two_pos(from, to).expand(radius);
        let rgba = Rgba(color.to_srgba_unmultiplied());
        let image = self.layer_mut(layer);
        for_each_pixel_in(image, bounds, |image, x, y, center| {
            if distance_to_line_segment(center, from, to) <= radius {
                image.put_pixel(x, y, rgba);
            }
        });
    }

    /// Draw the outline of an axis-aligned rectangle
    pub fn stroke_rect(&mut self, layer: RasterLayer, rect: Rect, width: f32, color: Color32) {
        let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
        for i in 0..corners.len() {
            self.stroke_segment(layer, corners[i], corners[(i + 1) % corners.len()], width, color);
        }
    }

    /// Draw the outline of a circle
    pub fn stroke_circle(&mut self, layer: RasterLayer, center: Pos2, radius: f32, width: f32, color: Color32) {
        let half_width = width / 2.0;
        let bounds = Rect::from_center_size(center, Vec2::splat(2.0 * (radius + half_width)));
        let rgba = Rgba(color.to_srgba_unmultiplied());
        let image = self.layer_mut(layer);
        for_each_pixel_in(image, bounds, |image, x, y, pixel_center| {
            if (pixel_center.distance(center) - radius).abs() <= half_width {
                image.put_pixel(x, y, rgba);
            }
        });
    }

    /// Blend the preview layer into the base layer and clear the preview
    pub fn commit_preview(&mut self) {
        let (width, height) = (self.width(), self.height());
        let preview = std::mem::replace(&mut self.preview, RgbaImage::new(width, height));
        let base = self.layer_mut(RasterLayer::Base);
        for (dst, src) in base.pixels_mut().zip(preview.pixels()) {
            *dst = blend_over(*src, *dst);
        }
    }

    /// Base layer with the preview layer composited on top, ready for upload
    pub fn composite(&self) -> ColorImage {
        let mut rgba: Vec<u8> = Vec::with_capacity(self.base.as_raw().len());
        for (base, preview) in self.base.pixels().zip(self.preview.pixels()) {
            rgba.extend_from_slice(&blend_over(*preview, *base).0);
        }
        ColorImage::from_rgba_unmultiplied([self.width() as usize, self.height() as usize], &rgba)
    }
}

/// Visit every pixel whose cell overlaps `bounds`, passing its center point
fn for_each_pixel_in(image: &mut RgbaImage, bounds: Rect, mut f: impl FnMut(&mut RgbaImage, u32, u32, Pos2)) {
    if image.width() == 0 || image.height() == 0 || !bounds.is_finite() {
        return;
    }
    let max_x = image.width() as f32;
    let max_y = image.height() as f32;
    let x0 = bounds.min.x.floor().clamp(0.0, max_x) as u32;
    let y0 = bounds.min.y.floor().clamp(0.0, max_y) as u32;
    let x1 = bounds.max.x.ceil().clamp(0.0, max_x) as u32;
    let y1 = bounds.max.y.ceil().clamp(0.0, max_y) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            f(image, x, y, center);
        }
    }
}

/// Porter-Duff "source over" on unmultiplied RGBA
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3] as f32 / 255.0;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = src.0[c] as f32;
        let d = dst.0[c] as f32;
        out[c] = ((s * sa + d * da * (1.0 - sa)) / out_a).round() as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = RasterSurface::new(20, 10);
        assert_eq!(surface.painted_pixels(RasterLayer::Base), 0);
        assert_eq!(surface.pixel(RasterLayer::Base, 19, 9), Some(Color32::TRANSPARENT));
        assert_eq!(surface.pixel(RasterLayer::Base, 20, 0), None);
    }

    #[test]
    fn test_segment_width() {
        let mut surface = RasterSurface::new(40, 40);
        surface.stroke_segment(RasterLayer::Base, pos2(10.0, 10.0), pos2(20.0, 10.0), 2.0, Color32::BLACK);

        // Two rows thick, straddling y = 10
        assert_eq!(surface.pixel(RasterLayer::Base, 15, 9), Some(Color32::BLACK));
        assert_eq!(surface.pixel(RasterLayer::Base, 15, 10), Some(Color32::BLACK));
        assert_eq!(surface.pixel(RasterLayer::Base, 15, 11), Some(Color32::TRANSPARENT));
        assert_eq!(surface.pixel(RasterLayer::Base, 15, 8), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_clear_rect() {
        let mut surface = RasterSurface::new(40, 40);
        surface.stroke_segment(RasterLayer::Base, pos2(0.0, 5.0), pos2(40.0, 5.0), 2.0, Color32::BLACK);
        let before = surface.painted_pixels(RasterLayer::Base);

        surface.clear_rect(RasterLayer::Base, Rect::from_min_size(pos2(10.0, 0.0), vec2(10.0, 10.0)));

        // Both painted rows lose 10 pixels each
        assert_eq!(surface.painted_pixels(RasterLayer::Base), before - 20);
        assert_eq!(surface.pixel(RasterLayer::Base, 15, 5), Some(Color32::TRANSPARENT));
        assert_eq!(surface.pixel(RasterLayer::Base, 25, 5), Some(Color32::BLACK));
    }

    #[test]
    fn test_commit_preview_keeps_base() {
        let mut surface = RasterSurface::new(40, 40);
        surface.stroke_segment(RasterLayer::Base, pos2(0.0, 5.0), pos2(40.0, 5.0), 2.0, Color32::BLACK);
        surface.stroke_rect(
            RasterLayer::Preview,
            Rect::from_min_size(pos2(10.0, 20.0), vec2(10.0, 10.0)),
            2.0,
            Color32::RED,
        );

        surface.commit_preview();

        assert_eq!(surface.painted_pixels(RasterLayer::Preview), 0);
        assert_eq!(surface.pixel(RasterLayer::Base, 5, 5), Some(Color32::BLACK));
        assert_eq!(surface.pixel(RasterLayer::Base, 10, 25), Some(Color32::RED));
    }

    #[test]
    fn test_circle_outline() {
        let mut surface = RasterSurface::new(40, 40);
        surface.stroke_circle(RasterLayer::Base, pos2(20.0, 20.0), 10.0, 2.0, Color32::BLACK);
        assert_eq!(surface.pixel(RasterLayer::Base, 29, 19), Some(Color32::BLACK));
        assert_eq!(surface.pixel(RasterLayer::Base, 20, 20), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_composite_shows_preview_over_base() {
        let mut surface = RasterSurface::new(4, 4);
        surface.stroke_segment(RasterLayer::Base, pos2(0.0, 0.5), pos2(4.0, 0.5), 1.0, Color32::BLACK);
        surface.stroke_segment(RasterLayer::Preview, pos2(0.5, 0.0), pos2(0.5, 4.0), 1.0, Color32::RED);

        let image = surface.composite();
        assert_eq!(image.size, [4, 4]);
        assert_eq!(image.pixels[0], Color32::RED);
        assert_eq!(image.pixels[1], Color32::BLACK);
        assert_eq!(image.pixels[5], Color32::TRANSPARENT);
    }

    #[test]
    fn test_mutations_bump_version() {
        let mut surface = RasterSurface::new(4, 4);
        let v0 = surface.version();
        surface.clear_layer(RasterLayer::Preview);
        assert!(surface.version() > v0);
    }
}
