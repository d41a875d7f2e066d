use egui::{Pos2, Rect, Vec2};

/// Horizontal advance estimate for one character, as a fraction of the font size
pub const TEXT_CHAR_WIDTH_FACTOR: f32 = 0.6;
/// Line height estimate, as a fraction of the font size
pub const TEXT_LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Geometry shared by every overlay element: top-left position, size and
/// rotation (degrees, clockwise, about the element center).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    position: Pos2,
    size: Vec2,
    rotation: f32,
}

impl Placement {
    pub fn new(position: Pos2, size: Vec2) -> Self {
        Self {
            position,
            size: size.max(Vec2::ZERO),
            rotation: 0.0,
        }
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.position = rect.min;
        self.size = rect.size().max(Vec2::ZERO);
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Clamp a top-left position so a box of `size` stays inside `canvas`
pub fn clamp_position(position: Pos2, size: Vec2, canvas: Vec2) -> Pos2 {
    let max_x = (canvas.x - size.x).max(0.0);
    let max_y = (canvas.y - size.y).max(0.0);
    Pos2::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Clamp all four edges of `rect` jointly into `[0, canvas]`.
///
/// The min edge is clamped first, the max edge is then clamped between the
/// new min edge and the canvas edge, so the result never has negative size.
pub fn clamp_rect(rect: Rect, canvas: Vec2) -> Rect {
    let min_x = rect.min.x.clamp(0.0, canvas.x);
    let min_y = rect.min.y.clamp(0.0, canvas.y);
    let max_x = rect.max.x.clamp(min_x, canvas.x);
    let max_y = rect.max.y.clamp(min_y, canvas.y);
    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}

/// Scale `size` down (never up) so it fits inside `bounds`, keeping its aspect ratio
pub fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return size.max(Vec2::ZERO);
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale
}

/// Estimated box of a single line of text
pub fn estimate_text_size(text: &str, font_size: f32) -> Vec2 {
    let chars = text.chars().count().max(1) as f32;
    Vec2::new(
        chars * font_size * TEXT_CHAR_WIDTH_FACTOR,
        font_size * TEXT_LINE_HEIGHT_FACTOR,
    )
}

/// Calculate distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}
