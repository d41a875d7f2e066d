use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::raster::{RasterLayer, RasterSurface};

/// Shapes the shape tool can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Line,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Line => "Line",
        }
    }
}

/// Pen settings used for strokes, shapes and the eraser
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color32,
    /// Side length of the square patch the eraser clears
    pub eraser_size: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Color32::BLACK,
            eraser_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ShapeInProgress {
    kind: ShapeKind,
    start: Pos2,
}

/// Turns pencil, eraser and shape gestures into pixels.
///
/// The only state kept between events is the last point of the stroke in
/// progress and the anchor of the shape being dragged; the surface itself is
/// passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct StrokeRenderer {
    style: StrokeStyle,
    last_point: Option<Pos2>,
    shape: Option<ShapeInProgress>,
}

impl StrokeRenderer {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            style,
            last_point: None,
            shape: None,
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// True while a freehand stroke is in progress
    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    /// True while a shape is being dragged out
    pub fn is_shaping(&self) -> bool {
        self.shape.is_some()
    }

    /// Start a freehand stroke; nothing is drawn until the pointer moves
    pub fn begin_stroke(&mut self, pos: Pos2) {
        self.last_point = Some(pos);
    }

    /// Extend the stroke in progress to `pos`. Returns false if no stroke is active.
    pub fn continue_stroke(&mut self, surface: &mut RasterSurface, pos: Pos2) -> bool {
        let Some(last) = self.last_point else {
            return false;
        };
        surface.stroke_segment(RasterLayer::Base, last, pos, self.style.width, self.style.color);
        self.last_point = Some(pos);
        true
    }

    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Clear the square patch whose top-left corner is `pos`
    pub fn erase(&self, surface: &mut RasterSurface, pos: Pos2) {
        let patch = Rect::from_min_size(pos, Vec2::splat(self.style.eraser_size));
        surface.clear_rect(RasterLayer::Base, patch);
    }

    pub fn begin_shape(&mut self, surface: &mut RasterSurface, kind: ShapeKind, pos: Pos2) {
        surface.clear_layer(RasterLayer::Preview);
        self.shape = Some(ShapeInProgress { kind, start: pos });
    }

    /// Redraw the preview of the shape in progress spanning to `pos`
    pub fn update_shape(&mut self, surface: &mut RasterSurface, pos: Pos2) -> bool {
        let Some(shape) = self.shape else {
            return false;
        };
        surface.clear_layer(RasterLayer::Preview);
        self.draw_shape(surface, RasterLayer::Preview, shape, pos);
        true
    }

    /// Move the shape preview into the base layer
    pub fn commit_shape(&mut self, surface: &mut RasterSurface) -> bool {
        if self.shape.take().is_none() {
            return false;
        }
        surface.commit_preview();
        true
    }

    /// Drop the shape in progress without touching the base layer
    pub fn cancel_shape(&mut self, surface: &mut RasterSurface) {
        if self.shape.take().is_some() {
            surface.clear_layer(RasterLayer::Preview);
        }
    }

    fn draw_shape(&self, surface: &mut RasterSurface, layer: RasterLayer, shape: ShapeInProgress, current: Pos2) {
        let StrokeStyle { width, color, .. } = self.style;
        match shape.kind {
            ShapeKind::Rectangle => {
                surface.stroke_rect(layer, Rect::from_two_pos(shape.start, current), width, color);
            }
            ShapeKind::Circle => {
                let radius = shape.start.distance(current);
                surface.stroke_circle(layer, shape.start, radius, width, color);
            }
            ShapeKind::Line => {
                surface.stroke_segment(layer, shape.start, current, width, color);
            }
        }
    }
}
