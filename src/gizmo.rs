use egui::{Color32, CursorIcon, Pos2, Rect, Stroke};

use crate::element::Element;
use crate::geometry::hit_testing::{is_point_near, rotate_point};
use crate::renderer::Surface;
use crate::widgets::HandlePosition;

pub const HANDLE_SIZE: f32 = 8.0;
pub const ROTATION_HANDLE_OFFSET: f32 = 30.0;
const HANDLE_COLOR: Color32 = Color32::from_rgb(30, 144, 255);
const HANDLE_STROKE_WIDTH: f32 = 2.0;

/// A grabbable part of the selection gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoHandle {
    Resize(HandlePosition),
    Rotate,
}

impl GizmoHandle {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            GizmoHandle::Resize(position) => position.cursor_icon(),
            GizmoHandle::Rotate => CursorIcon::Grab,
        }
    }
}

/// Selection box with eight resize handles and a rotate handle, following
/// the selected element's rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformGizmo {
    bounds: Rect,
    rotation: f32,
    hit_radius: f32,
}

impl TransformGizmo {
    pub fn new(bounds: Rect, rotation: f32, hit_radius: f32) -> Self {
        Self {
            bounds,
            rotation,
            hit_radius,
        }
    }

    pub fn for_element(element: &impl Element, hit_radius: f32) -> Self {
        Self::new(element.rect(), element.rotation(), hit_radius)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Canvas position of a handle, rotated with the element
    pub fn handle_position(&self, handle: GizmoHandle) -> Pos2 {
        let unrotated = match handle {
            GizmoHandle::Resize(position) => position.point_on(self.bounds),
            GizmoHandle::Rotate => Pos2::new(self.bounds.center().x, self.bounds.min.y - ROTATION_HANDLE_OFFSET),
        };
        rotate_point(unrotated, self.bounds.center(), self.rotation)
    }

    pub fn handles(&self) -> impl Iterator<Item = (GizmoHandle, Pos2)> + '_ {
        HandlePosition::ALL
            .into_iter()
            .map(GizmoHandle::Resize)
            .chain(std::iter::once(GizmoHandle::Rotate))
            .map(|handle| (handle, self.handle_position(handle)))
    }

    /// The handle closest to `pos` within the hit radius, if any
    pub fn hit_test(&self, pos: Pos2) -> Option<GizmoHandle> {
        self.handles()
            .filter(|(_, handle_pos)| is_point_near(pos, *handle_pos, self.hit_radius))
            .min_by(|(_, a), (_, b)| pos.distance(*a).total_cmp(&pos.distance(*b)))
            .map(|(handle, _)| handle)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.stroke_rotated_rect(self.bounds, self.rotation, Stroke::new(1.0, HANDLE_COLOR));

        let top_center = rotate_point(
            Pos2::new(self.bounds.center().x, self.bounds.min.y),
            self.bounds.center(),
            self.rotation,
        );
        let rotate_pos = self.handle_position(GizmoHandle::Rotate);
        surface.line_segment(top_center, rotate_pos, Stroke::new(1.0, HANDLE_COLOR));

        for (handle, pos) in self.handles() {
            match handle {
                GizmoHandle::Rotate => {
                    surface.fill_circle(pos, HANDLE_SIZE / 2.0, Color32::WHITE);
                    surface.stroke_circle(pos, HANDLE_SIZE / 2.0, Stroke::new(HANDLE_STROKE_WIDTH, HANDLE_COLOR));
                }
                GizmoHandle::Resize(_) => {
                    surface.fill_circle(pos, HANDLE_SIZE / 2.0, HANDLE_COLOR);
                    surface.stroke_circle(pos, HANDLE_SIZE / 2.0, Stroke::new(1.0, Color32::WHITE));
                }
            }
        }
    }
}
