use egui::emath::Rot2;
use egui::{Pos2, Rect};

/// Rotate `point` about `center` by `degrees` (clockwise on a y-down canvas)
pub fn rotate_point(point: Pos2, center: Pos2, degrees: f32) -> Pos2 {
    if degrees == 0.0 {
        return point;
    }
    let rot = Rot2::from_angle(degrees.to_radians());
    center + rot * (point - center)
}

/// Test whether `pos` lies inside `rect` after it has been rotated about its center.
///
/// The point is mapped back into the rectangle's unrotated frame and tested there.
pub fn point_in_rotated_rect(pos: Pos2, rect: Rect, degrees: f32) -> bool {
    let local = rotate_point(pos, rect.center(), -degrees);
    rect.contains(local)
}

/// Corners of `rect` rotated about its center, clockwise from the top-left
pub fn rotated_corners(rect: Rect, degrees: f32) -> [Pos2; 4] {
    let center = rect.center();
    [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ]
    .map(|corner| rotate_point(corner, center, degrees))
}

pub fn is_point_near(pos: Pos2, target: Pos2, radius: f32) -> bool {
    pos.distance(target) <= radius
}
