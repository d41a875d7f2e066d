use egui::{CursorIcon, Pos2, Rect, Vec2, vec2};

/// Smallest width or height a handle drag can shrink an element to
pub const MIN_ELEMENT_SIZE: f32 = 1.0;

/// One of the eight resize handles around a selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlePosition {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandlePosition {
    /// All handles, clockwise from the top-left corner
    pub const ALL: [HandlePosition; 8] = [
        HandlePosition::TopLeft,
        HandlePosition::Top,
        HandlePosition::TopRight,
        HandlePosition::Right,
        HandlePosition::BottomRight,
        HandlePosition::Bottom,
        HandlePosition::BottomLeft,
        HandlePosition::Left,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HandlePosition::TopLeft => "top_left",
            HandlePosition::Top => "top",
            HandlePosition::TopRight => "top_right",
            HandlePosition::Right => "right",
            HandlePosition::BottomRight => "bottom_right",
            HandlePosition::Bottom => "bottom",
            HandlePosition::BottomLeft => "bottom_left",
            HandlePosition::Left => "left",
        }
    }

    /// Handle location inside the element box, as fractions of width and height
    pub fn offset(&self) -> Vec2 {
        match self {
            HandlePosition::TopLeft => vec2(0.0, 0.0),
            HandlePosition::Top => vec2(0.5, 0.0),
            HandlePosition::TopRight => vec2(1.0, 0.0),
            HandlePosition::Right => vec2(1.0, 0.5),
            HandlePosition::BottomRight => vec2(1.0, 1.0),
            HandlePosition::Bottom => vec2(0.5, 1.0),
            HandlePosition::BottomLeft => vec2(0.0, 1.0),
            HandlePosition::Left => vec2(0.0, 0.5),
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            HandlePosition::TopLeft | HandlePosition::BottomRight => CursorIcon::ResizeNwSe,
            HandlePosition::TopRight | HandlePosition::BottomLeft => CursorIcon::ResizeNeSw,
            HandlePosition::Top | HandlePosition::Bottom => CursorIcon::ResizeVertical,
            HandlePosition::Left | HandlePosition::Right => CursorIcon::ResizeHorizontal,
        }
    }

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            HandlePosition::TopLeft
                | HandlePosition::TopRight
                | HandlePosition::BottomRight
                | HandlePosition::BottomLeft
        )
    }

    pub fn moves_left(&self) -> bool {
        matches!(self, HandlePosition::TopLeft | HandlePosition::Left | HandlePosition::BottomLeft)
    }

    pub fn moves_right(&self) -> bool {
        matches!(self, HandlePosition::TopRight | HandlePosition::Right | HandlePosition::BottomRight)
    }

    pub fn moves_top(&self) -> bool {
        matches!(self, HandlePosition::TopLeft | HandlePosition::Top | HandlePosition::TopRight)
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(self, HandlePosition::BottomLeft | HandlePosition::Bottom | HandlePosition::BottomRight)
    }

    /// The handle that stays put while this one is dragged
    pub fn opposite(&self) -> HandlePosition {
        match self {
            HandlePosition::TopLeft => HandlePosition::BottomRight,
            HandlePosition::Top => HandlePosition::Bottom,
            HandlePosition::TopRight => HandlePosition::BottomLeft,
            HandlePosition::Right => HandlePosition::Left,
            HandlePosition::BottomRight => HandlePosition::TopLeft,
            HandlePosition::Bottom => HandlePosition::Top,
            HandlePosition::BottomLeft => HandlePosition::TopRight,
            HandlePosition::Left => HandlePosition::Right,
        }
    }

    /// Unrotated location of this handle on `rect`
    pub fn point_on(&self, rect: Rect) -> Pos2 {
        rect.min + self.offset() * rect.size()
    }

    /// Apply a drag `delta`, expressed in the element's unrotated frame, to `rect`.
    ///
    /// Only the edges this handle owns move. Dragging an edge past its opposite
    /// stops at [`MIN_ELEMENT_SIZE`] instead of flipping the box. With `keep_aspect`
    /// a corner handle scales both axes by the larger factor, anchored at the
    /// opposite corner; edge handles ignore it.
    pub fn resize_rect(&self, rect: Rect, delta: Vec2, keep_aspect: bool) -> Rect {
        let mut min = rect.min;
        let mut max = rect.max;

        if self.moves_left() {
            min.x = (min.x + delta.x).min(max.x - MIN_ELEMENT_SIZE);
        }
        if self.moves_right() {
            max.x = (max.x + delta.x).max(min.x + MIN_ELEMENT_SIZE);
        }
        if self.moves_top() {
            min.y = (min.y + delta.y).min(max.y - MIN_ELEMENT_SIZE);
        }
        if self.moves_bottom() {
            max.y = (max.y + delta.y).max(min.y + MIN_ELEMENT_SIZE);
        }

        if keep_aspect && self.is_corner() && rect.width() > 0.0 && rect.height() > 0.0 {
            let scale = ((max.x - min.x) / rect.width()).max((max.y - min.y) / rect.height());
            let width = rect.width() * scale;
            let height = rect.height() * scale;

            if self.moves_left() {
                min.x = max.x - width;
            } else {
                max.x = min.x + width;
            }
            if self.moves_top() {
                min.y = max.y - height;
            } else {
                max.y = min.y + height;
            }
        }

        Rect::from_min_max(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn test_rect() -> Rect {
        Rect::from_min_size(pos2(100.0, 100.0), vec2(200.0, 100.0))
    }

    #[test]
    fn test_handle_points() {
        let rect = test_rect();
        assert_eq!(HandlePosition::TopLeft.point_on(rect), pos2(100.0, 100.0));
        assert_eq!(HandlePosition::Top.point_on(rect), pos2(200.0, 100.0));
        assert_eq!(HandlePosition::Right.point_on(rect), pos2(300.0, 150.0));
        assert_eq!(HandlePosition::BottomLeft.point_on(rect), pos2(100.0, 200.0));
    }

    #[test]
    fn test_every_handle_owns_at_least_one_edge() {
        for handle in HandlePosition::ALL {
            let owns = handle.moves_left() || handle.moves_right() || handle.moves_top() || handle.moves_bottom();
            assert!(owns, "{} moves no edge", handle.as_str());
        }
    }

    #[test]
    fn test_top_left_moves_origin() {
        let resized = HandlePosition::TopLeft.resize_rect(test_rect(), vec2(-20.0, -10.0), false);
        assert_eq!(resized.min, pos2(80.0, 90.0));
        assert_eq!(resized.max, pos2(300.0, 200.0));
    }

    #[test]
    fn test_edge_handle_moves_single_axis() {
        let resized = HandlePosition::Right.resize_rect(test_rect(), vec2(50.0, 40.0), false);
        assert_eq!(resized.width(), 250.0);
        assert_eq!(resized.height(), 100.0);
    }

    #[test]
    fn test_drag_past_opposite_edge_keeps_minimum_size() {
        let resized = HandlePosition::Left.resize_rect(test_rect(), vec2(500.0, 0.0), false);
        assert_eq!(resized.width(), MIN_ELEMENT_SIZE);
        assert_eq!(resized.max.x, 300.0);

        let resized = HandlePosition::TopLeft.resize_rect(test_rect(), vec2(500.0, 500.0), true);
        assert!(resized.width() >= MIN_ELEMENT_SIZE);
        assert!(resized.height() >= MIN_ELEMENT_SIZE);
        assert_eq!(resized.max, pos2(300.0, 200.0));
    }

    #[test]
    fn test_keep_aspect_on_corner() {
        let resized = HandlePosition::BottomRight.resize_rect(test_rect(), vec2(200.0, 10.0), true);
        assert_eq!(resized.min, pos2(100.0, 100.0));
        assert_eq!(resized.width(), 400.0);
        assert_eq!(resized.height(), 200.0);
    }

    #[test]
    fn test_cursor_icons() {
        assert_eq!(HandlePosition::TopLeft.cursor_icon(), CursorIcon::ResizeNwSe);
        assert_eq!(HandlePosition::BottomLeft.cursor_icon(), CursorIcon::ResizeNeSw);
        assert_eq!(HandlePosition::Bottom.cursor_icon(), CursorIcon::ResizeVertical);
        assert_eq!(HandlePosition::Left.cursor_icon(), CursorIcon::ResizeHorizontal);
    }
}
