use egui::emath::Rot2;
use egui::{CursorIcon, Pos2, Rect, Vec2};
use log::debug;

use crate::command::Command;
use crate::element::{Element, ElementId};
use crate::geometry::rotate_point;
use crate::gizmo::{GizmoHandle, TransformGizmo};
use crate::overlay::OverlayModel;
use crate::tools::{PointerState, Tool};
use crate::widgets::HandlePosition;

/// Rotation snaps to multiples of this while Shift is held
const ROTATION_SNAP_DEGREES: f32 = 15.0;

/// What the selection tool is doing with the element under the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionState {
    Idle,
    Dragging {
        id: ElementId,
        /// Pointer position relative to the element's top-left corner
        offset: Vec2,
    },
    Resizing {
        id: ElementId,
        handle: HandlePosition,
        original_rect: Rect,
        rotation: f32,
        start_pos: Pos2,
    },
    Rotating {
        id: ElementId,
    },
}

/// Selects, moves, resizes and rotates overlay elements
#[derive(Debug, Clone)]
pub struct SelectionTool {
    state: SelectionState,
    hit_radius: f32,
}

impl SelectionTool {
    pub fn new(hit_radius: f32) -> Self {
        Self {
            state: SelectionState::Idle,
            hit_radius,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn current_state_name(&self) -> &'static str {
        match self.state {
            SelectionState::Idle => "Idle",
            SelectionState::Dragging { .. } => "Dragging",
            SelectionState::Resizing { .. } => "Resizing",
            SelectionState::Rotating { .. } => "Rotating",
        }
    }

    /// Gizmo around the selected element, if any
    pub fn gizmo(&self, overlay: &OverlayModel) -> Option<TransformGizmo> {
        overlay
            .selected_element()
            .map(|element| TransformGizmo::for_element(element, self.hit_radius))
    }

    fn begin_handle_drag(&mut self, handle: GizmoHandle, pointer: PointerState, overlay: &OverlayModel) -> bool {
        let Some(element) = overlay.selected_element() else {
            return false;
        };
        let id = element.id();
        self.state = match handle {
            GizmoHandle::Resize(handle) => SelectionState::Resizing {
                id,
                handle,
                original_rect: element.rect(),
                rotation: element.rotation(),
                start_pos: pointer.position,
            },
            GizmoHandle::Rotate => SelectionState::Rotating { id },
        };
        debug!("Selection tool: {} element {}", self.current_state_name(), id);
        true
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn activate(&mut self) {
        self.state = SelectionState::Idle;
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.state = SelectionState::Idle;
        None
    }

    fn on_pointer_down(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command> {
        // Handles of the current selection take priority over elements beneath them
        if let Some(handle) = self.gizmo(overlay).and_then(|gizmo| gizmo.hit_test(pointer.position)) {
            if self.begin_handle_drag(handle, pointer, overlay) {
                return None;
            }
        }

        match overlay.element_at(pointer.position) {
            Some(element) => {
                let id = element.id();
                self.state = SelectionState::Dragging {
                    id,
                    offset: pointer.position - element.position(),
                };
                (overlay.selected() != Some(id)).then_some(Command::SelectElement(Some(id)))
            }
            None => {
                self.state = SelectionState::Idle;
                overlay.selected().map(|_| Command::SelectElement(None))
            }
        }
    }

    fn on_pointer_move(&mut self, pointer: PointerState, overlay: &OverlayModel) -> Option<Command> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging { id, offset } => Some(Command::MoveElement {
                id: *id,
                position: pointer.position - *offset,
            }),
            SelectionState::Resizing {
                id,
                handle,
                original_rect,
                rotation,
                start_pos,
            } => {
                let rect = resize_about_anchor(
                    *original_rect,
                    *rotation,
                    *handle,
                    pointer.position - *start_pos,
                    pointer.modifiers.shift,
                );
                Some(Command::ResizeElement { id: *id, rect })
            }
            SelectionState::Rotating { id } => {
                let center = overlay.get(*id)?.rect().center();
                let degrees = rotation_towards(center, pointer.position, pointer.modifiers.shift);
                Some(Command::SetRotation { id: *id, degrees })
            }
        }
    }

    fn on_pointer_up(&mut self, _pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        self.state = SelectionState::Idle;
        None
    }

    fn cursor_icon(&self, hover: Pos2, overlay: &OverlayModel) -> CursorIcon {
        match &self.state {
            SelectionState::Resizing { handle, .. } => return handle.cursor_icon(),
            SelectionState::Dragging { .. } | SelectionState::Rotating { .. } => return CursorIcon::Grabbing,
            SelectionState::Idle => {}
        }
        if let Some(handle) = self.gizmo(overlay).and_then(|gizmo| gizmo.hit_test(hover)) {
            return handle.cursor_icon();
        }
        if overlay.element_at(hover).is_some() {
            CursorIcon::Move
        } else {
            CursorIcon::Default
        }
    }
}

/// Resize `original` by a screen-space drag of `handle`, keeping the opposite
/// handle fixed on screen even when the element is rotated
pub fn resize_about_anchor(original: Rect, rotation: f32, handle: HandlePosition, drag: Vec2, keep_aspect: bool) -> Rect {
    let local_drag = Rot2::from_angle(-rotation.to_radians()) * drag;
    let resized = handle.resize_rect(original, local_drag, keep_aspect);
    if rotation == 0.0 {
        return resized;
    }

    let anchor = handle.opposite();
    let before = rotate_point(anchor.point_on(original), original.center(), rotation);
    let after = rotate_point(anchor.point_on(resized), resized.center(), rotation);
    resized.translate(before - after)
}

/// Angle that points the element's top edge at `pointer`, optionally snapped
pub fn rotation_towards(center: Pos2, pointer: Pos2, snap: bool) -> f32 {
    // The rotate handle sits straight above the center at 0°
    let degrees = (pointer - center).angle().to_degrees() + 90.0;
    if snap {
        (degrees / ROTATION_SNAP_DEGREES).round() * ROTATION_SNAP_DEGREES
    } else {
        degrees
    }
}
