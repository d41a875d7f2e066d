use crate::command::Command;
use crate::overlay::OverlayModel;
use crate::stroke::ShapeKind;
use crate::tools::{PointerState, Tool};

/// Drags out a rectangle, circle or line, previewed until the pointer is released
#[derive(Debug, Clone)]
pub struct ShapeTool {
    shape: ShapeKind,
    dragging: bool,
}

impl ShapeTool {
    pub fn new(shape: ShapeKind) -> Self {
        Self { shape, dragging: false }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    fn finish(&mut self) -> Option<Command> {
        std::mem::take(&mut self.dragging).then_some(Command::CommitShape)
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        self.shape.name()
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.finish()
    }

    fn on_pointer_down(&mut self, pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        self.dragging = true;
        Some(Command::BeginShape {
            kind: self.shape,
            position: pointer.position,
        })
    }

    fn on_pointer_move(&mut self, pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        self.dragging.then_some(Command::UpdateShape {
            position: pointer.position,
        })
    }

    fn on_pointer_up(&mut self, _pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        self.finish()
    }
}
