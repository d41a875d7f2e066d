use egui::{CursorIcon, Pos2};

use crate::command::Command;
use crate::overlay::OverlayModel;
use crate::tools::{PointerState, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    /// Freehand line segments between successive pointer positions
    Pencil,
    /// Clears a square patch at every pointer position
    Eraser,
}

/// Freehand pencil and eraser
#[derive(Debug, Clone)]
pub struct DrawStrokeTool {
    mode: StrokeMode,
    // Pointer is held down on the canvas
    drawing: bool,
}

impl DrawStrokeTool {
    pub fn new(mode: StrokeMode) -> Self {
        Self { mode, drawing: false }
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    fn finish(&mut self) -> Option<Command> {
        if !std::mem::take(&mut self.drawing) {
            return None;
        }
        match self.mode {
            StrokeMode::Pencil => Some(Command::EndStroke),
            StrokeMode::Eraser => None,
        }
    }
}

impl Tool for DrawStrokeTool {
    fn name(&self) -> &'static str {
        match self.mode {
            StrokeMode::Pencil => "Pencil",
            StrokeMode::Eraser => "Eraser",
        }
    }

    fn activate(&mut self) {
        self.drawing = false;
    }

    fn deactivate(&mut self) -> Option<Command> {
        self.finish()
    }

    fn on_pointer_down(&mut self, pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        self.drawing = true;
        let position = pointer.position;
        Some(match self.mode {
            StrokeMode::Pencil => Command::BeginStroke { position },
            StrokeMode::Eraser => Command::Erase { position },
        })
    }

    fn on_pointer_move(&mut self, pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        if !self.drawing {
            return None;
        }
        let position = pointer.position;
        Some(match self.mode {
            StrokeMode::Pencil => Command::ContinueStroke { position },
            StrokeMode::Eraser => Command::Erase { position },
        })
    }

    fn on_pointer_up(&mut self, _pointer: PointerState, _overlay: &OverlayModel) -> Option<Command> {
        self.finish()
    }

    fn on_pointer_leave(&mut self, _overlay: &OverlayModel) -> Option<Command> {
        self.finish()
    }

    fn cursor_icon(&self, _hover: Pos2, _overlay: &OverlayModel) -> CursorIcon {
        match self.mode {
            StrokeMode::Pencil => CursorIcon::Crosshair,
            StrokeMode::Eraser => CursorIcon::Cell,
        }
    }
}
