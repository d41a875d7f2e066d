use egui::{Pos2, Rect};

use super::{CommandContext, CommandError, CommandResult};
use crate::element::{Element, ElementId, ElementType};
use crate::event::{CanvasEvent, ElementChange};
use crate::stroke::ShapeKind;

/// Every mutation of the canvas, produced by tools and the app
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a freehand stroke at a point
    BeginStroke { position: Pos2 },

    /// Extend the current stroke to a point
    ContinueStroke { position: Pos2 },

    EndStroke,

    /// Clear the eraser patch at a point
    Erase { position: Pos2 },

    BeginShape { kind: ShapeKind, position: Pos2 },

    /// Redraw the shape preview up to a point
    UpdateShape { position: Pos2 },

    /// Move the shape preview into the raster
    CommitShape,

    AddElement(ElementType),

    /// Select an element, or clear the selection with `None`
    SelectElement(Option<ElementId>),

    MoveElement { id: ElementId, position: Pos2 },

    ResizeElement { id: ElementId, rect: Rect },

    /// Set an absolute rotation in degrees
    SetRotation { id: ElementId, degrees: f32 },

    /// Rotate by a relative step in degrees
    RotateBy { id: ElementId, step: f32 },

    DeleteSelected,

    ClearRaster,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::BeginStroke { .. } => "BeginStroke",
            Command::ContinueStroke { .. } => "ContinueStroke",
            Command::EndStroke => "EndStroke",
            Command::Erase { .. } => "Erase",
            Command::BeginShape { .. } => "BeginShape",
            Command::UpdateShape { .. } => "UpdateShape",
            Command::CommitShape => "CommitShape",
            Command::AddElement(_) => "AddElement",
            Command::SelectElement(_) => "SelectElement",
            Command::MoveElement { .. } => "MoveElement",
            Command::ResizeElement { .. } => "ResizeElement",
            Command::SetRotation { .. } => "SetRotation",
            Command::RotateBy { .. } => "RotateBy",
            Command::DeleteSelected => "DeleteSelected",
            Command::ClearRaster => "ClearRaster",
        }
    }

    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::BeginStroke { position } => {
                ctx.strokes.begin_stroke(*position);
                Ok(())
            }

            Command::ContinueStroke { position } => {
                if !ctx.strokes.continue_stroke(ctx.raster, *position) {
                    return Err(CommandError::InvalidState("ContinueStroke"));
                }
                ctx.event_bus.emit(CanvasEvent::RasterChanged);
                Ok(())
            }

            Command::EndStroke => {
                ctx.strokes.end_stroke();
                Ok(())
            }

            Command::Erase { position } => {
                ctx.strokes.erase(ctx.raster, *position);
                ctx.event_bus.emit(CanvasEvent::RasterChanged);
                Ok(())
            }

            Command::BeginShape { kind, position } => {
                ctx.strokes.begin_shape(ctx.raster, *kind, *position);
                Ok(())
            }

            Command::UpdateShape { position } => {
                if !ctx.strokes.update_shape(ctx.raster, *position) {
                    return Err(CommandError::InvalidState("UpdateShape"));
                }
                ctx.event_bus.emit(CanvasEvent::RasterChanged);
                Ok(())
            }

            Command::CommitShape => {
                if !ctx.strokes.commit_shape(ctx.raster) {
                    return Err(CommandError::InvalidState("CommitShape"));
                }
                ctx.event_bus.emit(CanvasEvent::RasterChanged);
                Ok(())
            }

            Command::AddElement(element) => {
                let kind = element.element_type();
                let id = ctx.overlay.add_element(element.clone());
                ctx.event_bus.emit(CanvasEvent::ElementAdded { id, kind });
                Ok(())
            }

            Command::SelectElement(id) => {
                let old = ctx.overlay.selected();
                ctx.overlay.select_by_id(*id)?;
                if old != *id {
                    ctx.event_bus.emit(CanvasEvent::SelectionChanged { old, new: *id });
                }
                Ok(())
            }

            Command::MoveElement { id, position } => {
                let applied = ctx.overlay.move_by_id(*id, *position)?;
                ctx.event_bus.emit(CanvasEvent::ElementChanged {
                    id: *id,
                    change: ElementChange::Moved(applied),
                });
                Ok(())
            }

            Command::ResizeElement { id, rect } => {
                let applied = ctx.overlay.resize_by_id(*id, *rect)?;
                ctx.event_bus.emit(CanvasEvent::ElementChanged {
                    id: *id,
                    change: ElementChange::Resized(applied),
                });
                Ok(())
            }

            Command::SetRotation { id, degrees } => {
                let applied = ctx.overlay.set_rotation_by_id(*id, *degrees)?;
                ctx.event_bus.emit(CanvasEvent::ElementChanged {
                    id: *id,
                    change: ElementChange::Rotated(applied),
                });
                Ok(())
            }

            Command::RotateBy { id, step } => {
                let applied = ctx.overlay.rotate_by_id(*id, *step)?;
                ctx.event_bus.emit(CanvasEvent::ElementChanged {
                    id: *id,
                    change: ElementChange::Rotated(applied),
                });
                Ok(())
            }

            Command::DeleteSelected => {
                let old = ctx.overlay.selected();
                // Nothing selected is a no-op, not an error
                if let Some(removed) = ctx.overlay.delete_selected() {
                    ctx.event_bus.emit(CanvasEvent::ElementRemoved { id: removed.id() });
                }
                if old.is_some() {
                    ctx.event_bus.emit(CanvasEvent::SelectionChanged { old, new: None });
                }
                Ok(())
            }

            Command::ClearRaster => {
                ctx.strokes.cancel_shape(ctx.raster);
                ctx.strokes.end_stroke();
                ctx.raster.clear();
                ctx.event_bus.emit(CanvasEvent::RasterChanged);
                Ok(())
            }
        }
    }
}
