use crate::command::Command;
use crate::event::EventBus;
use crate::overlay::OverlayModel;
use crate::raster::RasterSurface;
use crate::stroke::StrokeRenderer;

/// Context for command execution, borrowing the two canvas components and
/// the event bus for the duration of one command
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub overlay: &'a mut OverlayModel,
    pub raster: &'a mut RasterSurface,
    pub strokes: &'a mut StrokeRenderer,
    pub event_bus: &'a EventBus,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        overlay: &'a mut OverlayModel,
        raster: &'a mut RasterSurface,
        strokes: &'a mut StrokeRenderer,
        event_bus: &'a EventBus,
    ) -> Self {
        Self {
            overlay,
            raster,
            strokes,
            event_bus,
        }
    }

    /// Execute a command, logging and dropping any failure.
    ///
    /// Returns whether the command succeeded.
    pub fn dispatch(&mut self, command: Command) -> bool {
        log::trace!("Executing {:?}", command);
        match command.execute(self) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Ignoring {}: {}", command.name(), err);
                false
            }
        }
    }
}
