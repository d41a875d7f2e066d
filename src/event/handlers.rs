use crate::event::{CanvasEvent, EventHandler};

/// Traces every event through the `log` facade
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle_event(&mut self, event: &CanvasEvent) {
        match event {
            CanvasEvent::ImageDecodeFailed { name, reason } => {
                log::error!("Could not load `{}`: {}", name, reason);
            }
            CanvasEvent::ToolChanged { old, new } => {
                log::info!("Tool changed: {} -> {}", old.name(), new.name());
            }
            // Raster changes fire on every pointer move
            CanvasEvent::RasterChanged => log::trace!("{:?}", event),
            _ => log::debug!("{:?}", event),
        }
    }
}

/// Asks egui for a new frame whenever the canvas changes
#[derive(Debug)]
pub struct RepaintHandler {
    ctx: egui::Context,
}

impl RepaintHandler {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl EventHandler for RepaintHandler {
    fn handle_event(&mut self, event: &CanvasEvent) {
        if event.needs_repaint() {
            self.ctx.request_repaint();
        }
    }
}
