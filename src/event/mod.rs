mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{CanvasEvent, ElementChange};
pub use handlers::{LoggingHandler, RepaintHandler};

/// Receives every event broadcast on an [`EventBus`]
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}
