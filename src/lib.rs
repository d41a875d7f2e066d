#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod overlay;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod texture_manager;
pub mod tools;
pub mod widgets;

pub use app::CanvasBoardApp;
pub use command::{Command, CommandContext};
pub use config::CanvasConfig;
pub use element::{Element, ElementId, ElementType};
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, EventBus};
pub use overlay::OverlayModel;
pub use raster::RasterSurface;
pub use renderer::{Renderer, Surface};
pub use stroke::StrokeRenderer;
pub use tools::{Tool, ToolKind};
