use egui::{Painter, Pos2, Rect};

use crate::command::{Command, CommandContext};
use crate::config::{CanvasConfig, STORAGE_KEY};
use crate::element::common::fit_within;
use crate::element::{Element, factory};
use crate::event::{CanvasEvent, EventBus, LoggingHandler, RepaintHandler};
use crate::file_handler::{DecodeOutcome, ImageLoader};
use crate::gizmo::TransformGizmo;
use crate::input::{InputEvent, InputHandler};
use crate::overlay::OverlayModel;
use crate::panels::{central_panel, tools_panel};
use crate::raster::RasterSurface;
use crate::renderer::Renderer;
use crate::state::EditorState;
use crate::stroke::StrokeRenderer;
use crate::tools::{Tool, ToolKind, ToolType};

/// The drawing board: a raster layer for strokes and shapes with an overlay
/// of movable images and text on top
pub struct CanvasBoardApp {
    config: CanvasConfig,
    overlay: OverlayModel,
    raster: RasterSurface,
    strokes: StrokeRenderer,
    event_bus: EventBus,
    editor: EditorState,
    input: InputHandler,
    loader: ImageLoader,
    renderer: Renderer,
    /// Last recoverable failure, shown in the tools panel
    last_error: Option<String>,
}

impl std::fmt::Debug for CanvasBoardApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasBoardApp")
            .field("config", &self.config)
            .field("overlay", &self.overlay)
            .field("raster", &self.raster)
            .field("tool", &self.editor.active_kind())
            .finish_non_exhaustive()
    }
}

impl CanvasBoardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = Self::load_config(cc.storage);
        Self::with_config(config, cc.egui_ctx.clone())
    }

    pub fn with_config(config: CanvasConfig, ctx: egui::Context) -> Self {
        log::info!(
            "Starting canvas board with a {}x{} canvas",
            config.canvas_width,
            config.canvas_height
        );

        let event_bus = EventBus::new();
        event_bus.subscribe(Box::new(LoggingHandler));
        event_bus.subscribe(Box::new(RepaintHandler::new(ctx.clone())));

        let canvas_size = config.canvas_size();
        Self {
            overlay: OverlayModel::new(canvas_size),
            raster: RasterSurface::new(config.canvas_width, config.canvas_height),
            strokes: StrokeRenderer::new(config.stroke_style()),
            editor: EditorState::new(ToolKind::Pencil, &config),
            input: InputHandler::new(Rect::from_min_size(Pos2::ZERO, canvas_size)),
            loader: ImageLoader::with_repaint(ctx),
            renderer: Renderer::new(),
            event_bus,
            config,
            last_error: None,
        }
    }

    /// Config file from the environment first, then persisted settings, then defaults
    fn load_config(storage: Option<&dyn eframe::Storage>) -> CanvasConfig {
        if let Some(config) = config_from_env() {
            return config;
        }

        let stored = storage.and_then(|storage| eframe::get_value::<CanvasConfig>(storage, STORAGE_KEY));
        match stored {
            Some(config) => match config.validate() {
                Ok(()) => config,
                Err(err) => {
                    log::warn!("Discarding stored config: {}", err);
                    CanvasConfig::default()
                }
            },
            None => CanvasConfig::default(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut CanvasConfig {
        &mut self.config
    }

    pub fn overlay(&self) -> &OverlayModel {
        &self.overlay
    }

    pub fn raster(&self) -> &RasterSurface {
        &self.raster
    }

    pub fn active_tool(&self) -> &ToolType {
        self.editor.active_tool()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn pending_decodes(&self) -> usize {
        self.loader.pending_count()
    }

    /// Execute a command against the canvas, logging failures
    pub fn execute(&mut self, command: Command) -> bool {
        let mut ctx = CommandContext::new(&mut self.overlay, &mut self.raster, &mut self.strokes, &self.event_bus);
        ctx.dispatch(command)
    }

    pub fn set_active_tool(&mut self, kind: ToolKind) {
        if let Some(finish) = self.editor.set_active_tool(kind, &self.config, &self.event_bus) {
            self.execute(finish);
        }
    }

    /// Push edited settings into the stroke renderer and the active tool
    pub fn apply_config(&mut self) {
        self.strokes.set_style(self.config.stroke_style());
        let kind = self.editor.active_kind();
        if kind == ToolKind::Text {
            *self.editor.active_tool_mut() = ToolType::new(kind, &self.config);
        }
    }

    /// Rotate the selected element by `step` degrees
    pub fn rotate_selected(&mut self, step: f32) {
        if let Some(id) = self.overlay.selected() {
            self.execute(Command::RotateBy { id, step });
        }
    }

    pub fn delete_selected(&mut self) {
        self.execute(Command::DeleteSelected);
    }

    pub fn clear_raster(&mut self) {
        self.execute(Command::ClearRaster);
    }

    /// Route one frame of canvas input through the active tool.
    ///
    /// `visible_rect` is the on-screen clip of the canvas; presses outside it
    /// belong to whatever is drawn there instead.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect, visible_rect: Rect) {
        self.input.set_canvas_rect(canvas_rect);
        self.input.set_visible_rect(visible_rect);
        for event in self.input.process_input(ctx) {
            self.handle_input_event(event);
        }
    }

    pub fn handle_input_event(&mut self, event: InputEvent) {
        let tool = self.editor.active_tool_mut();
        let command = match event {
            InputEvent::PointerDown(pointer) => tool.on_pointer_down(pointer, &self.overlay),
            InputEvent::PointerMove(pointer) => tool.on_pointer_move(pointer, &self.overlay),
            InputEvent::PointerUp(pointer) => tool.on_pointer_up(pointer, &self.overlay),
            InputEvent::PointerLeave => tool.on_pointer_leave(&self.overlay),
            InputEvent::DeleteSelection => Some(Command::DeleteSelected),
        };
        if let Some(command) = command {
            self.execute(command);
        }
    }

    /// Turn finished decode jobs into image elements or reported errors
    pub fn poll_decodes(&mut self) {
        for DecodeOutcome { name, result } in self.loader.poll() {
            match result {
                Ok(decoded) => {
                    let [width, height] = decoded.pixels.size;
                    let size = fit_within(egui::vec2(width as f32, height as f32), self.config.canvas_size());
                    let element = factory::create_image(decoded.name, decoded.pixels, Pos2::ZERO, size);
                    self.execute(Command::AddElement(element));
                }
                Err(err) => {
                    self.last_error = Some(err.to_string());
                    self.event_bus.emit(CanvasEvent::ImageDecodeFailed {
                        name,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    /// Selection gizmo to draw over the overlay
    pub fn gizmo(&self) -> Option<TransformGizmo> {
        self.overlay
            .selected_element()
            .map(|element| TransformGizmo::for_element(element, self.config.handle_radius))
    }

    /// Paint the canvas and update the cursor for the pointer at `hover`
    pub fn paint_canvas(&mut self, ctx: &egui::Context, painter: &Painter, canvas_rect: Rect, hover: Option<Pos2>) {
        if let Some(pos) = self.input.hover_on_canvas(hover) {
            ctx.set_cursor_icon(self.editor.active_tool().cursor_icon(pos, &self.overlay));
        }
        let gizmo = self.gizmo();
        self.renderer
            .render(ctx, painter, canvas_rect, &self.raster, &self.overlay, gizmo);
    }

    pub fn selected_summary(&self) -> Option<String> {
        let element = self.overlay.selected_element()?;
        let rect = element.rect();
        Some(format!(
            "{} at ({:.0}, {:.0}), {:.0}x{:.0}, {:.0}°",
            element.element_type(),
            rect.min.x,
            rect.min.y,
            rect.width(),
            rect.height(),
            element.rotation()
        ))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_from_env() -> Option<CanvasConfig> {
    match CanvasConfig::from_env()? {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("Ignoring config file: {}", err);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn config_from_env() -> Option<CanvasConfig> {
    None
}

impl eframe::App for CanvasBoardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dropped = self.loader.check_for_dropped_files(ctx);
        if dropped > 0 {
            log::debug!("{} file(s) dropped", dropped);
        }
        self.poll_decodes();

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
