use std::path::Path;

use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};
use crate::stroke::StrokeStyle;

/// Environment variable naming a JSON config file to load at startup
pub const CONFIG_ENV_VAR: &str = "CANVAS_BOARD_CONFIG";

/// Key under which the config is persisted in eframe storage
pub const STORAGE_KEY: &str = "canvas_board_config";

/// User-tunable settings for the canvas and its tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct CanvasConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub line_width: f32,
    /// RGBA, unmultiplied
    pub stroke_color: [u8; 4],
    pub eraser_size: f32,
    /// Degrees added or removed by the rotate buttons
    pub rotate_step: f32,
    pub font_size: f32,
    pub default_text: String,
    pub text_color: [u8; 4],
    /// Pick radius around gizmo handles
    pub handle_radius: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            line_width: 2.0,
            stroke_color: [0, 0, 0, 255],
            eraser_size: 10.0,
            rotate_step: 90.0,
            font_size: 24.0,
            default_text: "Text".to_owned(),
            text_color: [0, 0, 0, 255],
            handle_radius: 8.0,
        }
    }
}

impl CanvasConfig {
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn stroke_color(&self) -> Color32 {
        let [r, g, b, a] = self.stroke_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn text_color(&self) -> Color32 {
        let [r, g, b, a] = self.text_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.line_width,
            color: self.stroke_color(),
            eraser_size: self.eraser_size,
        }
    }

    /// Parse and validate a config from JSON text
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`], if the variable is set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Option<CanvasResult<Self>> {
        let path = std::env::var_os(CONFIG_ENV_VAR)?;
        log::info!("Loading config from {}", Path::new(&path).display());
        Some(Self::load_from_path(path))
    }

    pub fn validate(&self) -> CanvasResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(CanvasError::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        let positive = [
            ("line_width", self.line_width),
            ("eraser_size", self.eraser_size),
            ("font_size", self.font_size),
            ("handle_radius", self.handle_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CanvasError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.rotate_step.is_finite() {
            return Err(CanvasError::InvalidConfig("rotate_step must be finite".to_owned()));
        }
        Ok(())
    }
}
