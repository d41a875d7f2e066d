use egui::{Color32, RichText, Slider};

use crate::CanvasBoardApp;
use crate::components::ToolButton;
use crate::tools::ToolKind;

pub fn tools_panel(app: &mut CanvasBoardApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.active_tool().kind();
            ui.horizontal_wrapped(|ui| {
                for kind in ToolKind::ALL {
                    if ToolButton::new(kind, active == kind).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind.name());
                        app.set_active_tool(kind);
                    }
                }
            });
            ui.label(format!("Active: {}", active.name()));
            ui.separator();

            let mut changed = false;
            {
                let config = app.config_mut();
                ui.label("Stroke");
                changed |= ui
                    .add(Slider::new(&mut config.line_width, 1.0..=20.0).text("width"))
                    .changed();
                changed |= ui
                    .add(Slider::new(&mut config.eraser_size, 2.0..=50.0).text("eraser"))
                    .changed();
                ui.horizontal(|ui| {
                    ui.label("color");
                    changed |= ui
                        .color_edit_button_srgba_unmultiplied(&mut config.stroke_color)
                        .changed();
                });

                ui.separator();
                ui.label("Text");
                changed |= ui.text_edit_singleline(&mut config.default_text).changed();
                changed |= ui
                    .add(Slider::new(&mut config.font_size, 8.0..=96.0).text("size"))
                    .changed();
                ui.horizontal(|ui| {
                    ui.label("color");
                    changed |= ui
                        .color_edit_button_srgba_unmultiplied(&mut config.text_color)
                        .changed();
                });
            }
            if changed {
                app.apply_config();
            }

            ui.separator();
            ui.label("Selection");
            match app.selected_summary() {
                Some(summary) => {
                    ui.label(summary);
                    let step = app.config().rotate_step;
                    ui.horizontal(|ui| {
                        if ui.button(format!("⟲ {step}°")).clicked() {
                            app.rotate_selected(-step);
                        }
                        if ui.button(format!("⟳ {step}°")).clicked() {
                            app.rotate_selected(step);
                        }
                    });
                    if ui.button("Delete").clicked() {
                        app.delete_selected();
                    }
                }
                None => {
                    ui.label("Nothing selected");
                }
            }

            ui.separator();
            if ui.button("Clear drawing").clicked() {
                app.clear_raster();
            }
            ui.label(format!("{} overlay element(s)", app.overlay().len()));
            if app.pending_decodes() > 0 {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Loading {} image(s)", app.pending_decodes()));
                });
            } else {
                ui.label("Drop image files onto the window to add them");
            }

            let mut dismiss = false;
            if let Some(error) = app.last_error() {
                ui.separator();
                ui.label(RichText::new(error).color(Color32::RED));
                dismiss = ui.button("Dismiss").clicked();
            }
            if dismiss {
                app.dismiss_error();
            }
        });
}
