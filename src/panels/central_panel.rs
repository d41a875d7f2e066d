use egui::{Color32, ScrollArea, Sense};

use crate::CanvasBoardApp;

pub fn central_panel(app: &mut CanvasBoardApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(Color32::from_gray(60)))
        .show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                let (response, painter) = ui.allocate_painter(app.config().canvas_size(), Sense::click_and_drag());
                let canvas_rect = response.rect;

                app.handle_input(ctx, canvas_rect, painter.clip_rect());
                app.paint_canvas(ctx, &painter, canvas_rect, response.hover_pos());
            });
        });
}
