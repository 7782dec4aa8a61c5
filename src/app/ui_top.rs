use eframe::egui;

use crate::app::App;

pub fn draw_top_bar(app: &mut App, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Query Builder");

            ui.separator();

            ui.label(
                egui::RichText::new("Construct time-series queries for your data sources.")
                    .weak(),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(concat!("v", env!("CARGO_PKG_VERSION"))).monospace());

                ui.separator();

                if ui.button(app.theme.label()).clicked() {
                    app.theme = app.theme.next();
                }
            });
        });
    });
}
