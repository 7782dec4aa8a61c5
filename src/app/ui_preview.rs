use eframe::egui;

use crate::app::App;

pub fn draw_preview_panel(app: &mut App, ctx: &egui::Context) {
    let url = app.url();

    egui::TopBottomPanel::bottom("preview_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                ui.small("Generated URL Preview");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Copy").on_hover_text("Copy URL").clicked() {
                        app.copy_url(ui.ctx());
                    }
                });
            });

            egui::ScrollArea::vertical()
                .id_salt("url_preview")
                .max_height(96.0)
                .show(ui, |ui| {
                    let mut shown = url.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut shown)
                            .font(egui::TextStyle::Monospace)
                            .text_color(ui.visuals().hyperlink_color)
                            .desired_rows(3)
                            .desired_width(f32::INFINITY),
                    );
                });

            ui.add_space(4.0);

            let width = ui.available_width();
            let launch = ui.add_sized([width, 32.0], egui::Button::new("Launch Query"));
            if launch.clicked() {
                app.launch_url(ui.ctx());
            }

            ui.add_space(4.0);
        });
}
