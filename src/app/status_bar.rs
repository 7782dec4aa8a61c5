use eframe::egui;

use crate::app::App;

pub fn draw_status_bar(app: &App, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                use egui::Align;

                match &app.notice {
                    Some(notice) => {
                        ui.strong(notice.title.as_str());
                        ui.label(notice.description.as_str());
                    }
                    None => {
                        ui.label("Ready");
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    ui.label(compute_summary(app));
                });
            });
        });
}

fn compute_summary(app: &App) -> String {
    let form = &app.form;
    let active = form.static_params.iter().filter(|p| p.is_emitted()).count();
    format!(
        "Facilities: {} | Severities: {} | Static: {}",
        form.facilities.len(),
        form.severities.iter().count(),
        active
    )
}
