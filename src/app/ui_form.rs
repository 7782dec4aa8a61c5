use eframe::egui;

use crate::app::App;
use crate::query::{Severity, StaticParam};

const TIMESTAMP_HINT: &str = "yy.DDD.hh.mm.ss.SSS";

/// One edit to a static parameter row, collected while drawing and applied afterwards.
enum RowEdit {
    ToggleActive,
    Key(String),
    Value(String),
}

pub fn draw_form(app: &mut App, ui: &mut egui::Ui) {
    ui.columns(2, |cols| {
        draw_query_controls(app, &mut cols[0]);
        draw_parameter_controls(app, &mut cols[1]);
    });
}

fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.add_space(6.0);
    ui.label(egui::RichText::new(title).strong().color(ui.visuals().hyperlink_color));
    ui.add_space(2.0);
}

fn draw_query_controls(app: &mut App, ui: &mut egui::Ui) {
    section_heading(ui, "Base Configuration");

    let combo_width = ui.available_width();
    egui::ComboBox::from_id_salt("base_url_combo")
        .selected_text(egui::RichText::new(app.form.base_url.as_str()).monospace())
        .width(combo_width)
        .show_ui(ui, |ui| {
            for url in &app.config.base_urls {
                ui.selectable_value(
                    &mut app.form.base_url,
                    url.clone(),
                    egui::RichText::new(url.as_str()).monospace(),
                );
            }
        });
    ui.add(
        egui::TextEdit::singleline(&mut app.form.base_url)
            .hint_text("Custom base URL")
            .font(egui::TextStyle::Monospace)
            .desired_width(f32::INFINITY),
    );

    section_heading(ui, "Time Range");

    ui.horizontal(|ui| {
        let field_width = (ui.available_width() / 2.0 - 8.0).max(120.0);
        ui.vertical(|ui| {
            ui.small("Start Time");
            ui.add(
                egui::TextEdit::singleline(&mut app.form.time_range.start)
                    .hint_text(TIMESTAMP_HINT)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(field_width),
            );
        });
        ui.vertical(|ui| {
            ui.small("End Time");
            ui.add(
                egui::TextEdit::singleline(&mut app.form.time_range.end)
                    .hint_text(TIMESTAMP_HINT)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(field_width),
            );
        });
    });

    let presets = app.config.relative_presets.clone();
    ui.horizontal_wrapped(|ui| {
        for preset in presets {
            if ui.small_button(preset.label).clicked() {
                app.set_relative_range(preset.amount, preset.unit);
            }
        }
    });

    section_heading(ui, "Filters");

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());

        ui.small("Severity");
        ui.horizontal(|ui| {
            for severity in Severity::ALL {
                let mut checked = app.form.severities.contains(severity);
                let label = egui::RichText::new(severity.label())
                    .color(app.theme.severity_color(severity));
                if ui.checkbox(&mut checked, label).changed() {
                    app.toggle_severity(severity);
                }
            }
        });

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.small("Message Filter");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut app.form.message.is_regex, "Regex (~)");
            });
        });

        let (marker, hint) = if app.form.message.is_regex {
            ("~", "e.g. ^[0-9]+ error")
        } else {
            ("T", "e.g. connection timeout")
        };
        ui.horizontal(|ui| {
            ui.monospace(marker);
            ui.add(
                egui::TextEdit::singleline(&mut app.form.message.text)
                    .hint_text(hint)
                    .desired_width(f32::INFINITY),
            );
        });
    });
}

fn draw_parameter_controls(app: &mut App, ui: &mut egui::Ui) {
    section_heading(ui, "Facilities");

    let mut picked: Option<String> = None;
    let combo_width = ui.available_width();
    egui::ComboBox::from_id_salt("facility_combo")
        .selected_text("Add predefined...")
        .width(combo_width)
        .show_ui(ui, |ui| {
            for name in &app.config.facilities {
                let selected = app.form.facilities.contains(name);
                if ui.selectable_label(selected, name.as_str()).clicked() {
                    picked = Some(name.clone());
                }
            }
        });
    if let Some(name) = picked {
        app.add_facility(&name);
    }

    ui.horizontal(|ui| {
        let input_width = (ui.available_width() - 32.0).max(80.0);
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.custom_facility)
                .hint_text("Custom facility...")
                .desired_width(input_width),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("+").clicked() || submitted {
            app.add_custom_facility();
        }
    });

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(48.0);

        if app.form.facilities.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.weak("No facilities selected");
            });
            return;
        }

        let mut removed: Option<String> = None;
        ui.horizontal_wrapped(|ui| {
            for name in app.form.facilities.iter() {
                if ui
                    .button(format!("{name}  ✕"))
                    .on_hover_text("Remove facility")
                    .clicked()
                {
                    removed = Some(name.to_string());
                }
            }
        });
        if let Some(name) = removed {
            app.remove_facility(&name);
        }
    });

    section_heading(ui, "Static Parameters");

    let mut edits: Vec<(usize, RowEdit)> = Vec::new();
    let mut removed: Option<usize> = None;

    for (idx, param) in app.form.static_params.iter().enumerate() {
        ui.horizontal(|ui| {
            let mut active = param.active;
            if ui.checkbox(&mut active, "").changed() {
                edits.push((idx, RowEdit::ToggleActive));
            }

            let dimmed = (!param.active).then(|| ui.visuals().weak_text_color());

            let mut key = param.key.clone();
            let key_edit = egui::TextEdit::singleline(&mut key)
                .hint_text("Key")
                .font(egui::TextStyle::Monospace)
                .text_color_opt(dimmed)
                .desired_width(90.0);
            if ui.add(key_edit).changed() {
                edits.push((idx, RowEdit::Key(key)));
            }

            ui.weak("=");

            let mut value = param.value.clone();
            let value_width = (ui.available_width() - 28.0).max(60.0);
            let value_edit = egui::TextEdit::singleline(&mut value)
                .hint_text("Value")
                .font(egui::TextStyle::Monospace)
                .text_color_opt(dimmed)
                .desired_width(value_width);
            if ui.add(value_edit).changed() {
                edits.push((idx, RowEdit::Value(value)));
            }

            if ui.small_button("✕").on_hover_text("Remove parameter").clicked() {
                removed = Some(idx);
            }
        });
    }

    for (idx, edit) in edits {
        let params = &mut app.form.static_params;
        match edit {
            RowEdit::ToggleActive => params.toggle_active(idx),
            RowEdit::Key(key) => params.set_key(idx, key),
            RowEdit::Value(value) => params.set_value(idx, value),
        };
    }
    if let Some(idx) = removed {
        app.form.static_params.remove(idx);
    }

    if ui.small_button("+ Add parameter").clicked() {
        app.form.static_params.push(StaticParam::new("", "", true));
    }
}
