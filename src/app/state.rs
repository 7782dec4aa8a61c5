use std::time::{Duration, Instant};

use eframe::egui;

use crate::query::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    RetroGreen,
}

impl Theme {
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::RetroGreen,
            Theme::RetroGreen => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Theme: Light",
            Theme::Dark => "Theme: Dark",
            Theme::RetroGreen => "Theme: Retro",
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
            Theme::RetroGreen => {
                let mut visuals = egui::Visuals::dark();
                visuals.override_text_color = Some(egui::Color32::from_rgb(0x00, 0xff, 0x66));
                visuals.panel_fill = egui::Color32::BLACK;
                visuals.extreme_bg_color = egui::Color32::BLACK;
                visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x00, 0x20, 0x00);
                visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x00, 0x40, 0x00);
                visuals.widgets.active.bg_fill = egui::Color32::from_rgb(0x00, 0x60, 0x00);
                visuals
            }
        }
    }

    pub fn severity_color(self, severity: Severity) -> egui::Color32 {
        match (self, severity) {
            (Theme::RetroGreen, Severity::Error) => egui::Color32::from_rgb(0xff, 0x40, 0x40),
            (Theme::RetroGreen, Severity::Warning) => egui::Color32::from_rgb(0xff, 0xff, 0x80),
            (Theme::RetroGreen, Severity::Info) => egui::Color32::from_rgb(0x00, 0xff, 0x66),
            (_, Severity::Error) => egui::Color32::from_rgb(0xf8, 0x71, 0x71),
            (_, Severity::Warning) => egui::Color32::from_rgb(0xfa, 0xcc, 0x15),
            (_, Severity::Info) => egui::Color32::from_rgb(0x60, 0xa5, 0xfa),
        }
    }
}

/// Transient confirmation shown in the status bar.
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= ttl
    }

    /// Time left before expiry, for scheduling the repaint that clears it.
    pub fn remaining(&self, ttl: Duration, now: Instant) -> Duration {
        ttl.saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
