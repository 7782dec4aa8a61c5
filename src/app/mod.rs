use std::time::Instant;

use eframe::egui;

use crate::config::BuilderConfig;
use crate::query::{QueryFormState, Severity, TimeRangeSpec};
use crate::timefmt::{Clock, SystemClock, TimeError, TimeUnit};

pub mod state;
pub mod status_bar;
pub mod ui_form;
pub mod ui_preview;
pub mod ui_top;

use state::{Notice, Theme};

pub struct App {
    pub(crate) config: BuilderConfig,
    pub(crate) form: QueryFormState,
    /// Text box contents for a facility not in the predefined list.
    pub(crate) custom_facility: String,
    pub(crate) notice: Option<Notice>,
    pub(crate) theme: Theme,
    clock: Box<dyn Clock>,
}

impl App {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: BuilderConfig,
    ) -> Result<Self, TimeError> {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: BuilderConfig, clock: Box<dyn Clock>) -> Result<Self, TimeError> {
        let form = QueryFormState::new(&config, clock.as_ref())?;
        tracing::info!(base_url = %form.base_url, "query builder ready");
        Ok(Self {
            config,
            form,
            custom_facility: String::new(),
            notice: None,
            theme: Theme::Dark,
            clock,
        })
    }

    pub fn url(&self) -> String {
        self.form.url()
    }

    pub(crate) fn set_relative_range(&mut self, amount: u32, unit: TimeUnit) {
        match TimeRangeSpec::relative(self.clock.as_ref(), amount, unit) {
            Ok(range) => {
                tracing::debug!(start = %range.start, end = %range.end, "time range updated");
                self.form.time_range = range;
                self.notify("Time Updated", format!("Set range to last {amount} {unit}"));
            }
            Err(err) => tracing::warn!(error = %err, "relative time range rejected"),
        }
    }

    pub(crate) fn add_facility(&mut self, name: &str) {
        if self.form.facilities.add(name) {
            tracing::debug!(facility = name, "facility added");
        }
    }

    /// Adds the typed facility and clears the input; duplicates leave both untouched.
    pub(crate) fn add_custom_facility(&mut self) {
        if self.form.facilities.add(self.custom_facility.as_str()) {
            tracing::debug!(facility = %self.custom_facility, "custom facility added");
            self.custom_facility.clear();
        }
    }

    pub(crate) fn remove_facility(&mut self, name: &str) {
        if self.form.facilities.remove(name) {
            tracing::debug!(facility = name, "facility removed");
        }
    }

    pub(crate) fn toggle_severity(&mut self, severity: Severity) {
        self.form.severities.toggle(severity);
    }

    pub(crate) fn copy_url(&mut self, ctx: &egui::Context) {
        let url = self.url();
        tracing::debug!(%url, "copying URL to clipboard");
        ctx.copy_text(url);
        self.notify("Copied!", "URL copied to clipboard");
    }

    pub(crate) fn launch_url(&self, ctx: &egui::Context) {
        let url = self.url();
        tracing::info!(%url, "launching query");
        ctx.open_url(egui::OpenUrl::new_tab(url));
    }

    fn notify(&mut self, title: &str, description: impl Into<String>) {
        self.notice = Some(Notice::new(title, description));
    }

    fn expire_notice(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let ttl = self.config.notice_ttl;
        let Some(notice) = &self.notice else {
            return;
        };
        if notice.is_expired(ttl, now) {
            self.notice = None;
        } else {
            ctx.request_repaint_after(notice.remaining(ttl, now));
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals());

        self.expire_notice(ctx);

        ui_top::draw_top_bar(self, ctx);
        status_bar::draw_status_bar(self, ctx);
        ui_preview::draw_preview_panel(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| ui_form::draw_form(self, ui));
        });
    }
}
