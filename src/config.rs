use std::time::Duration;

use crate::query::StaticParam;
use crate::timefmt::TimeUnit;

/// A quick-pick button that sets the time range to the last `amount` `unit`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativePreset {
    pub label: &'static str,
    pub amount: u32,
    pub unit: TimeUnit,
}

impl RelativePreset {
    const fn new(label: &'static str, amount: u32, unit: TimeUnit) -> Self {
        Self {
            label,
            amount,
            unit,
        }
    }
}

/// Preset lists and constants the builder screen starts from.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Selectable endpoints; the first one is the initial selection.
    pub base_urls: Vec<String>,
    pub facilities: Vec<String>,
    pub static_params: Vec<StaticParam>,
    pub relative_presets: Vec<RelativePreset>,
    /// Initial time range: the last `default_range.0` `default_range.1`s.
    pub default_range: (u32, TimeUnit),
    /// How long a notification stays in the status bar.
    pub notice_ttl: Duration,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            base_urls: [
                "https://api.timeseries.dev/v1",
                "https://stage.timeseries.dev/v1",
                "https://prod-eu.timeseries.io/query",
                "https://prod-us.timeseries.io/query",
                "http://localhost:8080/api",
            ]
            .map(String::from)
            .to_vec(),
            facilities: [
                "facility-alpha",
                "facility-beta",
                "sensor-cluster-1",
                "sensor-cluster-2",
                "main-generator",
                "backup-generator",
            ]
            .map(String::from)
            .to_vec(),
            static_params: vec![
                StaticParam::new("limit", "500", true),
                StaticParam::new("format", "json", false),
                StaticParam::new("debug", "true", false),
            ],
            relative_presets: vec![
                RelativePreset::new("-15m", 15, TimeUnit::Minutes),
                RelativePreset::new("-1h", 1, TimeUnit::Hours),
                RelativePreset::new("-2h", 2, TimeUnit::Hours),
                RelativePreset::new("-1d", 1, TimeUnit::Days),
                RelativePreset::new("-2d", 2, TimeUnit::Days),
                RelativePreset::new("-5d", 5, TimeUnit::Days),
            ],
            default_range: (1, TimeUnit::Hours),
            notice_ttl: Duration::from_secs(3),
        }
    }
}
