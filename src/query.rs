//! Query form model and the URL it produces.
//!
//! Parameters are emitted in a fixed order: `start`, `end`, every `facility`,
//! every selected severity as `s`, the message filter as `m`, then active
//! static parameters. Timestamps, static keys and the base URL are written
//! verbatim; every other value is percent-encoded as a URL component.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::config::BuilderConfig;
use crate::timefmt::{self, Clock, TimeError, TimeUnit};

/// Shown in place of the URL when construction fails.
pub const URL_ERROR_SENTINEL: &str = "Error constructing URL";

/// URL component encoding: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to write query URL: {0}")]
    Format(#[from] fmt::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRangeSpec {
    pub start: String,
    pub end: String,
}

impl TimeRangeSpec {
    /// Range ending now and starting `amount` `unit`s earlier.
    pub fn relative(clock: &dyn Clock, amount: u32, unit: TimeUnit) -> Result<Self, TimeError> {
        let now = clock.now();
        let start = timefmt::offset_from(now, amount, unit)?;
        Ok(Self {
            start: timefmt::format_timestamp(&start),
            end: timefmt::format_timestamp(&now),
        })
    }
}

/// Ordered facility names without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilitySet {
    entries: Vec<String>,
}

impl FacilitySet {
    /// Appends `name` unless it is empty or already present.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.contains(&name) {
            return false;
        }
        self.entries.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|f| f != name);
        self.entries.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|f| f == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for FacilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FacilitySet::default();
        for name in iter {
            set.add(name);
        }
        set
    }
}

/// Variant order is the canonical output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Warning, Severity::Error];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown severity {0:?} (expected INFO, Warning or Error)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.label() == s)
            .ok_or_else(|| UnknownSeverity(s.to_string()))
    }
}

/// Selected severities. Iteration is always INFO, Warning, Error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeveritySet(BTreeSet<Severity>);

impl SeveritySet {
    pub fn all() -> Self {
        Severity::ALL.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, severity: Severity) {
        if !self.0.remove(&severity) {
            self.0.insert(severity);
        }
    }

    pub fn insert(&mut self, severity: Severity) -> bool {
        self.0.insert(severity)
    }

    pub fn remove(&mut self, severity: Severity) -> bool {
        self.0.remove(&severity)
    }

    pub fn contains(&self, severity: Severity) -> bool {
        self.0.contains(&severity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Severity> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Severity> for SeveritySet {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    pub text: String,
    pub is_regex: bool,
}

impl MessageFilter {
    /// The quoted literal sent as `m`, or `None` when there is no text.
    pub fn literal(&self) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        let prefix = if self.is_regex { "~" } else { "" };
        Some(format!("{prefix}\"{}\"", self.text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticParam {
    pub key: String,
    pub value: String,
    pub active: bool,
}

impl StaticParam {
    pub fn new(key: impl Into<String>, value: impl Into<String>, active: bool) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            active,
        }
    }

    /// Active with a non-empty key.
    pub fn is_emitted(&self) -> bool {
        self.active && !self.key.is_empty()
    }
}

/// Ordered static parameter rows. Index-based updates ignore missing rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticParams {
    rows: Vec<StaticParam>,
}

impl StaticParams {
    pub fn set_key(&mut self, index: usize, key: impl Into<String>) -> bool {
        self.update(index, |row| row.key = key.into())
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.update(index, |row| row.value = value.into())
    }

    pub fn toggle_active(&mut self, index: usize) -> bool {
        self.update(index, |row| row.active = !row.active)
    }

    pub fn push(&mut self, param: StaticParam) {
        self.rows.push(param);
    }

    pub fn remove(&mut self, index: usize) -> Option<StaticParam> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&StaticParam> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaticParam> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn update(&mut self, index: usize, f: impl FnOnce(&mut StaticParam)) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                f(row);
                true
            }
            None => false,
        }
    }
}

impl FromIterator<StaticParam> for StaticParams {
    fn from_iter<I: IntoIterator<Item = StaticParam>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFormState {
    pub base_url: String,
    pub time_range: TimeRangeSpec,
    pub facilities: FacilitySet,
    pub severities: SeveritySet,
    pub message: MessageFilter,
    pub static_params: StaticParams,
}

impl QueryFormState {
    /// Initial screen state: first base URL, the default relative range, all
    /// severities and the preset static parameters.
    pub fn new(config: &BuilderConfig, clock: &dyn Clock) -> Result<Self, TimeError> {
        let (amount, unit) = config.default_range;
        Ok(Self {
            base_url: config.base_urls.first().cloned().unwrap_or_default(),
            time_range: TimeRangeSpec::relative(clock, amount, unit)?,
            facilities: FacilitySet::default(),
            severities: SeveritySet::all(),
            message: MessageFilter::default(),
            static_params: config.static_params.iter().cloned().collect(),
        })
    }

    pub fn url(&self) -> String {
        build_query_url(self)
    }
}

/// Builds the query URL, falling back to [`URL_ERROR_SENTINEL`] on failure.
pub fn build_query_url(state: &QueryFormState) -> String {
    try_build_query_url(state).unwrap_or_else(|err| {
        tracing::warn!(error = %err, base_url = %state.base_url, "query URL construction failed");
        URL_ERROR_SENTINEL.to_string()
    })
}

pub fn try_build_query_url(state: &QueryFormState) -> Result<String, QueryError> {
    let mut url = state.base_url.clone();
    if !url.ends_with('/') {
        url.push('/');
    }
    let mut out = QueryWriter { url, has_params: false };

    let range = &state.time_range;
    if !range.start.is_empty() {
        out.param("start", &range.start)?;
    }
    if !range.end.is_empty() {
        out.param("end", &range.end)?;
    }

    for facility in state.facilities.iter() {
        out.param("facility", encode(facility))?;
    }

    for severity in state.severities.iter() {
        out.param("s", encode(severity.label()))?;
    }

    if let Some(literal) = state.message.literal() {
        out.param("m", encode(&literal))?;
    }

    for param in state.static_params.iter().filter(|p| p.is_emitted()) {
        out.param(&param.key, encode(&param.value))?;
    }

    Ok(out.url)
}

fn encode(value: &str) -> impl fmt::Display + '_ {
    utf8_percent_encode(value, COMPONENT)
}

struct QueryWriter {
    url: String,
    has_params: bool,
}

impl QueryWriter {
    fn param(&mut self, key: &str, value: impl fmt::Display) -> fmt::Result {
        self.url.push(if self.has_params { '&' } else { '?' });
        self.has_params = true;
        write!(self.url, "{key}={value}")
    }
}
