use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, TimeDelta, TimeZone};
use thiserror::Error;

/// Pattern for the `YY.DOY.HH.MM.SS.mmm` timestamps the query API expects.
const TIMESTAMP_FORMAT: &str = "%y.%j.%H.%M.%S.%3f";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("unknown time unit {0:?} (expected minutes, hours or days)")]
    UnknownUnit(String),

    #[error("{amount} {unit} before now is outside the representable time range")]
    OutOfRange { amount: u32, unit: TimeUnit },
}

/// Source of "now". Everything that samples wall-clock time goes through this.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    pub fn at<Tz: TimeZone>(instant: DateTime<Tz>) -> Self {
        Self(instant.with_timezone(&Local))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn seconds(self) -> i64 {
        match self {
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 60 * 60,
            TimeUnit::Days => 24 * 60 * 60,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minutes" => Ok(TimeUnit::Minutes),
            "hours" => Ok(TimeUnit::Hours),
            "days" => Ok(TimeUnit::Days),
            other => Err(TimeError::UnknownUnit(other.to_string())),
        }
    }
}

/// Render an instant as `YY.DOY.HH.MM.SS.mmm` in the instant's own time zone.
///
/// No zone marker is emitted; callers pass `DateTime<Local>` for local time.
pub fn format_timestamp<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// `now - amount * unit`, with "now" taken from `clock` once.
pub fn relative_instant(
    clock: &dyn Clock,
    amount: u32,
    unit: TimeUnit,
) -> Result<DateTime<Local>, TimeError> {
    offset_from(clock.now(), amount, unit)
}

pub(crate) fn offset_from(
    now: DateTime<Local>,
    amount: u32,
    unit: TimeUnit,
) -> Result<DateTime<Local>, TimeError> {
    let out_of_range = || TimeError::OutOfRange { amount, unit };

    let delta =
        TimeDelta::try_seconds(i64::from(amount) * unit.seconds()).ok_or_else(out_of_range)?;
    now.checked_sub_signed(delta).ok_or_else(out_of_range)
}
