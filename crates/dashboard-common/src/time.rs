//! Date handling and CF time-coordinate decoding.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{PrepError, PrepResult};

/// Date format used in every CSV and JSON file we write.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_iso_date(s: &str) -> PrepResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| PrepError::InvalidDate(s.to_string()))
}

/// The calendar day after `date`.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

/// Unit of a CF time coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStep {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeStep {
    fn seconds(self) -> f64 {
        match self {
            TimeStep::Seconds => 1.0,
            TimeStep::Minutes => 60.0,
            TimeStep::Hours => 3600.0,
            TimeStep::Days => 86400.0,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            TimeStep::Seconds => "seconds",
            TimeStep::Minutes => "minutes",
            TimeStep::Hours => "hours",
            TimeStep::Days => "days",
        }
    }
}

/// Parsed CF `units` attribute of a time coordinate, e.g.
/// `"seconds since 1981-01-01 00:00:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfTimeUnits {
    pub step: TimeStep,
    pub epoch: NaiveDateTime,
}

impl CfTimeUnits {
    /// Units written to every time axis we produce.
    pub fn unix_seconds() -> Self {
        Self {
            step: TimeStep::Seconds,
            epoch: NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap_or_default()
                .and_time(NaiveTime::MIN),
        }
    }

    /// Parse a CF units string.
    pub fn parse(units: &str) -> PrepResult<Self> {
        let invalid = || PrepError::InvalidTimeUnits(units.to_string());

        let (step, origin) = units.trim().split_once(" since ").ok_or_else(invalid)?;
        let step = match step.trim().to_lowercase().as_str() {
            "second" | "seconds" | "sec" | "secs" | "s" => TimeStep::Seconds,
            "minute" | "minutes" | "min" | "mins" => TimeStep::Minutes,
            "hour" | "hours" | "hr" | "hrs" | "h" => TimeStep::Hours,
            "day" | "days" | "d" => TimeStep::Days,
            _ => return Err(invalid()),
        };

        let origin = origin
            .trim()
            .trim_end_matches("UTC")
            .trim_end_matches('Z')
            .trim()
            .replace('T', " ");
        let epoch = NaiveDateTime::parse_from_str(&origin, "%Y-%m-%d %H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&origin, "%Y-%m-%d %H:%M"))
            .or_else(|_| NaiveDate::parse_from_str(&origin, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
            .map_err(|_| invalid())?;

        Ok(Self { step, epoch })
    }

    /// Convert a raw coordinate value to a datetime.
    pub fn decode(&self, value: f64) -> NaiveDateTime {
        let millis = (value * self.step.seconds() * 1000.0).round() as i64;
        self.epoch + Duration::milliseconds(millis)
    }

    /// Convert a datetime to a raw coordinate value.
    pub fn encode(&self, time: NaiveDateTime) -> f64 {
        let millis = (time - self.epoch).num_milliseconds() as f64;
        millis / 1000.0 / self.step.seconds()
    }

    /// Render back to a CF units string.
    pub fn to_units_string(&self) -> String {
        format!("{} since {}", self.step.keyword(), self.epoch.format("%Y-%m-%d %H:%M:%S"))
    }
}
