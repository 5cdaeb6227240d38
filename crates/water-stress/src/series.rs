//! Contiguous daily series.

use chrono::NaiveDate;
use dashboard_common::next_day;

use crate::error::{StressError, StressResult};

/// `(date, value)` pairs exactly one day apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    points: Vec<(NaiveDate, f64)>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from points, checking contiguity.
    pub fn from_points<I>(points: I) -> StressResult<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut series = Self::new();
        for (date, value) in points {
            series.push(date, value)?;
        }
        Ok(series)
    }

    /// Append a value. The date must be the day after the last one.
    pub fn push(&mut self, date: NaiveDate, value: f64) -> StressResult<()> {
        if let Some(previous) = self.last_date() {
            if date != next_day(previous) {
                return Err(StressError::NotContiguous { previous, next: date });
            }
        }
        self.points.push((date, value));
        Ok(())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|(d, _)| *d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(d, _)| *d)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }
}
