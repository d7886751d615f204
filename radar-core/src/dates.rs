//! Canonical calendar date range

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RadarError, RadarResult};

/// An inclusive calendar date range
///
/// This is the single canonical type every loosely-typed date expression
/// resolves into. Single-date operations use [`DateRange::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> RadarResult<Self> {
        if end < start {
            return Err(RadarError::validation_with(
                format!("invalid date range: end {end} precedes start {start}"),
                "use {\"start\": \"YYYY-MM-DD\", \"end\": \"YYYY-MM-DD\"} with start <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Range covering a single date
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Every date in the range, in order
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let days = (self.end - self.start).num_days();
        (0..=days).map(move |offset| self.start + Duration::days(offset))
    }
}
