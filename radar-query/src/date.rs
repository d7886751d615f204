//! Date expression resolution
//!
//! Callers pass dates in several shapes: an ISO date string, a relative
//! expression ("today", "3 days ago"), a `{start, end}` range object, or
//! even a string that is itself a JSON-serialized range. Every
//! shape resolves into one canonical [`DateRange`] here; no ad hoc type
//! sniffing happens at call sites.

use chrono::{Duration, NaiveDate};
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use radar_core::{DateRange, RadarError, RadarResult};

/// A date expression as received from the caller
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateExpr {
    /// Structured range object
    Range(RangeSpec),
    /// Anything textual: ISO date, relative keyword, or serialized range
    Text(String),
}

impl DateExpr {
    pub fn text(s: impl Into<String>) -> Self {
        DateExpr::Text(s.into())
    }
}

/// Raw `{start, end}` pair before endpoint resolution
#[derive(Debug, Clone, Deserialize)]
pub struct RangeSpec {
    pub start: String,
    pub end: String,
}

/// Resolve an expression into a canonical range
///
/// Strategy order for text input: serialized range first, then relative
/// keyword, then literal ISO date. First success wins. `today` is supplied
/// by the caller so resolution stays pure.
pub fn resolve_date_range(expr: &DateExpr, today: NaiveDate) -> RadarResult<DateRange> {
    match expr {
        DateExpr::Range(spec) => resolve_range(spec, today),
        DateExpr::Text(text) => resolve_text(text, today),
    }
}

fn resolve_range(spec: &RangeSpec, today: NaiveDate) -> RadarResult<DateRange> {
    let start = resolve_single(&spec.start, today)?;
    let end = resolve_single(&spec.end, today)?;
    DateRange::new(start, end)
}

fn resolve_text(text: &str, today: NaiveDate) -> RadarResult<DateRange> {
    let text = text.trim();

    // Callers occasionally double-encode the range object as a string.
    if let Ok(spec) = serde_json::from_str::<RangeSpec>(text) {
        debug!("resolved double-encoded date range: {text}");
        return resolve_range(&spec, today);
    }

    resolve_single(text, today).map(DateRange::single)
}

/// One date: relative keyword first, then literal ISO
fn resolve_single(text: &str, today: NaiveDate) -> RadarResult<NaiveDate> {
    let text = text.trim();

    match text {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        "day before yesterday" => return Ok(today - Duration::days(2)),
        _ => {}
    }

    if let Some(days) = parse_days_ago(text) {
        return Ok(today - Duration::days(days));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
        RadarError::validation_with(
            format!("unparsable date expression: {text:?}"),
            "use YYYY-MM-DD, a relative expression like \"yesterday\", \
             or a {\"start\", \"end\"} range",
        )
    })
}

fn parse_days_ago(text: &str) -> Option<i64> {
    let pattern = Regex::new(r"^(\d{1,4}) days? ago$").ok()?;
    pattern
        .captures(text)?
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
}
