//! Comma-separated earthquake feed parsing
//!
//! Rows are read by position: `timestamp, latitude, longitude, depth,
//! magnitude, ...`. Anything after the magnitude column is ignored, so quoted
//! place names later in a USGS row never reach the splitter's attention.
//! A bad row is reported and skipped; it never aborts the rest of the feed.

use crate::core::{config::HeaderPolicy, geo::LatLng};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FIELD: usize = 0;
const LATITUDE_FIELD: usize = 1;
const LONGITUDE_FIELD: usize = 2;
const DEPTH_FIELD: usize = 3;
const MAGNITUDE_FIELD: usize = 4;
const REQUIRED_FIELDS: usize = MAGNITUDE_FIELD + 1;

/// One event parsed from one feed row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeEvent {
    /// Kept verbatim; never interpreted.
    pub timestamp: String,
    pub location: LatLng,
    pub depth: Option<f64>,
    pub magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedParseError {
    #[error("row has {found} fields, field {index} is missing")]
    MissingField { index: usize, found: usize },
    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}

/// A row that was dropped, with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub error: FeedParseError,
}

/// Events parsed from a whole feed, in row order, plus the rows that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedReport {
    pub events: Vec<EarthquakeEvent>,
    pub skipped: Vec<SkippedRow>,
    pub header_skipped: bool,
}

impl FeedReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn parse_number(fields: &[&str], index: usize, field: &'static str) -> Result<f64, FeedParseError> {
    let raw = fields.get(index).ok_or(FeedParseError::MissingField {
        index,
        found: fields.len(),
    })?;
    let value = raw
        .parse::<f64>()
        .map_err(|_| FeedParseError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    if !value.is_finite() {
        return Err(FeedParseError::InvalidNumber {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn check_range(value: f64, limit: f64, field: &'static str) -> Result<f64, FeedParseError> {
    if (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(FeedParseError::OutOfRange { field, value })
    }
}

/// Parses one feed row into an event.
pub fn parse_row(line: &str) -> Result<EarthquakeEvent, FeedParseError> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(FeedParseError::MissingField {
            index: fields.len(),
            found: fields.len(),
        });
    }

    let lat = check_range(parse_number(&fields, LATITUDE_FIELD, "latitude")?, 90.0, "latitude")?;
    let lng = check_range(
        parse_number(&fields, LONGITUDE_FIELD, "longitude")?,
        180.0,
        "longitude",
    )?;
    let depth = if fields[DEPTH_FIELD].is_empty() {
        None
    } else {
        Some(parse_number(&fields, DEPTH_FIELD, "depth")?)
    };
    let magnitude = parse_number(&fields, MAGNITUDE_FIELD, "magnitude")?;

    Ok(EarthquakeEvent {
        timestamp: fields[TIMESTAMP_FIELD].to_string(),
        location: LatLng::new(lat, lng),
        depth,
        magnitude,
    })
}

/// A header has a full row of columns and a non-numeric latitude column.
/// Shorter rows are left to `parse_row` so they are reported as skipped.
fn looks_like_header(line: &str) -> bool {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    fields.len() >= REQUIRED_FIELDS && fields[LATITUDE_FIELD].parse::<f64>().is_err()
}

/// Parses every non-blank row of `text`, skipping failures with a warning.
pub fn parse_feed(text: &str, header: HeaderPolicy) -> FeedReport {
    let mut report = FeedReport::default();
    let mut rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .peekable();

    if let Some(&(line_no, first)) = rows.peek() {
        let skip = match header {
            HeaderPolicy::Skip => true,
            HeaderPolicy::Keep => false,
            HeaderPolicy::Auto => looks_like_header(first),
        };
        if skip {
            log::debug!("skipping header row {}: {}", line_no, first);
            report.header_skipped = true;
            rows.next();
        }
    }

    for (line_no, line) in rows {
        match parse_row(line) {
            Ok(event) => report.events.push(event),
            Err(error) => {
                log::warn!("skipping feed row {}: {}", line_no, error);
                report.skipped.push(SkippedRow {
                    line: line_no,
                    error,
                });
            }
        }
    }

    log::info!(
        "parsed {} events ({} rows skipped)",
        report.events.len(),
        report.skipped.len()
    );
    report
}
