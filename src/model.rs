/// Measurement, Station, TemperatureSummary, DatedValue
/// core data structures shared by the store, the handlers and the endpoint.
///
/// Record types mirror the two tables of the Hawaii climate dataset. They are
/// read-only projections: nothing in this service creates or mutates them.

use chrono::{Duration, NaiveDate};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Date conventions
// ---------------------------------------------------------------------------

/// Storage and path-parameter date format. Dates in this format sort
/// lexicographically in calendar order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "last year" window used by the temperature observation route.
pub const LOOKBACK_DAYS: i64 = 365;

/// Parses a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

/// Formats a calendar date back into the storage format.
///
/// Filters are always built from the formatted value so that inputs like
/// `2016-1-5` compare correctly against stored `2016-01-05` strings.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Cutoff for the "last year" window: `latest` minus 365 calendar days.
pub fn lookback_cutoff(latest: NaiveDate) -> NaiveDate {
    latest - Duration::days(LOOKBACK_DAYS)
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single daily observation at a station.
///
/// Dates are not guaranteed unique per station. Either value may be missing
/// in the source dataset and is carried through as `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub date: String,              // "YYYY-MM-DD"
    pub prcp: Option<f64>,         // precipitation, inches
    pub tobs: Option<f64>,         // observed temperature, °F
}

/// Weather station metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub station: String,           // unique identifier, e.g. "USC00519397"
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A `{ "<date>": value }` entry, the shape used by the precipitation and
/// temperature observation listings.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedValue {
    pub date: String,
    pub value: Option<f64>,
}

impl Serialize for DatedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

/// Station entry in the station listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationEntry {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<Station> for StationEntry {
    fn from(station: Station) -> Self {
        StationEntry {
            station_id: station.station,
            name: station.name,
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
        }
    }
}

/// Aggregate summary of observed temperature over a date range.
///
/// All three fields are `None` when no measurement falls inside the range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TemperatureSummary {
    pub low: Option<f64>,
    pub average: Option<f64>,
    pub high: Option<f64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
