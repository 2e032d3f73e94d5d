/// Route handlers for the climate API
///
/// Each handler translates one parsed request into one storage query (two for
/// the temperature observation route) and shapes the rows for JSON encoding.
/// Handlers borrow the store for the duration of the request and keep no
/// state between requests.

use crate::error::ApiError;
use crate::model::{
    DatedValue, StationEntry, TemperatureSummary, format_date, lookback_cutoff, parse_date,
};
use crate::store::ClimateStore;

/// Static route listing served at `/`.
pub const INDEX_HTML: &str = "Available Routes:<br/>\
    /api/v1.0/precipitation<br/>\
    /api/v1.0/stations<br/>\
    /api/v1.0/tobs<br/>\
    /api/v1.0/&#60YYYY-MM-DD&#62<br/>\
    /api/v1.0/&#60YYYY-MM-DD&#62/&#60YYYY-MM-DD&#62";

/// GET / - list the available API routes.
pub fn index() -> &'static str {
    INDEX_HTML
}

/// GET /api/v1.0/precipitation - every measurement as `{date: prcp}`.
///
/// Missing precipitation values are kept as `null`.
pub fn precipitation(store: &dyn ClimateStore) -> Result<Vec<DatedValue>, ApiError> {
    let rainfall = store
        .all_measurements()?
        .into_iter()
        .map(|m| DatedValue { date: m.date, value: m.prcp })
        .collect();
    Ok(rainfall)
}

/// GET /api/v1.0/stations - station metadata in storage order.
pub fn stations(store: &dyn ClimateStore) -> Result<Vec<StationEntry>, ApiError> {
    let stations = store
        .all_stations()?
        .into_iter()
        .map(StationEntry::from)
        .collect();
    Ok(stations)
}

/// GET /api/v1.0/tobs - observed temperatures for the year before the
/// most recent measurement, ascending by date.
pub fn temperature_observations(store: &dyn ClimateStore) -> Result<Vec<DatedValue>, ApiError> {
    let latest = store.latest_measurement()?.ok_or(ApiError::NoData)?;
    let latest_date = parse_date(&latest.date).ok_or(ApiError::CorruptDate(latest.date))?;
    let cutoff = format_date(lookback_cutoff(latest_date));

    let tobs = store
        .measurements_after(&cutoff)?
        .into_iter()
        .map(|m| DatedValue { date: m.date, value: m.tobs })
        .collect();
    Ok(tobs)
}

/// GET /api/v1.0/{start} - low/average/high temperature from `start` onward.
pub fn summary_from(
    store: &dyn ClimateStore,
    start: &str,
) -> Result<Vec<TemperatureSummary>, ApiError> {
    let start = parse_date_param(start)?;
    let summary = store.temperature_summary(&format_date(start), None)?;
    Ok(vec![summary])
}

/// GET /api/v1.0/{start}/{end} - low/average/high temperature over an
/// inclusive range. Reversed bounds are swapped before querying.
pub fn summary_between(
    store: &dyn ClimateStore,
    start: &str,
    end: &str,
) -> Result<Vec<TemperatureSummary>, ApiError> {
    let mut start = parse_date_param(start)?;
    let mut end = parse_date_param(end)?;
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }

    let summary = store.temperature_summary(&format_date(start), Some(&format_date(end)))?;
    Ok(vec![summary])
}

fn parse_date_param(input: &str) -> Result<chrono::NaiveDate, ApiError> {
    parse_date(input).ok_or_else(|| ApiError::InvalidDate { input: input.to_string() })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
