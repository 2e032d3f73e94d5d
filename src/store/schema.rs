//! Statically declared schema for the climate dataset.
//!
//! The dataset ships pre-built; this module names the tables and columns the
//! service reads so they can be verified once at startup instead of being
//! discovered at runtime.

/// Measurement table name.
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Station table name.
pub const STATION_TABLE: &str = "station";

/// Columns read from `measurement`, in query order.
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Columns read from `station`, in query order.
pub const STATION_COLUMNS: &[&str] = &["station", "name", "latitude", "longitude", "elevation"];

/// Every table the service requires, with its required columns.
pub const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    (MEASUREMENT_TABLE, MEASUREMENT_COLUMNS),
    (STATION_TABLE, STATION_COLUMNS),
];

/// SQLite DDL matching the layout of `hawaii.sqlite`.
///
/// Used to build fixture databases; the production dataset already has it.
pub const SQLITE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);

    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
"#;

/// Returns the first required column absent from `present`, if any.
pub fn first_missing_column<'a>(required: &[&'a str], present: &[String]) -> Option<&'a str> {
    required
        .iter()
        .copied()
        .find(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
}
