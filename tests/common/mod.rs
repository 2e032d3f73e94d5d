//! Shared fixtures for integration tests
//!
//! Builds a small Hawaii-shaped dataset: three stations and daily
//! measurements around the 2016-08-23 cutoff and through 2017-08-23.

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use climate_service::store::SqliteStore;
use climate_service::store::sqlite::create_schema;
use rusqlite::{Connection, params};

pub const STATIONS: &[(&str, &str, f64, f64, f64)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0),
    ("USC00513117", "KANEOHE 838.1, HI US", 21.4234, -157.8015, 14.6),
    ("USC00519281", "WAIHEE 837.5, HI US", 21.45167, -157.84889, 32.9),
];

/// Latest date present in the fixture.
pub const LAST_DATE: &str = "2017-08-23";

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Insert one measurement per station per day in `[from, to]`.
///
/// Temperatures cycle 60..=85 so ranges have distinct low/high values;
/// every fifth day has no precipitation recorded.
pub fn insert_days(conn: &Connection, from: &str, to: &str) {
    let (from, to) = (date(from), date(to));
    let mut day = from;
    let mut n = 0i64;
    while day <= to {
        for (station, ..) in STATIONS {
            let tobs = 60.0 + (n % 26) as f64;
            let prcp = if n % 5 == 0 { None } else { Some((n % 7) as f64 / 10.0) };
            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
                params![station, day.format("%Y-%m-%d").to_string(), prcp, tobs],
            )
            .unwrap();
            n += 1;
        }
        day += Duration::days(1);
    }
}

pub fn fixture_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn).unwrap();
    for (station, name, lat, lon, elev) in STATIONS {
        conn.execute(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![station, name, lat, lon, elev],
        )
        .unwrap();
    }
    insert_days(&conn, "2016-08-15", "2016-08-31");
    insert_days(&conn, "2017-08-01", LAST_DATE);
    conn
}

pub fn fixture_store() -> SqliteStore {
    SqliteStore::from_connection(fixture_connection()).unwrap()
}

pub fn empty_store() -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn).unwrap();
    SqliteStore::from_connection(conn).unwrap()
}
