/// SQLite-backed climate store
///
/// Opens the pre-built `hawaii.sqlite` dataset read-only and serves every
/// query through a single connection guarded by a mutex.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags, Row, params};

use super::ClimateStore;
use super::schema::{REQUIRED_TABLES, SQLITE_DDL, first_missing_column};
use crate::error::StoreError;
use crate::model::{Measurement, Station, TemperatureSummary};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open an existing dataset file read-only and verify its schema.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::MissingDataset(path.display().to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )?;

        log::debug!("Opened SQLite dataset {}", path.display());
        Self::from_connection(conn)
    }

    /// Wrap an already-open connection, verifying the schema first.
    ///
    /// Tests use this with an in-memory database populated via
    /// [`create_schema`].
    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        verify_schema(&conn)?;
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::ConnectionPoisoned)
    }
}

/// Create the measurement and station tables on a fresh connection.
pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(SQLITE_DDL)?;
    Ok(())
}

/// Verify every required table and column is present.
pub fn verify_schema(conn: &Connection) -> Result<(), StoreError> {
    for (table, columns) in REQUIRED_TABLES {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![table],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(StoreError::MissingTable(table.to_string()));
        }

        // Table names come from the static schema, never from a request.
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let present = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(column) = first_missing_column(columns, &present) {
            return Err(StoreError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn measurement_from_row(row: &Row<'_>) -> rusqlite::Result<Measurement> {
    Ok(Measurement {
        station: row.get(0)?,
        date: row.get(1)?,
        prcp: row.get(2)?,
        tobs: row.get(3)?,
    })
}

fn station_from_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    Ok(Station {
        station: row.get(0)?,
        name: row.get(1)?,
        latitude: row.get(2)?,
        longitude: row.get(3)?,
        elevation: row.get(4)?,
    })
}

impl ClimateStore for SqliteStore {
    fn all_measurements(&self) -> Result<Vec<Measurement>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT station, date, prcp, tobs FROM measurement ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], measurement_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("query: all_measurements returned {} records", rows.len());
        Ok(rows)
    }

    fn all_stations(&self) -> Result<Vec<Station>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT station, name, latitude, longitude, elevation FROM station ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], station_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("query: all_stations returned {} records", rows.len());
        Ok(rows)
    }

    fn latest_measurement(&self) -> Result<Option<Measurement>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT station, date, prcp, tobs FROM measurement
             WHERE date IS NOT NULL
             ORDER BY date DESC, rowid
             LIMIT 1",
        )?;
        let mut rows = stmt.query_map([], measurement_from_row)?;
        let latest = rows.next().transpose()?;
        Ok(latest)
    }

    fn measurements_after(&self, cutoff: &str) -> Result<Vec<Measurement>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT station, date, prcp, tobs FROM measurement
             WHERE date > ?1
             ORDER BY date, rowid",
        )?;
        let rows = stmt
            .query_map(params![cutoff], measurement_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("query: measurements_after({}) returned {} records", cutoff, rows.len());
        Ok(rows)
    }

    fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureSummary, StoreError> {
        let conn = self.conn()?;
        let summary = conn.query_row(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
            params![start, end],
            |row| {
                Ok(TemperatureSummary {
                    low: row.get(0)?,
                    average: row.get(1)?,
                    high: row.get(2)?,
                })
            },
        )?;
        Ok(summary)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
