/// Storage accessor for the climate dataset
///
/// `ClimateStore` is the query interface the handlers consume: filter, order
/// and aggregate over the two record types. Each implementation owns exactly
/// one logical connection and serialises access to it internally, so a
/// store can be shared across worker threads behind an `Arc`.
///
/// Date arguments are `YYYY-MM-DD` strings already normalised by the caller.

pub mod schema;
pub mod sqlite;

use crate::error::StoreError;
use crate::model::{Measurement, Station, TemperatureSummary};

pub use self::sqlite::SqliteStore;

pub trait ClimateStore: Send + Sync {
    /// Every measurement, in storage order.
    fn all_measurements(&self) -> Result<Vec<Measurement>, StoreError>;

    /// Every station, in storage order.
    fn all_stations(&self) -> Result<Vec<Station>, StoreError>;

    /// The measurement with the greatest date string, if any exist.
    fn latest_measurement(&self) -> Result<Option<Measurement>, StoreError>;

    /// Measurements with `date > cutoff`, ascending by date.
    fn measurements_after(&self, cutoff: &str) -> Result<Vec<Measurement>, StoreError>;

    /// MIN/AVG/MAX of observed temperature for `date >= start` and, when
    /// given, `date <= end`. Empty ranges yield an all-`None` summary.
    fn temperature_summary(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureSummary, StoreError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}
