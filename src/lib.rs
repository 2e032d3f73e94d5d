/// climate_service: read-only HTTP API over the Hawaii climate dataset.
///
/// # Module structure
///
/// ```text
/// climate_service
/// ├── model     — shared data types (Measurement, Station, TemperatureSummary, …)
/// ├── error     — StoreError / ApiError and their HTTP status mapping
/// ├── config    — service configuration loader (climate_service.toml)
/// ├── store     — ClimateStore query interface
/// │   ├── schema — statically declared measurement/station schema
/// │   └── sqlite — read-only SQLite dataset (hawaii.sqlite)
/// ├── handlers  — the API route handlers
/// ├── routes    — request path → Route resolution
/// └── endpoint  — tiny_http server with a worker pool
/// ```

/// Public modules
pub mod config;
pub mod endpoint;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod store;
