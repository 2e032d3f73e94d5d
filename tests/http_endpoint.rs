/// End-to-end tests for the HTTP endpoint
///
/// Binds a real tiny_http server on an ephemeral port, backed by a
/// fixture dataset, and talks to it over TCP with a blocking client.
///
/// Run with: cargo test --test http_endpoint

mod common;

use std::sync::Arc;
use std::thread;

use climate_service::endpoint::EndpointServer;
use climate_service::error::StoreError;
use climate_service::store::{ClimateStore, SqliteStore};
use climate_service::store::sqlite::create_schema;
use rusqlite::Connection;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Start a server on 127.0.0.1 and return its base URL.
///
/// The serving thread is detached; it ends with the test process.
fn spawn_server(store: Arc<dyn ClimateStore>) -> String {
    let server = EndpointServer::bind("127.0.0.1:0", store, 2).expect("server should bind");
    let addr = server.local_addr().expect("server should listen on TCP");
    thread::spawn(move || server.run());
    format!("http://{}", addr)
}

fn fixture_server() -> String {
    spawn_server(Arc::new(common::fixture_store()))
}

fn get_json(url: &str) -> (u16, serde_json::Value) {
    let response = reqwest::blocking::get(url).expect("request should complete");
    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().expect("body should be JSON");
    (status, body)
}

// ---------------------------------------------------------------------------
// Routes over HTTP
// ---------------------------------------------------------------------------

#[test]
fn test_index_lists_routes_as_html() {
    let base = fixture_server();
    let response = reqwest::blocking::get(format!("{}/", base)).unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"), "got {}", content_type);

    let body = response.text().unwrap();
    assert!(body.starts_with("Available Routes:<br/>"));
    assert!(body.contains("/api/v1.0/precipitation"));
}

#[test]
fn test_stations_over_http() {
    let base = fixture_server();
    let (status, body) = get_json(&format!("{}/api/v1.0/stations", base));
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), common::STATIONS.len());
    assert_eq!(body[0]["station_id"], "USC00519397");
}

#[test]
fn test_tobs_over_http_respects_cutoff() {
    let base = fixture_server();
    let (status, body) = get_json(&format!("{}/api/v1.0/tobs", base));
    assert_eq!(status, 200);

    for entry in body.as_array().unwrap() {
        let (date, _) = entry.as_object().unwrap().iter().next().unwrap();
        assert!(date.as_str() > "2016-08-23", "{} is not after the cutoff", date);
    }
}

#[test]
fn test_reversed_range_over_http_matches_forward_range() {
    let base = fixture_server();
    let (_, forward) = get_json(&format!("{}/api/v1.0/2016-01-01/2017-01-01", base));
    let (status, reversed) = get_json(&format!("{}/api/v1.0/2017-01-01/2016-01-01", base));
    assert_eq!(status, 200);
    assert_eq!(forward, reversed);
}

#[test]
fn test_future_start_date_over_http_returns_nulls() {
    let base = fixture_server();
    let (status, body) = get_json(&format!("{}/api/v1.0/2099-01-01", base));
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!([{ "low": null, "average": null, "high": null }]));
}

#[test]
fn test_malformed_date_over_http_is_client_error() {
    let base = fixture_server();
    let (status, body) = get_json(&format!("{}/api/v1.0/not-a-date", base));
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("not-a-date"));
}

#[test]
fn test_tobs_on_empty_dataset_over_http_is_server_error() {
    let base = spawn_server(Arc::new(common::empty_store()));
    let (status, body) = get_json(&format!("{}/api/v1.0/tobs", base));
    assert_eq!(status, 500);
    assert!(body["error"].is_string());
}

#[test]
fn test_post_is_rejected() {
    let base = fixture_server();
    let response = reqwest::blocking::Client::new()
        .post(format!("{}/api/v1.0/stations", base))
        .send()
        .unwrap();
    assert_eq!(response.status().as_u16(), 405);
}

#[test]
fn test_head_is_answered_without_body() {
    let base = fixture_server();
    let response = reqwest::blocking::Client::new()
        .head(format!("{}/api/v1.0/stations", base))
        .send()
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.bytes().unwrap().len(), 0, "HEAD response must have no body");
}

#[test]
fn test_space_padded_date_over_http_is_client_error() {
    let base = fixture_server();
    let (status, _) = get_json(&format!("{}/api/v1.0/%202016-01-01", base));
    assert_eq!(status, 400);
}

#[test]
fn test_concurrent_requests_are_all_answered() {
    let base = fixture_server();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let url = format!("{}/api/v1.0/precipitation", base);
            thread::spawn(move || get_json(&url))
        })
        .collect();

    for handle in handles {
        let (status, body) = handle.join().unwrap();
        assert_eq!(status, 200);
        assert_eq!(body.as_array().unwrap().len(), (17 + 23) * common::STATIONS.len());
    }
}

// ---------------------------------------------------------------------------
// Dataset file
// ---------------------------------------------------------------------------

#[test]
fn test_serves_read_only_dataset_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        create_schema(&conn).unwrap();
        common::insert_days(&conn, "2017-08-01", "2017-08-23");
    }

    let store = SqliteStore::open_read_only(&path).expect("dataset should open");
    let base = spawn_server(Arc::new(store));
    let (status, body) = get_json(&format!("{}/api/v1.0/tobs", base));
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 23 * common::STATIONS.len());
}

#[test]
fn test_dataset_without_station_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);")
            .unwrap();
    }

    match SqliteStore::open_read_only(&path) {
        Err(StoreError::MissingTable(table)) => assert_eq!(table, "station"),
        Err(other) => panic!("expected MissingTable, got {}", other),
        Ok(_) => panic!("a dataset without a station table must not open"),
    }
}
