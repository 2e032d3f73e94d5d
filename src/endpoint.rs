/// HTTP endpoint for the climate API
///
/// Serves the read-only JSON API over the Hawaii climate dataset.
///
/// Endpoints:
/// - GET / - Route listing (HTML)
/// - GET /health - Service health check
/// - GET /api/v1.0/precipitation - `[{date: prcp}]`
/// - GET /api/v1.0/stations - Station metadata
/// - GET /api/v1.0/tobs - Last year of observed temperatures
/// - GET /api/v1.0/{start} - `[{low, average, high}]` from start
/// - GET /api/v1.0/{start}/{end} - `[{low, average, high}]` between dates

use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use threadpool::ThreadPool;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::error::ApiError;
use crate::handlers;
use crate::routes::{AVAILABLE_ENDPOINTS, Route};
use crate::store::ClimateStore;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("Failed to start HTTP server on {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

// ---------------------------------------------------------------------------
// Response shaping
// ---------------------------------------------------------------------------

/// A fully rendered response, independent of the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// JSON response; falls back to a 500 if the value cannot be encoded.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec_pretty(value) {
            Ok(body) => ApiResponse { status, content_type: CONTENT_TYPE_JSON, body },
            Err(e) => {
                log::error!("Failed to encode response body: {}", e);
                ApiResponse {
                    status: 500,
                    content_type: CONTENT_TYPE_JSON,
                    body: br#"{"error": "Failed to encode response"}"#.to_vec(),
                }
            }
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        ApiResponse { status, content_type: CONTENT_TYPE_HTML, body: body.as_bytes().to_vec() }
    }

    fn error(err: &ApiError, url: &str) -> Self {
        Self::json(
            err.status_code(),
            &serde_json::json!({
                "error": err.to_string(),
                "path": url,
            }),
        )
    }

    fn into_tiny_http(self) -> Response<Cursor<Vec<u8>>> {
        let response = Response::from_data(self.body).with_status_code(StatusCode::from(self.status));
        match Header::from_bytes(&b"Content-Type"[..], self.content_type.as_bytes()) {
            Ok(header) => response.with_header(header),
            Err(()) => response,
        }
    }
}

/// Render the JSON body of a handler result, or its error.
fn render<T: Serialize>(result: Result<T, ApiError>, url: &str) -> ApiResponse {
    match result {
        Ok(value) => ApiResponse::json(200, &value),
        Err(e) => ApiResponse::error(&e, url),
    }
}

/// Route and handle a single request.
///
/// HEAD is answered like GET with the body dropped.
pub fn handle_request(method: &Method, url: &str, store: &dyn ClimateStore) -> ApiResponse {
    match method {
        Method::Get => route_request(url, store),
        Method::Head => ApiResponse { body: Vec::new(), ..route_request(url, store) },
        _ => ApiResponse::json(
            405,
            &serde_json::json!({
                "error": "Method not allowed",
                "allowed": ["GET", "HEAD"],
            }),
        ),
    }
}

fn route_request(url: &str, store: &dyn ClimateStore) -> ApiResponse {
    let Some(route) = Route::from_url(url) else {
        return ApiResponse::json(
            404,
            &serde_json::json!({
                "error": "Not found",
                "available_endpoints": AVAILABLE_ENDPOINTS,
            }),
        );
    };

    match route {
        Route::Index => ApiResponse::html(200, handlers::index()),
        Route::Health => handle_health(store),
        Route::Precipitation => render(handlers::precipitation(store), url),
        Route::Stations => render(handlers::stations(store), url),
        Route::TemperatureObservations => render(handlers::temperature_observations(store), url),
        Route::SummaryFrom { start } => render(handlers::summary_from(store, &start), url),
        Route::SummaryBetween { start, end } => {
            render(handlers::summary_between(store, &start, &end), url)
        }
    }
}

/// Handle /health endpoint
fn handle_health(store: &dyn ClimateStore) -> ApiResponse {
    ApiResponse::json(
        200,
        &serde_json::json!({
            "status": "ok",
            "service": "climate_service",
            "version": env!("CARGO_PKG_VERSION"),
            "backend": store.backend_name(),
        }),
    )
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// HTTP server bound to an address, dispatching requests to a worker pool.
pub struct EndpointServer {
    server: Server,
    store: Arc<dyn ClimateStore>,
    workers: usize,
}

impl EndpointServer {
    /// Bind the listener. Use port 0 to let the OS pick one.
    pub fn bind(
        addr: &str,
        store: Arc<dyn ClimateStore>,
        workers: usize,
    ) -> Result<Self, EndpointError> {
        let server = Server::http(addr).map_err(|e| EndpointError::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })?;

        Ok(EndpointServer { server, store, workers: workers.max(1) })
    }

    /// The bound socket address, if listening on TCP.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve requests until the listener shuts down.
    pub fn run(self) {
        let pool = ThreadPool::new(self.workers);
        log::info!(
            "Serving {} backend with {} workers",
            self.store.backend_name(),
            self.workers
        );

        for request in self.server.incoming_requests() {
            let store = Arc::clone(&self.store);
            pool.execute(move || respond(request, store.as_ref()));
        }

        pool.join();
    }
}

/// Handle one request on a worker thread and send the response.
fn respond(request: Request, store: &dyn ClimateStore) {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_string();

    let response = handle_request(&method, &url, store);
    let status = response.status;
    let elapsed_ms = started.elapsed().as_millis();

    match status {
        500.. => log::error!("{} {} -> {} ({} ms)", method, url, status, elapsed_ms),
        400..=499 => log::warn!("{} {} -> {} ({} ms)", method, url, status, elapsed_ms),
        _ => log::info!("{} {} -> {} ({} ms)", method, url, status, elapsed_ms),
    }

    if let Err(e) = request.respond(response.into_tiny_http()) {
        log::error!("Failed to send response for {}: {}", url, e);
    }
}

/// Start HTTP endpoint server on the given address and block serving it.
pub fn start_endpoint_server(
    addr: &str,
    store: Arc<dyn ClimateStore>,
    workers: usize,
) -> Result<(), EndpointError> {
    let server = EndpointServer::bind(addr, store, workers)?;
    println!("📡 HTTP endpoint listening on http://{}", addr);
    for endpoint in AVAILABLE_ENDPOINTS {
        println!("   GET {}", endpoint);
    }
    println!();

    server.run();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
