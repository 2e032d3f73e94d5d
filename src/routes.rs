/// Request path routing
///
/// Maps a request URL onto one of the API routes. Path-variable dates are
/// percent-decoded here but parsed by the handlers, so a malformed date still
/// reaches its handler and is reported as a client error.

/// API version prefix shared by every data route.
pub const API_PREFIX: &str = "/api/v1.0";

/// Paths advertised in 404 responses.
pub const AVAILABLE_ENDPOINTS: &[&str] = &[
    "/",
    "/health",
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/{start}",
    "/api/v1.0/{start}/{end}",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    Health,
    Precipitation,
    Stations,
    TemperatureObservations,
    SummaryFrom { start: String },
    SummaryBetween { start: String, end: String },
}

impl Route {
    /// Resolve a raw request URL (path plus optional query string).
    pub fn from_url(url: &str) -> Option<Route> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        match path {
            "" => return Some(Route::Index),
            "/health" => return Some(Route::Health),
            _ => {}
        }

        let rest = path.strip_prefix(API_PREFIX)?.strip_prefix('/')?;
        let segments: Vec<String> = rest.split('/').map(decode_segment).collect();

        match segments.as_slice() {
            [name] if name == "precipitation" => Some(Route::Precipitation),
            [name] if name == "stations" => Some(Route::Stations),
            [name] if name == "tobs" => Some(Route::TemperatureObservations),
            [start] if !start.is_empty() => Some(Route::SummaryFrom { start: start.clone() }),
            [start, end] if !start.is_empty() && !end.is_empty() => Some(Route::SummaryBetween {
                start: start.clone(),
                end: end.clone(),
            }),
            _ => None,
        }
    }
}

/// Percent-decode a path segment, keeping it verbatim if it is not valid UTF-8.
fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
