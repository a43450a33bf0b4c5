//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{IataCode, parse_date};
use crate::planner::{Planner, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `cors_origins` are the browser origins allowed to call the API.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint, with catalog size and load statistics.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        airports: state.catalog.airport_count(),
        flights: state.catalog.flight_count(),
        stats: state.catalog.stats().clone(),
    })
}

/// Search itineraries between two airports on a date.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItineraryResponse>>, AppError> {
    let origin = parse_airport(&query.origin, "origin")?;
    let destination = parse_airport(&query.destination, "destination")?;

    if origin == destination {
        return Ok(Json(Vec::new()));
    }

    for (code, role) in [(origin, "origin"), (destination, "destination")] {
        if !state.catalog.contains_airport(&code) {
            return Err(AppError::BadRequest {
                message: format!("Invalid {role} airport: {code}"),
            });
        }
    }

    let date = parse_date(&query.date).map_err(|_| AppError::BadRequest {
        message: "Invalid date. Use YYYY-MM-DD.".to_string(),
    })?;

    // Pure computation; keep it off the async workers.
    let request = SearchRequest::new(origin, destination, date);
    let itineraries: Vec<ItineraryResponse> = tokio::task::spawn_blocking(move || {
        Planner::new(&state.catalog, &state.config)
            .search(&request)
            .itineraries
            .iter()
            .map(ItineraryResponse::from_itinerary)
            .collect()
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })?;

    Ok(Json(itineraries))
}

/// Trim, uppercase and validate an IATA code from the query string.
fn parse_airport(raw: &str, role: &str) -> Result<IataCode, AppError> {
    IataCode::parse_normalized(raw).map_err(|_| AppError::BadRequest {
        message: format!("Invalid {role} airport: {}", raw.trim()),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FlightCatalog;
    use crate::domain::{Airport, Flight, FlightInfo, parse_local_datetime};
    use crate::planner::SearchConfig;
    use axum::body::Body;
    use axum::http::{Request, header};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use tower::ServiceExt;

    fn code(s: &str) -> IataCode {
        IataCode::parse(s).unwrap()
    }

    fn state() -> AppState {
        let jfk = Airport::new(
            code("JFK"),
            "John F. Kennedy International",
            "New York",
            "US",
            chrono_tz::America::New_York,
        );
        let lax = Airport::new(
            code("LAX"),
            "Los Angeles International",
            "Los Angeles",
            "US",
            chrono_tz::America::Los_Angeles,
        );
        let sp101 = Flight::new(
            FlightInfo::new("SP101", "SkyPath Airways", "A320"),
            &jfk,
            parse_local_datetime("2024-03-15T08:30:00").unwrap(),
            &lax,
            parse_local_datetime("2024-03-15T11:45:00").unwrap(),
            Decimal::new(29900, 2),
        )
        .unwrap();

        AppState::new(
            FlightCatalog::new(vec![jfk, lax], vec![sp101]),
            SearchConfig::default(),
        )
    }

    fn app() -> Router {
        create_router(state(), &["http://localhost:3000".to_string()])
    }

    async fn fetch(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_catalog_size() {
        let (status, body) = fetch("/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["airports"], 2);
        assert_eq!(body["flights"], 1);
        assert!(body["stats"].is_object());
    }

    #[tokio::test]
    async fn search_returns_itineraries() {
        let (status, body) = fetch("/search?origin=JFK&destination=LAX&date=2024-03-15").await;

        assert_eq!(status, StatusCode::OK);
        let itineraries = body.as_array().unwrap();
        assert_eq!(itineraries.len(), 1);

        let first = &itineraries[0];
        assert_eq!(first["segments"][0]["origin"], "JFK");
        assert_eq!(first["segments"][0]["destination"], "LAX");
        assert_eq!(first["totalDurationMinutes"], 375);
        assert_eq!(first["totalPrice"], 299.0);
    }

    #[tokio::test]
    async fn search_normalizes_codes() {
        let (status, body) = fetch("/search?origin=%20jfk&destination=lax&date=2024-03-15").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn malformed_code_is_bad_request() {
        let (status, body) = fetch("/search?origin=JF&destination=LAX&date=2024-03-15").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("origin"));
    }

    #[tokio::test]
    async fn unknown_airport_is_bad_request() {
        let (status, body) = fetch("/search?origin=ZZZ&destination=LAX&date=2024-03-15").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid origin airport: ZZZ");
    }

    #[tokio::test]
    async fn bad_date_is_bad_request() {
        let (status, body) = fetch("/search?origin=JFK&destination=LAX&date=15-03-2024").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date. Use YYYY-MM-DD.");
    }

    #[tokio::test]
    async fn missing_parameter_is_bad_request() {
        let (status, _) = fetch("/search?origin=JFK&date=2024-03-15").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn same_origin_and_destination_is_empty_list() {
        let (status, body) = fetch("/search?origin=JFK&destination=jfk&date=2024-03-15").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn no_flights_on_date_is_empty_list() {
        let (status, body) = fetch("/search?origin=JFK&destination=LAX&date=2024-03-16").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:3000"))
        );
    }

    #[test]
    fn error_maps_to_status() {
        let response = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Internal {
            message: "boom".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
