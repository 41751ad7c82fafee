//! HTTP surface for the dashboard.
//!
//! `POST /weather` takes `{ origin?, destination? }` and always answers with
//! both slots; only a body that is not that shape is rejected.

use anyhow::Context;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use route_weather_core::{WeatherQuery, WeatherResponse, WeatherService};
use serde::Serialize;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: WeatherService,
}

/// JSON body for every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    MalformedRequest(String),
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::MalformedRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// POST /weather - Weather for a shipment's origin and destination
async fn lookup_weather(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WeatherResponse>, ApiError> {
    let query: WeatherQuery = serde_json::from_slice(&body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting malformed weather request");
        ApiError::MalformedRequest(format!("Invalid request body: {err}"))
    })?;

    Ok(Json(state.service.lookup(&query).await))
}

/// OPTIONS /weather - Browser pre-flight
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// GET /health - Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Create the HTTP router
pub fn create_router(service: WeatherService) -> Router {
    let state = AppState { service };

    // Set on every response, pre-flight and errors included.
    let allow_origin = SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    let allow_methods = SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    let allow_headers = SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );

    Router::new()
        .route("/health", get(health_check))
        .route("/weather", post(lookup_weather).options(preflight))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(allow_origin)
        .layer(allow_methods)
        .layer(allow_headers)
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_http_server(service: WeatherService, bind: &str) -> anyhow::Result<()> {
    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {bind}"))?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;

    Ok(())
}
