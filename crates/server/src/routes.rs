use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod bikes;
pub mod customers;
pub mod services;

pub async fn index() -> &'static str {
    "Bike Service Management API"
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::route_not_found()
}

/// Build the full application router: banner, health, OpenAPI document and the `/api` resources.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let customers = Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route("/:id", get(customers::get).put(customers::update).delete(customers::delete));

    let bikes = Router::new()
        .route("/", get(bikes::list).post(bikes::create))
        .route("/:id", get(bikes::get).delete(bikes::delete));

    // `/status` is registered ahead of `/:id`
    let services = Router::new()
        .route("/", get(services::list).post(services::create))
        .route("/status", get(services::pending_or_overdue))
        .route("/:id", get(services::get))
        .route("/:id/status", put(services::update_status))
        .route("/:id/complete", put(services::complete));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/customers", customers)
        .nest("/api/bikes", bikes)
        .nest("/api/services", services)
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
