use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc, state::ServerState};

pub mod auth;
pub mod extract;
pub mod products;
pub mod services;

pub async fn index() -> &'static str {
    "Storefront API is running"
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public reads, token-gated writes and
/// static uploads.
pub fn build_router(state: ServerState, cors: CorsLayer, max_body_bytes: usize) -> Router {
    let uploads_dir = ServeDir::new(state.uploads.root());
    let uploads_prefix = state.uploads.public_prefix().to_string();

    // Public routes
    let public = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/register", axum::routing::post(auth::register))
        .route("/login", axum::routing::post(auth::login))
        .route("/products", get(products::list))
        .route("/products/:id", get(products::get))
        .route("/services", get(services::list))
        .route("/services/:id", get(services::get));

    // Routes behind the bearer token
    let protected = Router::new()
        .route("/me", get(auth::me))
        .route("/products", axum::routing::post(products::create))
        .route("/products/:id", axum::routing::put(products::update).delete(products::delete))
        .route("/services", axum::routing::post(services::create))
        .route("/services/:id", axum::routing::put(services::update).delete(services::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer));

    public
        .merge(protected)
        .nest_service(&uploads_prefix, uploads_dir)
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
