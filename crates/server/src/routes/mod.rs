//! Explicit route table: every (method, path) pair the server answers is
//! registered here at startup.

pub mod products;
pub mod users;

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::metrics;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics_handler() -> impl IntoResponse {
    metrics::encode_metrics()
}

fn user_routes() -> Router<ServerState> {
    Router::new()
        .route("/user/add", post(users::create))
        .route("/user", post(users::create))
        .route("/user/getall", get(users::list))
        .route("/users", get(users::list))
        .route("/user/login", post(users::login))
        .route("/user/name/:username", get(users::get_by_username))
        .route("/user/update/:id", put(users::update))
        .route("/user/delete/:id", delete(users::delete))
        .route("/user/:id", get(users::get).put(users::update).delete(users::delete))
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route("/product/add", post(products::create))
        .route("/product", post(products::create))
        .route("/product/getall", get(products::list))
        .route("/products", get(products::list))
        .route("/product/update/:id", put(products::update))
        .route("/product/delete/:id", delete(products::delete))
        .route("/product/:id", get(products::get).put(products::update).delete(products::delete))
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .merge(user_routes())
        .merge(product_routes())
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_http))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
