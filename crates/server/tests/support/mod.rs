#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server::routes;
use server::state::ServerState;
use service::auth::service::AuthConfig;
use service::product::repository::mock::MockProductRepository;
use service::user::repository::mock::MockUserRepository;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

pub fn app_with(auth: AuthConfig) -> Router {
    let state = ServerState::new(
        Arc::new(MockUserRepository::default()),
        Arc::new(MockProductRepository::default()),
        auth,
    );
    routes::build_router(state, CorsLayer::very_permissive())
}

pub fn app() -> Router {
    app_with(AuthConfig::default())
}

pub struct Reply {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub text: String,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or_else(|e| panic!("not json ({e}): {}", self.text))
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).expect("encode body"))
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).expect("request")).await.expect("infallible");
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    Reply { status, content_type, text: String::from_utf8_lossy(&bytes).into_owned() }
}
