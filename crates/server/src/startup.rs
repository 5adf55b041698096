use std::future::Future;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use configs::{AppConfig, CorsConfig};
use service::auth::service::AuthConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

/// Permissive when no origins are configured, otherwise an allow-list.
pub fn build_cors(cfg: &CorsConfig) -> CorsLayer {
    if cfg.allowed_origins.is_empty() {
        return CorsLayer::very_permissive();
    }
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any)
}

pub fn auth_config(cfg: &AppConfig) -> AuthConfig {
    AuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), token_ttl_hours: cfg.auth.token_ttl_hours }
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect the database, apply migrations, and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = ServerState::with_database(db, auth_config(cfg));
    Ok(routes::build_router(state, build_cors(&cfg.cors)))
}

/// Serve until `shutdown` resolves.
pub async fn serve(cfg: AppConfig, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "http server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    serve(cfg, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, draining connections"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
