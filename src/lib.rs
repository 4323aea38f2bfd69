pub mod auth;
pub mod config;
pub mod db;
pub mod deploy;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::rate_limit::LoginRateLimiter;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        login_limiter: LoginRateLimiter::new(),
        deploy_lock: tokio::sync::Mutex::new(()),
    });

    Router::new()
        .merge(routes::api_routes())
        .merge(routes::hook_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
