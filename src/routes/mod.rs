pub mod appointments;
pub mod auth;
pub mod clients;
pub mod deploy;
pub mod register;
pub mod services;
pub mod stylists;

use axum::Router;
use axum::routing::{any, get, post};
use serde::Deserialize;

use crate::state::SharedState;

/// Common list-endpoint query parameters: `q` free-text filter and
/// `ordering` column selector (`-` prefix for descending).
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub ordering: Option<String>,
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/user", get(auth::who_am_i))
        .route("/api/token/refresh", post(auth::refresh))
        // Invitation-gated registration
        .route(
            "/api/register/{token}",
            get(register::check_token).post(register::register),
        )
        // Clients
        .route(
            "/api/clients",
            get(clients::list).post(clients::create),
        )
        .route(
            "/api/clients/{id}",
            get(clients::get)
                .put(clients::update)
                .patch(clients::update)
                .delete(clients::delete),
        )
        // Stylists
        .route(
            "/api/stylists",
            get(stylists::list).post(stylists::create),
        )
        .route(
            "/api/stylists/{id}",
            get(stylists::get)
                .put(stylists::update)
                .patch(stylists::update)
                .delete(stylists::delete),
        )
        // Services
        .route(
            "/api/services",
            get(services::list).post(services::create),
        )
        .route(
            "/api/services/{id}",
            get(services::get)
                .put(services::update)
                .patch(services::update)
                .delete(services::delete),
        )
        // Appointments
        .route(
            "/api/appointments",
            get(appointments::list).post(appointments::create),
        )
        .route(
            "/api/appointments/{id}",
            get(appointments::get)
                .put(appointments::update)
                .patch(appointments::update)
                .delete(appointments::delete),
        )
}

pub fn hook_routes() -> Router<SharedState> {
    // Any method reaches the handler; non-POST is rejected there with 400
    // to match the webhook contract.
    Router::new().route("/hooks/git-push", any(deploy::git_push))
}
