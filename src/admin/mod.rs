//! Admin API exposing the resource catalogue.
//!
//! # Routes
//! - `GET /admin/status`: version and snapshot counts
//! - `GET /admin/resources`: sorted (pattern, method) list with base path
//! - `GET /admin/urls`: canonical URL patterns
//! - `GET /admin/diagnostics`: problems found while building
//! - `POST /admin/refresh`: rebuild from the registry
//!
//! All routes require `Authorization: Bearer <api_key>`.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/resources", get(get_resources))
        .route("/admin/urls", get(get_urls))
        .route("/admin/diagnostics", get(get_diagnostics))
        .route("/admin/refresh", post(post_refresh))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
