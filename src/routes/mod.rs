//! HTTP route handlers.

pub mod auth;
pub mod presentation;

use crate::auth::middleware::AppState;
use axum::{routing::get, routing::post, Router};

/// Build the router with all page and action endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(presentation::dashboard))
        .route("/view/{id}", get(presentation::view))
        // Auth endpoints
        .route("/login", get(auth::login_page))
        .route("/logout", get(auth::logout))
        .route("/auth/telegram", get(auth::telegram_callback))
        // Admin endpoints
        .route("/post/{id}", post(presentation::announce))
}
