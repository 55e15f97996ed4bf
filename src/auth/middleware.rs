//! Shared state and session extractors.

use super::access::AccessPipeline;
use super::membership::MembershipGate;
use super::session::{login_location, session_user_id};
use super::verify::BotSecret;
use crate::config::Config;
use crate::error::AppError;
use crate::storage::PresentationStore;
use crate::telegram::TelegramApi;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{request::Parts, Method},
};
use axum_extra::extract::CookieJar;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub secret: Arc<BotSecret>,
    pub store: Arc<dyn PresentationStore>,
    pub telegram: Arc<dyn TelegramApi>,
    pub access: AccessPipeline,
}

impl AppState {
    /// Wire collaborators together. The bot secret is derived once here.
    pub fn new(
        config: Config,
        store: Arc<dyn PresentationStore>,
        telegram: Arc<dyn TelegramApi>,
    ) -> Self {
        let secret = BotSecret::derive(&config.bot_token);
        let gate = MembershipGate::new(
            telegram.clone(),
            Duration::from_secs(config.membership_timeout_secs),
        );
        let access = AccessPipeline::new(store.clone(), gate);

        Self {
            config: Arc::new(config),
            secret: Arc::new(secret),
            store,
            telegram,
            access,
        }
    }
}

/// Path to come back to after login.
///
/// Only safe methods return to the requested path; the browser follows the
/// post-login redirect with GET, so other methods return to the dashboard.
fn return_path(parts: &Parts) -> &str {
    if parts.method == Method::GET || parts.method == Method::HEAD {
        parts.uri.path()
    } else {
        "/"
    }
}

/// Logged-in user extractor.
///
/// Reads the `user_id` cookie. Without one, redirects (303) to the login
/// page, returning to the requested path for GET requests.
pub struct SessionUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let user_id = session_user_id(&jar)
            .ok_or_else(|| AppError::Redirect(login_location(return_path(parts))))?;

        Ok(SessionUser { user_id })
    }
}

/// Optional logged-in user extractor. Never rejects.
impl OptionalFromRequestParts<AppState> for SessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(
            <SessionUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
                .await
                .ok(),
        )
    }
}

/// Admin-only session extractor.
///
/// Requires a session whose user ID is listed in `ADMIN_IDS`.
/// Returns 403 Forbidden otherwise.
pub struct AdminSession(pub SessionUser);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session =
            <SessionUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;

        if !state.config.is_admin(session.user_id) {
            tracing::warn!(action = "admin_denied", user_id = session.user_id, "Non-admin attempted admin action");
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(AdminSession(session))
    }
}
