//! Login, logout and the Telegram widget callback.

use crate::auth::middleware::AppState;
use crate::auth::session;
use crate::auth::verify::{verify, LoginAssertion};
use crate::error::AppError;
use crate::views;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect_to: Option<String>,
}

/// Accept only same-origin relative paths as post-login targets.
///
/// Control characters are refused too: they cannot go in a `Location` header.
pub fn safe_redirect_target(target: Option<&str>) -> &str {
    match target {
        Some(t)
            if t.starts_with('/')
                && !t.starts_with("//")
                && !t.starts_with("/\\")
                && !t.bytes().any(|b| b < 0x20 || b == 0x7f) =>
        {
            t
        }
        _ => "/",
    }
}

/// GET /login — Telegram Login Widget page
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    let mut auth_url = format!("{}/auth/telegram", state.config.base_url);
    let target = safe_redirect_target(query.redirect_to.as_deref());
    if target != "/" {
        auth_url.push_str("?redirect_to=");
        auth_url.push_str(&urlencoding::encode(target));
    }

    Html(views::login_page(&state.config.bot_username, &auth_url))
}

/// GET /logout — Clear the session cookie
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    tracing::info!(action = "logout", "Session cleared");
    (jar.add(session::revoke()), Redirect::to("/login"))
}

/// GET /auth/telegram — Verify the widget assertion and start a session
pub async fn telegram_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(fields): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let redirect_to = fields
        .iter()
        .find(|(k, _)| k == "redirect_to")
        .map(|(_, v)| v.clone());

    let assertion = LoginAssertion::from_fields(fields);

    let identity = verify(&assertion, &state.secret).map_err(|e| {
        tracing::warn!(action = "auth_failed", reason = %e, "Login assertion rejected");
        AppError::Unauthorized("Authentication failed".to_string())
    })?;

    tracing::info!(
        action = "login",
        user_id = identity.user_id,
        username = identity.username.as_deref().unwrap_or(""),
        "User authenticated"
    );

    let target = safe_redirect_target(redirect_to.as_deref()).to_string();
    Ok((jar.add(session::issue(&identity)), Redirect::to(&target)))
}
