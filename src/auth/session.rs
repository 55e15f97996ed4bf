//! Session cookie issuance and revocation.
//!
//! The session is the Telegram user ID in a `user_id` cookie. It carries no
//! signature and there is no server-side record, so logout only clears the
//! browser's copy: a copied cookie stays valid until it expires. Every
//! protected access re-checks channel membership regardless.

use crate::models::VerifiedIdentity;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "user_id";

/// Fixed lifetime from issuance; not sliding.
pub const SESSION_MAX_AGE: Duration = Duration::days(30);

/// Session cookie for a freshly verified identity.
///
/// `SameSite=None` is required because the login widget redirects back from
/// Telegram's origin; browsers only accept it together with `Secure`.
pub fn issue(identity: &VerifiedIdentity) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, identity.user_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(SESSION_MAX_AGE)
        .build()
}

/// Cookie that expires the session immediately.
pub fn revoke() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// User ID from the session cookie, if present and numeric.
pub fn session_user_id(jar: &CookieJar) -> Option<i64> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| c.value().trim().parse::<i64>().ok())
}

/// Login page location that brings the user back to `return_to` afterwards.
pub fn login_location(return_to: &str) -> String {
    if return_to.is_empty() || return_to == "/" {
        "/login".to_string()
    } else {
        format!("/login?redirect_to={}", urlencoding::encode(return_to))
    }
}
