//! Dashboard, viewer and announcement endpoints.

use crate::auth::middleware::{AdminSession, AppState, SessionUser};
use crate::error::AppError;
use crate::models::group_presentations;
use crate::telegram::announcement_text;
use crate::views;
use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub posted: Option<String>,
}

/// GET / — Presentations grouped by class
pub async fn dashboard(
    State(state): State<AppState>,
    session: SessionUser,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let presentations = state.store.list().await?;
    let groups = group_presentations(presentations);
    let posted = query.posted.as_deref() == Some("true");

    Ok(Html(views::dashboard_page(
        &groups,
        posted,
        state.config.is_admin(session.user_id),
    )))
}

/// GET /view/{id} — Membership-gated viewer
pub async fn view(
    State(state): State<AppState>,
    session: Option<SessionUser>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, AppError> {
    let presentation = state
        .access
        .authorize(session.map(|s| s.user_id), &id, uri.path())
        .await?;

    // Membership is re-checked per load; nothing may cache the page
    Ok((
        [
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        Html(views::viewer_page(
            &presentation.title,
            &presentation.embed_url,
        )),
    ))
}

/// POST /post/{id} — Announce a presentation in its channel (admin only)
pub async fn announce(
    State(state): State<AppState>,
    AdminSession(admin): AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let presentation = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Presentation not found".to_string()))?;

    let view_url = format!(
        "{}/view/{}",
        state.config.base_url,
        urlencoding::encode(&presentation.id)
    );
    let text = announcement_text(&presentation.title, &view_url);

    state
        .telegram
        .send_message(presentation.channel_id, presentation.topic_id, &text)
        .await?;

    tracing::info!(
        action = "announce",
        user_id = admin.user_id,
        presentation_id = %presentation.id,
        channel_id = presentation.channel_id,
        topic_id = ?presentation.topic_id,
        "Presentation announced"
    );

    Ok(Redirect::to("/?posted=true"))
}
