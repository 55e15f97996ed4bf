//! Request-time access decision for a presentation.

use super::membership::{GateError, MembershipGate};
use super::session::login_location;
use crate::error::AppError;
use crate::models::Presentation;
use crate::storage::{PresentationStore, StoreError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// No usable session; carries the path to return to after login.
    #[error("no session")]
    NoSession { return_to: String },

    #[error("presentation {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gate(#[from] GateError),

    /// Membership confirmed absent.
    #[error("user {user_id} is not a member of channel {channel_id}")]
    Denied { user_id: i64, channel_id: i64 },
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NoSession { return_to } => AppError::Redirect(login_location(&return_to)),
            AccessError::NotFound(_) => AppError::NotFound("Presentation not found".to_string()),
            AccessError::Denied { .. } => AppError::Forbidden(
                "You are not a member of the required channel to view this presentation."
                    .to_string(),
            ),
            AccessError::Store(e) => AppError::Internal(format!("Store error: {}", e)),
            AccessError::Gate(e) => AppError::Internal(format!("Permission check failed: {}", e)),
        }
    }
}

/// Session → lookup → live membership check.
#[derive(Clone)]
pub struct AccessPipeline {
    store: Arc<dyn PresentationStore>,
    gate: MembershipGate,
}

impl AccessPipeline {
    pub fn new(store: Arc<dyn PresentationStore>, gate: MembershipGate) -> Self {
        Self { store, gate }
    }

    /// Decide whether `user_id` may view presentation `id`.
    ///
    /// `return_to` is the requested path, used for the login bounce when
    /// there is no session.
    pub async fn authorize(
        &self,
        user_id: Option<i64>,
        id: &str,
        return_to: &str,
    ) -> Result<Presentation, AccessError> {
        let user_id = user_id.ok_or_else(|| AccessError::NoSession {
            return_to: return_to.to_string(),
        })?;

        let presentation = self
            .store
            .get(id)
            .await?
            .ok_or_else(|| AccessError::NotFound(id.to_string()))?;

        if !self.gate.is_member(user_id, presentation.channel_id).await? {
            tracing::info!(
                action = "access_denied",
                user_id,
                presentation_id = %id,
                channel_id = presentation.channel_id,
                "User is not a channel member"
            );
            return Err(AccessError::Denied {
                user_id,
                channel_id: presentation.channel_id,
            });
        }

        Ok(presentation)
    }
}
