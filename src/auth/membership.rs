//! Channel membership gate.
//!
//! Membership is looked up live on every call and never cached, so leaving
//! or being removed from a channel revokes access immediately.

use crate::telegram::{TelegramApi, TelegramError};
use std::sync::Arc;
use std::time::Duration;

/// Membership could not be determined. Never treated as a denial.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("membership lookup failed: {0}")]
    Transport(#[from] TelegramError),

    #[error("membership lookup timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Clone)]
pub struct MembershipGate {
    telegram: Arc<dyn TelegramApi>,
    timeout: Duration,
}

impl MembershipGate {
    pub fn new(telegram: Arc<dyn TelegramApi>, timeout: Duration) -> Self {
        Self { telegram, timeout }
    }

    /// `Ok(true)` for creator/administrator/member, `Ok(false)` for any other
    /// reported status, `Err` when the lookup itself failed. No retries.
    pub async fn is_member(&self, user_id: i64, channel_id: i64) -> Result<bool, GateError> {
        let status = tokio::time::timeout(
            self.timeout,
            self.telegram.get_chat_member_status(channel_id, user_id),
        )
        .await
        .map_err(|_| GateError::Timeout(self.timeout))??;

        tracing::debug!(user_id, channel_id, status = %status, "Membership checked");

        Ok(status.grants_access())
    }
}
