//! Shared unit-test doubles.

use crate::models::Presentation;
use crate::telegram::{ChatMemberStatus, TelegramApi, TelegramError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Scripted [`TelegramApi`]: statuses per (chat, user), optional delay,
/// optional failure, and a log of sent messages.
#[derive(Default)]
pub struct FakeTelegram {
    pub statuses: Mutex<HashMap<(i64, i64), ChatMemberStatus>>,
    pub sent: Mutex<Vec<(i64, Option<i64>, String)>>,
    pub fail: bool,
    pub delay: Option<Duration>,
}

impl FakeTelegram {
    pub fn with_status(self, chat_id: i64, user_id: i64, status: ChatMemberStatus) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .insert((chat_id, user_id), status);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl TelegramApi for FakeTelegram {
    async fn get_chat_member_status(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMemberStatus, TelegramError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(TelegramError::Api {
                code: 502,
                description: "Bad Gateway".to_string(),
            });
        }
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(&(chat_id, user_id))
            .copied()
            .unwrap_or(ChatMemberStatus::Left))
    }

    async fn send_message(
        &self,
        chat_id: i64,
        topic_id: Option<i64>,
        text: &str,
    ) -> Result<(), TelegramError> {
        if self.fail {
            return Err(TelegramError::Api {
                code: 403,
                description: "Forbidden: bot is not a member of the channel chat".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((chat_id, topic_id, text.to_string()));
        Ok(())
    }
}

pub fn presentation(id: &str, channel_id: i64) -> Presentation {
    Presentation {
        id: id.to_string(),
        title: format!("Title {}", id),
        group_name: "5th grade".to_string(),
        embed_url: format!("https://www.canva.com/design/{}/view?embed", id),
        channel_id,
        topic_id: None,
    }
}
