//! Telegram Bot API collaborator.
//!
//! The web layer depends on [`TelegramApi`] only; [`BotClient`] is the
//! HTTP implementation used in production.

pub mod client;

pub use client::BotClient;

use crate::views::escape_html;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// Transport failure. The URL (which embeds the bot token) is stripped.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Malformed Bot API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err.without_url())
    }
}

/// Operations the web layer needs from the messaging service.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// `getChatMember`: the user's current status in `chat_id`.
    async fn get_chat_member_status(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMemberStatus, TelegramError>;

    /// `sendMessage` with HTML parse mode, into `topic_id` when given.
    async fn send_message(
        &self,
        chat_id: i64,
        topic_id: Option<i64>,
        text: &str,
    ) -> Result<(), TelegramError>;
}

/// Membership status as reported by `getChatMember`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    #[serde(other)]
    Unknown,
}

impl ChatMemberStatus {
    /// Only creators, administrators and plain members may view content.
    pub fn grants_access(self) -> bool {
        matches!(
            self,
            ChatMemberStatus::Creator | ChatMemberStatus::Administrator | ChatMemberStatus::Member
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMemberStatus::Creator => "creator",
            ChatMemberStatus::Administrator => "administrator",
            ChatMemberStatus::Member => "member",
            ChatMemberStatus::Restricted => "restricted",
            ChatMemberStatus::Left => "left",
            ChatMemberStatus::Kicked => "kicked",
            ChatMemberStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ChatMemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Bot API objects (only the fields we read)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatMemberUpdated {
    pub chat: Chat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub channel_post: Option<Message>,
    pub my_chat_member: Option<ChatMemberUpdated>,
}

/// HTML announcement for a newly available presentation.
pub fn announcement_text(title: &str, view_url: &str) -> String {
    let title = escape_html(title);
    format!(
        "📚 <b>{title}</b>\n\n👇 Көру үшін басыңыз:\n<a href=\"{}\">{title}</a>",
        escape_html(view_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_deserialization() {
        let cases = [
            ("\"creator\"", ChatMemberStatus::Creator),
            ("\"administrator\"", ChatMemberStatus::Administrator),
            ("\"member\"", ChatMemberStatus::Member),
            ("\"restricted\"", ChatMemberStatus::Restricted),
            ("\"left\"", ChatMemberStatus::Left),
            ("\"kicked\"", ChatMemberStatus::Kicked),
            ("\"banned_forever\"", ChatMemberStatus::Unknown),
        ];
        for (json, expected) in cases {
            let status: ChatMemberStatus = serde_json::from_str(json).unwrap();
            assert_eq!(status, expected, "status {}", json);
        }
    }

    #[test]
    fn test_grants_access() {
        assert!(ChatMemberStatus::Creator.grants_access());
        assert!(ChatMemberStatus::Administrator.grants_access());
        assert!(ChatMemberStatus::Member.grants_access());
        assert!(!ChatMemberStatus::Restricted.grants_access());
        assert!(!ChatMemberStatus::Left.grants_access());
        assert!(!ChatMemberStatus::Kicked.grants_access());
        assert!(!ChatMemberStatus::Unknown.grants_access());
    }

    #[test]
    fn test_announcement_text_escapes_title() {
        let text = announcement_text("Fractions <5th> & more", "https://x.test/view/p1");
        assert!(text.starts_with("📚 <b>Fractions &lt;5th&gt; &amp; more</b>"));
        assert!(text.contains("<a href=\"https://x.test/view/p1\">Fractions &lt;5th&gt; &amp; more</a>"));
    }

    #[test]
    fn test_update_deserialization() {
        let update: Update = serde_json::from_str(
            r#"{"update_id":10,"channel_post":{"message_id":1,"date":0,"chat":{"id":-1003814950604,"type":"channel","title":"Grade 5"}}}"#,
        )
        .unwrap();
        assert_eq!(update.update_id, 10);
        assert!(update.message.is_none());
        let chat = update.channel_post.unwrap().chat;
        assert_eq!(chat.id, -1003814950604);
        assert_eq!(chat.kind, "channel");
        assert_eq!(chat.title.as_deref(), Some("Grade 5"));
    }
}
