//! Chat ID discovery.
//!
//! Long-polls `getUpdates` and logs every chat the bot sees, so operators
//! can look up the `channel_id` to put on a presentation. Post anything in
//! the channel (or add the bot to it) while this runs.

use crate::telegram::{BotClient, Chat, TelegramError, Update};
use std::time::Duration;

const POLL_TIMEOUT_SECS: u64 = 60;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Where in an update a chat was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    ChannelPost,
    Message,
    AddedToChat,
}

impl Sighting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sighting::ChannelPost => "channel_post",
            Sighting::Message => "message",
            Sighting::AddedToChat => "added_to_chat",
        }
    }
}

/// The chat an update refers to, if any.
pub fn chat_of(update: &Update) -> Option<(Sighting, &Chat)> {
    if let Some(post) = &update.channel_post {
        Some((Sighting::ChannelPost, &post.chat))
    } else if let Some(message) = &update.message {
        Some((Sighting::Message, &message.chat))
    } else {
        update
            .my_chat_member
            .as_ref()
            .map(|m| (Sighting::AddedToChat, &m.chat))
    }
}

/// Run the discovery loop until the process is stopped.
///
/// Poll failures are logged and retried after a short delay.
pub async fn run_discovery_loop(client: &BotClient) {
    let mut offset = 0;

    loop {
        match poll_once(client, offset).await {
            Ok(next) => offset = next,
            Err(e) => {
                tracing::error!(error = %e, "getUpdates failed");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

/// Fetch one batch, log its chats, and return the next offset.
async fn poll_once(client: &BotClient, offset: i64) -> Result<i64, TelegramError> {
    let updates = client.get_updates(offset, POLL_TIMEOUT_SECS).await?;
    let mut next = offset;

    for update in &updates {
        if let Some((sighting, chat)) = chat_of(update) {
            tracing::info!(
                action = "chat_found",
                source = sighting.as_str(),
                chat_id = chat.id,
                chat_type = %chat.kind,
                title = chat.title.as_deref().unwrap_or(""),
                username = chat.username.as_deref().unwrap_or(""),
                "Chat found"
            );
        }
        next = next.max(update.update_id + 1);
    }

    Ok(next)
}
