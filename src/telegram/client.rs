//! reqwest-based Bot API client.

use super::{ChatMemberStatus, TelegramApi, TelegramError, Update, User};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Bot API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Per-call timeout for regular (non long-polling) methods.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Bot API client.
///
/// The token is part of every request URL, so it never appears in errors or
/// logs produced here.
pub struct BotClient {
    client: Client,
    token: String,
    api_base: String,
}

/// Response envelope shared by every Bot API method.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Serialize)]
struct GetChatMemberRequest {
    chat_id: i64,
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct ChatMember {
    status: ChatMemberStatus,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_thread_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 3],
}

#[derive(Debug, Serialize)]
struct NoParams {}

impl BotClient {
    /// Create a client against a custom Bot API server (self-hosted or tests).
    pub fn with_base_url(token: String, api_base: String) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// `getMe`: the bot's own account. Fails on an invalid token.
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &NoParams {}, REQUEST_TIMEOUT).await
    }

    /// `getUpdates` long poll, waiting up to `timeout_secs` for new updates.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message", "channel_post", "my_chat_member"],
        };
        let http_timeout = REQUEST_TIMEOUT + Duration::from_secs(timeout_secs);
        self.call("getUpdates", &request, http_timeout).await
    }

    async fn call<P, R>(&self, method: &str, params: &P, timeout: Duration) -> Result<R, TelegramError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.api_base, self.token, method);
        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // Bot API errors come back as non-2xx with the same JSON envelope
        let envelope: ApiResponse<R> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(TelegramError::Api {
                    code: i64::from(status.as_u16()),
                    description: format!("HTTP {}", status),
                });
            }
            Err(e) => return Err(TelegramError::Decode(e)),
        };

        match (envelope.ok, envelope.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(TelegramError::Api {
                code: envelope
                    .error_code
                    .unwrap_or_else(|| i64::from(status.as_u16())),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("{} failed", method)),
            }),
        }
    }
}

#[async_trait]
impl TelegramApi for BotClient {
    async fn get_chat_member_status(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMemberStatus, TelegramError> {
        let member: ChatMember = self
            .call(
                "getChatMember",
                &GetChatMemberRequest { chat_id, user_id },
                REQUEST_TIMEOUT,
            )
            .await?;
        Ok(member.status)
    }

    async fn send_message(
        &self,
        chat_id: i64,
        topic_id: Option<i64>,
        text: &str,
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode: "HTML",
            message_thread_id: topic_id,
        };
        let _: IgnoredAny = self.call("sendMessage", &request, REQUEST_TIMEOUT).await?;
        Ok(())
    }
}
