use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::{FatalConfigError, FetchSettings};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("could not reach the messaging API: {0}")]
    Transport(String),
    #[error("messaging API returned HTTP {status}: {description}")]
    HttpStatus { status: u16, description: String },
    #[error("messaging API rejected the message: {0}")]
    Rejected(String),
}

/// Delivers text to the fixed destination chat.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API `sendMessage` client.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    send_url: Url,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        api_base: &str,
        bot_token: &str,
        chat_id: &str,
        settings: &FetchSettings,
    ) -> Result<Self, FatalConfigError> {
        let raw = format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), bot_token);
        let send_url = Url::parse(&raw).map_err(|err| FatalConfigError::InvalidSetting {
            name: "telegram_api",
            message: err.to_string(),
        })?;
        Ok(Self {
            client: settings.build_client()?,
            send_url,
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(&SendMessage {
            chat_id: &self.chat_id,
            text,
        })
        .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let response = self
            .client
            .post(self.send_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(transport_error)?;
        let reply = serde_json::from_slice::<BotReply>(&bytes).ok();

        if !status.is_success() {
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
                description: reply
                    .and_then(|reply| reply.description)
                    .unwrap_or_else(|| status.to_string()),
            });
        }

        match reply {
            Some(BotReply { ok: true, .. }) => Ok(()),
            Some(BotReply { description, .. }) => Err(NotifyError::Rejected(
                description.unwrap_or_else(|| "no description".to_string()),
            )),
            None => Err(NotifyError::Rejected("unreadable reply".to_string())),
        }
    }
}

// The request URL carries the bot token, keep it out of logs.
fn transport_error(err: reqwest::Error) -> NotifyError {
    NotifyError::Transport(err.without_url().to_string())
}
