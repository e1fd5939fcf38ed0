//! Outbound Telegram notifications

use std::time::Duration;

use compact_str::{format_compact, CompactString};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::result::{HomewatchError, Result};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Message delivery failure, carrying the text that was not delivered
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure talking to the Telegram API
    #[error("failed to send message {text:?}: {source}")]
    Http {
        text: String,
        #[source]
        source: reqwest::Error,
    },

    /// Telegram rejected the request
    #[error("failed to send message {text:?}: telegram returned HTTP {status}: {description}")]
    Api {
        text: String,
        status: u16,
        description: String,
    },
}

/// Sends plain-text messages to one statically configured chat
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: CompactString,
    token: CompactString,
    chat_id: CompactString,
}

impl TelegramNotifier {
    pub fn new(
        token: impl Into<CompactString>,
        chat_id: impl Into<CompactString>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                HomewatchError::GeneralError(format_compact!("failed to build http client: {e}"))
            })?;

        Ok(Self {
            client,
            api_base: TELEGRAM_API_BASE.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }

    /// Point the notifier at an alternate Bot API host.
    #[allow(dead_code)]
    pub fn with_api_base(mut self, api_base: impl Into<CompactString>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Send `text` to the configured chat; does not retry on failure.
    #[instrument(skip(self, text))]
    pub async fn send_message(&self, text: &str) -> std::result::Result<(), NotifyError> {
        let url = format_compact!("{}/bot{}/sendMessage", self.api_base, self.token);

        let response = self
            .client
            .post(url.as_str())
            .json(&serde_json::json!({
                "chat_id": self.chat_id.as_str(),
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| NotifyError::Http {
                text: text.to_string(),
                source: e,
            })?;

        let status = response.status();
        if status.is_success() {
            info!(chat_id = %self.chat_id, "message sent");
            debug!(text, "delivered message body");
            Ok(())
        } else {
            let description = response.text().await.unwrap_or_default();
            Err(NotifyError::Api {
                text: text.to_string(),
                status: status.as_u16(),
                description,
            })
        }
    }
}
