//! Telegram Bot API notifier.
//!
//! Outbound only: `sendMessage` to a single configured chat.
//! Docs: <https://core.telegram.org/bots/api#sendmessage>

mod send;
pub(crate) mod types;


use hwbot_core::config::TelegramConfig;
use serde_json::Value;
use std::time::Duration;

/// Telegram's per-message text limit, in characters.
pub(crate) const MAX_MESSAGE_CHARS: usize = 4096;

/// Notifier that delivers plain-text messages to one Telegram chat.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    /// Numeric chat id, or `@channelusername` kept as a string.
    chat_id: Value,
    timeout: Duration,
}

impl TelegramNotifier {
    /// Create a notifier for `chat_id` using the bot `token`.
    pub fn new(token: &str, chat_id: &str, config: &TelegramConfig) -> Self {
        let base_url = format!("{}/bot{token}", config.api_base.trim_end_matches('/'));
        let chat_id = chat_id
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(chat_id));
        Self {
            client: reqwest::Client::new(),
            base_url,
            chat_id,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}
