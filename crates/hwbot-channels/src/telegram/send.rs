//! `sendMessage` delivery and the `Notifier` implementation.

use super::types::{TgResponse, TgSentMessage};
use super::{TelegramNotifier, MAX_MESSAGE_CHARS};
use async_trait::async_trait;
use hwbot_core::{error::HwError, traits::Notifier};
use tracing::debug;

impl TelegramNotifier {
    /// Send one chunk (at most `MAX_MESSAGE_CHARS` long).
    async fn send_chunk(&self, text: &str) -> Result<(), HwError> {
        let url = format!("{}/sendMessage", self.base_url);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            // The URL carries the bot token; keep it out of the error text.
            .map_err(|e| {
                HwError::Channel(format!("telegram send failed: {}", e.without_url()))
            })?;

        let status = resp.status();
        let raw = resp.text().await.unwrap_or_default();
        let parsed: Option<TgResponse<TgSentMessage>> = serde_json::from_str(&raw).ok();

        match parsed {
            Some(reply) if status.is_success() && reply.ok => {
                if let Some(msg) = reply.result {
                    debug!("telegram: delivered message {}", msg.message_id);
                }
                Ok(())
            }
            Some(reply) => Err(HwError::Channel(describe_failure(status, &reply))),
            None => Err(HwError::Channel(format!(
                "telegram send got {status}: unreadable reply"
            ))),
        }
    }
}

/// Human-readable reason for a rejected `sendMessage`.
fn describe_failure<T>(status: reqwest::StatusCode, reply: &TgResponse<T>) -> String {
    let mut out = format!(
        "telegram send got {status}: {}",
        reply.description.as_deref().unwrap_or("no description")
    );
    if let Some(code) = reply.error_code {
        out.push_str(&format!(" (error_code {code})"));
    }
    if let Some(secs) = reply.parameters.as_ref().and_then(|p| p.retry_after) {
        out.push_str(&format!(", retry after {secs}s"));
    }
    out
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), HwError> {
        for chunk in split_message(text, MAX_MESSAGE_CHARS) {
            self.send_chunk(chunk).await?;
        }
        Ok(())
    }
}

/// Split `text` into pieces of at most `max_chars` characters, preferring
/// line boundaries.
pub(crate) fn split_message(text: &str, max_chars: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        let end = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let break_at = rest[..end].rfind('\n').map(|i| i + 1).unwrap_or(end);
        chunks.push(&rest[..break_at]);
        rest = &rest[break_at..];
    }

    chunks.push(rest);
    chunks
}
