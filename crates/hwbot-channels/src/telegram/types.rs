//! Telegram Bot API deserialization types.

use serde::Deserialize;

/// Envelope of every Bot API reply.
#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
    pub parameters: Option<TgResponseParameters>,
}

/// Extra error details, e.g. the flood-control wait.
#[derive(Debug, Deserialize)]
pub(crate) struct TgResponseParameters {
    pub retry_after: Option<i64>,
}

/// The parts of a sent `Message` we look at.
#[derive(Debug, Deserialize)]
pub(crate) struct TgSentMessage {
    pub message_id: i64,
}
