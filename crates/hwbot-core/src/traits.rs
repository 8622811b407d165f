use crate::error::HwError;
use async_trait::async_trait;
use serde_json::Value;

/// Homework review API — the source of submission statuses.
///
/// The production implementation talks HTTP; tests plug in canned answers.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Human-readable API name.
    fn name(&self) -> &str;

    /// Fetch submissions updated since `from_date` (Unix seconds).
    ///
    /// Returns the decoded response body unvalidated; shape checks are
    /// `response::check_response`'s job.
    async fn get_api_answer(&self, from_date: i64) -> Result<Value, HwError>;
}

/// Messaging channel used to deliver status updates to the single recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Deliver a plain-text message to the configured chat.
    async fn send(&self, text: &str) -> Result<(), HwError>;
}
