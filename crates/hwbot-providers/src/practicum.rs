//! Yandex Practicum homework-status API.
//!
//! One authenticated `GET <endpoint>?from_date=<unix>` per call. No retry
//! here; the poll loop re-invokes on its own schedule.

use async_trait::async_trait;
use hwbot_core::{error::HwError, traits::ReviewApi};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Review API client authenticated with an OAuth token.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    auth: String,
    timeout: Duration,
}

impl PracticumClient {
    /// Create from config values.
    pub fn from_config(token: &str, endpoint: String, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            auth: format!("OAuth {token}"),
            timeout,
        }
    }
}

#[async_trait]
impl ReviewApi for PracticumClient {
    fn name(&self) -> &str {
        "practicum"
    }

    async fn get_api_answer(&self, from_date: i64) -> Result<Value, HwError> {
        debug!("practicum: GET {} from_date={from_date}", self.endpoint);

        let resp = self
            .client
            .get(&self.endpoint)
            .header("Authorization", &self.auth)
            .query(&[("from_date", from_date)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!("review API endpoint unavailable: {e}");
                HwError::Request(format!("endpoint {} unavailable: {e}", self.endpoint))
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            error!("review API endpoint answered {status}");
            return Err(HwError::Request(format!(
                "server not responding: {} returned {status}",
                self.endpoint
            )));
        }

        resp.json::<Value>().await.map_err(|e| {
            error!("review API sent an unreadable body: {e}");
            HwError::Request(format!("failed to decode API response: {e}"))
        })
    }
}
