//! Poll loop: fetch → validate → format-if-changed → notify → advance cursor → sleep.
//!
//! Every error raised inside a cycle stops at `run_cycle`; it is logged and
//! reported to the chat, and the loop carries on.


use hwbot_core::{
    error::HwError,
    response::{check_response, current_date},
    status::parse_status,
    traits::{Notifier, ReviewApi},
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Prefix of the chat message sent when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// What a single poll cycle ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered (best effort).
    Notified,
    /// The latest status matches the last one sent.
    Unchanged,
    /// The API returned no submissions in the window.
    NoUpdates,
    /// The cycle failed and a failure report was sent.
    Failed,
}

/// Owns the cursor and the last-sent message; drives the API and the notifier.
pub struct Poller {
    api: Box<dyn ReviewApi>,
    notifier: Box<dyn Notifier>,
    retry_period: Duration,
    /// Lower bound (Unix seconds) of the next query window.
    cursor: i64,
    /// Last status message delivered, for deduplication.
    last_message: Option<String>,
}

impl Poller {
    pub fn new(
        api: Box<dyn ReviewApi>,
        notifier: Box<dyn Notifier>,
        retry_period: Duration,
        cursor: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            cursor,
            last_message: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    #[cfg(test)]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Poll forever, sleeping `retry_period` between cycles. Returns on Ctrl-C.
    pub async fn run(self) {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("poller: cannot listen for Ctrl-C: {e}");
                std::future::pending::<()>().await;
            }
        })
        .await;
    }

    /// Poll until `shutdown` completes.
    ///
    /// `shutdown` is created once and polled across iterations, so a signal
    /// that lands mid-cycle is seen when that cycle ends.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "poller: watching {} every {}s, notifying via {}",
            self.api.name(),
            self.retry_period.as_secs(),
            self.notifier.name()
        );

        tokio::pin!(shutdown);

        loop {
            let outcome = self.run_cycle().await;
            debug!("poller: cycle finished: {outcome:?}");

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("poller: interrupted, shutting down");
                    break;
                }
                _ = tokio::time::sleep(self.retry_period) => {}
            }
        }
    }

    /// Run one cycle. Never fails: errors are logged and reported to the chat.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let mut server_date = None;

        let outcome = match self.poll(&mut server_date).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = format!("{FAILURE_PREFIX}{e}");
                error!("{message}");
                send_message(self.notifier.as_ref(), &message).await;
                CycleOutcome::Failed
            }
        };

        match server_date {
            Some(date) => {
                let window = i64::try_from(self.retry_period.as_secs()).unwrap_or(i64::MAX);
                self.cursor = date.saturating_sub(window);
                debug!("poller: cursor moved to {}", self.cursor);
            }
            None => warn!(
                "poller: no server current_date this cycle, cursor stays at {}",
                self.cursor
            ),
        }

        outcome
    }

    /// Fetch, validate and notify. `server_date` is filled as soon as a
    /// response carrying `current_date` arrives, even if later checks fail.
    async fn poll(&mut self, server_date: &mut Option<i64>) -> Result<CycleOutcome, HwError> {
        let response = self.api.get_api_answer(self.cursor).await?;
        *server_date = current_date(&response);

        let homeworks = check_response(&response)?;
        let Some(latest) = homeworks.first() else {
            debug!("no new statuses in the response");
            return Ok(CycleOutcome::NoUpdates);
        };

        let message = parse_status(latest)?;
        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!("status unchanged, not notifying");
            return Ok(CycleOutcome::Unchanged);
        }

        self.last_message = Some(message.clone());
        send_message(self.notifier.as_ref(), &message).await;
        Ok(CycleOutcome::Notified)
    }
}

/// Deliver `text` through `notifier`. Failures are logged and swallowed.
pub async fn send_message(notifier: &dyn Notifier, text: &str) {
    match notifier.send(text).await {
        Ok(()) => debug!("message sent via {}", notifier.name()),
        Err(e) => error!("failed to send message via {}: {e}", notifier.name()),
    }
}
