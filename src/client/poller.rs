//! The poll loop: fetch, validate, notify, advance, sleep

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{sync::broadcast, time::sleep};
use tracing::{debug, error, info, instrument};

use super::{api::StatusApi, validate::check_response};
use crate::{
    domain::parse_status,
    notifier::TelegramNotifier,
    result::{HomewatchError, Result},
};

const GREETING: &str = "Привет, я твой личный ассистент.\n\
    Я буду сообщать когда проект взят на проверку и есть ли замечания.\n\
    Если у меня возникнут трудности, я напишу.";

/// Periodic poller for homework review statuses
///
/// Owns the query cursor and the fixed polling cadence. Every iteration
/// ends with the same sleep, whether the cycle succeeded or failed; no
/// failure short of process shutdown stops the loop.
#[derive(Debug)]
pub struct StatusPoller {
    api: Arc<StatusApi>,
    notifier: Arc<TelegramNotifier>,
    interval: Duration,
    cursor: i64,
    shutdown_tx: broadcast::Sender<()>,
}

impl StatusPoller {
    /// Create a poller whose query window starts now.
    ///
    /// The cursor is not persisted: a restart resets the window to the
    /// current wall-clock time.
    pub fn new(api: Arc<StatusApi>, notifier: Arc<TelegramNotifier>, interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            api,
            notifier,
            interval,
            cursor: Utc::now().timestamp(),
            shutdown_tx,
        }
    }

    /// Get a shutdown sender for external shutdown control
    pub fn shutdown_sender(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Start of the next query window
    #[allow(dead_code)]
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run the poll loop until a shutdown signal arrives.
    ///
    /// The greeting doubles as a startup connectivity check: if it cannot
    /// be delivered, the process is better off failing fast than polling
    /// into a dead chat.
    #[instrument(skip(self), fields(interval = ?self.interval))]
    pub async fn start(mut self) -> Result<()> {
        info!(cursor = self.cursor, "starting status poller");
        self.notifier.send_message(GREETING).await?;

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            if let Err(err) = self.poll_once().await {
                self.report_cycle_failure(err).await;
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = shutdown_rx.recv() => {
                    info!("status poller shutting down");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Run a single poll cycle.
    ///
    /// Any failure propagates before the cursor advances, so the next
    /// cycle retries the same query window.
    pub(crate) async fn poll_once(&mut self) -> Result<()> {
        let response = self.api.fetch(self.cursor).await?;
        let payload = check_response(&response)?;

        if let Some(entry) = payload.homeworks.first() {
            let message = parse_status(entry)?;
            self.notifier.send_message(&message).await?;
        } else {
            debug!("no homework updates in this window");
        }

        self.cursor = payload.current_date;
        Ok(())
    }

    /// Apply the per-cycle failure policy.
    ///
    /// Request, shape, and parse failures are logged and the loop moves
    /// on; an undelivered notification is never re-reported through the
    /// same channel. Anything else is additionally reported to the chat,
    /// best-effort.
    async fn report_cycle_failure(&self, err: HomewatchError) {
        match &err {
            HomewatchError::Client(e) if e.is_request_error() => {
                error!(error = %e, cursor = self.cursor, "status request failed");
            },
            HomewatchError::Client(e) => {
                error!(error = %e, "malformed status response");
            },
            HomewatchError::StatusParse(e) => {
                error!(error = %e, "could not extract a status message");
            },
            HomewatchError::Notify(e) => {
                error!(error = %e, "notification delivery failed");
            },
            _ => {
                error!(error = %err, "unexpected failure in poll cycle");
                let report = format!("Сбой в работе программы: {err}");
                if let Err(send_err) = self.notifier.send_message(&report).await {
                    error!(error = %send_err, "failed to report the failure to the chat");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::ApiConfig;

    fn test_poller() -> StatusPoller {
        let api = StatusApi::new(ApiConfig::new(
            "https://practicum.example.com/homework_statuses/",
            "test-token",
        ))
        .unwrap();
        let notifier = TelegramNotifier::new("tg-token", "424242").unwrap();

        StatusPoller::new(
            Arc::new(api),
            Arc::new(notifier),
            Duration::from_secs(600),
        )
    }

    #[test]
    fn test_poller_creation() {
        let poller = test_poller();
        assert_eq!(poller.interval, Duration::from_secs(600));
        // Cursor starts at process wall-clock time, well after the epoch.
        assert!(poller.cursor() > 1_500_000_000);
    }

    #[test]
    fn test_shutdown_sender_reaches_subscribers() {
        let poller = test_poller();
        let sender = poller.shutdown_sender();
        let mut receiver = poller.shutdown_tx.subscribe();

        sender.send(()).unwrap();
        assert!(receiver.try_recv().is_ok());
    }
}
