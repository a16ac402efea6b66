//! Background polling of the server's console feed.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval, timeout, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{api::GameApi, json::ConsoleResponse, RequestError};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Shortest interval the poller accepts, smaller ones are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Time between the *starts* of two fetches.
    /// At least [`MIN_POLL_INTERVAL`].
    pub interval: Duration,
    /// Upper bound for a single fetch. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// Fetches `/api/console` right away and then every
/// [`PollSettings::interval`], until cancelled.
///
/// A fetch is always finished (or timed out) before the next
/// one starts, so there's never more than one request in flight.
/// If a fetch overruns the interval the next one starts as soon
/// as it's done and the schedule shifts, missed ticks aren't
/// made up for. Errors are handed to the callback like results,
/// they don't stop the poller.
///
/// Dropping the poller cancels it.
pub struct ConsolePoller {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ConsolePoller {
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(api: Arc<dyn GameApi>, settings: PollSettings, on_result: F) -> Self
    where
        F: FnMut(Result<ConsoleResponse, RequestError>) + Send + 'static,
    {
        Self::spawn_on(&tokio::runtime::Handle::current(), api, settings, on_result)
    }

    pub fn spawn_on<F>(
        runtime: &tokio::runtime::Handle,
        api: Arc<dyn GameApi>,
        settings: PollSettings,
        mut on_result: F,
    ) -> Self
    where
        F: FnMut(Result<ConsoleResponse, RequestError>) + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = runtime.spawn(async move {
            let mut ticker = interval(settings.interval.max(MIN_POLL_INTERVAL));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = task_token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    biased;
                    () = task_token.cancelled() => break,
                    result = fetch(api.as_ref(), settings.timeout) => result,
                };
                on_result(result);
            }
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Stops polling. A fetch in progress is abandoned
    /// and its result never delivered.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels and waits for the task to wind down.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            _ = handle.await;
        }
    }
}

impl Drop for ConsolePoller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn fetch(
    api: &dyn GameApi,
    limit: Option<Duration>,
) -> Result<ConsoleResponse, RequestError> {
    match limit {
        Some(limit) => timeout(limit, api.console())
            .await
            .unwrap_or(Err(RequestError::Timeout(limit))),
        None => api.console().await,
    }
}
