//! Execution polling.
//!
//! Repeatedly fetches an execution at a fixed interval until it reports
//! `finished`. Any fetch error ends the poll; there is no retry. Callers can
//! abandon a poll through a [`CancellationToken`] and may bound it with an
//! attempt count or a wall-clock timeout.

use std::future::pending;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::{ApiResult, ClientError};
use crate::models::N8nExecution;

/// Default interval between two status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Anything that can report the current state of an execution.
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    async fn get_execution(&self, execution_id: &str) -> ApiResult<N8nExecution>;
}

/// Polling settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between the end of one fetch and the start of the next.
    pub interval: Duration,

    /// Give up after this many fetches. `None` polls without limit.
    pub max_attempts: Option<u32>,

    /// Give up once this much time has passed. `None` waits without limit.
    pub timeout: Option<Duration>,
}

impl PollOptions {
    /// Unbounded polling at a fixed interval.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            timeout: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::every(DEFAULT_POLL_INTERVAL)
    }
}

/// How a poll ended.
#[derive(Debug)]
pub enum PollOutcome {
    /// The execution reported `finished = true`.
    Finished(N8nExecution),

    /// A status fetch failed.
    Failed(ClientError),

    /// The cancellation token fired before the execution finished.
    Cancelled { attempts: u32 },

    /// The attempt or time budget ran out before the execution finished.
    TimedOut {
        attempts: u32,
        last: Option<N8nExecution>,
    },
}

impl PollOutcome {
    /// The finished execution, if any.
    pub fn into_execution(self) -> Option<N8nExecution> {
        match self {
            PollOutcome::Finished(execution) => Some(execution),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, PollOutcome::Finished(_))
    }
}

/// Polls one execution until it finishes, fails, is cancelled or times out.
pub struct ExecutionPoller<'a, S: ?Sized> {
    source: &'a S,
    options: PollOptions,
    cancel: CancellationToken,
}

impl<'a, S> ExecutionPoller<'a, S>
where
    S: ExecutionSource + ?Sized,
{
    /// Create a poller over an execution source.
    pub fn new(source: &'a S, options: PollOptions) -> Self {
        Self {
            source,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an external cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels this poller.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Poll `execution_id`, invoking `on_update` with every observation.
    pub async fn poll<F>(&self, execution_id: &str, mut on_update: F) -> PollOutcome
    where
        F: FnMut(&N8nExecution),
    {
        let deadline = self.options.timeout.map(|t| Instant::now() + t);
        let mut attempts: u32 = 0;
        let mut last: Option<N8nExecution> = None;

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!(execution_id, attempts, "Execution poll cancelled");
                return PollOutcome::Cancelled { attempts };
            }

            attempts += 1;

            let fetched = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!(execution_id, attempts, "Execution poll cancelled");
                    return PollOutcome::Cancelled { attempts };
                }
                _ = wait_for(deadline) => {
                    tracing::warn!(execution_id, attempts, "Execution poll timed out");
                    return PollOutcome::TimedOut { attempts, last };
                }
                fetched = self.source.get_execution(execution_id) => fetched,
            };

            let execution = match fetched {
                Ok(execution) => execution,
                Err(e) => {
                    tracing::warn!(execution_id, attempts, error = %e, "Execution poll failed");
                    return PollOutcome::Failed(e);
                }
            };

            on_update(&execution);

            if execution.finished {
                tracing::info!(
                    execution_id,
                    attempts,
                    status = %execution.status,
                    "Execution finished"
                );
                return PollOutcome::Finished(execution);
            }

            tracing::debug!(execution_id, attempts, status = %execution.status, "Execution still running");

            let next_tick = Instant::now() + self.options.interval;
            let out_of_attempts = self
                .options
                .max_attempts
                .is_some_and(|max| attempts >= max);
            let out_of_time = deadline.is_some_and(|d| next_tick > d);

            if out_of_attempts || out_of_time {
                tracing::warn!(execution_id, attempts, "Execution poll timed out");
                return PollOutcome::TimedOut {
                    attempts,
                    last: Some(execution),
                };
            }

            last = Some(execution);

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::info!(execution_id, attempts, "Execution poll cancelled");
                    return PollOutcome::Cancelled { attempts };
                }
                _ = sleep(self.options.interval) => {}
            }
        }
    }
}

/// Resolves at the deadline, or never when there is none.
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending::<()>().await,
    }
}
