//! Container readiness polling.

use crate::PollingConfig;
use std::time::Duration;
use tracing::{info, instrument, warn};
use vasari_core::{ContainerState, MediaContainer};
use vasari_error::{PublishError, PublishErrorKind, PublishResult};
use vasari_interface::{MediaGateway, Sleeper, TokioSleeper};

/// Polls a container until the platform finishes processing it.
///
/// `FINISHED` succeeds at once, `ERROR` and `EXPIRED` fail at once, anything
/// else waits one interval and checks again. The poller never waits after
/// the last permitted check.
#[derive(Debug, Clone)]
pub struct ContainerPoller<S = TokioSleeper> {
    sleeper: S,
    max_attempts: u32,
    interval: Duration,
}

impl ContainerPoller<TokioSleeper> {
    /// Poller sleeping on the tokio timer.
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self::with_sleeper(TokioSleeper, max_attempts, interval)
    }

    /// Poller using the configured budget.
    pub fn from_config(config: &PollingConfig) -> Self {
        Self::new(*config.max_attempts(), config.interval())
    }
}

impl Default for ContainerPoller<TokioSleeper> {
    fn default() -> Self {
        Self::from_config(&PollingConfig::default())
    }
}

impl<S: Sleeper> ContainerPoller<S> {
    /// Poller with a custom sleeper. A budget of zero is raised to one check.
    pub fn with_sleeper(sleeper: S, max_attempts: u32, interval: Duration) -> Self {
        Self {
            sleeper,
            max_attempts: max_attempts.max(1),
            interval,
        }
    }

    /// Status checks allowed per container.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait between checks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until `container` is ready.
    ///
    /// # Errors
    ///
    /// - `ProcessingFailed` when the platform reports `ERROR` or `EXPIRED`,
    ///   or the container was already failed
    /// - `ProcessingTimeout` when the budget runs out first
    /// - whatever the gateway returns for a failed status check
    #[instrument(skip(self, gateway, container), fields(container_id = %container.id()))]
    pub async fn await_ready<G>(&self, gateway: &G, container: &mut MediaContainer) -> PublishResult<()>
    where
        G: MediaGateway + ?Sized,
    {
        if !container.begin_polling() {
            return match container.state() {
                ContainerState::Ready => Ok(()),
                state => Err(PublishError::new(PublishErrorKind::ProcessingFailed {
                    container: container.id().to_string(),
                    status: state.to_string(),
                })),
            };
        }

        info!("Waiting for container {} to be ready...", container.id());

        for attempt in 1..=self.max_attempts {
            let status = match gateway.container_status(container.id()).await {
                Ok(status) => status,
                Err(e) => {
                    container.mark_failed();
                    return Err(e);
                }
            };
            info!(
                "Container {} status check {}/{}: {}",
                container.id(),
                attempt,
                self.max_attempts,
                status
            );

            match container.observe(status) {
                ContainerState::Ready => {
                    info!("Container {} is ready", container.id());
                    return Ok(());
                }
                ContainerState::Failed | ContainerState::Expired => {
                    warn!(%status, "Container {} failed processing", container.id());
                    return Err(PublishError::new(PublishErrorKind::ProcessingFailed {
                        container: container.id().to_string(),
                        status: status.to_string(),
                    }));
                }
                ContainerState::Created | ContainerState::Polling => {}
            }

            if attempt < self.max_attempts {
                self.sleeper.sleep(self.interval).await;
            }
        }

        container.mark_failed();
        warn!(attempts = self.max_attempts, "Container {} still processing", container.id());
        Err(PublishError::new(PublishErrorKind::ProcessingTimeout {
            container: container.id().to_string(),
            attempts: self.max_attempts,
        }))
    }
}
