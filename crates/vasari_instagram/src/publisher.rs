//! Publishing orchestrator.

use crate::ContainerPoller;
use crate::strategy::{self, FinalStep};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use vasari_core::{
    ContainerId, GroupRef, MediaContainer, PostRef, PublishOutcome, PublishRequest, PublishStage,
    RemoteMediaId,
};
use vasari_error::{LedgerResult, PublishResult};
use vasari_interface::{MediaGateway, PostLedger, Sleeper, TokioSleeper};

/// Stages one publish attempt went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishAttempt {
    stages: Vec<PublishStage>,
}

impl PublishAttempt {
    fn new() -> Self {
        Self {
            stages: vec![PublishStage::Validating],
        }
    }

    /// Current stage.
    pub fn stage(&self) -> PublishStage {
        self.stages
            .last()
            .copied()
            .unwrap_or(PublishStage::Validating)
    }

    /// Every stage entered, in order.
    pub fn stages(&self) -> &[PublishStage] {
        &self.stages
    }

    fn advance(&mut self, next: PublishStage) {
        let current = self.stage();
        if current.can_advance_to(next) {
            debug!(from = %current, to = %next, "Publish stage");
            self.stages.push(next);
        } else {
            warn!(from = %current, to = %next, "Ignoring invalid stage transition");
        }
    }
}

/// Drives one post through container creation, readiness polling and publish.
///
/// Gateway failures never escape [`Publisher::publish`]; they come back as a
/// failed [`PublishOutcome`].
#[derive(Debug)]
pub struct Publisher<G, S = TokioSleeper> {
    gateway: Arc<G>,
    poller: ContainerPoller<S>,
}

impl<G, S> Publisher<G, S>
where
    G: MediaGateway,
    S: Sleeper,
{
    /// Create a publisher over `gateway`.
    pub fn new(gateway: Arc<G>, poller: ContainerPoller<S>) -> Self {
        Self { gateway, poller }
    }

    /// The gateway in use.
    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Publish `request` and report the outcome.
    pub async fn publish(&self, request: &PublishRequest) -> PublishOutcome {
        self.publish_traced(request).await.0
    }

    /// Publish `request`, also returning the stages the attempt went through.
    #[instrument(skip_all, fields(mode = %request.mode().mode(), media = request.media().len()))]
    pub async fn publish_traced(&self, request: &PublishRequest) -> (PublishOutcome, PublishAttempt) {
        let mut attempt = PublishAttempt::new();

        let outcome = match self.run(request, &mut attempt).await {
            Ok((remote_media_id, detail)) => {
                attempt.advance(PublishStage::Succeeded);
                info!(media_id = %remote_media_id, "{}", detail);
                PublishOutcome::Published {
                    remote_media_id,
                    detail: detail.to_string(),
                }
            }
            Err(e) => {
                let stage = attempt.stage();
                attempt.advance(PublishStage::Failed);
                error!(
                    stage = %stage,
                    local = e.kind().is_local(),
                    retryable = e.kind().is_retryable(),
                    "Instagram publish error: {}",
                    e
                );
                PublishOutcome::failed(&e)
            }
        };

        (outcome, attempt)
    }

    /// Publish `request` for `post`, recording the lifecycle in `ledger`.
    ///
    /// Records Queued, then exactly one of Published or Failed.
    ///
    /// # Errors
    ///
    /// Only ledger failures are returned; publish failures are in the outcome.
    #[instrument(skip(self, ledger, request), fields(post = %post))]
    pub async fn publish_recorded<L>(
        &self,
        ledger: &L,
        post: &PostRef,
        group: Option<&GroupRef>,
        request: &PublishRequest,
    ) -> LedgerResult<PublishOutcome>
    where
        L: PostLedger + ?Sized,
    {
        ledger.record_queued(post, group, request).await?;

        let outcome = self.publish(request).await;

        match &outcome {
            PublishOutcome::Published {
                remote_media_id,
                detail,
            } => {
                ledger
                    .record_published(post, remote_media_id, detail, Utc::now())
                    .await?
            }
            PublishOutcome::Failed { message, .. } => ledger.record_failed(post, message).await?,
        }

        Ok(outcome)
    }

    async fn run(
        &self,
        request: &PublishRequest,
        attempt: &mut PublishAttempt,
    ) -> PublishResult<(RemoteMediaId, &'static str)> {
        self.gateway.ensure_configured()?;
        let strategy = strategy::select(request.mode());
        strategy.validate(request)?;

        attempt.advance(PublishStage::CreatingContainers);
        let plan = strategy.container_plan(request);
        debug!(containers = plan.len(), "Creating containers");

        let created = join_all(
            plan.iter()
                .map(|planned| self.gateway.create_container(&planned.spec)),
        )
        .await;
        let mut containers = Vec::with_capacity(created.len());
        for id in created {
            containers.push(MediaContainer::new(id?));
        }

        attempt.advance(PublishStage::Polling);
        let gateway = self.gateway.as_ref();
        let poller = &self.poller;
        let polled = join_all(containers.iter_mut().zip(&plan).map(|(container, planned)| async move {
            if planned.needs_polling {
                poller.await_ready(gateway, container).await
            } else {
                debug!(container_id = %container.id(), "Skipping readiness wait");
                container.mark_ready();
                Ok(())
            }
        }))
        .await;
        for result in polled {
            result?;
        }

        attempt.advance(PublishStage::Finalizing);
        let ready: Vec<ContainerId> = containers.iter().map(|c| c.id().clone()).collect();
        let target = match strategy.finalize(&ready, request)? {
            FinalStep::Publish(id) => id,
            FinalStep::CreateParent(spec) => {
                debug!(children = ready.len(), "Creating parent container");
                self.gateway.create_container(&spec).await?
            }
        };

        attempt.advance(PublishStage::Publishing);
        let remote_media_id = self.gateway.publish_container(&target).await?;

        Ok((remote_media_id, strategy.detail(request)))
    }
}
