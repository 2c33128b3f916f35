//! Seams between the publishing core and its collaborators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use vasari_core::{
    ContainerId, ContainerSpec, ContainerStatus, GroupRef, PostRecord, PostRef, PublishRequest,
    RemoteMediaId,
};
use vasari_error::{LedgerResult, PublishResult};

/// Authenticated access to the platform's container API.
///
/// Implementations report a missing credential as a configuration error
/// without issuing the call.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    /// Create a media container and return its remote id.
    async fn create_container(&self, spec: &ContainerSpec) -> PublishResult<ContainerId>;

    /// Publish a ready container and return the published media id.
    async fn publish_container(&self, container: &ContainerId) -> PublishResult<RemoteMediaId>;

    /// Fetch the processing status of a container.
    async fn container_status(&self, container: &ContainerId) -> PublishResult<ContainerStatus>;

    /// Fail fast when the gateway could not authenticate any call.
    fn ensure_configured(&self) -> PublishResult<()> {
        Ok(())
    }
}

/// Persisted lifecycle of posts.
///
/// Writes are upserts keyed by [`PostRef`]; the ledger is their only writer.
#[async_trait]
pub trait PostLedger: Send + Sync {
    /// Record that a publish attempt for `post` is starting.
    ///
    /// Creates the record, or re-queues an existing one with the new content.
    async fn record_queued(
        &self,
        post: &PostRef,
        group: Option<&GroupRef>,
        request: &PublishRequest,
    ) -> LedgerResult<()>;

    /// Record a successful attempt.
    async fn record_published(
        &self,
        post: &PostRef,
        remote_media_id: &RemoteMediaId,
        detail: &str,
        at: DateTime<Utc>,
    ) -> LedgerResult<()>;

    /// Record a failed attempt.
    async fn record_failed(&self, post: &PostRef, reason: &str) -> LedgerResult<()>;

    /// Look up a post.
    async fn find(&self, post: &PostRef) -> LedgerResult<Option<PostRecord>>;

    /// All posts, most recently updated first.
    async fn list(&self) -> LedgerResult<Vec<PostRecord>>;
}

/// Suspends the current task between status checks.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Read-only view of the platform credentials.
pub trait PlatformConfig: Send + Sync {
    /// Base URL of the graph API, without trailing slash.
    fn graph_url(&self) -> &str;

    /// Account that owns published media.
    fn account_id(&self) -> Option<&str>;

    /// Access token used on every call.
    fn access_token(&self) -> Option<&str>;

    /// Whether both credential and account id are present.
    fn is_configured(&self) -> bool {
        let present = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());
        present(self.access_token()) && present(self.account_id())
    }
}
