//! Recording sleeper and ledger for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vasari_core::{GroupRef, PostRecord, PostRef, PublishRequest, RemoteMediaId};
use vasari_error::LedgerResult;
use vasari_instagram::InMemoryLedger;
use vasari_interface::{PostLedger, Sleeper};

/// Sleeper that returns immediately and remembers each requested wait.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits requested so far.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// One ledger write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    Queued(PostRef),
    Published(PostRef, RemoteMediaId),
    Failed(PostRef, String),
}

/// In-memory ledger that also logs every write.
#[derive(Debug, Clone, Default)]
pub struct RecordingLedger {
    inner: InMemoryLedger,
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes so far, in order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Number of Published or Failed writes.
    pub fn terminal_writes(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| !matches!(event, LedgerEvent::Queued(_)))
            .count()
    }
}

#[async_trait]
impl PostLedger for RecordingLedger {
    async fn record_queued(
        &self,
        post: &PostRef,
        group: Option<&GroupRef>,
        request: &PublishRequest,
    ) -> LedgerResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(LedgerEvent::Queued(post.clone()));
        self.inner.record_queued(post, group, request).await
    }

    async fn record_published(
        &self,
        post: &PostRef,
        remote_media_id: &RemoteMediaId,
        detail: &str,
        at: DateTime<Utc>,
    ) -> LedgerResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(LedgerEvent::Published(post.clone(), remote_media_id.clone()));
        self.inner
            .record_published(post, remote_media_id, detail, at)
            .await
    }

    async fn record_failed(&self, post: &PostRef, reason: &str) -> LedgerResult<()> {
        self.events
            .lock()
            .unwrap()
            .push(LedgerEvent::Failed(post.clone(), reason.to_string()));
        self.inner.record_failed(post, reason).await
    }

    async fn find(&self, post: &PostRef) -> LedgerResult<Option<PostRecord>> {
        self.inner.find(post).await
    }

    async fn list(&self) -> LedgerResult<Vec<PostRecord>> {
        self.inner.list().await
    }
}
