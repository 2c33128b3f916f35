//! Post ledger adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};
use vasari_core::{GroupRef, PostRecord, PostRef, PublishRequest, RemoteMediaId};
use vasari_error::{LedgerError, LedgerErrorKind, LedgerResult};
use vasari_interface::PostLedger;

fn not_found(post: &PostRef) -> LedgerError {
    LedgerError::new(LedgerErrorKind::NotFound(post.to_string()))
}

fn newest_first(mut records: Vec<PostRecord>) -> Vec<PostRecord> {
    records.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
    records
}

/// In-memory ledger.
///
/// Stores records in a HashMap protected by an RwLock. All data is lost when
/// the ledger is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    records: Arc<RwLock<HashMap<PostRef, PostRecord>>>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no post is stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PostLedger for InMemoryLedger {
    async fn record_queued(
        &self,
        post: &PostRef,
        group: Option<&GroupRef>,
        request: &PublishRequest,
    ) -> LedgerResult<()> {
        let mut records = self.records.write().await;
        match records.get_mut(post) {
            Some(record) => record.requeue(group.cloned(), request),
            None => {
                records.insert(
                    post.clone(),
                    PostRecord::queued(post.clone(), group.cloned(), request),
                );
            }
        }
        Ok(())
    }

    async fn record_published(
        &self,
        post: &PostRef,
        remote_media_id: &RemoteMediaId,
        detail: &str,
        at: DateTime<Utc>,
    ) -> LedgerResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(post).ok_or_else(|| not_found(post))?;
        record.mark_published(remote_media_id.clone(), detail, at);
        Ok(())
    }

    async fn record_failed(&self, post: &PostRef, reason: &str) -> LedgerResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(post).ok_or_else(|| not_found(post))?;
        record.mark_failed(reason);
        Ok(())
    }

    async fn find(&self, post: &PostRef) -> LedgerResult<Option<PostRecord>> {
        Ok(self.records.read().await.get(post).cloned())
    }

    async fn list(&self) -> LedgerResult<Vec<PostRecord>> {
        let records = self.records.read().await.values().cloned().collect();
        Ok(newest_first(records))
    }
}

/// Ledger persisted as one JSON document.
///
/// The whole file is rewritten on every write; a process-local lock keeps
/// concurrent writers in order.
#[derive(Debug)]
pub struct JsonFileLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileLedger {
    /// Ledger stored at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> LedgerError {
        LedgerError::new(LedgerErrorKind::Io {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn load(&self) -> LedgerResult<BTreeMap<PostRef, PostRecord>> {
        if !tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.io_error(e))?
        {
            return Ok(BTreeMap::new());
        }
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn save(&self, records: &BTreeMap<PostRef, PostRecord>) -> LedgerResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))
    }

    /// Load, apply `update`, save.
    async fn update<F>(&self, update: F) -> LedgerResult<()>
    where
        F: FnOnce(&mut BTreeMap<PostRef, PostRecord>) -> LedgerResult<()> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        update(&mut records)?;
        self.save(&records).await?;
        debug!(path = ?self.path, posts = records.len(), "Ledger saved");
        Ok(())
    }
}

#[async_trait]
impl PostLedger for JsonFileLedger {
    #[instrument(skip(self, group, request), fields(post = %post))]
    async fn record_queued(
        &self,
        post: &PostRef,
        group: Option<&GroupRef>,
        request: &PublishRequest,
    ) -> LedgerResult<()> {
        self.update(|records| {
            match records.get_mut(post) {
                Some(record) => record.requeue(group.cloned(), request),
                None => {
                    records.insert(
                        post.clone(),
                        PostRecord::queued(post.clone(), group.cloned(), request),
                    );
                }
            }
            Ok(())
        })
        .await?;
        info!("Post queued");
        Ok(())
    }

    #[instrument(skip(self, detail), fields(post = %post, media_id = %remote_media_id))]
    async fn record_published(
        &self,
        post: &PostRef,
        remote_media_id: &RemoteMediaId,
        detail: &str,
        at: DateTime<Utc>,
    ) -> LedgerResult<()> {
        self.update(|records| {
            let record = records.get_mut(post).ok_or_else(|| not_found(post))?;
            record.mark_published(remote_media_id.clone(), detail, at);
            Ok(())
        })
        .await?;
        info!("Post published");
        Ok(())
    }

    #[instrument(skip(self, reason), fields(post = %post))]
    async fn record_failed(&self, post: &PostRef, reason: &str) -> LedgerResult<()> {
        self.update(|records| {
            let record = records.get_mut(post).ok_or_else(|| not_found(post))?;
            record.mark_failed(reason);
            Ok(())
        })
        .await?;
        info!("Post failed");
        Ok(())
    }

    async fn find(&self, post: &PostRef) -> LedgerResult<Option<PostRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(post))
    }

    async fn list(&self) -> LedgerResult<Vec<PostRecord>> {
        let _guard = self.lock.lock().await;
        Ok(newest_first(self.load().await?.into_values().collect()))
    }
}
