//! Post records kept by the ledger.

use crate::{MediaMode, MediaReference, PublishRequest, RemoteMediaId};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Ledger key of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct PostRef(String);

impl PostRef {
    /// Wrap an existing post identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for a new post.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Campaign a post belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(transparent)]
#[display("{}", _0)]
pub struct GroupRef(String);

impl GroupRef {
    /// Wrap a group identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    /// Publish attempt under way
    Queued,
    /// Live on the platform
    Published,
    /// Last attempt failed
    Failed,
}

/// Everything recorded about one post.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PostRecord {
    /// Ledger key
    post_ref: PostRef,
    /// Campaign, if any
    group_ref: Option<GroupRef>,
    /// Caption as last submitted
    caption: String,
    /// Media as last submitted
    media: Vec<MediaReference>,
    /// Mode as last submitted
    mode: MediaMode,
    /// Lifecycle status
    status: PostStatus,
    /// Published media id from the last successful attempt
    remote_media_id: Option<RemoteMediaId>,
    /// Success detail or failure reason of the last attempt
    response_message: Option<String>,
    /// When the post last went live
    published_at: Option<DateTime<Utc>>,
    /// Last ledger write
    updated_at: DateTime<Utc>,
}

impl PostRecord {
    /// A record entering the queue for `request`.
    pub fn queued(post_ref: PostRef, group_ref: Option<GroupRef>, request: &PublishRequest) -> Self {
        Self {
            post_ref,
            group_ref,
            caption: request.caption().clone(),
            media: request.media().clone(),
            mode: request.mode().mode(),
            status: PostStatus::Queued,
            remote_media_id: None,
            response_message: None,
            published_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Re-queue an existing record with edited content.
    ///
    /// The previous terminal state is kept in `remote_media_id` and
    /// `published_at` until the new attempt overwrites it.
    pub fn requeue(&mut self, group_ref: Option<GroupRef>, request: &PublishRequest) {
        if group_ref.is_some() {
            self.group_ref = group_ref;
        }
        self.caption = request.caption().clone();
        self.media = request.media().clone();
        self.mode = request.mode().mode();
        self.status = PostStatus::Queued;
        self.updated_at = Utc::now();
    }

    /// Record a successful attempt.
    pub fn mark_published(&mut self, remote_media_id: RemoteMediaId, detail: &str, at: DateTime<Utc>) {
        self.status = PostStatus::Published;
        self.remote_media_id = Some(remote_media_id);
        self.response_message = Some(detail.to_string());
        self.published_at = Some(at);
        self.updated_at = at;
    }

    /// Record a failed attempt.
    pub fn mark_failed(&mut self, reason: &str) {
        self.status = PostStatus::Failed;
        self.response_message = Some(reason.to_string());
        self.updated_at = Utc::now();
    }
}
