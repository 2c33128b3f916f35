//! Upload, repost and lookup of posts over a ledger.

use crate::Publisher;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use vasari_core::{PostRecord, PostRef, PublishPayload};
use vasari_error::{LedgerError, LedgerErrorKind, VasariResult};
use vasari_interface::{MediaGateway, PostLedger, Sleeper, TokioSleeper};

/// Post lifecycle operations backed by a [`PostLedger`].
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vasari_core::{MediaReference, PublishPayload};
/// use vasari_instagram::{ContainerPoller, GraphGateway, InMemoryLedger, InstagramConfig, PostService, Publisher};
///
/// # async fn example() -> vasari_error::VasariResult<()> {
/// let config = Arc::new(InstagramConfig::load()?);
/// let publisher = Publisher::new(
///     Arc::new(GraphGateway::new(config.clone())),
///     ContainerPoller::from_config(config.polling()),
/// );
/// let service = PostService::new(publisher, Arc::new(InMemoryLedger::new()));
///
/// let payload = PublishPayload::builder()
///     .caption("Sunset")
///     .media_urls(vec![MediaReference::new("https://cdn.example.com/a.jpg")])
///     .build()
///     .expect("valid payload");
/// let record = service.upload(payload).await?;
/// println!("{}: {}", record.post_ref(), record.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PostService<G, L, S = TokioSleeper> {
    publisher: Publisher<G, S>,
    ledger: Arc<L>,
}

impl<G, L, S> PostService<G, L, S>
where
    G: MediaGateway,
    L: PostLedger,
    S: Sleeper,
{
    /// Create a service publishing with `publisher` and recording in `ledger`.
    pub fn new(publisher: Publisher<G, S>, ledger: Arc<L>) -> Self {
        Self { publisher, ledger }
    }

    /// The ledger in use.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Publish a new post.
    ///
    /// The returned record carries the terminal status; a failed publish is
    /// not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error only if the ledger cannot be written or read.
    #[instrument(skip_all)]
    pub async fn upload(&self, payload: PublishPayload) -> VasariResult<PostRecord> {
        let post = PostRef::generate();
        let (request, group) = payload.into_request();
        info!(post = %post, "Uploading post");

        self.publisher
            .publish_recorded(self.ledger.as_ref(), &post, group.as_ref(), &request)
            .await?;

        self.recorded(&post).await
    }

    /// Publish an existing post again with edited content.
    ///
    /// Returns `None` if the post is unknown. The group defaults to the
    /// post's current group when the payload names none.
    ///
    /// # Errors
    ///
    /// Returns an error only if the ledger cannot be written or read.
    #[instrument(skip(self, payload), fields(post = %post))]
    pub async fn repost(
        &self,
        post: &PostRef,
        payload: PublishPayload,
    ) -> VasariResult<Option<PostRecord>> {
        if self.ledger.find(post).await?.is_none() {
            warn!("Repost requested for unknown post");
            return Ok(None);
        }

        let (request, group) = payload.into_request();
        self.publisher
            .publish_recorded(self.ledger.as_ref(), post, group.as_ref(), &request)
            .await?;

        self.recorded(post).await.map(Some)
    }

    /// Look up one post.
    pub async fn find(&self, post: &PostRef) -> VasariResult<Option<PostRecord>> {
        Ok(self.ledger.find(post).await?)
    }

    /// Every post, most recently updated first.
    pub async fn list(&self) -> VasariResult<Vec<PostRecord>> {
        Ok(self.ledger.list().await?)
    }

    async fn recorded(&self, post: &PostRef) -> VasariResult<PostRecord> {
        self.ledger
            .find(post)
            .await?
            .ok_or_else(|| LedgerError::new(LedgerErrorKind::NotFound(post.to_string())).into())
    }
}
