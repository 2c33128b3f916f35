//! Per-mode container planning.
//!
//! Each content mode knows how to validate a request, which containers to
//! create for it, and how to reach the final publish target once those
//! containers are ready.

mod carousel;
mod reels;
mod stories;

pub use carousel::CarouselStrategy;
pub use reels::ReelsStrategy;
pub use stories::StoriesStrategy;

use vasari_core::{
    ContainerId, ContainerSpec, ContentMode, MAX_CAPTION_CHARS, MAX_MEDIA_ITEMS, PublishRequest,
};
use vasari_error::{PublishError, PublishResult};

/// One container the strategy wants created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedContainer {
    /// What to create
    pub spec: ContainerSpec,
    /// Whether to wait for processing before publishing
    pub needs_polling: bool,
}

/// How to reach the publish target from the ready containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalStep {
    /// Publish this container directly.
    Publish(ContainerId),
    /// Create this parent container and publish it.
    CreateParent(ContainerSpec),
}

/// Mode-specific publishing rules.
pub trait ModeStrategy: Send + Sync {
    /// Reject requests this mode cannot publish.
    fn validate(&self, request: &PublishRequest) -> PublishResult<()>;

    /// Containers to create, in media order.
    fn container_plan(&self, request: &PublishRequest) -> Vec<PlannedContainer>;

    /// Resolve the publish target from the planned containers' ids.
    fn finalize(&self, ready: &[ContainerId], request: &PublishRequest) -> PublishResult<FinalStep>;

    /// Success message for a published request.
    fn detail(&self, request: &PublishRequest) -> &'static str;
}

/// Pick the strategy for a content mode.
pub fn select(mode: &ContentMode) -> Box<dyn ModeStrategy + '_> {
    match mode {
        ContentMode::Carousel { location_id } => Box::new(CarouselStrategy::new(location_id.as_deref())),
        ContentMode::Reels {
            cover_url,
            share_to_feed,
            location_id,
        } => Box::new(ReelsStrategy::new(
            cover_url.as_deref(),
            share_to_feed.unwrap_or(true),
            location_id.as_deref(),
        )),
        ContentMode::Stories => Box::new(StoriesStrategy),
    }
}

/// Checks shared by every mode.
fn validate_common(request: &PublishRequest, missing_media: &str) -> PublishResult<()> {
    if request.media().is_empty() {
        return Err(PublishError::validation(missing_media));
    }

    if request.media().len() > MAX_MEDIA_ITEMS {
        return Err(PublishError::validation(format!(
            "A post can have at most {} media items (got {})",
            MAX_MEDIA_ITEMS,
            request.media().len()
        )));
    }

    let caption_chars = request.caption().chars().count();
    if caption_chars > MAX_CAPTION_CHARS {
        return Err(PublishError::validation(format!(
            "Caption exceeds Instagram limit of {} characters ({})",
            MAX_CAPTION_CHARS, caption_chars
        )));
    }

    Ok(())
}

/// Video modes take exactly one media reference.
fn validate_single(request: &PublishRequest, mode: &str) -> PublishResult<()> {
    validate_common(request, &format!("Media URL is required for {}", mode))?;

    if request.media().len() != 1 {
        return Err(PublishError::validation(format!(
            "{} take exactly one media item (got {})",
            mode,
            request.media().len()
        )));
    }

    Ok(())
}

/// The only planned container, or a validation error if there is none.
fn single_target(ready: &[ContainerId]) -> PublishResult<FinalStep> {
    match ready {
        [only] => Ok(FinalStep::Publish(only.clone())),
        _ => Err(PublishError::validation(format!(
            "Expected exactly one container, found {}",
            ready.len()
        ))),
    }
}
